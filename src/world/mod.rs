use std::fs;
use std::path::Path;

use macroquad::prelude::KeyCode;
use thiserror::Error;
use tracing::info;

use crate::config::MAX_PLAYERS;
use crate::model::{GameEvent, PlayerColor};
use crate::world::level::Level;
use crate::world::levels::{LevelConfig, LevelsConfig};

pub mod level;
pub mod levels;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read level file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse level file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid level data: {0}")]
    Invalid(String),
}

// 整局状态：关卡表、当前关卡与各颜色胜场
pub struct World {
    config: LevelsConfig,
    current: usize,
    pub level: Level,
    wins: [u32; MAX_PLAYERS],
    seed: u64,
    rounds: u64,
}

impl Default for World {
    // 默认世界：内置三关，随机种子
    fn default() -> Self {
        Self::from_valid(LevelsConfig::default(), rand::random())
    }
}

impl World {
    // 从JSON文件加载关卡配置
    pub fn load_from_file(path: impl AsRef<Path>, seed: u64) -> Result<Self, LoadError> {
        let text = fs::read_to_string(path)?;
        let config = LevelsConfig::from_json(&text)?;
        Ok(Self::from_valid(config, seed))
    }

    pub fn new(config: LevelsConfig, seed: u64) -> Result<Self, LoadError> {
        config.validate()?;
        Ok(Self::from_valid(config, seed))
    }

    fn from_valid(config: LevelsConfig, seed: u64) -> Self {
        let current = config.start_level;
        let level = Level::new(&config.levels[current], seed);
        info!(level = current + 1, name = %level.name, "session started");
        Self {
            config,
            current,
            level,
            wins: [0; MAX_PLAYERS],
            seed,
            rounds: 0,
        }
    }

    pub fn current_config(&self) -> &LevelConfig {
        &self.config.levels[self.current]
    }

    // 从 1 开始的关卡编号
    pub fn level_number(&self) -> usize {
        self.current + 1
    }

    pub fn level_count(&self) -> usize {
        self.config.levels.len()
    }

    pub fn wins(&self, color: PlayerColor) -> u32 {
        self.wins[color.index()]
    }

    pub fn handle_key_down(&mut self, key: KeyCode) {
        self.level.handle_key_down(key);
    }

    pub fn handle_key_up(&mut self, key: KeyCode) {
        self.level.handle_key_up(key);
    }

    // 推进当前关卡，结算展示结束后自动进入下一关
    pub fn update(&mut self, dt: f32, events: &mut Vec<GameEvent>) {
        let first = events.len();
        self.level.update(dt, events);

        for event in &events[first..] {
            if let GameEvent::Finished {
                winner: Some(color),
            } = event
            {
                self.wins[color.index()] += 1;
            }
        }

        if self.level.is_finished() {
            self.advance();
        }
    }

    // 切换到下一关（末关之后回到第一关）
    pub fn advance(&mut self) {
        self.current = (self.current + 1) % self.config.levels.len();
        self.rounds += 1;
        self.level = Level::new(
            &self.config.levels[self.current],
            self.seed.wrapping_add(self.rounds),
        );
        info!(
            level = self.level_number(),
            name = %self.level.name,
            round = self.rounds,
            "next level"
        );
    }
}

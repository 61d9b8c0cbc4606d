use macroquad::prelude::*;
use ::rand::rngs::StdRng;
use ::rand::SeedableRng;
use tracing::{debug, info};

use crate::actors::hazard::{Obstacle, Platform};
use crate::actors::player::Player;
use crate::config::{CANVAS_H, CANVAS_W, COUNTDOWN_SECONDS, GAME_OVER_DELAY, PLAYER_KEYS};
use crate::model::{GameEvent, PlayerColor, PlayerId};
use crate::systems::collision::{hit_obstacle, land_on_platform, pair_mut, resolve_players};
use crate::systems::spawn::HazardSpawner;
use crate::world::levels::LevelConfig;

// 关卡状态：倒计时 -> 对战 -> 胜者展示
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LevelPhase {
    // remaining 为 1 时显示 GO!，归零后开始
    Countdown { remaining: u32, timer: f32 },
    Running,
    GameOver {
        winner: Option<PlayerColor>,
        timer: f32,
    },
}

// 单个关卡的运行时状态
pub struct Level {
    pub name: String,
    pub bounds: Vec2,
    pub phase: LevelPhase,
    pub players: Vec<Player>,
    pub obstacles: Vec<Obstacle>,
    pub platforms: Vec<Platform>,
    spawner: HazardSpawner,
    rng: StdRng,
    frame: u64,
}

impl Level {
    // 按配置生成玩家、平台与障碍生成器
    pub fn new(config: &LevelConfig, seed: u64) -> Self {
        let players = config
            .spawns
            .iter()
            .zip(PlayerColor::ALL)
            .zip(PLAYER_KEYS)
            .enumerate()
            .map(|(i, ((spawn, color), keys))| {
                let mut player = Player::new(PlayerId(i), color, spawn.to_vec2(), keys, config.physics);
                player.grounded = config.start_grounded;
                player
            })
            .collect();
        let spawner = HazardSpawner::new(config.hazards.clone());
        let platforms = spawner.platforms();

        Self {
            name: config.name.clone(),
            bounds: vec2(CANVAS_W, CANVAS_H),
            phase: LevelPhase::Countdown {
                remaining: COUNTDOWN_SECONDS + 1,
                timer: 0.0,
            },
            players,
            obstacles: Vec::new(),
            platforms,
            spawner,
            rng: StdRng::seed_from_u64(seed),
            frame: 0,
        }
    }

    pub fn handle_key_down(&mut self, key: KeyCode) {
        for player in &mut self.players {
            player.handle_key_down(key);
        }
    }

    pub fn handle_key_up(&mut self, key: KeyCode) {
        for player in &mut self.players {
            player.handle_key_up(key);
        }
    }

    // 每帧调用：倒计时与结算用真实时间，对战按帧推进
    pub fn update(&mut self, dt: f32, events: &mut Vec<GameEvent>) {
        match self.phase {
            LevelPhase::Countdown { remaining, timer } => {
                self.tick_countdown(remaining, timer + dt, events)
            }
            LevelPhase::Running => self.step(events),
            LevelPhase::GameOver { winner, timer } => {
                self.phase = LevelPhase::GameOver {
                    winner,
                    timer: timer + dt,
                };
            }
        }
    }

    fn tick_countdown(&mut self, mut remaining: u32, mut timer: f32, events: &mut Vec<GameEvent>) {
        while timer >= 1.0 && remaining > 0 {
            timer -= 1.0;
            remaining -= 1;
        }
        if remaining == 0 {
            info!(level = %self.name, players = self.players.len(), "level started");
            self.phase = LevelPhase::Running;
            events.push(GameEvent::Started);
        } else {
            self.phase = LevelPhase::Countdown { remaining, timer };
        }
    }

    // 对战中的一帧
    pub fn step(&mut self, events: &mut Vec<GameEvent>) {
        self.frame += 1;
        let bounds = self.bounds;
        let first = events.len();

        // 障碍生成、移动与出界清理
        self.spawner.spawn(&mut self.rng, bounds, &mut self.obstacles);
        for obstacle in &mut self.obstacles {
            obstacle.update();
        }
        let spawner = &self.spawner;
        self.obstacles.retain(|o| spawner.keep(o, bounds));

        // 有平台的关卡每帧重新判定是否站稳
        if !self.platforms.is_empty() {
            for player in &mut self.players {
                player.grounded = false;
                for platform in &self.platforms {
                    land_on_platform(player, platform);
                }
            }
        }

        for player in self.players.iter_mut().filter(|p| !p.out) {
            for obstacle in &self.obstacles {
                hit_obstacle(player, obstacle, events);
            }
        }

        let n = self.players.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let (a, b) = pair_mut(&mut self.players, i, j);
                if a.out || b.out {
                    continue;
                }
                resolve_players(a, b, events);
            }
        }

        for player in self.players.iter_mut().filter(|p| !p.out) {
            player.step(bounds, events);
        }

        // 帧末统一移除出局玩家
        for event in &events[first..] {
            if let GameEvent::Eliminated { color, cause, .. } = event {
                debug!(frame = self.frame, color = color.name(), ?cause, "player eliminated");
            }
        }
        self.players.retain(|p| !p.out);

        if self.players.len() <= 1 {
            let winner = self.players.first().map(|p| p.color);
            info!(
                level = %self.name,
                frame = self.frame,
                winner = winner.map(PlayerColor::name).unwrap_or("nobody"),
                "level finished"
            );
            self.phase = LevelPhase::GameOver { winner, timer: 0.0 };
            events.push(GameEvent::Finished { winner });
        }
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn is_running(&self) -> bool {
        self.phase == LevelPhase::Running
    }

    // 胜者画面停留结束，可以切换下一关
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, LevelPhase::GameOver { timer, .. } if timer >= GAME_OVER_DELAY)
    }

    // 倒计时文字："3" "2" "1" 然后 "GO!"
    pub fn countdown_label(&self) -> Option<String> {
        match self.phase {
            LevelPhase::Countdown { remaining, .. } if remaining > 1 => {
                Some((remaining - 1).to_string())
            }
            LevelPhase::Countdown { .. } => Some("GO!".to_string()),
            _ => None,
        }
    }

    pub fn game_over_message(&self) -> Option<String> {
        match self.phase {
            LevelPhase::GameOver {
                winner: Some(color),
                ..
            } => Some(format!("Game Over! {} Wins!", color.name())),
            LevelPhase::GameOver { winner: None, .. } => {
                Some("Game Over! Nobody Wins!".to_string())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Edge, EliminationCause, Physics};
    use crate::world::levels::{HazardConfig, LevelsConfig, ScrollingConfig, Vec2Def};

    // 无障碍的两人测试关卡
    fn duel(a: Vec2Def, b: Vec2Def) -> LevelConfig {
        LevelConfig {
            name: "Duel".to_string(),
            spawns: vec![a, b],
            start_grounded: false,
            physics: Physics::default(),
            hazards: HazardConfig::Scrolling(ScrollingConfig {
                spawn_rate: 0.0,
                rate_drift: 0.0,
                ..ScrollingConfig::default()
            }),
        }
    }

    fn running(config: &LevelConfig) -> Level {
        let mut level = Level::new(config, 11);
        level.phase = LevelPhase::Running;
        level
    }

    #[test]
    fn test_countdown_then_go_then_running() {
        let config = LevelsConfig::default();
        let mut level = Level::new(&config.levels[0], 1);
        let mut events = Vec::new();

        assert_eq!(level.countdown_label().as_deref(), Some("3"));
        level.update(0.5, &mut events);
        assert_eq!(level.countdown_label().as_deref(), Some("3"));
        level.update(0.5, &mut events);
        assert_eq!(level.countdown_label().as_deref(), Some("2"));
        level.update(1.0, &mut events);
        assert_eq!(level.countdown_label().as_deref(), Some("1"));
        level.update(1.0, &mut events);
        assert_eq!(level.countdown_label().as_deref(), Some("GO!"));
        assert!(events.is_empty());

        // 倒计时期间玩家不动
        assert_eq!(level.players[0].pos, vec2(80.0, 60.0));
        assert_eq!(level.frame(), 0);

        level.update(1.0, &mut events);
        assert!(level.is_running());
        assert_eq!(level.countdown_label(), None);
        assert_eq!(events, vec![GameEvent::Started]);
    }

    #[test]
    fn test_first_frame_of_crossfire_only_applies_gravity() {
        let config = LevelsConfig::default();
        let mut level = running(&config.levels[0]);
        let starts: Vec<Vec2> = level.players.iter().map(|p| p.pos).collect();
        let mut events = Vec::new();
        level.step(&mut events);

        assert_eq!(level.players.len(), 4);
        assert!(events.is_empty());
        for (player, start) in level.players.iter().zip(starts) {
            assert!(player.grounded);
            assert_eq!(player.pos, start);
            assert_eq!(player.vel.x, 0.0);
            assert!((player.vel.y - 0.3).abs() < 1e-6);
        }
    }

    #[test]
    fn test_keys_reach_only_the_bound_player() {
        let config = LevelsConfig::default();
        let mut level = Level::new(&config.levels[0], 1);
        level.handle_key_down(KeyCode::Q);
        assert!(level.players[1].intent.left);
        assert!(level.players.iter().filter(|p| p.intent.left).count() == 1);
        level.handle_key_up(KeyCode::Q);
        assert!(!level.players[1].intent.left);
    }

    #[test]
    fn test_last_player_standing_wins() {
        let config = duel(Vec2Def::new(100.0, 200.0), Vec2Def::new(400.0, 0.0));
        let mut level = running(&config);
        let mut events = Vec::new();
        level.step(&mut events);

        assert_eq!(
            events,
            vec![
                GameEvent::Eliminated {
                    player: PlayerId(1),
                    color: PlayerColor::Red,
                    cause: EliminationCause::Boundary(Edge::Top),
                },
                GameEvent::Finished {
                    winner: Some(PlayerColor::Black)
                },
            ]
        );
        assert_eq!(level.players.len(), 1);
        assert_eq!(
            level.game_over_message().as_deref(),
            Some("Game Over! black Wins!")
        );

        // 结算画面停留三秒，期间不再模拟
        let frozen = level.players[0].pos;
        for _ in 0..2 {
            level.update(1.0, &mut events);
            assert!(!level.is_finished());
        }
        level.update(1.0, &mut events);
        assert!(level.is_finished());
        assert_eq!(level.players[0].pos, frozen);
    }

    #[test]
    fn test_simultaneous_exit_is_a_draw() {
        let config = duel(Vec2Def::new(100.0, 0.0), Vec2Def::new(400.0, 0.0));
        let mut level = running(&config);
        let mut events = Vec::new();
        level.step(&mut events);

        assert!(level.players.is_empty());
        assert_eq!(events.last(), Some(&GameEvent::Finished { winner: None }));
        assert_eq!(
            level.game_over_message().as_deref(),
            Some("Game Over! Nobody Wins!")
        );
    }

    #[test]
    fn test_stomp_removes_player_from_roster() {
        let mut config = duel(Vec2Def::new(100.0, 182.0), Vec2Def::new(105.0, 200.0));
        config.spawns.push(Vec2Def::new(600.0, 200.0));
        let mut level = running(&config);
        level.players[0].vel.y = 4.0;
        let mut events = Vec::new();
        level.step(&mut events);

        assert_eq!(level.players.len(), 2);
        assert!(level.players.iter().all(|p| p.color != PlayerColor::Red));
        assert!(level.is_running());
        assert!(matches!(
            events[0],
            GameEvent::Eliminated {
                cause: EliminationCause::Stomp { by: PlayerId(0) },
                ..
            }
        ));
    }

    #[test]
    fn test_rooftops_players_settle_on_platforms() {
        let config = LevelsConfig::default();
        let mut level = running(&config.levels[1]);
        let mut events = Vec::new();
        for _ in 0..40 {
            level.step(&mut events);
        }

        assert!(events.is_empty());
        assert_eq!(level.players.len(), 4);
        let ys: Vec<f32> = level.players.iter().map(|p| p.pos.y).collect();
        assert_eq!(ys, vec![180.0, 380.0, 380.0, 180.0]);
        assert!(level.players.iter().all(|p| p.grounded));
    }

    #[test]
    fn test_walking_off_platform_clears_grounded() {
        let config = LevelsConfig::default();
        let mut level = running(&config.levels[1]);
        let mut events = Vec::new();
        level.players[0].pos = vec2(150.0, 180.0);
        level.step(&mut events);
        level.step(&mut events);
        assert!(level.players[0].grounded);
        assert_eq!(level.players[0].pos.y, 180.0);

        // 走出平台右端后按跳，不再站稳也不能起跳
        level.players[0].pos.x = 205.0;
        level.handle_key_down(KeyCode::Up);
        level.step(&mut events);

        let player = &level.players[0];
        assert_eq!(player.color, PlayerColor::Black);
        assert!(!player.grounded);
        assert!(player.vel.y > 0.0);
        assert!(player.pos.y > 180.0);
        assert!(events.is_empty());
    }

    #[test]
    fn test_crusher_walls_close_in() {
        let config = LevelsConfig::default();
        let mut level = running(&config.levels[2]);
        let mut events = Vec::new();
        level.step(&mut events);
        level.step(&mut events);

        assert_eq!(level.obstacles.len(), 4);
        assert!((level.obstacles[0].pos.y + CANVAS_H - 0.05).abs() < 1e-3);
        assert!((level.obstacles[2].pos.x + CANVAS_W - 0.1).abs() < 1e-3);
    }
}

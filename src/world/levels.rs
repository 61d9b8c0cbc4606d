use macroquad::prelude::{vec2, Vec2};
use serde::Deserialize;

use crate::actors::hazard::Platform;
use crate::config::{CANVAS_H, CANVAS_W, MAX_PLAYERS};
use crate::model::Physics;
use crate::world::LoadError;

// 关卡配置集合（数据驱动入口）
#[derive(Clone, Debug, Deserialize)]
pub struct LevelsConfig {
    #[serde(default)]
    pub start_level: usize,
    pub levels: Vec<LevelConfig>,
}

impl Default for LevelsConfig {
    // 默认关卡：横向飞弹、平台落柱、四面合围
    fn default() -> Self {
        Self {
            start_level: 0,
            levels: vec![
                LevelConfig {
                    name: "Crossfire".to_string(),
                    spawns: vec![
                        Vec2Def::new(CANVAS_W / 4.0 - 120.0, 60.0),
                        Vec2Def::new(CANVAS_W / 2.0 - 120.0, 60.0),
                        Vec2Def::new(3.0 * CANVAS_W / 4.0 - 120.0, 60.0),
                        Vec2Def::new(CANVAS_W - 120.0, 60.0),
                    ],
                    start_grounded: true,
                    physics: Physics::default(),
                    hazards: HazardConfig::Scrolling(ScrollingConfig::default()),
                },
                LevelConfig {
                    name: "Rooftops".to_string(),
                    spawns: vec![
                        Vec2Def::new(CANVAS_W / 4.0 - 120.0, 60.0),
                        Vec2Def::new(CANVAS_W / 4.0 - 120.0, 3.0 * CANVAS_H / 4.0 - 50.0),
                        Vec2Def::new(CANVAS_W - 120.0, 3.0 * CANVAS_H / 4.0 - 50.0),
                        Vec2Def::new(CANVAS_W - 120.0, 60.0),
                    ],
                    start_grounded: false,
                    physics: Physics {
                        jump_strength: 8.0,
                        gravity: 0.25,
                        ..Physics::default()
                    },
                    hazards: HazardConfig::PlatformAssisted {
                        platforms: vec![
                            RectDef::new(0.0, 400.0, 200.0, 20.0),
                            RectDef::new(300.0, 300.0, 200.0, 20.0),
                            RectDef::new(600.0, 200.0, 200.0, 20.0),
                            RectDef::new(600.0, 400.0, 200.0, 20.0),
                            RectDef::new(0.0, 200.0, 200.0, 20.0),
                        ],
                        falling: FallingConfig::default(),
                    },
                },
                LevelConfig {
                    name: "Crusher".to_string(),
                    spawns: vec![
                        Vec2Def::new(CANVAS_W / 4.0 - 120.0, 60.0),
                        Vec2Def::new(CANVAS_W / 4.0 + 40.0, 3.0 * CANVAS_H / 4.0 - 80.0),
                        Vec2Def::new(CANVAS_W - 300.0, 3.0 * CANVAS_H / 4.0 - 80.0),
                        Vec2Def::new(CANVAS_W - 120.0, 60.0),
                    ],
                    start_grounded: true,
                    physics: Physics::default(),
                    hazards: HazardConfig::ClosingWalls(ClosingConfig::default()),
                },
            ],
        }
    }
}

impl LevelsConfig {
    // 解析并校验 JSON 关卡表
    pub fn from_json(text: &str) -> Result<Self, LoadError> {
        let config: LevelsConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    // 校验关卡数据，加载外部文件后调用
    pub fn validate(&self) -> Result<(), LoadError> {
        if self.levels.is_empty() {
            return Err(LoadError::Invalid("no levels defined".to_string()));
        }
        if self.start_level >= self.levels.len() {
            return Err(LoadError::Invalid(format!(
                "start_level {} out of range (0..{})",
                self.start_level,
                self.levels.len()
            )));
        }
        for level in &self.levels {
            level.validate()?;
        }
        Ok(())
    }
}

// 序列化用的二维坐标
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Vec2Def {
    pub x: f32,
    pub y: f32,
}

impl Vec2Def {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn to_vec2(self) -> Vec2 {
        vec2(self.x, self.y)
    }
}

// 序列化用的矩形（左上角 + 宽高）
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct RectDef {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl RectDef {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn to_platform(self) -> Platform {
        Platform::new(vec2(self.x, self.y), vec2(self.w, self.h))
    }
}

// 单个关卡配置
#[derive(Clone, Debug, Deserialize)]
pub struct LevelConfig {
    pub name: String,
    pub spawns: Vec<Vec2Def>,
    #[serde(default)]
    pub start_grounded: bool,
    #[serde(default)]
    pub physics: Physics,
    pub hazards: HazardConfig,
}

impl LevelConfig {
    fn validate(&self) -> Result<(), LoadError> {
        let invalid = |msg: &str| Err(LoadError::Invalid(format!("{}: {msg}", self.name)));

        if self.spawns.len() < 2 || self.spawns.len() > MAX_PLAYERS {
            let msg = format!("needs 2..={MAX_PLAYERS} spawns, got {}", self.spawns.len());
            return invalid(msg.as_str());
        }
        if self.physics.top_speed <= 0.0 || self.physics.friction < 0.0 {
            return invalid("physics must have positive top_speed and non-negative friction");
        }
        match &self.hazards {
            HazardConfig::Scrolling(c) => {
                if c.width <= 0.0 || c.height <= 0.0 {
                    return invalid("scrolling obstacles need a positive size");
                }
            }
            HazardConfig::Falling(c) => {
                if !c.is_valid() {
                    return invalid("falling obstacle size range is empty");
                }
            }
            HazardConfig::PlatformAssisted { platforms, falling } => {
                if !falling.is_valid() {
                    return invalid("falling obstacle size range is empty");
                }
                if platforms.iter().any(|p| p.w <= 0.0 || p.h <= 0.0) {
                    return invalid("platforms need a positive size");
                }
            }
            HazardConfig::ClosingWalls(_) => {}
        }
        Ok(())
    }
}

// 关卡的障碍生成策略
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HazardConfig {
    Scrolling(ScrollingConfig),
    Falling(FallingConfig),
    ClosingWalls(ClosingConfig),
    PlatformAssisted {
        platforms: Vec<RectDef>,
        falling: FallingConfig,
    },
}

// 从右侧飞入、向左移动的小方块
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScrollingConfig {
    pub spawn_rate: f32,
    pub rate_drift: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
}

impl Default for ScrollingConfig {
    fn default() -> Self {
        Self {
            spawn_rate: 0.005,
            rate_drift: 0.00001,
            width: 25.0,
            height: 10.0,
            speed: 3.0,
        }
    }
}

// 从顶部缓慢落下的随机尺寸柱子
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FallingConfig {
    pub spawn_rate: f32,
    pub rate_drift: f32,
    pub min_width: f32,
    pub max_width: f32,
    pub min_height: f32,
    pub max_height: f32,
    pub speed: f32,
}

impl Default for FallingConfig {
    fn default() -> Self {
        Self {
            spawn_rate: 0.003,
            rate_drift: 0.00000001,
            min_width: 10.0,
            max_width: CANVAS_W / 4.0,
            min_height: CANVAS_H,
            max_height: CANVAS_H * 2.0,
            speed: 1.0,
        }
    }
}

impl FallingConfig {
    fn is_valid(&self) -> bool {
        self.min_width > 0.0
            && self.max_width >= self.min_width
            && self.max_width < CANVAS_W
            && self.min_height > 0.0
            && self.max_height >= self.min_height
    }
}

// 四面与画布等大的墙，向中间合拢
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClosingConfig {
    pub speed_x: f32,
    pub speed_y: f32,
}

impl Default for ClosingConfig {
    fn default() -> Self {
        Self {
            speed_x: 0.05,
            speed_y: 0.025,
        }
    }
}

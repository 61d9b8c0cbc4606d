use macroquad::prelude::{Conf, KeyCode};

use crate::model::KeyBindings;

pub const CANVAS_W: f32 = 800.0;
pub const CANVAS_H: f32 = 450.0;

pub const PLAYER_SIZE: f32 = 20.0;
pub const MAX_PLAYERS: usize = 4;

// 默认物理参数，单位均为每帧
pub const ACCELERATION: f32 = 0.1;
pub const FRICTION: f32 = 0.9;
pub const GRAVITY: f32 = 0.3;
pub const TOP_SPEED: f32 = 5.0;
pub const JUMP_STRENGTH: f32 = 5.0;

// 踩头判定：两侧都至少重叠这么多像素
pub const STOMP_MARGIN: f32 = 3.0;

// 倒计时秒数（之后还有一秒 GO!）
pub const COUNTDOWN_SECONDS: u32 = 3;
// 胜者画面停留时间
pub const GAME_OVER_DELAY: f32 = 3.0;

pub const LEVELS_PATH: &str = "data/levels.json";

// 四位玩家的固定按键：左/右/跳
pub const PLAYER_KEYS: [KeyBindings; MAX_PLAYERS] = [
    KeyBindings {
        left: KeyCode::Left,
        right: KeyCode::Right,
        up: KeyCode::Up,
    },
    KeyBindings {
        left: KeyCode::Q,
        right: KeyCode::E,
        up: KeyCode::W,
    },
    KeyBindings {
        left: KeyCode::Z,
        right: KeyCode::C,
        up: KeyCode::X,
    },
    KeyBindings {
        left: KeyCode::I,
        right: KeyCode::P,
        up: KeyCode::O,
    },
];

// 配置窗口标题、尺寸与可变大小选项
pub fn window_conf() -> Conf {
    let resizable = cfg!(any(target_os = "windows", target_os = "macos", target_os = "linux"));
    Conf {
        window_title: "Cube Brawl".to_string(),
        window_width: CANVAS_W as i32,
        window_height: CANVAS_H as i32,
        high_dpi: true,
        window_resizable: resizable,
        ..Default::default()
    }
}

use macroquad::prelude::*;
use serde::Deserialize;

use crate::config::{ACCELERATION, FRICTION, GRAVITY, JUMP_STRENGTH, TOP_SPEED};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct PlayerId(pub usize);

// 玩家颜色即玩家身份
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PlayerColor {
    Black,
    Red,
    Green,
    Purple,
}

impl PlayerColor {
    pub const ALL: [PlayerColor; 4] = [
        PlayerColor::Black,
        PlayerColor::Red,
        PlayerColor::Green,
        PlayerColor::Purple,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PlayerColor::Black => "black",
            PlayerColor::Red => "red",
            PlayerColor::Green => "green",
            PlayerColor::Purple => "purple",
        }
    }

    pub fn color(self) -> Color {
        match self {
            PlayerColor::Black => BLACK,
            PlayerColor::Red => RED,
            PlayerColor::Green => GREEN,
            PlayerColor::Purple => PURPLE,
        }
    }

    pub fn index(self) -> usize {
        match self {
            PlayerColor::Black => 0,
            PlayerColor::Red => 1,
            PlayerColor::Green => 2,
            PlayerColor::Purple => 3,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct KeyBindings {
    pub left: KeyCode,
    pub right: KeyCode,
    pub up: KeyCode,
}

// 当前按住的方向键
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Intent {
    pub left: bool,
    pub right: bool,
    pub up: bool,
}

// 玩家物理参数，关卡可以单独覆盖某几项
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Physics {
    pub acceleration: f32,
    pub friction: f32,
    pub gravity: f32,
    pub top_speed: f32,
    pub jump_strength: f32,
}

impl Default for Physics {
    fn default() -> Self {
        Self {
            acceleration: ACCELERATION,
            friction: FRICTION,
            gravity: GRAVITY,
            top_speed: TOP_SPEED,
            jump_strength: JUMP_STRENGTH,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Edge {
    Left,
    Right,
    Bottom,
    Top,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EliminationCause {
    Boundary(Edge),
    Obstacle,
    Stomp { by: PlayerId },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GameEvent {
    Eliminated {
        player: PlayerId,
        color: PlayerColor,
        cause: EliminationCause,
    },
    Started,
    // winner 为 None 表示最后几人同一帧出局
    Finished { winner: Option<PlayerColor> },
}

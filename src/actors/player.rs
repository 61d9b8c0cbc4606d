use macroquad::prelude::*;

use crate::config::PLAYER_SIZE;
use crate::model::{
    Edge, EliminationCause, GameEvent, Intent, KeyBindings, Physics, PlayerColor, PlayerId,
};

// 玩家实体：位置、速度、按键与物理参数
#[derive(Clone, Debug)]
pub struct Player {
    pub id: PlayerId,
    pub color: PlayerColor,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub grounded: bool,
    pub physics: Physics,
    pub keys: KeyBindings,
    pub intent: Intent,
    pub accelerating: bool,
    // 本帧已出局，帧末从名单中移除
    pub out: bool,
}

impl Player {
    pub fn new(
        id: PlayerId,
        color: PlayerColor,
        spawn: Vec2,
        keys: KeyBindings,
        physics: Physics,
    ) -> Self {
        Self {
            id,
            color,
            pos: spawn,
            vel: Vec2::ZERO,
            size: vec2(PLAYER_SIZE, PLAYER_SIZE),
            grounded: false,
            physics,
            keys,
            intent: Intent::default(),
            accelerating: false,
            out: false,
        }
    }

    // 获取玩家碰撞矩形（左上角为原点）
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    pub fn handle_key_down(&mut self, key: KeyCode) {
        self.set_key(key, true);
    }

    pub fn handle_key_up(&mut self, key: KeyCode) {
        self.set_key(key, false);
    }

    fn set_key(&mut self, key: KeyCode, held: bool) {
        if key == self.keys.right {
            self.intent.right = held;
        }
        if key == self.keys.left {
            self.intent.left = held;
        }
        if key == self.keys.up {
            self.intent.up = held;
        }
    }

    // 标记出局并发出事件，重复调用只记一次
    pub fn eliminate(&mut self, cause: EliminationCause, events: &mut Vec<GameEvent>) {
        if self.out {
            return;
        }
        self.out = true;
        events.push(GameEvent::Eliminated {
            player: self.id,
            color: self.color,
            cause,
        });
    }

    // 水平加减速与跳跃
    fn apply_input(&mut self) {
        let p = self.physics;

        if self.intent.right {
            self.accelerating = true;
            if self.vel.x < 0.0 {
                self.vel.x *= p.friction;
            }
            if self.vel.x < p.top_speed {
                self.vel.x = (self.vel.x + p.acceleration).min(p.top_speed);
            } else {
                self.vel.x = p.top_speed;
            }
        }

        if self.intent.left {
            self.accelerating = true;
            if self.vel.x > 0.0 {
                self.vel.x *= p.friction;
            }
            if self.vel.x > -p.top_speed {
                self.vel.x = (self.vel.x - p.acceleration).max(-p.top_speed);
            } else {
                self.vel.x = -p.top_speed;
            }
        }

        if !self.intent.right && !self.intent.left {
            self.vel.x *= p.friction;
            self.accelerating = false;
        }

        if self.intent.up && self.grounded {
            self.vel.y = -p.jump_strength;
        }
    }

    // 每帧移动：输入、积分、重力，碰到画布任意边缘即出局
    pub fn step(&mut self, bounds: Vec2, events: &mut Vec<GameEvent>) {
        self.apply_input();

        self.pos += self.vel;
        self.vel.y += self.physics.gravity;

        if self.pos.x < 0.0 {
            self.pos.x = 0.0;
            self.vel.x = 0.0;
            self.eliminate(EliminationCause::Boundary(Edge::Left), events);
        }
        if self.pos.x + self.size.x > bounds.x {
            self.pos.x = bounds.x - self.size.x;
            self.vel.x = 0.0;
            self.eliminate(EliminationCause::Boundary(Edge::Right), events);
        }
        if self.pos.y + self.size.y > bounds.y {
            self.pos.y = bounds.y - self.size.y;
            self.vel.y = 0.0;
            self.eliminate(EliminationCause::Boundary(Edge::Bottom), events);
        }
        if self.pos.y <= 0.0 {
            self.pos.y = 0.0;
            self.vel.y = 0.0;
            self.eliminate(EliminationCause::Boundary(Edge::Top), events);
        }
    }
}

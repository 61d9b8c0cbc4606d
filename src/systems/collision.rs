use macroquad::prelude::*;

use crate::actors::hazard::{Obstacle, Platform};
use crate::actors::player::Player;
use crate::config::STOMP_MARGIN;
use crate::model::{EliminationCause, GameEvent};

// 矩形重叠判定，边缘相贴也算接触
pub fn boxes_touch(a: Rect, b: Rect) -> bool {
    a.x + a.w >= b.x && a.x <= b.x + b.w && a.y + a.h >= b.y && a.y <= b.y + b.h
}

// 同时可变借用切片中的两个元素，要求 i < j
pub fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    debug_assert!(i < j);
    let (head, tail) = items.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}

// 玩家之间的碰撞：踩头淘汰，以及水平方向的推挤
pub fn resolve_players<'a>(a: &'a mut Player, b: &'a mut Player, events: &mut Vec<GameEvent>) {
    let (mut a, mut b) = (a, b);

    // 以下判定都假设 a 在左，完全重合时按编号
    if a.pos.x > b.pos.x || (a.pos.x == b.pos.x && a.id.0 > b.id.0) {
        std::mem::swap(&mut a, &mut b);
    }
    if !boxes_touch(a.rect(), b.rect()) {
        return;
    }

    // 踩头判定要求 a 在上
    if a.pos.y > b.pos.y {
        std::mem::swap(&mut a, &mut b);
    }

    if a.pos.y + a.size.y <= b.pos.y + b.size.y / 2.0
        && a.pos.x + a.size.x > b.pos.x + STOMP_MARGIN
        && b.pos.x + b.size.x - STOMP_MARGIN > a.pos.x
    {
        b.eliminate(EliminationCause::Stomp { by: a.id }, events);
        a.vel.y = -a.vel.y / 2.0;
    }

    // 上下交换后 a 未必仍在左边，此时不做水平处理
    if a.pos.x + a.size.x >= b.pos.x && a.pos.x <= b.pos.x {
        push_apart(a, b);
    }
}

// a 在左、b 在右时的水平推挤
fn push_apart(a: &mut Player, b: &mut Player) {
    if a.vel.x > 0.0 && a.accelerating && !b.accelerating {
        // a 主动向右推 b
        b.pos.x = a.pos.x + a.size.x;
        b.vel.x = a.vel.x;
    } else if b.vel.x < 0.0 && b.accelerating && !a.accelerating {
        // b 主动向左推 a
        a.pos.x = b.pos.x - a.size.x;
        a.vel.x = b.vel.x;
    } else if a.accelerating && b.accelerating {
        // 双方顶牛，一起减速
        if a.vel.x > -b.vel.x {
            b.pos.x = a.pos.x + a.size.x;
            a.vel.x -= b.physics.acceleration * 2.0;
            b.vel.x = a.vel.x;
        } else if b.vel.x < -a.vel.x {
            a.pos.x = b.pos.x - a.size.x;
            b.vel.x += a.physics.acceleration * 2.0;
            a.vel.x = b.vel.x;
        } else {
            a.vel.x = 0.0;
            b.vel.x = 0.0;
        }
    } else if !a.accelerating && !b.accelerating {
        // 都在滑行，快的一方带动慢的一方
        if a.vel.x > -b.vel.x {
            b.pos.x = a.pos.x + a.size.x;
            b.vel.x = a.vel.x;
        } else if b.vel.x < -a.vel.x {
            a.pos.x = b.pos.x - a.size.x;
            a.vel.x = b.vel.x;
        }
    }
}

// 碰到障碍物直接出局
pub fn hit_obstacle(player: &mut Player, obstacle: &Obstacle, events: &mut Vec<GameEvent>) {
    if boxes_touch(player.rect(), obstacle.rect()) {
        player.eliminate(EliminationCause::Obstacle, events);
    }
}

// 下落中且本帧会越过平台顶面时，落在平台上
pub fn land_on_platform(player: &mut Player, platform: &Platform) -> bool {
    let feet = player.pos.y + player.size.y;
    let top = platform.pos.y;
    if player.vel.y > 0.0
        && feet <= top
        && feet + player.vel.y >= top
        && player.pos.x + player.size.x > platform.pos.x
        && player.pos.x < platform.pos.x + platform.size.x
    {
        player.pos.y = top - player.size.y;
        player.vel.y = 0.0;
        player.grounded = true;
        return true;
    }
    false
}

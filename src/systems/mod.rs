use macroquad::prelude::*;

use crate::world::World;

pub mod collision;
pub mod spawn;

// 把本帧按下/松开的按键分发给所有玩家
pub fn handle_input(world: &mut World) {
    for key in get_keys_pressed() {
        world.handle_key_down(key);
    }
    for key in get_keys_released() {
        world.handle_key_up(key);
    }
}

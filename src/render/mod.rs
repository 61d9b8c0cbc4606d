use macroquad::prelude::*;

use crate::model::PlayerColor;
use crate::ui::{draw_centered_text, draw_text_ui, Ui};
use crate::world::level::Level;
use crate::world::World;

// 绘制关卡：白底、黑色平台、红色障碍、彩色玩家
pub fn draw_level(ui: &Ui, level: &Level) {
    clear_background(WHITE);

    for platform in &level.platforms {
        let r = platform.rect();
        draw_rectangle(r.x, r.y, r.w, r.h, BLACK);
    }
    for obstacle in &level.obstacles {
        let r = obstacle.rect();
        draw_rectangle(r.x, r.y, r.w, r.h, RED);
    }
    for player in &level.players {
        let r = player.rect();
        draw_rectangle(r.x, r.y, r.w, r.h, player.color.color());
    }

    let center = level.bounds * 0.5;
    if let Some(label) = level.countdown_label() {
        draw_centered_text(ui, &label, center.x, center.y, 80, BLACK);
    }
    if let Some(message) = level.game_over_message() {
        draw_centered_text(ui, &message, center.x, center.y, 60, BLACK);
    }
}

// 左上角：关卡名与各颜色胜场
pub fn draw_hud(ui: &Ui, world: &World) {
    let title = format!(
        "Level {}/{}: {}",
        world.level_number(),
        world.level_count(),
        world.level.name
    );
    draw_text_ui(ui, &title, 10.0, 20.0, 18, DARKGRAY);

    let mut x = 10.0;
    for color in PlayerColor::ALL {
        let text = format!("{} {}", color.name(), world.wins(color));
        draw_text_ui(ui, &text, x, 40.0, 16, color.color());
        x += 90.0;
    }
}

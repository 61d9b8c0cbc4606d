use macroquad::prelude::*;
use tracing::warn;

use crate::assets::{load_elimination_sound, load_start_sound, load_ui_font};
use crate::audio::Sfx;
use crate::config::{CANVAS_H, CANVAS_W, LEVELS_PATH};
use crate::render::{draw_hud, draw_level};
use crate::systems::handle_input;
use crate::ui::Ui;
use crate::world::World;

// 游戏主循环：加载关卡数据，处理输入、模拟与渲染
pub async fn run() {
    let ui = Ui {
        font: load_ui_font().await,
    };
    let sfx = Sfx {
        elimination: load_elimination_sound().await,
        start: load_start_sound().await,
    };

    // 加载关卡配置（数据驱动），失败时使用内置关卡
    let mut world = match World::load_from_file(LEVELS_PATH, ::rand::random()) {
        Ok(world) => world,
        Err(err) => {
            warn!(path = LEVELS_PATH, error = %err, "using built-in levels");
            World::default()
        }
    };

    // 固定画布大小的渲染目标，窗口缩放时整体放大
    let rt_w = CANVAS_W as u32;
    let rt_h = CANVAS_H as u32;
    let render_target = render_target(rt_w, rt_h);
    render_target.texture.set_filter(FilterMode::Nearest);

    let mut events = Vec::new();
    loop {
        handle_input(&mut world);

        events.clear();
        world.update(get_frame_time(), &mut events);
        sfx.play(&events);

        let (scale, offset_x, offset_y) = compute_viewport();
        let mut camera = Camera2D::from_display_rect(Rect::new(0.0, 0.0, CANVAS_W, CANVAS_H));
        camera.render_target = Some(render_target.clone());
        set_camera(&camera);

        draw_level(&ui, &world.level);
        draw_hud(&ui, &world);

        // 回到默认相机并放大显示
        set_default_camera();
        clear_background(DARKGRAY);
        draw_texture_ex(
            &render_target.texture,
            offset_x,
            offset_y,
            WHITE,
            DrawTextureParams {
                // RenderTarget 在纹理坐标系中是倒置的，这里做一次垂直翻转
                source: Some(Rect::new(0.0, rt_h as f32, rt_w as f32, -(rt_h as f32))),
                dest_size: Some(vec2(CANVAS_W * scale, CANVAS_H * scale)),
                ..Default::default()
            },
        );

        next_frame().await;
    }
}

// 根据窗口尺寸计算缩放比例与居中偏移
fn compute_viewport() -> (f32, f32, f32) {
    let sw = screen_width();
    let sh = screen_height();
    let scale = (sw / CANVAS_W).min(sh / CANVAS_H).max(0.1);
    let offset_x = (sw - CANVAS_W * scale) * 0.5;
    let offset_y = (sh - CANVAS_H * scale) * 0.5;
    (scale, offset_x, offset_y)
}

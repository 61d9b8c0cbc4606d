use std::fs;
use std::io::ErrorKind;

use cube_brawl::config::{CANVAS_H, CANVAS_W, LEVELS_PATH, PLAYER_SIZE};
use cube_brawl::model::PlayerColor;
use cube_brawl::world::levels::{HazardConfig, LevelConfig, LevelsConfig};
use image::{ImageBuffer, Rgba, RgbaImage};

const WIDTH: u32 = CANVAS_W as u32;
const HEIGHT: u32 = CANVAS_H as u32;

#[derive(Clone, Copy)]
struct Color {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl Color {
    const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    fn from_player(color: PlayerColor) -> Self {
        let c = color.color();
        Self::rgba(
            (c.r * 255.0) as u8,
            (c.g * 255.0) as u8,
            (c.b * 255.0) as u8,
            255,
        )
    }
}

const WHITE: Color = Color::rgba(255, 255, 255, 255);
const BLACK: Color = Color::rgba(0, 0, 0, 255);
const HAZARD: Color = Color::rgba(230, 41, 55, 255);
const HAZARD_ZONE: Color = Color::rgba(230, 41, 55, 60);

fn blend(dst: Color, src: Color) -> Color {
    if src.a == 255 {
        return src;
    }
    let sa = src.a as f32 / 255.0;
    let da = dst.a as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return Color::rgba(0, 0, 0, 0);
    }
    let r = (src.r as f32 * sa + dst.r as f32 * da * (1.0 - sa)) / out_a;
    let g = (src.g as f32 * sa + dst.g as f32 * da * (1.0 - sa)) / out_a;
    let b = (src.b as f32 * sa + dst.b as f32 * da * (1.0 - sa)) / out_a;
    Color::rgba(r as u8, g as u8, b as u8, (out_a * 255.0) as u8)
}

fn set_px(img: &mut RgbaImage, x: i32, y: i32, color: Color) {
    if x < 0 || y < 0 {
        return;
    }
    let (w, h) = img.dimensions();
    if x as u32 >= w || y as u32 >= h {
        return;
    }
    let dst = img.get_pixel(x as u32, y as u32);
    let dst = Color::rgba(dst[0], dst[1], dst[2], dst[3]);
    let out = blend(dst, color);
    img.put_pixel(x as u32, y as u32, Rgba([out.r, out.g, out.b, out.a]));
}

// 按画布坐标（左上角 + 宽高）填充矩形
fn fill_rect(img: &mut RgbaImage, x: f32, y: f32, w: f32, h: f32, color: Color) {
    let x0 = x.round() as i32;
    let y0 = y.round() as i32;
    let x1 = (x + w).round() as i32;
    let y1 = (y + h).round() as i32;
    for py in y0..y1 {
        for px in x0..x1 {
            set_px(img, px, py, color);
        }
    }
}

// 用半透明红色标出障碍的来向
fn draw_hazards(img: &mut RgbaImage, hazards: &HazardConfig) {
    let (w, h) = (CANVAS_W, CANVAS_H);
    match hazards {
        HazardConfig::Scrolling(c) => {
            fill_rect(img, w - 40.0, 0.0, 40.0, h, HAZARD_ZONE);
            let mut y = 30.0;
            while y < h - c.height {
                fill_rect(img, w - 35.0, y, c.width, c.height, HAZARD);
                y += 60.0;
            }
        }
        HazardConfig::Falling(c) | HazardConfig::PlatformAssisted { falling: c, .. } => {
            fill_rect(img, 0.0, 0.0, w, 30.0, HAZARD_ZONE);
            let mut x = 40.0;
            while x < w - c.min_width {
                fill_rect(img, x, 0.0, c.min_width, 30.0, HAZARD);
                x += 160.0;
            }
        }
        HazardConfig::ClosingWalls(_) => {
            let t = 12.0;
            fill_rect(img, 0.0, 0.0, w, t, HAZARD);
            fill_rect(img, 0.0, h - t, w, t, HAZARD);
            fill_rect(img, 0.0, t, t, h - 2.0 * t, HAZARD);
            fill_rect(img, w - t, t, t, h - 2.0 * t, HAZARD);
        }
    }
}

fn render_level(level: &LevelConfig) -> RgbaImage {
    let mut img: RgbaImage = ImageBuffer::new(WIDTH, HEIGHT);
    fill_rect(&mut img, 0.0, 0.0, CANVAS_W, CANVAS_H, WHITE);

    draw_hazards(&mut img, &level.hazards);
    if let HazardConfig::PlatformAssisted { platforms, .. } = &level.hazards {
        for p in platforms {
            fill_rect(&mut img, p.x, p.y, p.w, p.h, BLACK);
        }
    }
    for (spawn, color) in level.spawns.iter().zip(PlayerColor::ALL) {
        fill_rect(
            &mut img,
            spawn.x,
            spawn.y,
            PLAYER_SIZE,
            PLAYER_SIZE,
            Color::from_player(color),
        );
    }
    img
}

fn load_levels() -> Result<LevelsConfig, String> {
    match fs::read_to_string(LEVELS_PATH) {
        Ok(text) => LevelsConfig::from_json(&text).map_err(|e| format!("{LEVELS_PATH}: {e}")),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            println!("{LEVELS_PATH} not found, using built-in levels");
            Ok(LevelsConfig::default())
        }
        Err(e) => Err(format!("read {LEVELS_PATH} failed: {e}")),
    }
}

fn main() -> Result<(), String> {
    let config = load_levels()?;
    fs::create_dir_all("assets").map_err(|e| format!("create assets dir failed: {e}"))?;

    for (i, level) in config.levels.iter().enumerate() {
        let path = format!("assets/level_{}.png", i + 1);
        render_level(level)
            .save(&path)
            .map_err(|e| format!("save failed: {e}"))?;
        println!("wrote {path} ({}x{}) {}", WIDTH, HEIGHT, level.name);
    }
    Ok(())
}

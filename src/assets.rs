use std::path::Path;

use macroquad::audio::{load_sound, Sound};
use macroquad::prelude::*;
use tracing::{info, warn};

// 加载UI字体，优先使用项目资源中的字体，其次尝试系统字体
pub async fn load_ui_font() -> Option<Font> {
    let candidates = [
        "assets/Roboto-Regular.ttf",
        "assets/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "/Library/Fonts/Arial.ttf",
        "C:/Windows/Fonts/arial.ttf",
    ];

    for path in candidates {
        if !Path::new(path).exists() {
            continue;
        }
        match load_ttf_font(path).await {
            Ok(font) => {
                info!(path, "loaded ui font");
                return Some(font);
            }
            Err(err) => warn!(path, error = %err, "failed to load font"),
        }
    }

    // 没有字体时退回 macroquad 内置字体
    None
}

// 按候选路径加载音效，全部缺失时静音运行
async fn load_first_sound(name: &str, candidates: &[&str]) -> Option<Sound> {
    for &path in candidates {
        if !Path::new(path).exists() {
            continue;
        }
        match load_sound(path).await {
            Ok(sound) => return Some(sound),
            Err(err) => warn!(path, error = %err, "failed to load sound"),
        }
    }

    warn!(name, "sound not found, cue disabled");
    None
}

pub async fn load_elimination_sound() -> Option<Sound> {
    load_first_sound(
        "elimination",
        &["assets/elimination.ogg", "assets/elimination.wav"],
    )
    .await
}

// 倒计时结束 GO! 时的提示音
pub async fn load_start_sound() -> Option<Sound> {
    load_first_sound("start", &["assets/start.ogg", "assets/start.wav"]).await
}

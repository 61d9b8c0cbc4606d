use cube_brawl::app;
use cube_brawl::config::window_conf;
use tracing_subscriber::EnvFilter;

#[macroquad::main(window_conf)]
// 程序入口：初始化日志与窗口配置并启动游戏主循环
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cube_brawl=info")),
        )
        .init();

    app::run().await;
}

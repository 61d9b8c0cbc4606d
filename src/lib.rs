pub mod actors;
pub mod app;
pub mod assets;
pub mod audio;
pub mod config;
pub mod model;
pub mod render;
pub mod systems;
pub mod ui;
pub mod world;

use macroquad::prelude::*;
use ::rand::Rng;

use crate::actors::hazard::{Obstacle, Platform};
use crate::world::levels::{ClosingConfig, FallingConfig, HazardConfig, ScrollingConfig};

// 关卡障碍生成器：按配置策略每帧生成、筛除障碍
#[derive(Clone, Debug)]
pub struct HazardSpawner {
    config: HazardConfig,
    rate: f32,
    walls_spawned: bool,
}

impl HazardSpawner {
    pub fn new(config: HazardConfig) -> Self {
        let rate = match &config {
            HazardConfig::Scrolling(c) => c.spawn_rate,
            HazardConfig::Falling(c) | HazardConfig::PlatformAssisted { falling: c, .. } => {
                c.spawn_rate
            }
            HazardConfig::ClosingWalls(_) => 0.0,
        };
        Self {
            config,
            rate,
            walls_spawned: false,
        }
    }

    // 当前的生成概率（随时间缓慢上升）
    pub fn rate(&self) -> f32 {
        self.rate
    }

    // 关卡内常驻的平台
    pub fn platforms(&self) -> Vec<Platform> {
        match &self.config {
            HazardConfig::PlatformAssisted { platforms, .. } => {
                platforms.iter().map(|p| p.to_platform()).collect()
            }
            _ => Vec::new(),
        }
    }

    // 每帧调用一次
    pub fn spawn<R: Rng>(&mut self, rng: &mut R, bounds: Vec2, obstacles: &mut Vec<Obstacle>) {
        match self.config {
            HazardConfig::Scrolling(c) => {
                self.rate += c.rate_drift;
                if rng.random::<f32>() < self.rate {
                    obstacles.push(scrolling_obstacle(&c, rng, bounds));
                }
            }
            HazardConfig::Falling(c) | HazardConfig::PlatformAssisted { falling: c, .. } => {
                self.rate += c.rate_drift;
                if rng.random::<f32>() < self.rate {
                    obstacles.push(falling_obstacle(&c, rng, bounds));
                }
            }
            HazardConfig::ClosingWalls(c) => {
                // 后续帧生成的墙总落后于第一批，只需生成一次
                if !self.walls_spawned {
                    obstacles.extend(closing_walls(&c, bounds));
                    self.walls_spawned = true;
                }
            }
        }
    }

    // 障碍是否仍需保留
    pub fn keep(&self, obstacle: &Obstacle, bounds: Vec2) -> bool {
        match &self.config {
            HazardConfig::Scrolling(_) => obstacle.pos.x + obstacle.size.x > 0.0,
            HazardConfig::Falling(_) | HazardConfig::PlatformAssisted { .. } => {
                obstacle.pos.y < bounds.y
            }
            HazardConfig::ClosingWalls(_) => true,
        }
    }
}

fn scrolling_obstacle<R: Rng>(c: &ScrollingConfig, rng: &mut R, bounds: Vec2) -> Obstacle {
    let y = rng.random::<f32>() * (bounds.y - c.height);
    Obstacle::new(
        vec2(bounds.x, y),
        vec2(c.width, c.height),
        vec2(-c.speed, 0.0),
    )
}

fn falling_obstacle<R: Rng>(c: &FallingConfig, rng: &mut R, bounds: Vec2) -> Obstacle {
    let width = rng.random::<f32>() * (c.max_width - c.min_width) + c.min_width;
    let height = rng.random::<f32>() * (c.max_height - c.min_height) + c.min_height;
    let x = rng.random::<f32>() * (bounds.x - width);
    Obstacle::new(vec2(x, -height), vec2(width, height), vec2(0.0, c.speed))
}

// 上下左右四面画布大小的墙
fn closing_walls(c: &ClosingConfig, bounds: Vec2) -> [Obstacle; 4] {
    let size = bounds;
    [
        Obstacle::new(vec2(0.0, -bounds.y), size, vec2(0.0, c.speed_y)),
        Obstacle::new(vec2(0.0, bounds.y), size, vec2(0.0, -c.speed_y)),
        Obstacle::new(vec2(-bounds.x, 0.0), size, vec2(c.speed_x, 0.0)),
        Obstacle::new(vec2(bounds.x, 0.0), size, vec2(-c.speed_x, 0.0)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CANVAS_H, CANVAS_W};
    use crate::world::levels::RectDef;
    use ::rand::rngs::StdRng;
    use ::rand::SeedableRng;

    fn bounds() -> Vec2 {
        vec2(CANVAS_W, CANVAS_H)
    }

    #[test]
    fn test_scrolling_spawns_from_right_edge() {
        let mut spawner = HazardSpawner::new(HazardConfig::Scrolling(ScrollingConfig {
            spawn_rate: 1.0,
            ..ScrollingConfig::default()
        }));
        let mut rng = StdRng::seed_from_u64(7);
        let mut obstacles = Vec::new();
        for _ in 0..20 {
            spawner.spawn(&mut rng, bounds(), &mut obstacles);
        }
        assert_eq!(obstacles.len(), 20);
        for o in &obstacles {
            assert_eq!(o.pos.x, CANVAS_W);
            assert!(o.pos.y >= 0.0 && o.pos.y < CANVAS_H - 10.0);
            assert_eq!(o.size, vec2(25.0, 10.0));
            assert_eq!(o.vel, vec2(-3.0, 0.0));
        }
    }

    #[test]
    fn test_spawn_rate_drifts_every_frame() {
        let mut spawner = HazardSpawner::new(HazardConfig::Scrolling(ScrollingConfig::default()));
        let mut rng = StdRng::seed_from_u64(1);
        let mut obstacles = Vec::new();
        for _ in 0..100 {
            spawner.spawn(&mut rng, bounds(), &mut obstacles);
        }
        assert!((spawner.rate() - 0.006).abs() < 1e-5);
    }

    #[test]
    fn test_falling_columns_start_above_canvas() {
        let mut spawner = HazardSpawner::new(HazardConfig::Falling(FallingConfig {
            spawn_rate: 1.0,
            ..FallingConfig::default()
        }));
        let mut rng = StdRng::seed_from_u64(42);
        let mut obstacles = Vec::new();
        for _ in 0..50 {
            spawner.spawn(&mut rng, bounds(), &mut obstacles);
        }
        assert_eq!(obstacles.len(), 50);
        for o in &obstacles {
            assert!(o.size.x >= 10.0 && o.size.x < CANVAS_W / 4.0);
            assert!(o.size.y >= CANVAS_H && o.size.y < CANVAS_H * 2.0);
            assert_eq!(o.pos.y, -o.size.y);
            assert!(o.pos.x >= 0.0 && o.pos.x + o.size.x <= CANVAS_W);
            assert_eq!(o.vel, vec2(0.0, 1.0));
        }
    }

    #[test]
    fn test_closing_walls_spawn_once() {
        let mut spawner = HazardSpawner::new(HazardConfig::ClosingWalls(ClosingConfig::default()));
        let mut rng = StdRng::seed_from_u64(3);
        let mut obstacles = Vec::new();
        spawner.spawn(&mut rng, bounds(), &mut obstacles);
        spawner.spawn(&mut rng, bounds(), &mut obstacles);
        assert_eq!(obstacles.len(), 4);
        assert_eq!(obstacles[0].pos, vec2(0.0, -CANVAS_H));
        assert_eq!(obstacles[1].vel, vec2(0.0, -0.025));
        assert_eq!(obstacles[2].pos, vec2(-CANVAS_W, 0.0));
        assert_eq!(obstacles[3].vel, vec2(-0.05, 0.0));
        assert!(obstacles.iter().all(|o| o.size == bounds()));
        assert!(spawner.platforms().is_empty());
    }

    #[test]
    fn test_keep_rules_per_strategy() {
        let scrolling = HazardSpawner::new(HazardConfig::Scrolling(ScrollingConfig::default()));
        let gone = Obstacle::new(vec2(-25.0, 10.0), vec2(25.0, 10.0), vec2(-3.0, 0.0));
        let edge = Obstacle::new(vec2(-24.0, 10.0), vec2(25.0, 10.0), vec2(-3.0, 0.0));
        assert!(!scrolling.keep(&gone, bounds()));
        assert!(scrolling.keep(&edge, bounds()));

        let falling = HazardSpawner::new(HazardConfig::Falling(FallingConfig::default()));
        let below = Obstacle::new(vec2(10.0, CANVAS_H), vec2(20.0, 500.0), vec2(0.0, 1.0));
        let inside = Obstacle::new(vec2(10.0, CANVAS_H - 1.0), vec2(20.0, 500.0), vec2(0.0, 1.0));
        assert!(!falling.keep(&below, bounds()));
        assert!(falling.keep(&inside, bounds()));

        let walls = HazardSpawner::new(HazardConfig::ClosingWalls(ClosingConfig::default()));
        assert!(walls.keep(&gone, bounds()));
    }

    #[test]
    fn test_platform_assisted_exposes_platforms() {
        let spawner = HazardSpawner::new(HazardConfig::PlatformAssisted {
            platforms: vec![RectDef::new(0.0, 400.0, 200.0, 20.0)],
            falling: FallingConfig::default(),
        });
        let platforms = spawner.platforms();
        assert_eq!(platforms.len(), 1);
        assert_eq!(platforms[0].pos, vec2(0.0, 400.0));
        assert_eq!(spawner.rate(), 0.003);
    }
}

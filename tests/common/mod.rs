#![allow(dead_code)]

use glam::UVec2;
use image::{Rgba, RgbaImage};

use dino_runner::config::EngineConfig;
use dino_runner::spawn::{FrameInput, SpawnEngine};
use dino_runner::sprite::bank::SpriteBank;
use dino_runner::sprite::base_target_height;

pub const GROUND_Y: i32 = 620;
pub const PLAYER_SAFE_X: i32 = 300;

pub fn opaque_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([120, 90, 60, 255]))
}

/// Transparent image with one opaque rectangular region.
pub fn image_with_region(
    width: u32,
    height: u32,
    rx: u32,
    ry: u32,
    rw: u32,
    rh: u32,
) -> RgbaImage {
    let mut image = RgbaImage::new(width, height);
    for y in ry..ry + rh {
        for x in rx..rx + rw {
            image.put_pixel(x, y, Rgba([200, 200, 200, 255]));
        }
    }
    image
}

pub fn test_config(seed: u64) -> EngineConfig {
    EngineConfig {
        viewport: UVec2::new(1280, 720),
        player_height: 100,
        seed: Some(seed),
        ..EngineConfig::default()
    }
}

fn level_sprites() -> Vec<RgbaImage> {
    vec![
        opaque_image(60, 120),
        opaque_image(90, 120),
        opaque_image(140, 120),
    ]
}

pub fn test_bank(config: &EngineConfig, levels: Vec<Vec<RgbaImage>>) -> SpriteBank {
    let base_height = base_target_height(config.player_height, config.viewport.y);
    SpriteBank::from_images(levels, base_height)
}

/// Engine over a synthetic two-level bank of three opaque sprites each.
pub fn test_engine(seed: u64) -> SpawnEngine {
    let config = test_config(seed);
    let bank = test_bank(&config, vec![level_sprites(), level_sprites()]);
    SpawnEngine::with_bank(config, bank)
}

pub fn frame(now_ms: u64, level: usize) -> FrameInput {
    FrameInput {
        dt_ms: 16,
        ground_y: GROUND_Y,
        level,
        now_ms,
        player_safe_x: PLAYER_SAFE_X,
        baseline_offset: 0,
    }
}

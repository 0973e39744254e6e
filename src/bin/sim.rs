//! Headless obstacle-engine simulation.
//!
//! Drives the engine the way the game's frame loop would — fixed 16 ms
//! frames, a level change every 20 s with the matching speed-up — and logs
//! what the stream is doing. Useful for eyeballing spacing behavior
//! without booting the game.
//!
//! Usage: `sim [sprite_dir] [seconds]`

use std::path::PathBuf;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use dino_runner::config::EngineConfig;
use dino_runner::constants::LEVEL_COUNT;
use dino_runner::spawn::{FrameInput, SpawnEngine};

const DT_MS: u32 = 16;
const LEVEL_EVERY_MS: u64 = 20_000;
const LEVEL_SPEED_INCREASE: f32 = 0.15;
const LEVEL_SPEED_CAP_MULT: f32 = 2.50;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = std::env::args().skip(1);
    let sprite_dir = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("assets/obstacles"));
    let seconds: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60);

    let config = EngineConfig {
        sprite_dir,
        seed: Some(42),
        ..EngineConfig::default()
    };
    let viewport = config.viewport;
    let base_speed = config.base_speed;
    let player_safe_x = (viewport.x as f32 * 0.18) as i32 + 40;
    let ground_y = (viewport.y as f32 * 0.86) as i32;

    let mut engine = SpawnEngine::new(config);
    engine.reset(0, 0, player_safe_x, true);
    if engine.is_inert() {
        warn!("No sprites for level 0; the stream will stay empty");
    }

    let mut speed_mult = 1.0f32;
    let mut level = 0usize;
    let mut now_ms = 0u64;

    info!(seconds, "Starting simulation");
    while now_ms < seconds * 1000 {
        now_ms += DT_MS as u64;

        let wanted_level = ((now_ms / LEVEL_EVERY_MS) as usize) % LEVEL_COUNT;
        if wanted_level != level {
            level = wanted_level;
            speed_mult = (speed_mult * (1.0 + LEVEL_SPEED_INCREASE)).min(LEVEL_SPEED_CAP_MULT);
            engine.set_base_speed(base_speed * speed_mult, true);
        }

        engine.update(FrameInput {
            dt_ms: DT_MS,
            ground_y,
            level,
            now_ms,
            player_safe_x,
            baseline_offset: 0,
        });

        if now_ms % 1000 < DT_MS as u64 {
            info!(
                t_s = now_ms / 1000,
                level,
                live = engine.obstacles().len(),
                difficulty = engine.difficulty(),
                speed = engine.base_speed(),
                "tick"
            );
        }
    }

    info!(
        live = engine.obstacles().len(),
        difficulty = engine.difficulty(),
        "Simulation finished"
    );
}

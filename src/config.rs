//! Construction-time configuration for the engine.

use std::path::PathBuf;

use glam::UVec2;

use crate::constants::{
    DEFAULT_BASE_SPEED, DEFAULT_GRAVITY, DEFAULT_JUMP_VEL, MASK_ALPHA_THRESHOLD,
};

/// Everything the engine needs to know up front and never again.
/// Per-frame values travel in [`crate::spawn::FrameInput`].
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Viewport size in pixels.
    pub viewport: UVec2,
    /// Player sprite height in pixels; obstacle sizing and spacing are
    /// relative to it.
    pub player_height: u32,
    /// Directory holding the obstacle sprites, named `bg{level+1}_*.png`.
    pub sprite_dir: PathBuf,
    /// Base world scroll speed, px/s.
    pub base_speed: f32,
    /// Alpha threshold for sprite pixel masks.
    pub mask_alpha_threshold: u8,
    /// Jump initial velocity, px/s. Non-positive disables the jump-arc
    /// spacing floor.
    pub jump_velocity: f32,
    /// Gravity, px/s². Non-positive disables the jump-arc spacing floor.
    pub gravity: f32,
    /// Seed for the engine's random source; `None` seeds from the thread
    /// RNG. Fix it for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            viewport: UVec2::new(1280, 720),
            player_height: 90,
            sprite_dir: PathBuf::from("assets/obstacles"),
            base_speed: DEFAULT_BASE_SPEED,
            mask_alpha_threshold: MASK_ALPHA_THRESHOLD,
            jump_velocity: DEFAULT_JUMP_VEL,
            gravity: DEFAULT_GRAVITY,
            seed: None,
        }
    }
}

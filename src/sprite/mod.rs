//! Obstacle sprite loading and per-height variant processing.

pub mod bank;
pub mod variant;

use crate::constants::OBSTACLE_SCALE;

/// The canonical obstacle height: player-relative, globally scaled, and
/// clamped so obstacles never dwarf the viewport. Individual spawns vary
/// around it.
pub fn base_target_height(player_height: u32, screen_height: u32) -> u32 {
    let target = (player_height as f32 * 0.80 * OBSTACLE_SCALE) as u32;
    target.max(18).min((screen_height as f32 * 0.28) as u32)
}

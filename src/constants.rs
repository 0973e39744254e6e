//! This module contains all the tuning constants of the obstacle engine.

/// Number of world segments ("levels") with obstacle art on disk.
///
/// Backgrounds beyond this index run without obstacles; the engine stays
/// live but inert for them.
pub const LEVEL_COUNT: usize = 6;

/// Alpha-opacity threshold for pixel masks; pixels at or below it are
/// treated as transparent, which ignores very soft sprite edges.
pub const MASK_ALPHA_THRESHOLD: u8 = 50;
/// Minimum number of overlapping mask pixels before a collision counts.
/// Filters out single anti-aliased edge pixels.
pub const MIN_OVERLAP_PIXELS: u32 = 4;

/// Global obstacle height multiplier on top of the player-relative base size.
pub const OBSTACLE_SCALE: f32 = 1.16;

/// Per-filename target-height multipliers for sprites that read too small
/// at the shared base size.
pub const OBSTACLE_SCALE_OVERRIDES: &[(&str, f32)] = &[
    ("bg3_obs1.png", 1.10),
    ("bg4_obs1.png", 1.15),
    ("bg5_obs1.png", 1.20),
    ("bg6_obs1.png", 1.25),
];

/// Play time that drives the time-based difficulty term from 0 to 1.
pub const DIFFICULTY_RAMP_MS: u64 = 50_000;
/// Upper bound of the difficulty scalar.
pub const MAX_DIFFICULTY: f32 = 1.35;
/// Difficulty bonus added on each background/level transition within one attempt.
pub const LEVEL_BONUS_STEP: f32 = 0.09;
/// Cap on the accumulated level bonus.
pub const LEVEL_BONUS_CAP: f32 = 0.40;

/// Jitter window for the first spawn after a reset or level change, in ms.
/// Keeps the start of a level from feeling empty.
pub const FIRST_SPAWN_MIN_MS: u64 = 300;
pub const FIRST_SPAWN_MAX_MS: u64 = 520;

/// Horizon for the anti-catch-up spacing term, in seconds.
pub const CATCHUP_HORIZON_S: f32 = 1.25;

/// Hard cap on obstacle spacing as a fraction of the viewport width.
pub const MAX_GAP_FRAC_OF_SCREEN: f32 = 0.34;
/// Allowance above the resolved gap for the random placement window.
pub const EXTRA_GAP_FRAC: f32 = 0.22;

/// Obstacles are culled once their draw rectangle's right edge passes this x.
pub const CULL_X: i32 = -30;

/// Default jump physics, matching the player character.
pub const DEFAULT_JUMP_VEL: f32 = 1120.0;
pub const DEFAULT_GRAVITY: f32 = 2800.0 / 1.03;
/// Default base scroll speed shared by background and obstacles, px/s.
pub const DEFAULT_BASE_SPEED: f32 = 230.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_jitter_window_ordered() {
        assert!(FIRST_SPAWN_MIN_MS < FIRST_SPAWN_MAX_MS);
    }

    #[test]
    fn test_level_bonus_fits_difficulty_range() {
        // The ramp (1.0) plus the capped bonus must stay reachable below the cap.
        assert!(1.0 + LEVEL_BONUS_CAP >= MAX_DIFFICULTY);
        assert!(LEVEL_BONUS_STEP < LEVEL_BONUS_CAP);
    }

    #[test]
    fn test_scale_overrides_reference_known_levels() {
        for (name, mult) in OBSTACLE_SCALE_OVERRIDES {
            assert!(name.starts_with("bg") && name.ends_with(".png"));
            assert!(*mult > 1.0 && *mult < 1.5);
        }
    }

    #[test]
    fn test_cull_margin_is_left_of_screen() {
        assert!(CULL_X < 0);
    }
}

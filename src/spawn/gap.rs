//! The horizontal spacing solver.
//!
//! Spacing between consecutive obstacles must satisfy three pulls at once:
//! a difficulty-tightened random band for variety, a jump-arc reachability
//! floor so a perfectly timed jump always clears, and a hard cap so the
//! screen never goes empty for long stretches.

use rand::rngs::SmallRng;
use rand::Rng;

use crate::constants::{CATCHUP_HORIZON_S, CULL_X, EXTRA_GAP_FRAC, MAX_GAP_FRAC_OF_SCREEN};

/// Context for placing a new obstacle behind the current rightmost one.
#[derive(Debug, Clone, Copy)]
pub struct GapRequest {
    /// Speed the gap is sized against: the fastest of base speed, the new
    /// obstacle and the previous one.
    pub ref_speed: f32,
    pub new_speed: f32,
    pub prev_speed: f32,
    /// Right edge of the previous obstacle's draw rectangle, world px.
    pub prev_right: f32,
    pub prev_width: u32,
    pub new_width: u32,
    pub tight: bool,
    pub gap_scale: f32,
}

/// The legal placement window, measured from the previous obstacle's right
/// edge. `gap <= max_gap` always holds.
#[derive(Debug, Clone, Copy)]
pub struct GapWindow {
    pub gap: f32,
    pub max_gap: f32,
}

pub struct GapSolver {
    screen_width: f32,
    player_height: f32,
    /// `2v/g`, or `None` when the configured jump physics are unusable
    /// (the reachability floor is then skipped entirely).
    jump_air_time_s: Option<f32>,
}

impl GapSolver {
    pub fn new(screen_width: f32, player_height: f32, jump_velocity: f32, gravity: f32) -> Self {
        let jump_air_time_s =
            (jump_velocity > 0.0 && gravity > 0.0).then(|| 2.0 * jump_velocity / gravity);
        Self {
            screen_width,
            player_height,
            jump_air_time_s,
        }
    }

    pub fn jump_air_time_s(&self) -> Option<f32> {
        self.jump_air_time_s
    }

    /// The absolute spacing cap: no gap may exceed a fixed fraction of the
    /// viewport (plus a small player-relative allowance), regardless of any
    /// other term.
    pub fn max_gap_cap(&self) -> f32 {
        self.screen_width * MAX_GAP_FRAC_OF_SCREEN + self.player_height * 0.45
    }

    /// Resolves the placement window for a new obstacle.
    pub fn resolve(&self, rng: &mut SmallRng, difficulty: f32, request: &GapRequest) -> GapWindow {
        let mut gap = self.draw_gap(
            rng,
            difficulty,
            request.ref_speed,
            request.tight,
            request.gap_scale,
        );

        // Wider silhouettes need proportionally more room to read as two
        // obstacles rather than one blob.
        gap += 0.12 * (request.prev_width + request.new_width) as f32;

        // Anti-catch-up: a faster obstacle spawned behind a slower one
        // would visually close in on it; inject spacing proportional to the
        // closing speed over a bounded horizon.
        if request.new_speed > request.prev_speed + f32::EPSILON && request.prev_speed > f32::EPSILON
        {
            let time_to_off_screen = (request.prev_right - CULL_X as f32) / request.prev_speed;
            let horizon = CATCHUP_HORIZON_S.min(time_to_off_screen.max(0.0));
            gap += (request.new_speed - request.prev_speed) * horizon;
        }

        let cap = self.max_gap_cap();
        gap = gap.min(cap);
        let max_gap = (gap * (1.0 + EXTRA_GAP_FRAC)).min(cap);
        GapWindow { gap, max_gap }
    }

    fn draw_gap(
        &self,
        rng: &mut SmallRng,
        difficulty: f32,
        speed: f32,
        tight: bool,
        gap_scale: f32,
    ) -> f32 {
        let base = speed * 0.62 + self.player_height * 0.85;
        let lo = (base * (0.85 - 0.08 * difficulty)).max(160.0);
        let hi = (base * (1.20 - 0.10 * difficulty)).max(lo + 90.0);

        let mut gap = rng.random_range(lo..=hi);
        if tight {
            gap = (gap * 0.78).max(140.0);
        }
        gap *= gap_scale.max(0.65);

        // Reachability floor: a perfectly timed jump covers
        // `speed * air_time`; never place obstacles closer than a safe
        // fraction of that.
        let mut floor = (self.player_height * 0.90).max(120.0);
        if let Some(air_time) = self.jump_air_time_s {
            let factor = if tight { 0.62 } else { 0.75 };
            floor = floor.max(speed * air_time * factor);
        }
        gap.max(floor)
    }
}

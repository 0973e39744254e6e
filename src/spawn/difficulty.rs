//! The continuous difficulty curve.

use crate::constants::{DIFFICULTY_RAMP_MS, LEVEL_BONUS_CAP, LEVEL_BONUS_STEP, MAX_DIFFICULTY};

/// Tracks elapsed play time and the per-level bonus, deriving a single
/// difficulty scalar in `[0, MAX_DIFFICULTY]`.
///
/// Within one attempt the scalar never regresses: time only accumulates
/// and the level bonus is a capped ratchet. Only a full reset zeroes it.
#[derive(Debug, Clone, Default)]
pub struct DifficultyModel {
    elapsed_ms: u64,
    level_bonus: f32,
    difficulty: f32,
}

impl DifficultyModel {
    pub fn advance(&mut self, dt_ms: u32) {
        self.elapsed_ms += dt_ms as u64;
        self.recompute();
    }

    /// Ratchets the level bonus on a background/level transition.
    pub fn on_level_change(&mut self) {
        self.level_bonus = (self.level_bonus + LEVEL_BONUS_STEP).min(LEVEL_BONUS_CAP);
        self.recompute();
    }

    /// Full reset for a fresh attempt.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn value(&self) -> f32 {
        self.difficulty
    }

    pub fn level_bonus(&self) -> f32 {
        self.level_bonus
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Current world speed: the one place difficulty drives velocity
    /// directly. Spacing tightness and pattern unlocks are the other two
    /// levers.
    pub fn scroll_speed(&self, base_speed: f32) -> f32 {
        base_speed * (1.0 + 0.20 * self.difficulty)
    }

    fn recompute(&mut self) {
        let base = (self.elapsed_ms as f32 / DIFFICULTY_RAMP_MS as f32).min(1.0);
        let bonus = self.level_bonus.min(LEVEL_BONUS_CAP);
        self.difficulty = (base + bonus).min(MAX_DIFFICULTY);
    }
}

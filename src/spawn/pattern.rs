//! Spawn pattern selection.
//!
//! A pattern is a named, ordered cluster of spawns. The first spec is the
//! anchor with default biases; followers tighten spacing and bias toward
//! smaller, narrower sprites so clusters stay readable.

use rand::rngs::SmallRng;
use rand::Rng;
use smallvec::{smallvec, SmallVec};
use strum_macros::{AsRefStr, Display};

/// Per-obstacle biases emitted during pattern expansion. Transient.
#[derive(Debug, Clone, Copy)]
pub struct SpawnSpec {
    pub gap_scale: f32,
    pub size_bias: f32,
    pub speed_scale: f32,
    pub prefer_narrow: bool,
}

impl Default for SpawnSpec {
    fn default() -> Self {
        Self {
            gap_scale: 1.0,
            size_bias: 1.0,
            speed_scale: 1.0,
            prefer_narrow: false,
        }
    }
}

/// Spec lists never exceed the triple pattern.
pub type SpecList = SmallVec<[SpawnSpec; 3]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum PatternKind {
    Single,
    Double,
    DoubleTight,
    Stagger,
    Triple,
}

impl PatternKind {
    /// Tight patterns get the extra-compressed gap treatment on their
    /// follower spawns.
    pub fn is_tight(self) -> bool {
        matches!(self, PatternKind::DoubleTight)
    }
}

/// Chooses the next spawn pattern from difficulty-banded probability
/// tables, with a cooldown after clusters and a stochastic anti-repeat
/// rule.
#[derive(Debug, Default)]
pub struct PatternSelector {
    cooldown_ms: u32,
    last: Option<PatternKind>,
}

impl PatternSelector {
    pub fn tick(&mut self, dt_ms: u32) {
        self.cooldown_ms = self.cooldown_ms.saturating_sub(dt_ms);
    }

    pub fn cooldown_ms(&self) -> u32 {
        self.cooldown_ms
    }

    /// Picks a pattern for the current difficulty. Lower bands only ever
    /// produce singles and doubles; triples unlock at the top band. A
    /// running cooldown forces a single.
    pub fn select(&self, rng: &mut SmallRng, difficulty: f32) -> (PatternKind, SpecList) {
        if self.cooldown_ms > 0 {
            return Self::single();
        }

        let roll: f32 = rng.random();
        let (kind, specs) = Self::banded(difficulty, roll);

        // Repeating a multi-obstacle pattern back to back reads as a loop;
        // collapse most (not all) repeats into a single.
        if Some(kind) == self.last && kind != PatternKind::Single && rng.random::<f32>() < 0.60 {
            return Self::single();
        }

        (kind, specs)
    }

    /// Records a completed spawn round: remembers the pattern for the
    /// anti-repeat rule and arms the cooldown after clusters.
    pub fn mark_spawned(&mut self, kind: PatternKind, spawned: usize, difficulty: f32) {
        if spawned > 1 {
            self.cooldown_ms = (600.0 + 260.0 * spawned as f32 + 200.0 * difficulty) as u32;
        }
        if spawned > 0 {
            self.last = Some(kind);
        }
    }

    /// Level transitions keep a small cooldown so the new stream doesn't
    /// open with a cluster, and forget the anti-repeat memory.
    pub fn on_level_change(&mut self) {
        self.cooldown_ms = self.cooldown_ms.min(450);
        self.last = None;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn single() -> (PatternKind, SpecList) {
        (PatternKind::Single, smallvec![SpawnSpec::default()])
    }

    fn banded(difficulty: f32, roll: f32) -> (PatternKind, SpecList) {
        if difficulty < 0.20 {
            Self::single()
        } else if difficulty < 0.45 {
            if roll < 0.25 {
                (
                    PatternKind::Double,
                    smallvec![
                        SpawnSpec::default(),
                        SpawnSpec {
                            gap_scale: 0.82,
                            size_bias: 0.96,
                            prefer_narrow: true,
                            ..SpawnSpec::default()
                        },
                    ],
                )
            } else {
                Self::single()
            }
        } else if difficulty < 0.75 {
            if roll < 0.20 {
                (
                    PatternKind::DoubleTight,
                    smallvec![
                        SpawnSpec::default(),
                        SpawnSpec {
                            gap_scale: 0.74,
                            size_bias: 0.94,
                            prefer_narrow: true,
                            ..SpawnSpec::default()
                        },
                    ],
                )
            } else if roll < 0.32 {
                (
                    PatternKind::Stagger,
                    smallvec![
                        SpawnSpec {
                            size_bias: 0.92,
                            ..SpawnSpec::default()
                        },
                        SpawnSpec {
                            gap_scale: 0.88,
                            size_bias: 1.08,
                            ..SpawnSpec::default()
                        },
                    ],
                )
            } else {
                Self::single()
            }
        } else if roll < 0.18 {
            (
                PatternKind::Triple,
                smallvec![
                    SpawnSpec {
                        size_bias: 0.92,
                        ..SpawnSpec::default()
                    },
                    SpawnSpec {
                        gap_scale: 0.76,
                        size_bias: 0.98,
                        prefer_narrow: true,
                        ..SpawnSpec::default()
                    },
                    SpawnSpec {
                        gap_scale: 0.86,
                        size_bias: 1.05,
                        ..SpawnSpec::default()
                    },
                ],
            )
        } else if roll < 0.34 {
            (
                PatternKind::DoubleTight,
                smallvec![
                    SpawnSpec::default(),
                    SpawnSpec {
                        gap_scale: 0.74,
                        size_bias: 0.95,
                        prefer_narrow: true,
                        ..SpawnSpec::default()
                    },
                ],
            )
        } else if roll < 0.46 {
            (
                PatternKind::Stagger,
                smallvec![
                    SpawnSpec {
                        size_bias: 0.92,
                        ..SpawnSpec::default()
                    },
                    SpawnSpec {
                        gap_scale: 0.90,
                        size_bias: 1.08,
                        ..SpawnSpec::default()
                    },
                ],
            )
        } else {
            Self::single()
        }
    }
}

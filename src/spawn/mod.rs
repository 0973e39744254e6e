//! Obstacle spawn orchestration.
//!
//! [`SpawnEngine`] owns the live obstacle collection and everything that
//! feeds it: the difficulty curve, pattern selection, the spacing solver
//! and the sprite variant cache. The host calls [`SpawnEngine::update`]
//! once per frame and reads [`SpawnEngine::obstacles`] back for rendering
//! and collision.

pub mod difficulty;
pub mod gap;
pub mod obstacle;
pub mod pattern;

use circular_buffer::CircularBuffer;
use glam::UVec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::constants::{CULL_X, FIRST_SPAWN_MAX_MS, FIRST_SPAWN_MIN_MS, LEVEL_COUNT};
use crate::sprite::bank::SpriteBank;
use crate::sprite::base_target_height;
use crate::sprite::variant::VariantCache;

use self::difficulty::DifficultyModel;
use self::gap::{GapRequest, GapSolver};
use self::obstacle::{Obstacle, Pinning};
use self::pattern::{PatternSelector, SpawnSpec};

/// Per-frame inputs from the host. The host clamps `dt_ms` against stalls
/// (window drags, hitches); the engine trusts it as-is.
#[derive(Debug, Clone, Copy)]
pub struct FrameInput {
    pub dt_ms: u32,
    /// Ground line for the current level, already level-specific.
    pub ground_y: i32,
    /// Active level index; a change triggers the level-transition path.
    pub level: usize,
    /// Monotonic clock, ms.
    pub now_ms: u64,
    /// Rightmost x still occupied by the player; obstacles never spawn
    /// before it.
    pub player_safe_x: i32,
    /// Extra pixels to lift the baseline above the ground line.
    pub baseline_offset: i32,
}

#[derive(Debug, Default)]
struct SpawnSchedule {
    /// Absolute time of the next pattern trigger.
    next_spawn_ms: u64,
    /// Last ≤2 sprite indices chosen, to bias selection away from repeats.
    recent_sprites: CircularBuffer<2, usize>,
}

/// The procedural obstacle engine.
pub struct SpawnEngine {
    screen: UVec2,
    player_height: u32,
    base_height: u32,
    base_speed: f32,
    level: usize,
    variants: VariantCache,
    difficulty: DifficultyModel,
    patterns: PatternSelector,
    gaps: GapSolver,
    schedule: SpawnSchedule,
    obstacles: Vec<Obstacle>,
    rng: SmallRng,
}

impl SpawnEngine {
    /// Builds the engine, loading sprites from the configured directory.
    /// Missing or broken sprite files degrade the bank; they never fail
    /// construction.
    pub fn new(config: EngineConfig) -> Self {
        let base_height = base_target_height(config.player_height, config.viewport.y);
        let bank = SpriteBank::load(&config.sprite_dir, base_height);
        Self::with_bank(config, bank)
    }

    /// Builds the engine over an already-constructed sprite bank (embedded
    /// assets, tests).
    pub fn with_bank(config: EngineConfig, bank: SpriteBank) -> Self {
        let base_height = base_target_height(config.player_height, config.viewport.y);
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_rng(&mut rand::rng()),
        };
        if (0..LEVEL_COUNT).all(|level| bank.is_empty(level)) {
            warn!("No obstacle sprites loaded; the engine will stay inert");
        }

        Self {
            screen: config.viewport,
            player_height: config.player_height,
            base_height,
            base_speed: config.base_speed,
            level: 0,
            variants: VariantCache::new(bank, config.mask_alpha_threshold),
            difficulty: DifficultyModel::default(),
            patterns: PatternSelector::default(),
            gaps: GapSolver::new(
                config.viewport.x as f32,
                config.player_height as f32,
                config.jump_velocity,
                config.gravity,
            ),
            schedule: SpawnSchedule::default(),
            obstacles: Vec::new(),
            rng,
        }
    }

    /// The live obstacle collection, ascending by `x` after each update.
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn difficulty(&self) -> f32 {
        self.difficulty.value()
    }

    pub fn base_speed(&self) -> f32 {
        self.base_speed
    }

    /// Absolute time of the next scheduled pattern trigger.
    pub fn next_spawn_at(&self) -> u64 {
        self.schedule.next_spawn_ms
    }

    /// Whether the current level has no loadable sprites and therefore
    /// spawns nothing. Degraded but not an error; the host may surface a
    /// warning.
    pub fn is_inert(&self) -> bool {
        self.variants.bank().is_empty(self.level)
    }

    /// Changes the base world speed. With `rescale_existing`, every live
    /// obstacle's speed is multiplied by the exact `new / old` ratio so
    /// obstacles already in flight match the new pace instead of snapping.
    pub fn set_base_speed(&mut self, new_base_speed: f32, rescale_existing: bool) {
        let old = if self.base_speed > 0.0 {
            self.base_speed
        } else {
            new_base_speed
        };
        self.base_speed = new_base_speed;

        if rescale_existing && old > 0.0 {
            let ratio = new_base_speed / old;
            for obstacle in &mut self.obstacles {
                obstacle.speed *= ratio;
            }
        }
    }

    /// Shifts the spawn schedule forward after the host paused the game,
    /// so the stream resumes where it left off instead of dumping a
    /// backlog.
    pub fn suspend_for(&mut self, paused_ms: u64) {
        self.schedule.next_spawn_ms += paused_ms;
    }

    /// Full reset for a fresh attempt: clears obstacles and recency,
    /// zeroes difficulty. With `start_visible`, one anchor obstacle is
    /// placed on screen immediately.
    pub fn reset(&mut self, level: usize, now_ms: u64, player_safe_x: i32, start_visible: bool) {
        self.level = level;
        self.obstacles.clear();
        self.difficulty.reset();
        self.patterns.reset();
        self.schedule.recent_sprites.clear();
        debug!(level, "Obstacle engine reset");

        if start_visible {
            let x = self.initial_visible_x(player_safe_x);
            self.spawn_one(
                0,
                self.base_speed,
                player_safe_x,
                Some(x),
                false,
                SpawnSpec::default(),
            );
        }
        self.schedule_first_spawn(now_ms);
    }

    /// Level transition: a full re-entry into the new level's obstacle
    /// stream without a difficulty reset. Obstacles and sprite recency are
    /// cleared, the level bonus ratchets up, and one anchor spawns at the
    /// visible start position.
    pub fn on_level_change(&mut self, level: usize, now_ms: u64, player_safe_x: i32) {
        self.level = level;
        self.obstacles.clear();
        self.schedule.recent_sprites.clear();
        self.patterns.on_level_change();
        self.difficulty.on_level_change();
        debug!(
            level,
            difficulty = self.difficulty.value(),
            "Entering level obstacle stream"
        );

        let x = self.initial_visible_x(player_safe_x);
        self.spawn_one(
            0,
            self.base_speed,
            player_safe_x,
            Some(x),
            false,
            SpawnSpec::default(),
        );
        self.schedule_first_spawn(now_ms);
    }

    /// Advances the engine by one frame: pins deferred obstacles, advances
    /// difficulty, advects and culls, and spawns the next pattern when due.
    pub fn update(&mut self, frame: FrameInput) {
        if frame.level != self.level {
            self.on_level_change(frame.level, frame.now_ms, frame.player_safe_x);
            return;
        }
        if self.variants.bank().is_empty(self.level) {
            return;
        }

        let baseline_y = frame.ground_y - frame.baseline_offset.max(0);

        for obstacle in &mut self.obstacles {
            if !obstacle.is_pinned() {
                obstacle.pin_to(baseline_y);
            }
        }

        self.difficulty.advance(frame.dt_ms);
        self.patterns.tick(frame.dt_ms);
        let scroll_speed = self.difficulty.scroll_speed(self.base_speed);

        let dt_s = frame.dt_ms as f32 / 1000.0;
        for obstacle in &mut self.obstacles {
            obstacle.x -= obstacle.speed * dt_s;
            obstacle.sync_rects();
        }
        self.obstacles
            .retain(|obstacle| obstacle.draw_rect.right() >= CULL_X);

        // The gap and catch-up logic reason about "the most recently placed
        // obstacle", defined as the rightmost one.
        self.obstacles.sort_by(|a, b| a.x.total_cmp(&b.x));

        if frame.now_ms >= self.schedule.next_spawn_ms {
            let (kind, specs) = self.patterns.select(&mut self.rng, self.difficulty.value());
            let mut spawned = 0usize;
            for (index, spec) in specs.iter().enumerate() {
                let tight = kind.is_tight() && index > 0;
                if self.spawn_one(
                    baseline_y,
                    scroll_speed,
                    frame.player_safe_x,
                    None,
                    tight,
                    *spec,
                ) {
                    spawned += 1;
                }
            }

            let mut interval = self.spawn_interval_ms();
            if spawned > 1 {
                interval = (interval as f32 * (1.0 + 0.35 * (spawned - 1) as f32)) as u64;
                debug!(pattern = %kind, spawned, interval, "Spawned obstacle cluster");
            }
            self.schedule.next_spawn_ms = frame.now_ms + interval;
            self.patterns
                .mark_spawned(kind, spawned, self.difficulty.value());
        }
    }

    /// Places one obstacle. `start_x` is the explicit on-screen position
    /// used by reset/level entry, where the ground line may not be known
    /// yet; such obstacles spawn unpinned and snap on the next update.
    fn spawn_one(
        &mut self,
        baseline_y: i32,
        base_speed: f32,
        player_safe_x: i32,
        start_x: Option<f32>,
        tight: bool,
        spec: SpawnSpec,
    ) -> bool {
        if self.variants.bank().is_empty(self.level) {
            return false;
        }

        let sprite = self.pick_sprite(spec.prefer_narrow);
        let mut target_height = self.pick_variant_height(spec.size_bias);
        let scale_mult = self.variants.bank().scale_override(self.level, sprite);
        if scale_mult != 1.0 {
            target_height = ((target_height as f32 * scale_mult) as u32).max(8);
        }
        let variant = self.variants.get(self.level, sprite, target_height);

        let (y, pinning) = match start_x {
            Some(_) => (-(variant.foot_bottom) as f32, Pinning::Unpinned),
            None => ((baseline_y - variant.foot_bottom) as f32, Pinning::Pinned),
        };

        // Speed first: the gap is sized against it.
        let speed_scale = spec.speed_scale.clamp(0.92, 1.08);
        let speed = base_speed * self.rng.random_range(0.98..=1.06) * speed_scale;

        let mut x = match start_x {
            Some(x) => x,
            None => {
                let pad_hi = (self.screen.x as f32 * 0.12).max(36.0) as i32;
                (self.screen.x as i32 + self.rng.random_range(24..=pad_hi)) as f32
            }
        };

        if let Some(last) = self.obstacles.last() {
            let request = GapRequest {
                ref_speed: base_speed.max(speed).max(last.speed),
                new_speed: speed,
                prev_speed: last.speed,
                prev_right: last.draw_rect.right() as f32,
                prev_width: last.draw_rect.w,
                new_width: variant.width(),
                tight,
                gap_scale: spec.gap_scale,
            };
            let window = self
                .gaps
                .resolve(&mut self.rng, self.difficulty.value(), &request);
            let min_x = request.prev_right + window.gap;
            let max_x = request.prev_right + window.max_gap;
            x = x.clamp(min_x, max_x);
        }

        if start_x.is_none() {
            let safe_floor = player_safe_x as f32 + self.screen.x as f32 * 0.26;
            x = x.max(safe_floor);
        }

        self.obstacles
            .push(Obstacle::new(variant, x, y, speed, pinning));
        true
    }

    /// Weighted sprite pick. Narrow silhouettes (relative to the level's
    /// width range) are favored, doubly so when the spec prefers narrow,
    /// and the last two picks are penalized rather than excluded.
    fn pick_sprite(&mut self, prefer_narrow: bool) -> usize {
        let widths = self.variants.bank().base_widths(self.level);
        if widths.is_empty() {
            return 0;
        }

        let w_max = widths.iter().copied().max().unwrap_or(1).max(1);
        let w_min = widths.iter().copied().min().unwrap_or(1).max(1);

        let mut weights = Vec::with_capacity(widths.len());
        for (index, &width) in widths.iter().enumerate() {
            let narrow_bias = if w_max == w_min {
                0.0
            } else {
                (w_max - width) as f32 / (w_max - w_min) as f32
            };
            let mut weight = 1.0 + 0.6 * narrow_bias;
            if prefer_narrow {
                weight *= 1.2 + 0.7 * narrow_bias;
            }
            if widths.len() > 1
                && self
                    .schedule
                    .recent_sprites
                    .iter()
                    .any(|&recent| recent == index)
            {
                weight *= 0.55;
            }
            weights.push(weight);
        }

        let total: f32 = weights.iter().sum();
        let mut roll = self.rng.random_range(0.0..total);
        let mut picked = weights.len() - 1;
        for (index, &weight) in weights.iter().enumerate() {
            if roll < weight {
                picked = index;
                break;
            }
            roll -= weight;
        }

        if widths.len() > 1 {
            self.schedule.recent_sprites.push_back(picked);
        }
        picked
    }

    /// Target height for the next spawn: a difficulty-widened spread around
    /// the base height, nudged by the spec's size bias, clamped so no
    /// spawn strays far from the canonical silhouette.
    fn pick_variant_height(&mut self, size_bias: f32) -> u32 {
        let base = self.base_height as f32;
        let spread = 0.10 + 0.06 * self.difficulty.value();
        let lo = base * (1.0 - spread);
        let hi = base * (1.0 + spread);
        let target = self.rng.random_range(lo..=hi) * size_bias.clamp(0.85, 1.15);

        let min_height = (base * 0.84) as u32;
        let max_height = (base * 1.18) as u32;
        (target as u32).clamp(min_height, max_height)
    }

    fn spawn_interval_ms(&mut self) -> u64 {
        let difficulty = self.difficulty.value();
        let lo = ((900.0 - 200.0 * difficulty) as i64).max(600);
        let hi = ((1400.0 - 300.0 * difficulty) as i64).max(lo + 120);
        self.rng.random_range(lo..=hi) as u64
    }

    /// Start position for the anchor obstacle after reset/level entry:
    /// close enough to avoid an empty screen, but never inside the
    /// player's safe zone.
    fn initial_visible_x(&mut self, player_safe_x: i32) -> f32 {
        let x = self.screen.x as f32 * self.rng.random_range(0.50..=0.66);
        let min_x = player_safe_x as f32 + self.screen.x as f32 * 0.26;
        x.max(min_x)
    }

    fn schedule_first_spawn(&mut self, now_ms: u64) {
        let early = self.rng.random_range(FIRST_SPAWN_MIN_MS..=FIRST_SPAWN_MAX_MS);
        let interval = self.spawn_interval_ms();
        self.schedule.next_spawn_ms = now_ms + interval.min(early);
    }
}

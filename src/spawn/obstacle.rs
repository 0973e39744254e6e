//! Live obstacle state.

use std::sync::Arc;

use crate::geometry::Rect;
use crate::sprite::variant::SpriteVariant;

/// Whether an obstacle's vertical position has been confirmed against the
/// ground baseline. Obstacles spawned before the ground line is first
/// known start [`Pinning::Unpinned`] and are snapped on the next update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pinning {
    Unpinned,
    Pinned,
}

/// One live obstacle. Created and mutated only by the spawn engine.
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub variant: Arc<SpriteVariant>,
    /// Continuous world position of the sprite's top-left corner.
    pub x: f32,
    pub y: f32,
    /// Horizontal speed in px/s, fixed at spawn; changed only by a global
    /// base-speed rescale.
    pub speed: f32,
    /// Full sprite rectangle at the current position.
    pub draw_rect: Rect,
    /// The variant's tight bounds translated to the current position.
    pub hit_rect: Rect,
    pub pinning: Pinning,
}

impl Obstacle {
    pub fn new(variant: Arc<SpriteVariant>, x: f32, y: f32, speed: f32, pinning: Pinning) -> Self {
        let mut obstacle = Self {
            variant,
            x,
            y,
            speed,
            draw_rect: Rect::default(),
            hit_rect: Rect::default(),
            pinning,
        };
        obstacle.sync_rects();
        obstacle
    }

    /// Recomputes the draw and hit rectangles from the continuous position.
    pub fn sync_rects(&mut self) {
        let (x, y) = (self.x as i32, self.y as i32);
        self.draw_rect = Rect::new(x, y, self.variant.width(), self.variant.height());
        self.hit_rect = self.variant.bounds.offset(x, y);
    }

    /// Snaps the sprite's foot line onto the ground baseline.
    pub fn pin_to(&mut self, baseline_y: i32) {
        self.y = (baseline_y - self.variant.foot_bottom) as f32;
        self.sync_rects();
        self.pinning = Pinning::Pinned;
    }

    pub fn is_pinned(&self) -> bool {
        self.pinning == Pinning::Pinned
    }
}

//! Pixel-accurate player-vs-obstacle collision queries.

use glam::IVec2;

use crate::constants::MIN_OVERLAP_PIXELS;
use crate::geometry::Rect;
use crate::mask::PixelMask;
use crate::spawn::obstacle::Obstacle;

/// Tests the player's pixel mask against the live obstacle collection.
///
/// A cheap rectangle test gates the mask work; a collision then requires
/// at least `min_overlap_pixels` overlapping opaque pixels, which ignores
/// grazing contact on anti-aliased sprite edges.
#[derive(Debug, Clone, Copy)]
pub struct CollisionDetector {
    pub min_overlap_pixels: u32,
}

impl Default for CollisionDetector {
    fn default() -> Self {
        Self {
            min_overlap_pixels: MIN_OVERLAP_PIXELS,
        }
    }
}

impl CollisionDetector {
    pub fn new(min_overlap_pixels: u32) -> Self {
        Self { min_overlap_pixels }
    }

    /// True as soon as any obstacle overlaps the player by at least the
    /// pixel threshold. `player_top_left` is the world position of the
    /// player sprite (and mask) origin; `player_hit_rect` is its tight
    /// bounds in world space.
    pub fn collides(
        &self,
        obstacles: &[Obstacle],
        player_mask: &PixelMask,
        player_top_left: IVec2,
        player_hit_rect: Rect,
    ) -> bool {
        for obstacle in obstacles {
            if !obstacle.hit_rect.has_intersection(&player_hit_rect) {
                continue;
            }

            let offset = (
                obstacle.draw_rect.x - player_top_left.x,
                obstacle.draw_rect.y - player_top_left.y,
            );
            if player_mask.overlap_area(&obstacle.variant.mask, offset) >= self.min_overlap_pixels {
                return true;
            }
        }
        false
    }
}

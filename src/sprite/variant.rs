//! Processed sprite variants, memoized per (level, sprite, height).

use std::collections::HashMap;
use std::sync::Arc;

use image::imageops::{self, FilterType};
use image::RgbaImage;
use tracing::debug;

use crate::geometry::Rect;
use crate::mask::PixelMask;
use crate::sprite::bank::SpriteBank;

/// A sprite fully processed at one specific render height: the scaled
/// image, its pixel mask, the tight bounding rectangle (sprite-relative)
/// and the foot baseline. Immutable once built.
#[derive(Debug, Clone)]
pub struct SpriteVariant {
    pub image: RgbaImage,
    pub mask: PixelMask,
    /// Union of all above-threshold mask regions; the full image rectangle
    /// when the mask is empty.
    pub bounds: Rect,
    /// Bottom-most occupied row, i.e. the ground-contact line. Always equal
    /// to `bounds.bottom()`.
    pub foot_bottom: i32,
}

impl SpriteVariant {
    /// Scales `source` to `target_height` (aspect-preserving) and derives
    /// mask and bounds at the given alpha threshold.
    pub fn from_image(source: &RgbaImage, target_height: u32, alpha_threshold: u8) -> Self {
        let image = scale_to_height(source, target_height);
        Self::from_scaled(image, alpha_threshold)
    }

    /// A 1×1 fully transparent stand-in for levels with no loadable
    /// sprites; keeps spawning total-failure-free.
    pub fn dummy(alpha_threshold: u8) -> Self {
        Self::from_scaled(RgbaImage::new(1, 1), alpha_threshold)
    }

    fn from_scaled(image: RgbaImage, alpha_threshold: u8) -> Self {
        let mask = PixelMask::from_alpha(&image, alpha_threshold);
        let bounds = mask
            .bounding_rect()
            .unwrap_or_else(|| Rect::new(0, 0, image.width(), image.height()));
        Self {
            foot_bottom: bounds.bottom(),
            image,
            mask,
            bounds,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Aspect-preserving scale to an exact pixel height.
pub fn scale_to_height(source: &RgbaImage, target_height: u32) -> RgbaImage {
    let target_height = target_height.max(8);
    let scale = target_height as f32 / source.height().max(1) as f32;
    let target_width = ((source.width() as f32 * scale) as u32).max(1);
    imageops::resize(source, target_width, target_height, FilterType::Triangle)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct VariantKey {
    level: usize,
    sprite: usize,
    height: u32,
}

/// Memoizing cache of [`SpriteVariant`]s over a [`SpriteBank`].
///
/// Growth is eviction-free; the key space is bounded in practice by the
/// finite sprite set and the clamped height range.
pub struct VariantCache {
    bank: SpriteBank,
    alpha_threshold: u8,
    cache: HashMap<VariantKey, Arc<SpriteVariant>>,
}

impl VariantCache {
    pub fn new(bank: SpriteBank, alpha_threshold: u8) -> Self {
        Self {
            bank,
            alpha_threshold,
            cache: HashMap::new(),
        }
    }

    pub fn bank(&self) -> &SpriteBank {
        &self.bank
    }

    /// The variant for `(level, sprite)` at `target_height`, built on first
    /// use. Levels without sprites yield the transparent dummy.
    pub fn get(&mut self, level: usize, sprite: usize, target_height: u32) -> Arc<SpriteVariant> {
        let key = VariantKey {
            level,
            sprite,
            height: target_height,
        };
        if let Some(variant) = self.cache.get(&key) {
            return Arc::clone(variant);
        }

        let variant = match self.bank.sprites(level).get(sprite) {
            Some(source) => {
                debug!(level, sprite, target_height, "Building sprite variant");
                SpriteVariant::from_image(source, target_height, self.alpha_threshold)
            }
            None => SpriteVariant::dummy(self.alpha_threshold),
        };
        let variant = Arc::new(variant);
        self.cache.insert(key, Arc::clone(&variant));
        variant
    }
}

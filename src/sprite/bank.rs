//! Per-level obstacle sprite banks.
//!
//! Each level owns the raw images whose filenames match its naming
//! convention (`bg{level+1}_*.png`). Loading is error-tolerant: an
//! unreadable or undecodable file is skipped with a warning, and a level
//! with no sprites at all simply spawns nothing.

use std::fs;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use tracing::{debug, warn};

use crate::constants::{LEVEL_COUNT, OBSTACLE_SCALE_OVERRIDES};
use crate::error::{AssetError, AssetResult};

struct LevelBank {
    sprites: Vec<RgbaImage>,
    /// Filenames parallel to `sprites`; empty for banks built from memory.
    names: Vec<String>,
    /// Widths after scaling each sprite to the shared base height.
    /// Used only to weight sprite selection toward narrow silhouettes.
    base_widths: Vec<u32>,
}

/// All raw obstacle sprites available to the engine, grouped by level.
pub struct SpriteBank {
    levels: Vec<LevelBank>,
}

impl SpriteBank {
    /// Loads every level's sprites from `dir`. A missing directory or file
    /// degrades to an empty bank; it never fails.
    pub fn load(dir: &Path, base_height: u32) -> Self {
        let mut all_paths: Vec<PathBuf> = match fs::read_dir(dir) {
            Ok(entries) => entries
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .collect(),
            Err(err) => {
                warn!(dir = %dir.display(), %err, "Obstacle sprite directory unreadable");
                Vec::new()
            }
        };
        all_paths.sort();

        let mut levels = Vec::with_capacity(LEVEL_COUNT);
        for level in 0..LEVEL_COUNT {
            let prefix = format!("bg{}_", level + 1);
            let paths = all_paths.iter().filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(&prefix) && n.ends_with(".png"))
            });

            let mut sprites = Vec::new();
            let mut names = Vec::new();
            for path in paths {
                match read_sprite(path) {
                    Ok(image) => {
                        names.push(
                            path.file_name()
                                .and_then(|n| n.to_str())
                                .unwrap_or_default()
                                .to_string(),
                        );
                        sprites.push(image);
                    }
                    Err(err) => warn!(%err, "Skipping obstacle sprite"),
                }
            }

            debug!(level, count = sprites.len(), "Loaded obstacle sprites");
            levels.push(LevelBank {
                base_widths: base_widths(&sprites, base_height),
                sprites,
                names,
            });
        }
        Self { levels }
    }

    /// Builds a bank from in-memory images, one vector per level. This is
    /// the path for embedded assets and tests; such sprites have no
    /// filenames and therefore no per-file scale overrides.
    pub fn from_images(levels: Vec<Vec<RgbaImage>>, base_height: u32) -> Self {
        let levels = levels
            .into_iter()
            .map(|sprites| LevelBank {
                base_widths: base_widths(&sprites, base_height),
                names: Vec::new(),
                sprites,
            })
            .collect();
        Self { levels }
    }

    pub fn sprites(&self, level: usize) -> &[RgbaImage] {
        self.levels.get(level).map_or(&[], |bank| &bank.sprites)
    }

    pub fn len(&self, level: usize) -> usize {
        self.sprites(level).len()
    }

    pub fn is_empty(&self, level: usize) -> bool {
        self.len(level) == 0
    }

    pub fn base_widths(&self, level: usize) -> &[u32] {
        self.levels.get(level).map_or(&[], |bank| &bank.base_widths)
    }

    /// The per-filename target-height multiplier for a sprite, 1.0 when none
    /// applies.
    pub fn scale_override(&self, level: usize, sprite: usize) -> f32 {
        let Some(name) = self
            .levels
            .get(level)
            .and_then(|bank| bank.names.get(sprite))
        else {
            return 1.0;
        };
        OBSTACLE_SCALE_OVERRIDES
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(name))
            .map_or(1.0, |(_, mult)| *mult)
    }
}

fn read_sprite(path: &Path) -> AssetResult<RgbaImage> {
    let bytes = fs::read(path).map_err(|source| AssetError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let image = image::load_from_memory(&bytes).map_err(|source| AssetError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(image.to_rgba8())
}

/// Width of each sprite once scaled (aspect-preserving) to `base_height`.
fn base_widths(sprites: &[RgbaImage], base_height: u32) -> Vec<u32> {
    sprites
        .iter()
        .map(|image| {
            let scale = base_height.max(8) as f32 / image.height().max(1) as f32;
            ((image.width() as f32 * scale) as u32).max(1)
        })
        .collect()
}

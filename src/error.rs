//! Centralized error types for the obstacle engine.
//!
//! Nothing in this subsystem is fatal to the host: failures are `Result`s
//! internally and collapse to a safe default (a skipped sprite, an empty
//! bank, a dummy variant) at the public boundary.

use std::io;
use std::path::PathBuf;

/// Errors raised while loading obstacle sprites.
///
/// A failed sprite is omitted from its level bank; a level whose bank ends
/// up empty is a degraded-but-running state, not an error surfaced to the
/// player.
#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Result type for the engine's fallible internals.
pub type AssetResult<T> = Result<T, AssetError>;

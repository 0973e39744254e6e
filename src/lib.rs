//! Procedural obstacle engine for a side-scrolling dino runner.
//!
//! The engine manufactures an endless, difficulty-scaled stream of obstacles
//! synchronized to a scrolling world, keeps their horizontal spacing fair
//! relative to the player's jump physics, and answers pixel-accurate
//! collision queries against the player. It renders nothing and owns no
//! window, audio, or settings state; the host drives it once per frame.

pub mod collision;
pub mod config;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod mask;
pub mod spawn;
pub mod sprite;

//! Boxshot - a minimal first-person shooter demo
//!
//! Force-driven player movement, mouse look, and hitscan shooting with a
//! clip/reserve reload cycle, in a small arena of physics boxes.

pub mod config;
pub mod input;
pub mod scene;
pub mod systems;

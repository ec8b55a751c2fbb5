//! Scene construction utilities
//!
//! This module turns scene descriptions into worlds with physics.

mod scene_builder;

pub use scene_builder::{SceneBuilder, PLAYER_COLOR};

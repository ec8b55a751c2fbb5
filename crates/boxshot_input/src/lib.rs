//! FPS Input Handling
//!
//! This crate tracks held movement keys and mouse motion for the player
//! and applies them to any camera implementing [`CameraControl`].

mod player_controller;

pub use player_controller::{CameraControl, PlayerController, DEFAULT_MOUSE_SENSITIVITY};

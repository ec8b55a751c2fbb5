//! Application systems
//!
//! The game loop is split into simulation, window and GPU systems so each
//! can be driven and tested on its own.

mod render;
mod simulation;
mod window;

pub use render::{RenderError, RenderSystem};
pub use simulation::{shot_ray, ShotResult, SimulationResult, SimulationSystem, DEFAULT_EYE_HEIGHT, MAX_FRAME_DT, MAX_SHOT_DISTANCE};
pub use window::{format_title, WindowError, WindowSystem};

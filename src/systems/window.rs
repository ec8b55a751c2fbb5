//! Window management system
//!
//! Handles window creation, cursor capture/release, fullscreen toggle, and title updates.

use std::sync::Arc;
use winit::{
    dpi::PhysicalPosition,
    event_loop::ActiveEventLoop,
    window::{CursorGrabMode, Fullscreen, Window},
};

use boxshot_math::Vec3;
use crate::config::WindowConfig;

/// Manages the application window and cursor state
pub struct WindowSystem {
    window: Arc<Window>,
    cursor_captured: bool,
    /// Confined grabs need manual recentering to emulate infinite look
    needs_recenter: bool,
    base_title: String,
}

impl WindowSystem {
    /// Create window from config
    pub fn create(
        event_loop: &ActiveEventLoop,
        config: &WindowConfig,
    ) -> Result<Self, WindowError> {
        let mut attrs = Window::default_attributes()
            .with_title(&config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.width,
                config.height,
            ));

        if config.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| WindowError::CreationFailed(e.to_string()))?,
        );

        Ok(Self {
            window,
            cursor_captured: false,
            needs_recenter: false,
            base_title: config.title.clone(),
        })
    }

    /// Get window reference (for RenderContext creation)
    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    /// Check if cursor is captured
    pub fn is_cursor_captured(&self) -> bool {
        self.cursor_captured
    }

    /// Capture cursor for FPS-style controls
    pub fn capture_cursor(&mut self) -> bool {
        let grab_result = match self.window.set_cursor_grab(CursorGrabMode::Locked) {
            Ok(()) => {
                self.needs_recenter = false;
                Ok(())
            }
            Err(_) => {
                self.needs_recenter = true;
                self.window.set_cursor_grab(CursorGrabMode::Confined)
            }
        };

        match grab_result {
            Ok(()) => {
                self.window.set_cursor_visible(false);
                self.cursor_captured = true;
                log::info!("Cursor captured - Escape to release");
                true
            }
            Err(e) => {
                log::warn!("Failed to capture cursor: {}", e);
                false
            }
        }
    }

    /// Release cursor
    pub fn release_cursor(&mut self) {
        if let Err(e) = self.window.set_cursor_grab(CursorGrabMode::None) {
            log::debug!("Cursor release failed: {}", e);
        }
        self.window.set_cursor_visible(true);
        self.cursor_captured = false;
        self.needs_recenter = false;
        log::info!("Cursor released - click to capture");
    }

    /// Put the pointer back in the middle of the window
    ///
    /// Only needed when the grab fell back to `Confined`; a `Locked` pointer never moves.
    pub fn recenter_cursor(&self) {
        if !self.cursor_captured || !self.needs_recenter {
            return;
        }
        let size = self.window.inner_size();
        let center = PhysicalPosition::new(size.width / 2, size.height / 2);
        if let Err(e) = self.window.set_cursor_position(center) {
            log::debug!("Cursor recenter failed: {}", e);
        }
    }

    /// Toggle fullscreen mode
    pub fn toggle_fullscreen(&self) {
        let new_fullscreen = if self.window.fullscreen().is_some() {
            None
        } else {
            Some(Fullscreen::Borderless(None))
        };
        self.window.set_fullscreen(new_fullscreen);
    }

    /// Update window title with position and ammo
    pub fn update_title(&self, pos: Vec3, clip: u32, reserve: u32, reloading: bool) {
        let title = format_title(&self.base_title, pos, clip, reserve, reloading, self.cursor_captured);
        self.window.set_title(&title);
    }

    /// Request a redraw
    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

/// Build the window title text
pub fn format_title(base: &str, pos: Vec3, clip: u32, reserve: u32, reloading: bool, cursor_captured: bool) -> String {
    let ammo = if reloading {
        format!("{}/{} reloading", clip, reserve)
    } else {
        format!("{}/{}", clip, reserve)
    };
    let hint = if cursor_captured {
        "Esc to release"
    } else {
        "Click to capture"
    };
    format!(
        "{} - ({:.1}, {:.1}, {:.1}) Ammo: {} [{}]",
        base, pos.x, pos.y, pos.z, ammo, hint
    )
}

#[derive(Debug)]
pub enum WindowError {
    CreationFailed(String),
}

impl std::fmt::Display for WindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowError::CreationFailed(msg) => write!(f, "Window creation failed: {}", msg),
        }
    }
}

impl std::error::Error for WindowError {}

//! Input mapping from raw events to semantic actions
//!
//! Maps keyboard and mouse input to high-level actions like Fire, Reload, Exit, etc.
//! Movement keys (WASD, Space) are NOT mapped here - they go directly to PlayerController.

use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode;

/// Actions triggered by special input (not movement)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Toggle cursor capture (Escape when captured, click when released)
    ToggleCursor,
    /// Exit application (Escape when not captured)
    Exit,
    /// Shoot (left click while captured)
    Fire,
    /// Start a manual reload (R key)
    Reload,
    /// Toggle fullscreen mode (F key)
    ToggleFullscreen,
}

/// Maps raw input events to semantic actions
///
/// Movement keys (WASD, Space) are NOT mapped here - they go directly
/// to the PlayerController. This mapper handles "special" keys only.
pub struct InputMapper;

impl InputMapper {
    /// Map keyboard input to an action
    ///
    /// Returns `Some(action)` for special keys, `None` for movement keys
    pub fn map_keyboard(
        key: KeyCode,
        state: ElementState,
        cursor_captured: bool,
    ) -> Option<InputAction> {
        // Only handle key presses, not releases
        if state != ElementState::Pressed {
            return None;
        }

        match key {
            KeyCode::Escape => {
                if cursor_captured {
                    Some(InputAction::ToggleCursor)
                } else {
                    Some(InputAction::Exit)
                }
            }
            KeyCode::KeyR => Some(InputAction::Reload),
            KeyCode::KeyF => Some(InputAction::ToggleFullscreen),
            _ => None,
        }
    }

    /// Map mouse button to an action
    ///
    /// The first left click captures the cursor; once captured, left click fires.
    pub fn map_mouse_button(
        button: MouseButton,
        state: ElementState,
        cursor_captured: bool,
    ) -> Option<InputAction> {
        if button != MouseButton::Left || state != ElementState::Pressed {
            return None;
        }
        if cursor_captured {
            Some(InputAction::Fire)
        } else {
            Some(InputAction::ToggleCursor)
        }
    }
}

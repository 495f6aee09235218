//! Input model: modifier keys, mouse buttons, view options, and the gesture
//! state machine.
//!
//! `InputState` is the gesture tracked between pointer-down and pointer-up.
//! Each active variant carries what the controller needs to apply the next
//! pointer-move without consulting the previous event.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::anchor::AnchorMode;
use crate::camera::Point;
use crate::doc::ShapeId;
use crate::route::ConnectionStyle;
use crate::theme::Theme;

/// Keyboard modifier keys held during an event.
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Any of these turns a primary press into a pan, even over a shape.
    #[must_use]
    pub fn forces_pan(self) -> bool {
        self.shift || self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code.
    #[must_use]
    pub fn from_dom(code: i16) -> Option<Self> {
        match code {
            0 => Some(Self::Primary),
            1 => Some(Self::Middle),
            2 => Some(Self::Secondary),
            _ => None,
        }
    }
}

/// Vertical wheel / trackpad scroll delta in pixels (positive = down).
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    pub dy: f64,
}

/// Persistent view state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// The id of the currently selected shape, if any.
    pub selected_id: Option<ShapeId>,
    pub theme: Theme,
    pub connection_style: ConnectionStyle,
    pub anchor_mode: AnchorMode,
}

/// Gesture state machine.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A shape follows the pointer.
    DraggingNode {
        id: ShapeId,
        /// Pointer position minus shape origin, in diagram units, captured on
        /// pointer-down so the shape does not jump under the cursor.
        grab_offset: Point,
    },
    /// The viewport follows the pointer.
    Panning {
        /// Pointer screen position minus viewport offset at pointer-down.
        origin: Point,
    },
}

impl InputState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// CSS cursor for the gesture.
    #[must_use]
    pub fn cursor(&self) -> &'static str {
        match self {
            Self::Idle => "grab",
            Self::DraggingNode { .. } => "move",
            Self::Panning { .. } => "grabbing",
        }
    }
}

//! Input model: modifier keys, buttons, keys, and the gesture state machine.
//!
//! `UiState` is the part of the editor state the renderer needs (selection,
//! mode, inline editing). `InputState` is the gesture being tracked between
//! pointer-down and pointer-up, carrying the context needed to compute each
//! intermediate document and the single commit made on release.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::doc::{ElementId, Position};
use crate::hit::Corner;

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Command on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Primary,
    Middle,
    Secondary,
}

/// A keyboard key by its browser name (e.g. `"ArrowLeft"`, `"Delete"`, `"z"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self(name.to_owned())
    }

    /// Unit direction for arrow keys, `None` for anything else.
    #[must_use]
    pub fn arrow_direction(&self) -> Option<(f64, f64)> {
        match self.0.as_str() {
            "ArrowLeft" => Some((-1.0, 0.0)),
            "ArrowRight" => Some((1.0, 0.0)),
            "ArrowUp" => Some((0.0, -1.0)),
            "ArrowDown" => Some((0.0, 1.0)),
            _ => None,
        }
    }

    /// Case-insensitive comparison for letter shortcuts.
    #[must_use]
    pub fn is_letter(&self, letter: char) -> bool {
        let mut chars = self.0.chars();
        matches!((chars.next(), chars.next()), (Some(c), None) if c.eq_ignore_ascii_case(&letter))
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    pub dx: f64,
    /// Positive is down.
    pub dy: f64,
}

/// Whether the session is editable or a read-only preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    #[default]
    Design,
    Preview,
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub mode: EditorMode,
    /// The sole selected element, if any.
    pub selected_id: Option<ElementId>,
    /// The text element whose inline editor is open, if any.
    pub editing_id: Option<ElementId>,
}

impl UiState {
    #[must_use]
    pub fn is_preview(&self) -> bool {
        self.mode == EditorMode::Preview
    }

    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }
}

/// Gesture state between pointer-down and pointer-up.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Dragging the view; screen-space only, never touches the document.
    Panning {
        last_screen: Point,
    },
    /// Moving an element. `offset` is pointer minus element origin, in canvas space.
    DraggingElement {
        id: ElementId,
        offset: Point,
    },
    /// Resizing an element by one of its corner handles.
    ResizingElement {
        id: ElementId,
        corner: Corner,
        start_canvas: Point,
        orig: Position,
    },
    /// Rotating an element with the rotate handle.
    RotatingElement {
        id: ElementId,
        center: Point,
        start_angle_deg: f64,
        orig_rotation: f64,
    },
}

impl InputState {
    /// Whether this gesture edits the document (as opposed to the view).
    #[must_use]
    pub fn is_element_gesture(&self) -> bool {
        matches!(
            self,
            Self::DraggingElement { .. } | Self::ResizingElement { .. } | Self::RotatingElement { .. }
        )
    }
}

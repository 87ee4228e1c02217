//! Mouse input.
//!
//! Mouse events are only reported when the program enables capture with
//! [`Program::with_mouse`](crate::Program::with_mouse).

use std::fmt;

use crossterm::event::{MouseButton as CtButton, MouseEvent, MouseEventKind};

/// A mouse event at a terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MouseMsg {
    /// Column, 0-indexed.
    pub x: u16,
    /// Row, 0-indexed.
    pub y: u16,
    /// What happened.
    pub action: MouseAction,
    /// Which button.
    pub button: MouseButton,
}

impl MouseMsg {
    /// A left-button press at `(x, y)`.
    pub fn click(x: u16, y: u16) -> Self {
        Self {
            x,
            y,
            action: MouseAction::Press,
            button: MouseButton::Left,
        }
    }

    /// Whether this is a left-button press.
    pub fn is_left_click(&self) -> bool {
        self.button == MouseButton::Left && self.action == MouseAction::Press
    }

    /// Whether this is a scroll wheel event.
    pub fn is_wheel(&self) -> bool {
        matches!(self.button, MouseButton::WheelUp | MouseButton::WheelDown)
    }
}

impl fmt::Display for MouseMsg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_wheel() || self.action == MouseAction::Press {
            write!(f, "{}", self.button)
        } else {
            write!(f, "{} {}", self.button, self.action)
        }
    }
}

/// Mouse action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MouseAction {
    /// Button pressed.
    #[default]
    Press,
    /// Button released.
    Release,
    /// Pointer moved.
    Motion,
}

impl fmt::Display for MouseAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MouseAction::Press => "press",
            MouseAction::Release => "release",
            MouseAction::Motion => "motion",
        };
        write!(f, "{name}")
    }
}

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MouseButton {
    /// No button (plain motion).
    #[default]
    None,
    /// Left button.
    Left,
    /// Middle button.
    Middle,
    /// Right button.
    Right,
    /// Wheel scrolled up.
    WheelUp,
    /// Wheel scrolled down.
    WheelDown,
}

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MouseButton::None => "none",
            MouseButton::Left => "left",
            MouseButton::Middle => "middle",
            MouseButton::Right => "right",
            MouseButton::WheelUp => "wheel up",
            MouseButton::WheelDown => "wheel down",
        };
        write!(f, "{name}")
    }
}

/// Converts a crossterm mouse event into a [`MouseMsg`].
///
/// Horizontal scrolling has no counterpart and is reported as plain motion.
pub fn from_crossterm_mouse(event: MouseEvent) -> MouseMsg {
    let button_of = |b: CtButton| match b {
        CtButton::Left => MouseButton::Left,
        CtButton::Right => MouseButton::Right,
        CtButton::Middle => MouseButton::Middle,
    };

    let (action, button) = match event.kind {
        MouseEventKind::Down(b) => (MouseAction::Press, button_of(b)),
        MouseEventKind::Up(b) => (MouseAction::Release, button_of(b)),
        MouseEventKind::Drag(b) => (MouseAction::Motion, button_of(b)),
        MouseEventKind::ScrollUp => (MouseAction::Press, MouseButton::WheelUp),
        MouseEventKind::ScrollDown => (MouseAction::Press, MouseButton::WheelDown),
        MouseEventKind::Moved | MouseEventKind::ScrollLeft | MouseEventKind::ScrollRight => {
            (MouseAction::Motion, MouseButton::None)
        }
    };

    MouseMsg {
        x: event.column,
        y: event.row,
        action,
        button,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn test_click_helper() {
        let m = MouseMsg::click(3, 4);
        assert!(m.is_left_click());
        assert!(!m.is_wheel());
        assert_eq!(m.to_string(), "left");
    }

    #[test]
    fn test_release_display() {
        let m = MouseMsg {
            action: MouseAction::Release,
            button: MouseButton::Left,
            ..Default::default()
        };
        assert_eq!(m.to_string(), "left release");
        assert!(!m.is_left_click());
    }

    #[test]
    fn test_from_crossterm_mouse() {
        let event = MouseEvent {
            kind: MouseEventKind::Down(CtButton::Left),
            column: 5,
            row: 2,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(from_crossterm_mouse(event), MouseMsg::click(5, 2));

        let scroll = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        assert!(from_crossterm_mouse(scroll).is_wheel());
    }
}

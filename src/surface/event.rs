//! Raw input events delivered by the render surface's host.

use super::NodeId;

/// Pointer button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerButton {
    /// Primary (usually left) button.
    #[default]
    Primary,
    /// Secondary (usually right) button.
    Secondary,
    /// Middle button.
    Middle,
}

/// Modifier keys held during a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Shift key.
    pub shift: bool,
    /// Control key.
    pub ctrl: bool,
    /// Command / meta key.
    pub meta: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        meta: false,
    };

    /// Only shift held.
    pub const SHIFT: Self = Self {
        shift: true,
        ctrl: false,
        meta: false,
    };

    /// Only control held.
    pub const CTRL: Self = Self {
        shift: false,
        ctrl: true,
        meta: false,
    };

    /// Only meta held.
    pub const META: Self = Self {
        shift: false,
        ctrl: false,
        meta: true,
    };

    /// Ctrl or cmd, the toggle-selection modifiers.
    pub fn toggles(&self) -> bool {
        self.ctrl || self.meta
    }

    /// Whether any selection modifier is held.
    pub fn any(&self) -> bool {
        self.shift || self.toggles()
    }
}

/// Pointer event payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerEvent {
    /// Horizontal position in surface pixels.
    pub x: i64,
    /// Vertical position in surface pixels.
    pub y: i64,
    /// Button involved.
    pub button: PointerButton,
    /// Modifiers held.
    pub modifiers: Modifiers,
    /// Deepest surface node under the pointer, if any.
    pub target: Option<NodeId>,
}

impl PointerEvent {
    /// Primary-button event at a position with no modifiers.
    pub fn primary(x: i64, y: i64, target: Option<NodeId>) -> Self {
        Self {
            x,
            y,
            button: PointerButton::Primary,
            modifiers: Modifiers::NONE,
            target,
        }
    }

    /// Same event with different modifiers.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Same event with a different button.
    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }
}

/// One raw input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Button pressed.
    Press(PointerEvent),
    /// Pointer moved.
    Move(PointerEvent),
    /// Button released.
    Release(PointerEvent),
    /// Press and release landed on the same target.
    Click(PointerEvent),
    /// Wheel turned by `notches` (positive scrolls down).
    Wheel {
        /// Signed notch count.
        notches: i32,
    },
    /// The scroll container's offset changed outside the engine's control.
    Scroll,
    /// The list's box changed size.
    Resize,
    /// Content started overflowing the list's box.
    Overflow,
    /// Content stopped overflowing the list's box.
    Underflow,
    /// Key pressed. Keyboard navigation is not implemented; these are ignored.
    Key(char),
}

impl InputEvent {
    /// Pointer payload, for pointer events.
    pub fn pointer(&self) -> Option<&PointerEvent> {
        match self {
            InputEvent::Press(p) | InputEvent::Move(p) | InputEvent::Release(p) | InputEvent::Click(p) => {
                Some(p)
            }
            _ => None,
        }
    }
}

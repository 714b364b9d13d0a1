//! Input events delivered by the windowing layer, one at a time.
//!
//! This is a closed sum type: the session matches it exhaustively, so a
//! new event kind cannot be added without deciding how every state reacts
//! to it.

use crate::geometry::Point;
use crate::outputs::OutputId;

/// Pointer button. Only [`Button::Left`] drives the selection; others are
/// delivered so the session can ignore them explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Left,
    Right,
    Middle,
}

/// Keys the selection reacts to. The windowing layer filters everything
/// else before delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
}

/// Identifier of one touch contact, as assigned by the input stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TouchId(pub u32);

/// One discrete input event in a selection session.
///
/// Pointer positions are global (virtual desktop) coordinates; touch
/// positions are local to the output they occurred on and are converted
/// through the session's [`OutputLayout`](crate::outputs::OutputLayout).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerButton {
        button: Button,
        pressed: bool,
        pos: Point,
        output: OutputId,
    },
    PointerMotion {
        pos: Point,
        output: OutputId,
    },
    PointerEnter {
        output: OutputId,
    },
    TouchDown {
        id: TouchId,
        pos: Point,
        output: OutputId,
    },
    TouchUp {
        id: TouchId,
    },
    TouchMotion {
        id: TouchId,
        pos: Point,
    },
    Key {
        key: Key,
        pressed: bool,
    },
}

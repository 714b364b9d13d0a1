//! Cursor glyph hints reported back to the windowing layer.

use crate::geometry::Handle;

/// The cursor shape the compositor should show for the current state and
/// pointer position. Mirrors the cursor-shape protocol names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorShape {
    Default,
    Crosshair,
    Grab,
    Grabbing,
    Pointer,
    NwResize,
    NResize,
    NeResize,
    EResize,
    SeResize,
    SResize,
    SwResize,
    WResize,
}

impl Handle {
    /// The resize glyph pointing along this handle's drag direction.
    pub fn cursor(self) -> CursorShape {
        match self {
            Handle::TopLeft => CursorShape::NwResize,
            Handle::Top => CursorShape::NResize,
            Handle::TopRight => CursorShape::NeResize,
            Handle::Right => CursorShape::EResize,
            Handle::BottomRight => CursorShape::SeResize,
            Handle::Bottom => CursorShape::SResize,
            Handle::BottomLeft => CursorShape::SwResize,
            Handle::Left => CursorShape::WResize,
        }
    }
}

//! Selection box math: drag-box construction, grabber hit tests, and the
//! mirror/aspect normalization applied after handle resizes.

use std::fmt;

/// A position in global (virtual desktop) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in global coordinates. Canonical form has
/// non-negative width and height.
///
/// The all-zero rectangle doubles as the historical "nothing selected"
/// sentinel. Internal code never re-derives that meaning from raw fields;
/// it goes through [`Rect::is_unset`] and the session maps it to an
/// explicit cancellation at the API boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True for the all-zero sentinel rectangle.
    pub fn is_unset(&self) -> bool {
        self.x == 0 && self.y == 0 && self.width == 0 && self.height == 0
    }

    pub fn contains(&self, p: Point) -> bool {
        let (px, py) = (p.x as i32, p.y as i32);
        px >= self.x
            && py >= self.y
            && px < self.x + self.width
            && py < self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.x + self.width / 2) as f64,
            (self.y + self.height / 2) as f64,
        )
    }
}

/// Formats as `X,Y WxH`, the geometry string understood by downstream
/// screenshot tooling.
impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{} {}x{}", self.x, self.y, self.width, self.height)
    }
}

/// The box being dragged or resized, as two floating-point corners.
///
/// `start` is only guaranteed to be the top-left corner at read time; an
/// in-progress resize may transiently invert an axis until
/// [`normalize_after_resize`] mirrors it back.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SelectionBox {
    pub start: Point,
    pub end: Point,
}

impl SelectionBox {
    pub fn width(&self) -> f64 {
        self.end.x - self.start.x
    }

    pub fn height(&self) -> f64 {
        self.end.y - self.start.y
    }

    pub fn contains(&self, p: Point) -> bool {
        self.to_rect().contains(p)
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.start.x += dx;
        self.start.y += dy;
        self.end.x += dx;
        self.end.y += dy;
    }

    /// Truncating conversion to the integer rectangle handed to callers.
    pub fn to_rect(&self) -> Rect {
        Rect::new(
            self.start.x as i32,
            self.start.y as i32,
            self.width() as i32,
            self.height() as i32,
        )
    }

    pub fn is_unset(&self) -> bool {
        self.start.x == 0.0 && self.start.y == 0.0 && self.end.x == 0.0 && self.end.y == 0.0
    }
}

/// One of the eight interactive grabbers on the selection box, in the
/// canonical clockwise order used everywhere handles are enumerated:
/// rendering, hit tests and cursor resolution all index off this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl Handle {
    /// All handles in canonical clockwise order starting at the top-left
    /// corner. First match wins on overlapping hit tests.
    pub const ALL: [Handle; 8] = [
        Handle::TopLeft,
        Handle::Top,
        Handle::TopRight,
        Handle::Right,
        Handle::BottomRight,
        Handle::Bottom,
        Handle::BottomLeft,
        Handle::Left,
    ];

    /// Center position of this handle on `sel`.
    pub fn position(self, sel: &SelectionBox) -> Point {
        let x = sel.start.x;
        let y = sel.start.y;
        let w = sel.width();
        let h = sel.height();
        match self {
            Handle::TopLeft => Point::new(x, y),
            Handle::Top => Point::new(x + w / 2.0, y),
            Handle::TopRight => Point::new(x + w, y),
            Handle::Right => Point::new(x + w, y + h / 2.0),
            Handle::BottomRight => Point::new(x + w, y + h),
            Handle::Bottom => Point::new(x + w / 2.0, y + h),
            Handle::BottomLeft => Point::new(x, y + h),
            Handle::Left => Point::new(x, y + h / 2.0),
        }
    }

    /// Counterpart after the box flips around its vertical axis.
    pub fn mirror_horizontal(self) -> Handle {
        match self {
            Handle::TopLeft => Handle::TopRight,
            Handle::TopRight => Handle::TopLeft,
            Handle::BottomLeft => Handle::BottomRight,
            Handle::BottomRight => Handle::BottomLeft,
            Handle::Left => Handle::Right,
            Handle::Right => Handle::Left,
            other => other,
        }
    }

    /// Counterpart after the box flips around its horizontal axis.
    pub fn mirror_vertical(self) -> Handle {
        match self {
            Handle::TopLeft => Handle::BottomLeft,
            Handle::BottomLeft => Handle::TopLeft,
            Handle::TopRight => Handle::BottomRight,
            Handle::BottomRight => Handle::TopRight,
            Handle::Top => Handle::Bottom,
            Handle::Bottom => Handle::Top,
            other => other,
        }
    }
}

/// Positions of all eight handles in canonical order.
pub fn handle_positions(sel: &SelectionBox) -> [Point; 8] {
    Handle::ALL.map(|h| h.position(sel))
}

/// Whether `pointer` falls inside a grabber drawn at `center`. The border
/// is stroked centered on the circle's edge, so half of it widens the hit
/// area.
pub fn point_in_grabber(pointer: Point, center: Point, radius: f64, border_width: f64) -> bool {
    let dx = center.x - pointer.x;
    let dy = center.y - pointer.y;
    let r = radius + border_width / 2.0;
    dx * dx + dy * dy < r * r
}

/// First handle of `sel` under `pointer`, scanning in canonical order.
pub fn hit_handle(
    sel: &SelectionBox,
    pointer: Point,
    radius: f64,
    border_width: f64,
) -> Option<Handle> {
    Handle::ALL
        .into_iter()
        .find(|h| point_in_grabber(pointer, h.position(sel), radius, border_width))
}

/// Box spanned from `anchor` toward `pointer`, optionally expanded to an
/// aspect ratio (width / height).
///
/// The far edge from the anchor is padded outward by one unit, so a
/// zero-movement drag yields a 1x1 box and can never degenerate into the
/// all-zero sentinel.
pub fn drag_box(pointer: Point, anchor: Point, aspect: Option<f64>) -> SelectionBox {
    let mut width = (pointer.x - anchor.x).abs();
    let mut height = (pointer.y - anchor.y).abs();

    if let Some(aspect) = aspect {
        width = width.max(height * aspect);
        height = height.max(width / aspect);
    }

    let mut sel = SelectionBox::default();
    if pointer.x < anchor.x {
        sel.start.x = anchor.x - width - 1.0;
        sel.end.x = anchor.x;
    } else {
        sel.start.x = anchor.x;
        sel.end.x = anchor.x + width + 1.0;
    }
    if pointer.y < anchor.y {
        sel.start.y = anchor.y - height - 1.0;
        sel.end.y = anchor.y;
    } else {
        sel.start.y = anchor.y;
        sel.end.y = anchor.y + height + 1.0;
    }
    sel
}

/// Mirrors `sel` back into canonical form after a resize dragged an edge
/// across its opposite, returning the handle that now tracks the pointer.
///
/// Without the swap the grabbed handle would detach from the cursor the
/// moment the drag crosses over the box.
pub fn normalize_after_resize(sel: &mut SelectionBox, handle: Handle) -> Handle {
    let mut handle = handle;

    if sel.width() < 0.0 {
        std::mem::swap(&mut sel.start.x, &mut sel.end.x);
        handle = handle.mirror_horizontal();
    }

    if sel.height() < 0.0 {
        std::mem::swap(&mut sel.start.y, &mut sel.end.y);
        handle = handle.mirror_vertical();
    }

    handle
}

/// Re-expands `sel` to satisfy `width / height == aspect` after a
/// directional resize, anchored at the edge or corner opposite `handle`.
///
/// Expects `sel` in canonical form; call [`normalize_after_resize`] first.
pub fn apply_aspect_after_resize(sel: &mut SelectionBox, handle: Handle, aspect: f64) {
    let mut x = sel.start.x;
    let mut y = sel.start.y;
    let w = sel.width();
    let h = sel.height();

    let mut width = w.max(h * aspect);
    let mut height = h.max(w / aspect);

    match handle {
        Handle::TopLeft => {
            x -= width - w;
            y -= height - h;
        }
        Handle::TopRight => {
            y -= height - h;
        }
        Handle::BottomLeft => {
            x -= width - w;
        }
        Handle::BottomRight => {}
        // Edge handles only move one axis; the other follows the ratio.
        Handle::Top | Handle::Bottom => {
            width = h * aspect;
            height = h;
        }
        Handle::Left | Handle::Right => {
            width = w;
            height = w / aspect;
        }
    }

    sel.start = Point::new(x, y);
    sel.end = Point::new(x + width, y + height);
}

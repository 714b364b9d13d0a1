//! Shared crate-wide constants.

/// Rate at which the grabber growth animation advances, in progress units
/// per second. At 1.4 the elastic bounce settles in roughly three quarters
/// of a second.
pub const GRABBER_ANIM_SPEED: f64 = 1.4;

/// Rate at which the region-highlight tween advances, in progress units
/// per second.
///
/// Candidate hovers retarget frequently while the pointer sweeps across
/// overlapping windows, so this runs noticeably faster than the grabber
/// animation to keep the highlight from trailing the pointer.
pub const REGION_ANIM_SPEED: f64 = 2.5;

/// Default radius of a selection grabber, in pixels.
pub const DEFAULT_GRABBER_RADIUS: f64 = 7.0;

/// Default border width of the selection box and its grabbers, in pixels.
pub const DEFAULT_BORDER_WIDTH: f64 = 2.0;

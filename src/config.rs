//! Immutable per-session configuration.
//!
//! The session takes this by value at construction; nothing reads mutable
//! global state, so parallel sessions (and parallel tests) cannot observe
//! each other.

use crate::constants::{DEFAULT_BORDER_WIDTH, DEFAULT_GRABBER_RADIUS};

/// What the session is selecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionKind {
    /// Freeform box drawing (optionally with post-draw altering).
    #[default]
    Freeform,
    /// One-click pick from externally supplied region candidates.
    PickRegion,
    /// One-click pick of a whole output.
    PickOutput,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub kind: SessionKind,
    /// Width / height ratio every box computation is constrained to.
    pub aspect_ratio: Option<f64>,
    /// Enter alter mode after the initial draw instead of finishing.
    pub alter_selection: bool,
    /// Animate grabbers and the candidate highlight. When false all
    /// animation progress snaps straight to its target.
    pub animation: bool,
    /// Keep the candidate list from session start instead of re-querying
    /// the source every tick.
    pub freeze: bool,
    pub grabber_radius: f64,
    pub grabber_border_width: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            kind: SessionKind::Freeform,
            aspect_ratio: None,
            alter_selection: false,
            animation: true,
            freeze: false,
            grabber_radius: DEFAULT_GRABBER_RADIUS,
            grabber_border_width: DEFAULT_BORDER_WIDTH,
        }
    }
}

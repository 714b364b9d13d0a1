//! Interactive screen-region selection for compositor shells.
//!
//! The crate is windowing-system agnostic: the embedder owns the event
//! loop and the renderer, feeds input events and frame deltas into a
//! [`SelectionSession`], and draws from its read-only snapshot. See the
//! `session` module for the interaction model.

pub mod animation;
pub mod candidates;
pub mod config;
pub mod constants;
pub mod cursor;
pub mod easing;
pub mod event;
pub mod geometry;
pub mod outputs;
pub mod session;
pub mod trace;

pub use candidates::{Candidate, CandidateSource, StaticCandidates};
pub use config::{SessionConfig, SessionKind};
pub use cursor::CursorShape;
pub use event::{Button, InputEvent, Key, TouchId};
pub use geometry::{Handle, Point, Rect, SelectionBox};
pub use outputs::{OutputId, OutputInfo, OutputLayout};
pub use session::{Cancelled, ControlFlow, EventOutcome, Mode, Redraw, SelectionSession};

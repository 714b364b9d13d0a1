//! Pick candidates: externally supplied rectangles (windows, outputs) the
//! user can select with a single click instead of drawing a box.

use thiserror::Error;

use crate::animation::{RegionAnim, quad_from_point, quad_from_rect};
use crate::geometry::{Point, Rect};

/// One selectable rectangle with its identity (a window name or an output
/// name). Candidate lists are ordered front to back; on overlap the first
/// match wins.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub rect: Rect,
    pub identity: String,
}

impl Candidate {
    pub fn new(rect: Rect, identity: impl Into<String>) -> Self {
        Self {
            rect,
            identity: identity.into(),
        }
    }
}

/// Supplier of the live candidate list, typically backed by compositor
/// IPC. Re-queried every animation tick unless the session is frozen.
///
/// Failures are not surfaced: an implementation that cannot produce its
/// list degrades to returning no candidates.
pub trait CandidateSource {
    fn candidates(&mut self) -> Vec<Candidate>;

    /// Current pointer position, if the source can report one. Used to
    /// preselect the candidate under the cursor at session start.
    fn initial_cursor_pos(&mut self) -> Option<Point> {
        None
    }
}

impl<T: CandidateSource + ?Sized> CandidateSource for &mut T {
    fn candidates(&mut self) -> Vec<Candidate> {
        (**self).candidates()
    }

    fn initial_cursor_pos(&mut self) -> Option<Point> {
        (**self).initial_cursor_pos()
    }
}

/// Error from parsing a region-list argument.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseRegionsError {
    #[error("position token {0:?} has no matching size token")]
    DanglingPosition(String),
    #[error("malformed position token {0:?}, expected X,Y")]
    BadPosition(String),
    #[error("malformed size token {0:?}, expected WxH")]
    BadSize(String),
}

/// A fixed candidate list, for caller-declared regions and tests.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StaticCandidates {
    list: Vec<Candidate>,
    cursor: Option<Point>,
}

impl StaticCandidates {
    pub fn new(list: Vec<Candidate>) -> Self {
        Self { list, cursor: None }
    }

    /// Parses the `"X1,Y1 W1xH1 X2,Y2 W2xH2 ..."` region-list format.
    /// Regions are named by their position in the list.
    pub fn parse(arg: &str) -> Result<Self, ParseRegionsError> {
        let mut list = Vec::new();
        let mut tokens = arg.split_whitespace();

        while let Some(pos) = tokens.next() {
            let size = tokens
                .next()
                .ok_or_else(|| ParseRegionsError::DanglingPosition(pos.to_string()))?;

            let (x, y) = pos
                .split_once(',')
                .and_then(|(x, y)| Some((x.parse().ok()?, y.parse().ok()?)))
                .ok_or_else(|| ParseRegionsError::BadPosition(pos.to_string()))?;
            let (w, h) = size
                .split_once('x')
                .and_then(|(w, h)| Some((w.parse().ok()?, h.parse().ok()?)))
                .ok_or_else(|| ParseRegionsError::BadSize(size.to_string()))?;

            let identity = format!("region-{}", list.len());
            list.push(Candidate::new(Rect::new(x, y, w, h), identity));
        }

        Ok(Self::new(list))
    }

    /// Report `cursor` from [`CandidateSource::initial_cursor_pos`].
    pub fn with_cursor(mut self, cursor: Point) -> Self {
        self.cursor = Some(cursor);
        self
    }
}

impl CandidateSource for StaticCandidates {
    fn candidates(&mut self) -> Vec<Candidate> {
        self.list.clone()
    }

    fn initial_cursor_pos(&mut self) -> Option<Point> {
        self.cursor
    }
}

/// Topmost candidate containing `p`, scanning front to back.
pub fn candidate_at(p: Point, candidates: &[Candidate]) -> Option<&Candidate> {
    candidates.iter().find(|c| c.rect.contains(p))
}

/// Tracks which candidate the pointer is over and tweens the highlight
/// rectangle between selections.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CandidatePicker {
    hovered: Option<Candidate>,
    anim: RegionAnim,
}

impl CandidatePicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Picker that starts settled on `candidate`, as used when the cursor
    /// position is known at session start.
    pub fn preselected(candidate: Candidate) -> Self {
        let mut anim = RegionAnim::new();
        anim.snap_to(quad_from_rect(candidate.rect));
        Self {
            hovered: Some(candidate),
            anim,
        }
    }

    pub fn hovered(&self) -> Option<&Candidate> {
        self.hovered.as_ref()
    }

    pub fn anim(&self) -> &RegionAnim {
        &self.anim
    }

    /// Advance the highlight tween. Returns true when a redraw is needed.
    pub fn advance(&mut self, delta: f64, animate: bool) -> bool {
        self.anim.advance(delta, animate)
    }

    /// Re-evaluates the hovered candidate for `pointer` against an ordered
    /// candidate list and retargets the highlight tween on change.
    /// Returns true when the selection changed.
    pub fn update_hover(&mut self, pointer: Point, candidates: &[Candidate]) -> bool {
        let next = candidate_at(pointer, candidates).cloned();
        if next == self.hovered {
            return false;
        }

        let prev = self.hovered.take();

        let start = if self.anim.in_flight() {
            // Retargeting mid-flight continues from the interpolated quad
            // instead of jumping to the previous target.
            self.anim.current()
        } else {
            match (&prev, &next) {
                (Some(prev), _) => quad_from_rect(prev.rect),
                // No previous candidate: grow from the new one's center.
                (None, Some(next)) => quad_from_point(next.rect.center()),
                (None, None) => unreachable!("hover change with neither side set"),
            }
        };

        let end = match (&prev, &next) {
            (_, Some(next)) => quad_from_rect(next.rect),
            // Losing the candidate: shrink onto the old one's center.
            (Some(prev), None) => quad_from_point(prev.rect.center()),
            (None, None) => unreachable!("hover change with neither side set"),
        };

        self.anim.begin(start, end);
        self.hovered = next;
        true
    }
}

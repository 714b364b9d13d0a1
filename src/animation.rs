//! Per-frame animation state for the grabbers and the candidate highlight.
//!
//! Both drivers are pure functions of elapsed time and a fixed speed
//! constant: each update tick advances a progress counter with
//! `progress = min(progress + speed * delta, 1.0)` and becomes a no-op once
//! progress has reached 1.0, so redundant ticks never dirty the state.

use crate::constants::{GRABBER_ANIM_SPEED, REGION_ANIM_SPEED};
use crate::easing::{ease_out_elastic, ease_out_quint};
use crate::geometry::{Point, Rect};

/// A rectangle as `(x1, y1, x2, y2)` corner coordinates, the shape the
/// highlight tween interpolates per component.
pub type Quad = [f64; 4];

/// Quad spanning `rect`.
pub fn quad_from_rect(rect: Rect) -> Quad {
    [
        rect.x as f64,
        rect.y as f64,
        (rect.x + rect.width) as f64,
        (rect.y + rect.height) as f64,
    ]
}

/// Degenerate quad collapsed onto a single point.
pub fn quad_from_point(p: Point) -> Quad {
    [p.x, p.y, p.x, p.y]
}

/// Growth animation of the eight selection grabbers.
///
/// Progress runs 0 to 1 once alter mode is entered; the rendered radius and
/// border width follow the elastic curve scaled by the configured maxima.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GrabberAnim {
    progress: f64,
    radius: f64,
    border_width: f64,
}

impl GrabberAnim {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restart the growth animation from zero. Used when a fresh box is
    /// drawn from alter mode.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advance by `delta` seconds toward full size. Returns true when the
    /// state changed and a redraw is worthwhile.
    pub fn advance(&mut self, delta: f64, animate: bool, max_radius: f64, max_border: f64) -> bool {
        if self.progress >= 1.0 {
            return false;
        }

        if animate {
            self.progress = (self.progress + GRABBER_ANIM_SPEED * delta).min(1.0);
        } else {
            self.progress = 1.0;
        }

        let scale = ease_out_elastic(self.progress);
        self.radius = scale * max_radius;
        self.border_width = scale * max_border;
        true
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Current rendered grabber radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Current rendered grabber border width.
    pub fn border_width(&self) -> f64 {
        self.border_width
    }
}

/// Interpolated highlight rectangle shown while picking a candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionAnim {
    progress: f64,
    start: Quad,
    end: Quad,
    current: Quad,
}

impl Default for RegionAnim {
    fn default() -> Self {
        // Settled on the degenerate origin quad until the first retarget.
        Self {
            progress: 1.0,
            start: [0.0; 4],
            end: [0.0; 4],
            current: [0.0; 4],
        }
    }
}

impl RegionAnim {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a tween from `start` toward `end`.
    pub fn begin(&mut self, start: Quad, end: Quad) {
        self.progress = 0.0;
        self.start = start;
        self.end = end;
        self.current = start;
    }

    /// Jump straight to `quad` with the tween settled, for preselected
    /// candidates at session start.
    pub fn snap_to(&mut self, quad: Quad) {
        self.progress = 1.0;
        self.start = quad;
        self.end = quad;
        self.current = quad;
    }

    /// Advance by `delta` seconds. Returns true when the interpolated quad
    /// moved and a redraw is worthwhile.
    pub fn advance(&mut self, delta: f64, animate: bool) -> bool {
        if self.progress >= 1.0 {
            return false;
        }

        if animate {
            self.progress = (self.progress + REGION_ANIM_SPEED * delta).min(1.0);
        } else {
            self.progress = 1.0;
        }

        let t = ease_out_quint(self.progress);
        for i in 0..4 {
            self.current[i] = self.start[i] + (self.end[i] - self.start[i]) * t;
        }
        true
    }

    /// True while the tween has not yet settled on its target.
    pub fn in_flight(&self) -> bool {
        self.progress < 1.0
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// The quad to draw this frame.
    pub fn current(&self) -> Quad {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grabber_clamps_and_goes_idempotent() {
        let mut anim = GrabberAnim::new();
        // A giant delta lands exactly on 1.0, never beyond.
        assert!(anim.advance(10.0, true, 7.0, 2.0));
        assert_eq!(anim.progress(), 1.0);
        assert_eq!(anim.radius(), 7.0);
        assert_eq!(anim.border_width(), 2.0);

        // Further ticks leave the state bit-for-bit unchanged.
        let settled = anim;
        assert!(!anim.advance(0.016, true, 7.0, 2.0));
        assert_eq!(anim, settled);
    }

    #[test]
    fn grabber_snap_when_animation_disabled() {
        let mut anim = GrabberAnim::new();
        assert!(anim.advance(0.001, false, 7.0, 2.0));
        assert_eq!(anim.progress(), 1.0);
        assert_eq!(anim.radius(), 7.0);
    }

    #[test]
    fn grabber_overshoots_midway() {
        let mut anim = GrabberAnim::new();
        let mut peak: f64 = 0.0;
        for _ in 0..200 {
            anim.advance(0.005, true, 7.0, 2.0);
            peak = peak.max(anim.radius());
        }
        // The elastic curve briefly exceeds the configured maximum.
        assert!(peak > 7.0);
        assert_eq!(anim.radius(), 7.0);
    }

    #[test]
    fn region_tween_interpolates_and_settles() {
        let mut anim = RegionAnim::new();
        anim.begin([0.0; 4], [100.0, 50.0, 200.0, 150.0]);
        assert!(anim.in_flight());

        assert!(anim.advance(0.1, true));
        let mid = anim.current();
        assert!(mid[0] > 0.0 && mid[0] < 100.0);

        assert!(anim.advance(10.0, true));
        assert_eq!(anim.current(), [100.0, 50.0, 200.0, 150.0]);

        let settled = anim;
        assert!(!anim.advance(0.016, true));
        assert_eq!(anim, settled);
    }

    #[test]
    fn region_snap_to_settles_immediately() {
        let mut anim = RegionAnim::new();
        anim.snap_to([1.0, 2.0, 3.0, 4.0]);
        assert!(!anim.in_flight());
        assert_eq!(anim.current(), [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn quad_conversions() {
        assert_eq!(
            quad_from_rect(Rect::new(10, 20, 30, 40)),
            [10.0, 20.0, 40.0, 60.0]
        );
        assert_eq!(
            quad_from_point(Point::new(5.0, 6.0)),
            [5.0, 6.0, 5.0, 6.0]
        );
    }
}

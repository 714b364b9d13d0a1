//! The selection interaction state machine.
//!
//! One `SelectionSession` owns a single selection from first input to a
//! terminal state. The windowing layer feeds it two call streams that are
//! never concurrent: discrete input events via [`SelectionSession::handle_event`]
//! and per-frame elapsed time via [`SelectionSession::update`]. Side effects
//! the original compositor context performed directly (redraw requests,
//! cursor shape changes, run-state changes) are returned as values in
//! [`EventOutcome`] so the embedding loop stays in control.

use thiserror::Error;
use tracing::debug;

use crate::animation::{GrabberAnim, RegionAnim};
use crate::candidates::{Candidate, CandidatePicker, CandidateSource, candidate_at};
use crate::config::{SessionConfig, SessionKind};
use crate::cursor::CursorShape;
use crate::event::{Button, InputEvent, Key, TouchId};
use crate::geometry::{
    self, Handle, Point, Rect, SelectionBox, apply_aspect_after_resize, drag_box, hit_handle,
    normalize_after_resize,
};
use crate::outputs::{OutputId, OutputLayout};

/// Current interaction mode. Exactly one is active at a time; it decides
/// whether the box or the hovered candidate is authoritative for the
/// final result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Waiting for the first pointer-down.
    Idle,
    /// Dragging out a brand-new box from the anchor.
    DrawingNew,
    /// Post-draw hub: the box sits still, grabbers are live.
    Altering,
    /// Dragging one of the eight grabbers.
    Resizing(Handle),
    /// Dragging the whole box by its interior.
    Moving,
    /// Hovering externally supplied region candidates.
    PickRegion,
    /// Hovering whole outputs.
    PickOutput,
}

/// Whether the session wants to keep receiving events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    Continue,
    /// Terminal state reached; query [`SelectionSession::final_selection`].
    Finished,
}

/// Redraw request for the render sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redraw {
    None,
    Once,
}

/// What the windowing layer should do after delivering one event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventOutcome {
    pub flow: ControlFlow,
    pub redraw: Redraw,
    /// Cursor glyph to show, when the event may have changed it.
    pub cursor: Option<CursorShape>,
}

impl EventOutcome {
    fn none() -> Self {
        Self {
            flow: ControlFlow::Continue,
            redraw: Redraw::None,
            cursor: None,
        }
    }

    fn redraw() -> Self {
        Self {
            redraw: Redraw::Once,
            ..Self::none()
        }
    }

    fn finished() -> Self {
        Self {
            flow: ControlFlow::Finished,
            ..Self::none()
        }
    }
}

/// Why there is no geometry to hand out. Callers treat every variant the
/// same (nothing to use) but may want distinct log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Cancelled {
    #[error("selection cancelled")]
    ByUser,
    #[error("no candidate was under the pointer")]
    NoCandidate,
    #[error("no selection was made")]
    NoSelection,
}

pub struct SelectionSession {
    config: SessionConfig,
    outputs: OutputLayout,
    source: Option<Box<dyn CandidateSource>>,

    mode: Mode,
    finished: bool,
    cancel: Option<Cancelled>,

    sel: SelectionBox,
    pointer: Point,
    anchor: Point,
    /// Pointer-to-handle delta captured at grab time, so the grabbed
    /// handle does not snap onto the pointer hotspot.
    grab_offset: Point,
    selected_output: Option<OutputId>,

    touch: Option<TouchId>,
    touch_output: Option<OutputId>,

    grabber: GrabberAnim,
    candidates: Vec<Candidate>,
    picker: CandidatePicker,
    committed: Option<Candidate>,
}

impl SelectionSession {
    /// Freeform session without a candidate source.
    pub fn new(config: SessionConfig, outputs: OutputLayout) -> Self {
        Self::build(config, outputs, None)
    }

    /// Session with a candidate source, required for
    /// [`SessionKind::PickRegion`] and useful for
    /// [`SessionKind::PickOutput`] (initial cursor position).
    pub fn with_source(
        config: SessionConfig,
        outputs: OutputLayout,
        source: Box<dyn CandidateSource>,
    ) -> Self {
        Self::build(config, outputs, Some(source))
    }

    fn build(
        config: SessionConfig,
        outputs: OutputLayout,
        mut source: Option<Box<dyn CandidateSource>>,
    ) -> Self {
        let mode = match config.kind {
            SessionKind::Freeform => Mode::Idle,
            SessionKind::PickRegion => Mode::PickRegion,
            SessionKind::PickOutput => Mode::PickOutput,
        };

        let candidates = match config.kind {
            SessionKind::PickRegion => source
                .as_mut()
                .map(|s| s.candidates())
                .unwrap_or_default(),
            SessionKind::PickOutput => outputs.as_candidates(),
            SessionKind::Freeform => Vec::new(),
        };

        let mut pointer = Point::default();
        let mut picker = CandidatePicker::new();
        if matches!(mode, Mode::PickRegion | Mode::PickOutput)
            && let Some(pos) = source.as_mut().and_then(|s| s.initial_cursor_pos())
        {
            pointer = pos;
            if let Some(hit) = candidate_at(pos, &candidates) {
                picker = CandidatePicker::preselected(hit.clone());
            }
        }

        Self {
            config,
            outputs,
            source,
            mode,
            finished: false,
            cancel: None,
            sel: SelectionBox::default(),
            pointer,
            anchor: Point::default(),
            grab_offset: Point::default(),
            selected_output: None,
            touch: None,
            touch_output: None,
            grabber: GrabberAnim::new(),
            candidates,
            picker,
            committed: None,
        }
    }

    /// Feed one input event. Every event kind is handled (or explicitly
    /// ignored) in every mode; terminal sessions ignore everything.
    pub fn handle_event(&mut self, event: InputEvent) -> EventOutcome {
        if self.finished {
            return EventOutcome::none();
        }

        match event {
            InputEvent::PointerButton {
                button: Button::Left,
                pressed,
                pos,
                output,
            } => {
                self.pointer = pos;
                let mut out = if pressed {
                    self.pointer_down(pos, output)
                } else {
                    self.pointer_up()
                };
                out.cursor = Some(self.cursor_shape());
                out
            }
            InputEvent::PointerButton { .. } => EventOutcome::none(),
            InputEvent::PointerMotion { pos, output } => {
                let dx = pos.x - self.pointer.x;
                let dy = pos.y - self.pointer.y;
                self.pointer = pos;
                let mut out = self.pointer_move(pos, dx, dy, output);
                out.cursor = Some(self.cursor_shape());
                out
            }
            InputEvent::PointerEnter { output: _ } => {
                let mut out = EventOutcome::none();
                out.cursor = Some(self.cursor_shape());
                out
            }
            InputEvent::TouchDown { id, pos, output } => {
                // Only one touch drives the selection; later contacts are
                // ignored until the tracked one lifts.
                if self.touch.is_some_and(|t| t != id) {
                    return EventOutcome::none();
                }
                self.touch = Some(id);
                self.touch_output = Some(output);
                let global = self.outputs.to_global(output, pos);
                self.pointer = global;
                self.pointer_down(global, output)
            }
            InputEvent::TouchUp { id } => {
                if self.touch != Some(id) {
                    return EventOutcome::none();
                }
                self.touch = None;
                if self.mode == Mode::DrawingNew {
                    // Touch has no release-to-alter step: lifting the
                    // drawing finger commits right away.
                    debug!(rect = %self.sel.to_rect(), "touch draw finished");
                    self.finished = true;
                    return EventOutcome::finished();
                }
                self.pointer_up()
            }
            InputEvent::TouchMotion { id, pos } => {
                if self.touch != Some(id) {
                    return EventOutcome::none();
                }
                let Some(focus) = self.touch_output else {
                    return EventOutcome::none();
                };
                let global = self.outputs.to_global(focus, pos);
                let dx = global.x - self.pointer.x;
                let dy = global.y - self.pointer.y;
                self.pointer = global;
                self.pointer_move(global, dx, dy, focus)
            }
            InputEvent::Key { key, pressed } => self.key(key, pressed),
        }
    }

    /// Advance animations by `delta` seconds and, in live picking mode,
    /// refresh the candidate list. Called once per rendered frame; a no-op
    /// once everything has settled.
    pub fn update(&mut self, delta: f64) -> Redraw {
        if self.finished {
            return Redraw::None;
        }

        let changed = match self.mode {
            Mode::Altering | Mode::Resizing(_) | Mode::Moving => self.grabber.advance(
                delta,
                self.config.animation,
                self.config.grabber_radius,
                self.config.grabber_border_width,
            ),
            Mode::PickRegion => {
                let mut changed = self.picker.advance(delta, self.config.animation);
                if !self.config.freeze
                    && let Some(source) = self.source.as_mut()
                {
                    self.candidates = source.candidates();
                    changed |= self.picker.update_hover(self.pointer, &self.candidates);
                }
                changed
            }
            Mode::PickOutput => self.picker.advance(delta, self.config.animation),
            Mode::Idle | Mode::DrawingNew => false,
        };

        if changed { Redraw::Once } else { Redraw::None }
    }

    fn pointer_down(&mut self, pos: Point, output: OutputId) -> EventOutcome {
        match self.mode {
            Mode::Idle => self.start_draw(pos, output),
            Mode::Altering => {
                if let Some(handle) = hit_handle(
                    &self.sel,
                    pos,
                    self.grabber.radius(),
                    self.grabber.border_width(),
                ) {
                    let center = handle.position(&self.sel);
                    self.grab_offset = Point::new(center.x - pos.x, center.y - pos.y);
                    debug!(?handle, "grabbed resize handle");
                    self.mode = Mode::Resizing(handle);
                    EventOutcome::none()
                } else if self.sel.contains(pos) {
                    self.mode = Mode::Moving;
                    EventOutcome::none()
                } else {
                    // Clicking outside the box starts over with a fresh
                    // draw and a fresh grabber animation.
                    self.grabber.reset();
                    self.start_draw(pos, output)
                }
            }
            Mode::PickRegion | Mode::PickOutput => {
                self.committed = self.picker.hovered().cloned();
                match &self.committed {
                    Some(c) => debug!(rect = %c.rect, identity = %c.identity, "candidate committed"),
                    None => {
                        self.cancel = Some(Cancelled::NoCandidate);
                        debug!("pick committed with no candidate");
                    }
                }
                self.finished = true;
                EventOutcome::finished()
            }
            // Button already down; a duplicate press changes nothing.
            Mode::DrawingNew | Mode::Resizing(_) | Mode::Moving => EventOutcome::none(),
        }
    }

    fn start_draw(&mut self, pos: Point, output: OutputId) -> EventOutcome {
        self.selected_output = Some(output);
        self.anchor = pos;
        self.sel = drag_box(pos, self.anchor, self.config.aspect_ratio);
        debug!(anchor = ?self.anchor, "drawing new box");
        self.mode = Mode::DrawingNew;
        EventOutcome::redraw()
    }

    fn pointer_up(&mut self) -> EventOutcome {
        match self.mode {
            Mode::DrawingNew => {
                if self.config.alter_selection {
                    self.mode = Mode::Altering;
                    EventOutcome::redraw()
                } else {
                    debug!(rect = %self.sel.to_rect(), "selection finished");
                    self.finished = true;
                    EventOutcome::finished()
                }
            }
            Mode::Resizing(_) | Mode::Moving => {
                self.mode = Mode::Altering;
                EventOutcome::none()
            }
            _ => EventOutcome::none(),
        }
    }

    fn pointer_move(&mut self, pos: Point, dx: f64, dy: f64, output: OutputId) -> EventOutcome {
        match self.mode {
            Mode::DrawingNew => {
                self.sel = drag_box(pos, self.anchor, self.config.aspect_ratio);
                self.selected_output = Some(output);
                EventOutcome::redraw()
            }
            Mode::Resizing(handle) => {
                let target = Point::new(pos.x + self.grab_offset.x, pos.y + self.grab_offset.y);
                self.apply_resize(handle, target);
                let handle = normalize_after_resize(&mut self.sel, handle);
                if let Some(aspect) = self.config.aspect_ratio {
                    apply_aspect_after_resize(&mut self.sel, handle, aspect);
                }
                self.mode = Mode::Resizing(handle);
                self.selected_output = Some(output);
                EventOutcome::redraw()
            }
            Mode::Moving => {
                self.sel.translate(dx, dy);
                self.selected_output = Some(output);
                EventOutcome::redraw()
            }
            Mode::PickRegion | Mode::PickOutput => {
                self.selected_output = Some(output);
                if self.picker.update_hover(pos, &self.candidates) {
                    EventOutcome::redraw()
                } else {
                    EventOutcome::none()
                }
            }
            Mode::Idle | Mode::Altering => EventOutcome::none(),
        }
    }

    /// Moves the dragged edge(s) of the box onto `target`. Corner handles
    /// move two edges, edge handles one; the opposite edges stay put.
    fn apply_resize(&mut self, handle: Handle, target: Point) {
        match handle {
            Handle::TopLeft => self.sel.start = target,
            Handle::Top => self.sel.start.y = target.y,
            Handle::TopRight => {
                self.sel.end.x = target.x;
                self.sel.start.y = target.y;
            }
            Handle::Right => self.sel.end.x = target.x,
            Handle::BottomRight => self.sel.end = target,
            Handle::Bottom => self.sel.end.y = target.y,
            Handle::BottomLeft => {
                self.sel.start.x = target.x;
                self.sel.end.y = target.y;
            }
            Handle::Left => self.sel.start.x = target.x,
        }
    }

    fn key(&mut self, key: Key, pressed: bool) -> EventOutcome {
        // Keys act on release, matching the original bindings.
        if pressed {
            return EventOutcome::none();
        }
        match key {
            Key::Escape => {
                self.cancel = Some(Cancelled::ByUser);
                self.sel = SelectionBox::default();
                self.finished = true;
                debug!("selection cancelled");
                EventOutcome::finished()
            }
            Key::Enter => {
                if self.mode == Mode::Altering {
                    debug!(rect = %self.sel.to_rect(), "selection confirmed");
                    self.finished = true;
                    EventOutcome::finished()
                } else {
                    EventOutcome::none()
                }
            }
        }
    }

    /// The selected geometry, valid once the session has finished.
    ///
    /// Freeform modes yield the normalized box, picking modes the
    /// committed candidate's rectangle.
    pub fn final_selection(&self) -> Result<Rect, Cancelled> {
        if let Some(reason) = self.cancel {
            return Err(reason);
        }

        match self.config.kind {
            SessionKind::PickRegion | SessionKind::PickOutput => self
                .committed
                .as_ref()
                .map(|c| c.rect)
                .ok_or(Cancelled::NoCandidate),
            SessionKind::Freeform => {
                if self.sel.is_unset() {
                    Err(Cancelled::NoSelection)
                } else {
                    Ok(self.sel.to_rect())
                }
            }
        }
    }

    /// Cursor glyph for the current state and pointer position.
    pub fn cursor_shape(&self) -> CursorShape {
        match self.mode {
            Mode::Idle | Mode::DrawingNew => CursorShape::Crosshair,
            Mode::Altering => {
                if let Some(handle) = hit_handle(
                    &self.sel,
                    self.pointer,
                    self.grabber.radius(),
                    self.grabber.border_width(),
                ) {
                    handle.cursor()
                } else if self.sel.contains(self.pointer) {
                    CursorShape::Grab
                } else {
                    CursorShape::Crosshair
                }
            }
            Mode::Resizing(handle) => handle.cursor(),
            Mode::Moving => CursorShape::Grabbing,
            Mode::PickRegion | Mode::PickOutput => {
                if self.picker.hovered().is_some() {
                    CursorShape::Pointer
                } else {
                    CursorShape::Default
                }
            }
        }
    }

    // Read-only snapshot, consumed every frame by the renderer.

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn selection_box(&self) -> &SelectionBox {
        &self.sel
    }

    pub fn pointer(&self) -> Point {
        self.pointer
    }

    pub fn grabber_anim(&self) -> &GrabberAnim {
        &self.grabber
    }

    pub fn region_anim(&self) -> &RegionAnim {
        self.picker.anim()
    }

    pub fn hovered_candidate(&self) -> Option<&Candidate> {
        self.picker.hovered()
    }

    pub fn committed_candidate(&self) -> Option<&Candidate> {
        self.committed.as_ref()
    }

    pub fn selected_output(&self) -> Option<OutputId> {
        self.selected_output
    }

    pub fn positions_of_handles(&self) -> [Point; 8] {
        geometry::handle_positions(&self.sel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidates::StaticCandidates;
    use crate::outputs::OutputInfo;

    fn single_output() -> OutputLayout {
        OutputLayout::new(vec![OutputInfo::new(Rect::new(0, 0, 1920, 1080), "DP-1")])
    }

    fn press(pos: Point) -> InputEvent {
        InputEvent::PointerButton {
            button: Button::Left,
            pressed: true,
            pos,
            output: OutputId(0),
        }
    }

    fn release(pos: Point) -> InputEvent {
        InputEvent::PointerButton {
            button: Button::Left,
            pressed: false,
            pos,
            output: OutputId(0),
        }
    }

    fn motion(pos: Point) -> InputEvent {
        InputEvent::PointerMotion {
            pos,
            output: OutputId(0),
        }
    }

    fn esc() -> InputEvent {
        InputEvent::Key {
            key: Key::Escape,
            pressed: false,
        }
    }

    #[test]
    fn freeform_drag_produces_padded_rect() {
        let mut s = SelectionSession::new(SessionConfig::default(), single_output());
        assert_eq!(s.mode(), Mode::Idle);

        s.handle_event(press(Point::new(100.0, 100.0)));
        assert_eq!(s.mode(), Mode::DrawingNew);
        s.handle_event(motion(Point::new(300.0, 200.0)));
        let out = s.handle_event(release(Point::new(300.0, 200.0)));

        assert_eq!(out.flow, ControlFlow::Finished);
        assert_eq!(s.final_selection(), Ok(Rect::new(100, 100, 201, 101)));
    }

    #[test]
    fn alter_mode_waits_for_enter() {
        let config = SessionConfig {
            alter_selection: true,
            ..Default::default()
        };
        let mut s = SelectionSession::new(config, single_output());

        s.handle_event(press(Point::new(0.0, 0.0)));
        s.handle_event(motion(Point::new(99.0, 99.0)));
        let out = s.handle_event(release(Point::new(99.0, 99.0)));
        assert_eq!(out.flow, ControlFlow::Continue);
        assert_eq!(s.mode(), Mode::Altering);

        let out = s.handle_event(InputEvent::Key {
            key: Key::Enter,
            pressed: false,
        });
        assert_eq!(out.flow, ControlFlow::Finished);
        assert_eq!(s.final_selection(), Ok(Rect::new(0, 0, 100, 100)));
    }

    #[test]
    fn enter_only_confirms_in_alter_mode() {
        let mut s = SelectionSession::new(SessionConfig::default(), single_output());
        let out = s.handle_event(InputEvent::Key {
            key: Key::Enter,
            pressed: false,
        });
        assert_eq!(out.flow, ControlFlow::Continue);
        assert!(!s.is_finished());
    }

    #[test]
    fn escape_cancels_from_any_state() {
        let mut s = SelectionSession::new(SessionConfig::default(), single_output());
        s.handle_event(press(Point::new(10.0, 10.0)));
        s.handle_event(motion(Point::new(50.0, 50.0)));

        let out = s.handle_event(esc());
        assert_eq!(out.flow, ControlFlow::Finished);
        assert_eq!(s.final_selection(), Err(Cancelled::ByUser));

        // Terminal: further input is ignored.
        let out = s.handle_event(press(Point::new(10.0, 10.0)));
        assert_eq!(out, EventOutcome::none());
    }

    #[test]
    fn no_drag_yields_no_selection() {
        let s = SelectionSession::new(SessionConfig::default(), single_output());
        assert_eq!(s.final_selection(), Err(Cancelled::NoSelection));
    }

    #[test]
    fn resize_mirror_swaps_active_handle() {
        let config = SessionConfig {
            alter_selection: true,
            animation: false,
            ..Default::default()
        };
        let mut s = SelectionSession::new(config, single_output());

        // Draw {0,0,100,100}: anchor at (0,0), pointer to (99,99).
        s.handle_event(press(Point::new(0.0, 0.0)));
        s.handle_event(motion(Point::new(99.0, 99.0)));
        s.handle_event(release(Point::new(99.0, 99.0)));
        assert_eq!(s.selection_box().to_rect(), Rect::new(0, 0, 100, 100));
        s.update(0.016); // grabbers snap to full size

        // Grab the left-edge handle at (0,50) and drag past the right edge.
        s.handle_event(motion(Point::new(0.0, 50.0)));
        s.handle_event(press(Point::new(0.0, 50.0)));
        assert_eq!(s.mode(), Mode::Resizing(Handle::Left));
        s.handle_event(motion(Point::new(150.0, 50.0)));

        assert_eq!(s.mode(), Mode::Resizing(Handle::Right));
        assert_eq!(s.selection_box().to_rect(), Rect::new(100, 0, 50, 100));
        assert_eq!(s.cursor_shape(), CursorShape::EResize);

        s.handle_event(release(Point::new(150.0, 50.0)));
        assert_eq!(s.mode(), Mode::Altering);
    }

    #[test]
    fn moving_translates_without_reshaping() {
        let config = SessionConfig {
            alter_selection: true,
            animation: false,
            ..Default::default()
        };
        let mut s = SelectionSession::new(config, single_output());
        s.handle_event(press(Point::new(0.0, 0.0)));
        s.handle_event(motion(Point::new(99.0, 99.0)));
        s.handle_event(release(Point::new(99.0, 99.0)));
        s.update(0.016);

        s.handle_event(motion(Point::new(50.0, 50.0)));
        s.handle_event(press(Point::new(50.0, 50.0)));
        assert_eq!(s.mode(), Mode::Moving);
        assert_eq!(s.cursor_shape(), CursorShape::Grabbing);

        s.handle_event(motion(Point::new(70.0, 45.0)));
        s.handle_event(release(Point::new(70.0, 45.0)));
        assert_eq!(s.selection_box().to_rect(), Rect::new(20, -5, 100, 100));
    }

    #[test]
    fn clicking_outside_box_starts_fresh_draw() {
        let config = SessionConfig {
            alter_selection: true,
            animation: false,
            ..Default::default()
        };
        let mut s = SelectionSession::new(config, single_output());
        s.handle_event(press(Point::new(0.0, 0.0)));
        s.handle_event(motion(Point::new(99.0, 99.0)));
        s.handle_event(release(Point::new(99.0, 99.0)));
        s.update(0.016);
        assert!(s.grabber_anim().progress() >= 1.0);

        s.handle_event(motion(Point::new(500.0, 500.0)));
        s.handle_event(press(Point::new(500.0, 500.0)));
        assert_eq!(s.mode(), Mode::DrawingNew);
        // Grabber animation restarts for the next alter phase.
        assert_eq!(s.grabber_anim().progress(), 0.0);
    }

    #[test]
    fn aspect_ratio_holds_through_resize() {
        let config = SessionConfig {
            alter_selection: true,
            animation: false,
            aspect_ratio: Some(2.0),
            ..Default::default()
        };
        let mut s = SelectionSession::new(config, single_output());
        s.handle_event(press(Point::new(0.0, 0.0)));
        s.handle_event(motion(Point::new(200.0, 50.0)));
        s.handle_event(release(Point::new(200.0, 50.0)));
        let sel = s.selection_box();
        // The drawn box carries the far-edge pad; strip it for the ratio.
        assert!(((sel.width() - 1.0) / (sel.height() - 1.0) - 2.0).abs() < 1e-9);
        s.update(0.016);

        // Drag the bottom edge: width must follow.
        let bottom = Handle::Bottom.position(s.selection_box());
        s.handle_event(motion(bottom));
        s.handle_event(press(bottom));
        assert_eq!(s.mode(), Mode::Resizing(Handle::Bottom));
        s.handle_event(motion(Point::new(bottom.x, bottom.y + 60.0)));

        let sel = s.selection_box();
        assert!((sel.width() / sel.height() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn touch_mirrors_pointer_but_finishes_on_lift() {
        let mut s = SelectionSession::new(SessionConfig::default(), single_output());
        let touch = TouchId(1);

        s.handle_event(InputEvent::TouchDown {
            id: touch,
            pos: Point::new(10.0, 10.0),
            output: OutputId(0),
        });
        assert_eq!(s.mode(), Mode::DrawingNew);

        // A second contact is ignored outright.
        let out = s.handle_event(InputEvent::TouchDown {
            id: TouchId(2),
            pos: Point::new(500.0, 500.0),
            output: OutputId(0),
        });
        assert_eq!(out, EventOutcome::none());
        let out = s.handle_event(InputEvent::TouchUp { id: TouchId(2) });
        assert_eq!(out, EventOutcome::none());

        s.handle_event(InputEvent::TouchMotion {
            id: touch,
            pos: Point::new(110.0, 60.0),
        });
        let out = s.handle_event(InputEvent::TouchUp { id: touch });
        assert_eq!(out.flow, ControlFlow::Finished);
        assert_eq!(s.final_selection(), Ok(Rect::new(10, 10, 101, 51)));
    }

    #[test]
    fn touch_converts_output_local_coordinates() {
        let outputs = OutputLayout::new(vec![
            OutputInfo::new(Rect::new(0, 0, 1920, 1080), "DP-1"),
            OutputInfo::new(Rect::new(1920, 0, 1920, 1080), "DP-2"),
        ]);
        let mut s = SelectionSession::new(SessionConfig::default(), outputs);

        s.handle_event(InputEvent::TouchDown {
            id: TouchId(7),
            pos: Point::new(100.0, 100.0),
            output: OutputId(1),
        });
        s.handle_event(InputEvent::TouchMotion {
            id: TouchId(7),
            pos: Point::new(200.0, 200.0),
        });
        s.handle_event(InputEvent::TouchUp { id: TouchId(7) });

        assert_eq!(s.final_selection(), Ok(Rect::new(2020, 100, 101, 101)));
    }

    #[test]
    fn pick_region_commits_hovered_candidate() {
        let source = StaticCandidates::parse("0,0 100x100 200,0 100x100").unwrap();
        let config = SessionConfig {
            kind: SessionKind::PickRegion,
            freeze: true,
            ..Default::default()
        };
        let mut s = SelectionSession::with_source(config, single_output(), Box::new(source));
        assert_eq!(s.mode(), Mode::PickRegion);
        assert_eq!(s.cursor_shape(), CursorShape::Default);

        s.handle_event(motion(Point::new(250.0, 50.0)));
        assert_eq!(s.cursor_shape(), CursorShape::Pointer);
        let out = s.handle_event(press(Point::new(250.0, 50.0)));
        assert_eq!(out.flow, ControlFlow::Finished);
        assert_eq!(s.final_selection(), Ok(Rect::new(200, 0, 100, 100)));
    }

    #[test]
    fn pick_region_with_no_match_cancels() {
        let source = StaticCandidates::parse("0,0 100x100").unwrap();
        let config = SessionConfig {
            kind: SessionKind::PickRegion,
            freeze: true,
            ..Default::default()
        };
        let mut s = SelectionSession::with_source(config, single_output(), Box::new(source));

        s.handle_event(motion(Point::new(500.0, 500.0)));
        let out = s.handle_event(press(Point::new(500.0, 500.0)));
        assert_eq!(out.flow, ControlFlow::Finished);
        assert_eq!(s.final_selection(), Err(Cancelled::NoCandidate));
    }

    #[test]
    fn pick_output_uses_output_geometry() {
        let outputs = OutputLayout::new(vec![
            OutputInfo::new(Rect::new(0, 0, 1920, 1080), "DP-1"),
            OutputInfo::new(Rect::new(1920, 0, 2560, 1440), "DP-2"),
        ]);
        let config = SessionConfig {
            kind: SessionKind::PickOutput,
            ..Default::default()
        };
        let mut s = SelectionSession::new(config, outputs);

        s.handle_event(InputEvent::PointerMotion {
            pos: Point::new(2000.0, 100.0),
            output: OutputId(1),
        });
        assert_eq!(s.hovered_candidate().unwrap().identity, "DP-2");
        s.handle_event(press(Point::new(2000.0, 100.0)));
        assert_eq!(s.final_selection(), Ok(Rect::new(1920, 0, 2560, 1440)));
    }

    #[test]
    fn initial_cursor_preselects_candidate() {
        let source = StaticCandidates::parse("0,0 100x100")
            .unwrap()
            .with_cursor(Point::new(50.0, 50.0));
        let config = SessionConfig {
            kind: SessionKind::PickRegion,
            freeze: true,
            ..Default::default()
        };
        let s = SelectionSession::with_source(config, single_output(), Box::new(source));

        assert_eq!(s.hovered_candidate().unwrap().identity, "region-0");
        assert!(!s.region_anim().in_flight());
        assert_eq!(s.region_anim().current(), [0.0, 0.0, 100.0, 100.0]);
        assert_eq!(s.cursor_shape(), CursorShape::Pointer);
    }

    #[test]
    fn live_pick_refreshes_candidates_each_tick() {
        struct Growing {
            calls: u32,
        }
        impl CandidateSource for Growing {
            fn candidates(&mut self) -> Vec<Candidate> {
                self.calls += 1;
                if self.calls > 1 {
                    vec![Candidate::new(Rect::new(0, 0, 100, 100), "late")]
                } else {
                    Vec::new()
                }
            }
        }

        let config = SessionConfig {
            kind: SessionKind::PickRegion,
            ..Default::default()
        };
        let mut s = SelectionSession::with_source(
            config,
            single_output(),
            Box::new(Growing { calls: 0 }),
        );

        s.handle_event(motion(Point::new(50.0, 50.0)));
        assert!(s.hovered_candidate().is_none());

        // The next tick re-queries the source and re-feeds the pointer.
        assert_eq!(s.update(0.016), Redraw::Once);
        assert_eq!(s.hovered_candidate().unwrap().identity, "late");
    }

    #[test]
    fn frozen_pick_keeps_initial_list() {
        struct Exploding;
        impl CandidateSource for Exploding {
            fn candidates(&mut self) -> Vec<Candidate> {
                vec![Candidate::new(Rect::new(0, 0, 10, 10), "gone-next-tick")]
            }
        }

        let config = SessionConfig {
            kind: SessionKind::PickRegion,
            freeze: true,
            animation: false,
            ..Default::default()
        };
        let mut s =
            SelectionSession::with_source(config, single_output(), Box::new(Exploding));
        s.handle_event(motion(Point::new(5.0, 5.0)));
        let hovered = s.hovered_candidate().cloned();
        s.update(0.016);
        assert_eq!(s.hovered_candidate().cloned(), hovered);
    }

    #[test]
    fn update_is_idempotent_once_settled() {
        let config = SessionConfig {
            alter_selection: true,
            ..Default::default()
        };
        let mut s = SelectionSession::new(config, single_output());
        s.handle_event(press(Point::new(0.0, 0.0)));
        s.handle_event(release(Point::new(0.0, 0.0)));
        assert_eq!(s.mode(), Mode::Altering);

        while s.update(0.1) == Redraw::Once {}
        let grabber = *s.grabber_anim();
        assert_eq!(s.update(0.1), Redraw::None);
        assert_eq!(*s.grabber_anim(), grabber);
    }

    #[test]
    fn right_button_is_ignored() {
        let mut s = SelectionSession::new(SessionConfig::default(), single_output());
        let out = s.handle_event(InputEvent::PointerButton {
            button: Button::Right,
            pressed: true,
            pos: Point::new(10.0, 10.0),
            output: OutputId(0),
        });
        assert_eq!(out, EventOutcome::none());
        assert_eq!(s.mode(), Mode::Idle);
    }
}

//! Pointer-driven move/resize of a single phase bar.
//!
//! The controller is toolkit-agnostic: the UI feeds it pointer-down, move, up
//! and cancel events, and reads back a preview for rendering plus, on release,
//! at most one [`DateCommit`] to hand to the store.

use chrono::NaiveDate;
use uuid::Uuid;

use super::position::resolve_dates;
use crate::model::{add_days, DateRange, Phase, PhaseDates};

/// Which part of the bar the pointer grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gesture {
    Move,
    ResizeStart,
    ResizeEnd,
}

/// Snapshot taken when a gesture starts.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub phase_id: Uuid,
    pub gesture: Gesture,
    pub pointer_origin_x: f32,
    /// Stored dates at gesture start, with one-sided dates filled in.
    pub original: DateRange,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// New dates for a phase produced by a finished gesture or an explicit edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateCommit {
    pub phase_id: Uuid,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Shift `original` by `delta_days` according to the gesture.
///
/// Resizes never collapse the bar: the moved edge is clamped one day short of
/// the fixed edge. Dates saturate at the ends of the calendar, so `end >= start`
/// holds for any delta.
pub fn apply_gesture(gesture: Gesture, original: DateRange, delta_days: i64) -> DateRange {
    match gesture {
        Gesture::Move => original.shifted(delta_days),
        Gesture::ResizeStart => {
            let start = add_days(original.start, delta_days);
            let start = if start >= original.end {
                add_days(original.end, -1)
            } else {
                start
            };
            DateRange::new(start, original.end)
        }
        Gesture::ResizeEnd => {
            let end = add_days(original.end, delta_days);
            let end = if end <= original.start {
                add_days(original.start, 1)
            } else {
                end
            };
            DateRange::new(original.start, end)
        }
    }
}

/// Whole days covered by a horizontal pointer travel.
pub fn delta_days(pointer_x: f32, origin_x: f32, pixels_per_day: f32) -> i64 {
    if pixels_per_day <= 0.0 {
        return 0;
    }
    let days = ((pointer_x - origin_x) / pixels_per_day).round();
    if days.is_finite() {
        days as i64
    } else {
        0
    }
}

/// State machine for one gesture at a time.
#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
    preview: Option<DateRange>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn preview(&self) -> Option<DateRange> {
        self.preview
    }

    /// Start a gesture on `phase`.
    ///
    /// Refused while another gesture is active, and for phases without any
    /// date (there is nothing to shift).
    pub fn pointer_down(&mut self, phase: &Phase, gesture: Gesture, pointer_x: f32) -> bool {
        if self.is_dragging() {
            return false;
        }
        let (resolved, _) = resolve_dates(phase.start_date, phase.end_date);
        let Some(original) = resolved else {
            return false;
        };
        log::debug!("drag start {:?} on '{}'", gesture, phase.name);
        self.preview = None;
        self.state = DragState::Dragging(DragSession {
            phase_id: phase.id,
            gesture,
            pointer_origin_x: pointer_x,
            original,
        });
        true
    }

    /// Feed a pointer position. Returns `true` when the preview changed.
    ///
    /// A move that rounds to zero whole days leaves the preview untouched.
    pub fn pointer_move(&mut self, pointer_x: f32, pixels_per_day: f32) -> bool {
        let DragState::Dragging(session) = &self.state else {
            return false;
        };
        let delta = delta_days(pointer_x, session.pointer_origin_x, pixels_per_day);
        if delta == 0 {
            return false;
        }
        let next = apply_gesture(session.gesture, session.original, delta);
        if self.preview == Some(next) {
            return false;
        }
        log::trace!("drag preview {} .. {}", next.start, next.end);
        self.preview = Some(next);
        true
    }

    /// Release the pointer, yielding the dates to persist if the bar moved.
    pub fn pointer_up(&mut self) -> Option<DateCommit> {
        let state = std::mem::take(&mut self.state);
        let preview = self.preview.take();
        let DragState::Dragging(session) = state else {
            return None;
        };
        let commit = preview.map(|range| DateCommit {
            phase_id: session.phase_id,
            start: range.start,
            end: range.end,
        });
        match &commit {
            Some(c) => log::debug!("drag commit {} .. {}", c.start, c.end),
            None => log::debug!("drag released without change"),
        }
        commit
    }

    /// Abort the gesture and drop the preview. Returns `true` if one was active.
    pub fn cancel(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        if was_dragging {
            log::debug!("drag cancelled");
        }
        self.state = DragState::Idle;
        self.preview = None;
        was_dragging
    }

    /// The dates `phase` should be drawn with right now.
    pub fn dates_for(&self, phase: &Phase) -> PhaseDates {
        match (&self.state, self.preview) {
            (DragState::Dragging(session), Some(range)) if session.phase_id == phase.id => {
                PhaseDates::PreviewOverride(range)
            }
            _ => PhaseDates::committed(phase),
        }
    }
}

use chrono::NaiveDate;
use uuid::Uuid;

use super::axis::{date_to_offset, TimelineWindow};
use crate::model::{add_days, DateRange, Phase, PhaseDates};

/// Narrowest bar drawn for a dated phase.
pub const MIN_BAR_WIDTH: f32 = 30.0;
/// Duration given to a phase that has only one of its two dates.
pub const FALLBACK_DURATION_DAYS: i64 = 14;
/// Width of the placeholder bar for a phase without dates.
pub const UNDATED_BAR_WIDTH: f32 = 80.0;
const UNDATED_BASE_OFFSET: f32 = 8.0;
const UNDATED_ROW_STEP: f32 = 16.0;

/// How a phase's drawn dates were obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Both dates present and ordered.
    Exact,
    /// Only the end was set; start synthesized before it.
    StartSynthesized,
    /// Only the start was set; end synthesized after it.
    EndSynthesized,
    /// End before start in the data; drawn as a minimum-duration bar.
    Inverted,
    /// No dates; placeholder bar, not draggable.
    Undated,
}

/// Rectangle of one phase along the time axis.
#[derive(Debug, Clone, PartialEq)]
pub struct PhasePosition {
    pub phase_id: Uuid,
    pub row: usize,
    pub left: f32,
    pub width: f32,
    /// `None` only for undated phases.
    pub resolved: Option<DateRange>,
    pub resolution: Resolution,
    /// Drawn from a live drag preview rather than stored dates.
    pub is_preview: bool,
}

impl PhasePosition {
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn is_draggable(&self) -> bool {
        self.resolved.is_some()
    }
}

/// Fill in missing or malformed dates.
///
/// Synthesized dates saturate at the ends of the calendar.
pub fn resolve_dates(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> (Option<DateRange>, Resolution) {
    match (start, end) {
        (Some(s), Some(e)) if s <= e => (Some(DateRange::new(s, e)), Resolution::Exact),
        (Some(s), Some(_)) => (
            Some(DateRange::new(s, add_days(s, 1))),
            Resolution::Inverted,
        ),
        (None, Some(e)) => (
            Some(DateRange::new(add_days(e, -FALLBACK_DURATION_DAYS), e)),
            Resolution::StartSynthesized,
        ),
        (Some(s), None) => (
            Some(DateRange::new(s, add_days(s, FALLBACK_DURATION_DAYS))),
            Resolution::EndSynthesized,
        ),
        (None, None) => (None, Resolution::Undated),
    }
}

/// Place a single phase in row `row`.
pub fn position_phase(
    phase_id: Uuid,
    row: usize,
    dates: PhaseDates,
    window: &TimelineWindow,
    pixels_per_day: f32,
) -> PhasePosition {
    let (resolved, resolution) = resolve_dates(dates.start(), dates.end());
    let (left, width) = match resolved {
        Some(range) => {
            let left = date_to_offset(range.start, window, pixels_per_day);
            let right = date_to_offset(range.end, window, pixels_per_day);
            (left, (right - left).max(MIN_BAR_WIDTH))
        }
        None => (
            UNDATED_BASE_OFFSET + row as f32 * UNDATED_ROW_STEP,
            UNDATED_BAR_WIDTH,
        ),
    };
    PhasePosition {
        phase_id,
        row,
        left,
        width,
        resolved,
        resolution,
        is_preview: dates.is_preview(),
    }
}

/// Place every phase, row index taken from list order.
///
/// `dates_for` decides which dates a phase is drawn with, so a phase under an
/// active drag follows the preview instead of its stored dates.
pub fn phase_positions<F>(
    phases: &[Phase],
    window: &TimelineWindow,
    pixels_per_day: f32,
    dates_for: F,
) -> Vec<PhasePosition>
where
    F: Fn(&Phase) -> PhaseDates,
{
    phases
        .iter()
        .enumerate()
        .map(|(row, phase)| position_phase(phase.id, row, dates_for(phase), window, pixels_per_day))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn window() -> TimelineWindow {
        TimelineWindow::new(d(2024, 3, 1), d(2024, 4, 30))
    }

    #[test]
    fn exact_dates_span_the_range() {
        let phase = Phase::new("a", 0).with_dates(Some(d(2024, 3, 11)), Some(d(2024, 3, 21)));
        let pos = position_phase(phase.id, 0, PhaseDates::committed(&phase), &window(), 4.0);
        assert_eq!(pos.left, 40.0);
        assert_eq!(pos.width, 40.0);
        assert_eq!(pos.resolution, Resolution::Exact);
        assert!(!pos.is_preview);
    }

    #[test]
    fn short_spans_get_minimum_width() {
        let phase = Phase::new("a", 0).with_dates(Some(d(2024, 3, 11)), Some(d(2024, 3, 12)));
        let pos = position_phase(phase.id, 0, PhaseDates::committed(&phase), &window(), 4.0);
        assert_eq!(pos.width, MIN_BAR_WIDTH);
    }

    #[test]
    fn one_sided_dates_get_fourteen_days() {
        let (range, res) = resolve_dates(None, Some(d(2024, 3, 20)));
        assert_eq!(range, Some(DateRange::new(d(2024, 3, 6), d(2024, 3, 20))));
        assert_eq!(res, Resolution::StartSynthesized);

        let (range, res) = resolve_dates(Some(d(2024, 3, 20)), None);
        assert_eq!(range, Some(DateRange::new(d(2024, 3, 20), d(2024, 4, 3))));
        assert_eq!(res, Resolution::EndSynthesized);
    }

    #[test]
    fn inverted_dates_do_not_panic() {
        let phase = Phase::new("a", 0).with_dates(Some(d(2024, 3, 20)), Some(d(2024, 3, 10)));
        let pos = position_phase(phase.id, 0, PhaseDates::committed(&phase), &window(), 4.0);
        assert_eq!(pos.resolution, Resolution::Inverted);
        assert_eq!(pos.resolved.map(|r| r.span_days()), Some(1));
        assert_eq!(pos.width, MIN_BAR_WIDTH);
    }

    #[test]
    fn calendar_end_dates_resolve_without_overflow() {
        let (range, res) = resolve_dates(Some(NaiveDate::MAX), None);
        assert_eq!(res, Resolution::EndSynthesized);
        assert_eq!(range, Some(DateRange::new(NaiveDate::MAX, NaiveDate::MAX)));

        let (range, _) = resolve_dates(None, Some(NaiveDate::MIN));
        assert_eq!(range.map(|r| r.start), Some(NaiveDate::MIN));

        let (range, res) = resolve_dates(Some(NaiveDate::MAX), Some(NaiveDate::MIN));
        assert_eq!(res, Resolution::Inverted);
        assert!(range.is_some_and(|r| r.end >= r.start));

        let phase = Phase::new("late", 0).with_dates(Some(NaiveDate::MAX), None);
        let pos = position_phase(phase.id, 0, PhaseDates::committed(&phase), &window(), 4.0);
        assert!(pos.left.is_finite() && pos.left > 0.0);
        assert_eq!(pos.width, MIN_BAR_WIDTH);
    }

    #[test]
    fn undated_rows_get_distinct_offsets() {
        let phases: Vec<_> = (0..4).map(|i| Phase::new(format!("p{i}"), i)).collect();
        let positions = phase_positions(&phases, &window(), 4.0, PhaseDates::committed);
        for pair in positions.windows(2) {
            assert!(pair[1].left > pair[0].left);
        }
        assert!(positions
            .iter()
            .all(|p| p.width == UNDATED_BAR_WIDTH && !p.is_draggable()));
    }

    #[test]
    fn preview_dates_win_over_stored_ones() {
        let phase = Phase::new("a", 0).with_dates(Some(d(2024, 3, 1)), Some(d(2024, 3, 10)));
        let preview = DateRange::new(d(2024, 3, 6), d(2024, 3, 15));
        let positions = phase_positions(&[phase], &window(), 4.0, |_| {
            PhaseDates::PreviewOverride(preview)
        });
        assert_eq!(positions[0].left, 20.0);
        assert_eq!(positions[0].resolved, Some(preview));
        assert!(positions[0].is_preview);
    }
}

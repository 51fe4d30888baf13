use chrono::{Datelike, NaiveDate};

use super::axis::{next_month_start, TimelineWindow};
use super::zoom::ZoomLevel;
use crate::model::{add_days, Phase};

/// Derive the visible window from the phases' persisted dates.
///
/// With no dates at all the window is centered on `today`. Otherwise it spans
/// the earliest to the latest date plus zoom-dependent padding. Either way the
/// edges are snapped outward to month boundaries (year boundaries at year
/// zoom) so header labels line up with calendar periods.
pub fn timeline_bounds(phases: &[Phase], zoom: ZoomLevel, today: NaiveDate) -> TimelineWindow {
    let dates = phases
        .iter()
        .flat_map(|p| [p.start_date, p.end_date])
        .flatten();

    let extent = dates.fold(None, |acc: Option<(NaiveDate, NaiveDate)>, d| match acc {
        Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
        None => Some((d, d)),
    });

    let (min, max) = extent
        .map(|(lo, hi)| {
            let pad = zoom.padding_days();
            (add_days(lo, -pad), add_days(hi, pad))
        })
        .unwrap_or_else(|| {
            let half = zoom.default_half_span_days();
            (add_days(today, -half), add_days(today, half))
        });

    TimelineWindow::new(snap_start(min, zoom), snap_end(max, zoom))
}

fn snap_start(date: NaiveDate, zoom: ZoomLevel) -> NaiveDate {
    let snapped = match zoom {
        ZoomLevel::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1),
        _ => date.with_day(1),
    };
    snapped.unwrap_or(date)
}

fn snap_end(date: NaiveDate, zoom: ZoomLevel) -> NaiveDate {
    match zoom {
        ZoomLevel::Year => NaiveDate::from_ymd_opt(date.year(), 12, 31).unwrap_or(date),
        _ => next_month_start(date)
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn dated(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Phase {
        Phase::new("p", 0).with_dates(start, end)
    }

    #[test]
    fn pads_and_snaps_to_months() {
        let phases = vec![
            dated(Some(d(2024, 3, 10)), Some(d(2024, 3, 20))),
            dated(Some(d(2024, 4, 2)), Some(d(2024, 4, 25))),
        ];
        let w = timeline_bounds(&phases, ZoomLevel::Week, d(2000, 1, 1));
        assert_eq!(w.start, d(2024, 3, 1));
        assert_eq!(w.end, d(2024, 5, 31));
        assert_eq!(w.total_days, (d(2024, 5, 31) - d(2024, 3, 1)).num_days());
    }

    #[test]
    fn padding_can_cross_into_previous_month() {
        let phases = vec![dated(Some(d(2024, 3, 5)), Some(d(2024, 3, 6)))];
        let w = timeline_bounds(&phases, ZoomLevel::Month, d(2000, 1, 1));
        assert_eq!(w.start, d(2024, 2, 1));
        assert_eq!(w.end, d(2024, 3, 31));
    }

    #[test]
    fn year_zoom_snaps_to_years() {
        let phases = vec![dated(Some(d(2024, 6, 1)), Some(d(2025, 2, 1)))];
        let w = timeline_bounds(&phases, ZoomLevel::Year, d(2000, 1, 1));
        assert_eq!(w.start, d(2024, 1, 1));
        assert_eq!(w.end, d(2025, 12, 31));
    }

    #[test]
    fn single_date_still_gives_a_real_window() {
        let phases = vec![dated(None, Some(d(2024, 2, 29)))];
        let w = timeline_bounds(&phases, ZoomLevel::Day, d(2000, 1, 1));
        assert_eq!(w.start, d(2024, 2, 1));
        assert_eq!(w.end, d(2024, 3, 31));
        assert!(w.total_days > 0);
    }

    #[rstest]
    #[case(ZoomLevel::Day)]
    #[case(ZoomLevel::Week)]
    #[case(ZoomLevel::Month)]
    #[case(ZoomLevel::Year)]
    fn undated_phases_center_on_today(#[case] zoom: ZoomLevel) {
        let today = d(2024, 7, 15);
        let phases = vec![dated(None, None), dated(None, None)];
        let w = timeline_bounds(&phases, zoom, today);
        assert!(w.contains(today));
        let half = zoom.default_half_span_days();
        assert!((today - w.start).num_days() >= half);
        assert!((w.end - today).num_days() >= half);
    }

    #[rstest]
    #[case(ZoomLevel::Day)]
    #[case(ZoomLevel::Month)]
    #[case(ZoomLevel::Year)]
    fn dates_at_calendar_ends_do_not_overflow(#[case] zoom: ZoomLevel) {
        let today = d(2024, 7, 15);
        let max = dated(Some(NaiveDate::MAX), Some(NaiveDate::MAX));
        let late = timeline_bounds(&[max], zoom, today);
        assert!(late.start < late.end);
        assert_eq!(late.end, NaiveDate::MAX);

        let early = timeline_bounds(&[dated(Some(NaiveDate::MIN), None)], zoom, today);
        assert_eq!(early.start, NaiveDate::MIN);
        assert!(early.total_days > 0);
    }

    #[test]
    fn coarser_default_windows_are_wider() {
        let today = d(2024, 7, 15);
        let day = timeline_bounds(&[], ZoomLevel::Day, today);
        let year = timeline_bounds(&[], ZoomLevel::Year, today);
        assert!(year.total_days > day.total_days);
    }
}

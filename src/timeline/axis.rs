use chrono::{Datelike, NaiveDate, Weekday};

use super::zoom::ZoomLevel;
use crate::model::add_days;

/// The date range that defines the horizontal coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineWindow {
    /// Date at pixel offset zero.
    pub start: NaiveDate,
    /// Rightmost date of the window.
    pub end: NaiveDate,
    /// `end - start` in days, always at least one.
    pub total_days: i64,
}

impl TimelineWindow {
    /// Build a window, widening a degenerate or inverted range to one day.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        let start = start.min(add_days(NaiveDate::MAX, -1));
        let end = if end > start { end } else { add_days(start, 1) };
        Self {
            start,
            end,
            total_days: (end - start).num_days(),
        }
    }

    /// Total width in pixels for the window.
    pub fn width(&self, pixels_per_day: f32) -> f32 {
        self.total_days as f32 * pixels_per_day
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Convert a date to an x-pixel offset from the window start.
///
/// Dates outside the window give negative or over-width offsets.
pub fn date_to_offset(date: NaiveDate, window: &TimelineWindow, pixels_per_day: f32) -> f32 {
    (date - window.start).num_days() as f32 * pixels_per_day
}

/// Convert an x-pixel offset back to the nearest date.
///
/// Offsets beyond the calendar clamp to its first or last day.
pub fn offset_to_date(offset: f32, window: &TimelineWindow, pixels_per_day: f32) -> NaiveDate {
    if pixels_per_day <= 0.0 || !offset.is_finite() {
        return window.start;
    }
    let days = (offset / pixels_per_day).round();
    if days.is_nan() {
        return window.start;
    }
    // `as` saturates, and add_days saturates past the calendar ends
    add_days(window.start, days as i64)
}

/// A labelled gridline in the timeline header.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub date: NaiveDate,
    pub offset: f32,
    pub label: String,
    /// Period boundary one level up (month start at day zoom, year start at month zoom).
    pub major: bool,
}

/// Gridlines for the window at the given zoom level.
pub fn ticks(window: &TimelineWindow, zoom: ZoomLevel) -> Vec<AxisTick> {
    let ppd = zoom.pixels_per_day();
    let mut out = Vec::new();
    let mut date = first_tick(window.start, zoom);

    while date <= window.end {
        let (label, major) = match zoom {
            ZoomLevel::Day => {
                if date.day() == 1 {
                    (date.format("%b %Y").to_string(), true)
                } else {
                    (date.format("%d").to_string(), false)
                }
            }
            ZoomLevel::Week => (date.format("W%V").to_string(), date.day() <= 7),
            ZoomLevel::Month => {
                if date.month() == 1 {
                    (date.format("%b %Y").to_string(), true)
                } else {
                    (date.format("%b").to_string(), false)
                }
            }
            ZoomLevel::Year => (date.format("%Y").to_string(), true),
        };
        out.push(AxisTick {
            date,
            offset: date_to_offset(date, window, ppd),
            label,
            major,
        });
        let next = next_tick(date, zoom);
        if next <= date {
            break;
        }
        date = next;
    }
    out
}

fn first_tick(start: NaiveDate, zoom: ZoomLevel) -> NaiveDate {
    match zoom {
        ZoomLevel::Day => start,
        ZoomLevel::Week => {
            let mut d = start;
            while d.weekday() != Weekday::Mon && d < NaiveDate::MAX {
                d = add_days(d, 1);
            }
            d
        }
        ZoomLevel::Month => {
            if start.day() == 1 {
                start
            } else {
                next_month_start(start).unwrap_or(NaiveDate::MAX)
            }
        }
        ZoomLevel::Year => {
            if start.ordinal() == 1 {
                start
            } else {
                NaiveDate::from_ymd_opt(start.year() + 1, 1, 1).unwrap_or(start)
            }
        }
    }
}

fn next_tick(date: NaiveDate, zoom: ZoomLevel) -> NaiveDate {
    match zoom {
        ZoomLevel::Day => add_days(date, 1),
        ZoomLevel::Week => add_days(date, 7),
        ZoomLevel::Month => next_month_start(date).unwrap_or(NaiveDate::MAX),
        ZoomLevel::Year => NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
            .unwrap_or(add_days(date, 366)),
    }
}

/// First day of the month after `date`, `None` in the calendar's last month.
pub(crate) fn next_month_start(date: NaiveDate) -> Option<NaiveDate> {
    let (y, m) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)
}

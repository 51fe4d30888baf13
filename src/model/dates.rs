use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::phase::Phase;

/// `date` moved by `days`, saturating at the ends of the calendar.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    let limit = if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX };
    Duration::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .unwrap_or(limit)
}

/// A closed calendar-date interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Number of days from `start` to `end`.
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    pub fn shifted(&self, days: i64) -> Self {
        Self {
            start: add_days(self.start, days),
            end: add_days(self.end, days),
        }
    }
}

/// The dates a phase is drawn with.
///
/// A phase under an active gesture is drawn from its preview, everything else
/// from what the store last confirmed. Resolving through this type keeps the
/// two from being mixed up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseDates {
    Committed {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
    PreviewOverride(DateRange),
}

impl PhaseDates {
    pub fn committed(phase: &Phase) -> Self {
        PhaseDates::Committed {
            start: phase.start_date,
            end: phase.end_date,
        }
    }

    pub fn start(&self) -> Option<NaiveDate> {
        match self {
            PhaseDates::Committed { start, .. } => *start,
            PhaseDates::PreviewOverride(range) => Some(range.start),
        }
    }

    pub fn end(&self) -> Option<NaiveDate> {
        match self {
            PhaseDates::Committed { end, .. } => *end,
            PhaseDates::PreviewOverride(range) => Some(range.end),
        }
    }

    pub fn is_preview(&self) -> bool {
        matches!(self, PhaseDates::PreviewOverride(_))
    }
}

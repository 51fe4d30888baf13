use chrono::NaiveDate;

use super::axis::{date_to_offset, TimelineWindow};

/// Source of the current date.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Reads the local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// X offset of the today marker, or `None` when today lies outside the window.
pub fn today_offset(today: NaiveDate, window: &TimelineWindow, pixels_per_day: f32) -> Option<f32> {
    let offset = date_to_offset(today, window, pixels_per_day);
    if offset < 0.0 || offset > window.width(pixels_per_day) {
        None
    } else {
        Some(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn visible_inside_window_including_edges() {
        let window = TimelineWindow::new(d(2024, 3, 1), d(2024, 3, 31));
        assert_eq!(today_offset(d(2024, 3, 1), &window, 4.0), Some(0.0));
        assert_eq!(today_offset(d(2024, 3, 16), &window, 4.0), Some(60.0));
        assert_eq!(today_offset(d(2024, 3, 31), &window, 4.0), Some(120.0));
    }

    #[test]
    fn hidden_outside_window() {
        let window = TimelineWindow::new(d(2024, 3, 1), d(2024, 3, 31));
        assert_eq!(today_offset(d(2024, 2, 29), &window, 4.0), None);
        assert_eq!(today_offset(d(2024, 4, 1), &window, 4.0), None);
    }

    #[test]
    fn fixed_clock_is_fixed() {
        let clock = FixedClock(d(2024, 1, 2));
        assert_eq!(clock.today(), clock.today());
        assert_eq!(clock.today(), d(2024, 1, 2));
    }
}

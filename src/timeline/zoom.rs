use serde::{Deserialize, Serialize};

/// Discrete timeline scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoomLevel {
    Day,
    Week,
    #[default]
    Month,
    Year,
}

impl ZoomLevel {
    pub fn all() -> &'static [ZoomLevel] {
        &[ZoomLevel::Day, ZoomLevel::Week, ZoomLevel::Month, ZoomLevel::Year]
    }

    pub fn label(self) -> &'static str {
        match self {
            ZoomLevel::Day => "Day",
            ZoomLevel::Week => "Week",
            ZoomLevel::Month => "Month",
            ZoomLevel::Year => "Year",
        }
    }

    /// Horizontal scale. Coarser levels get fewer pixels per day.
    pub fn pixels_per_day(self) -> f32 {
        match self {
            ZoomLevel::Day => 40.0,
            ZoomLevel::Week => 14.0,
            ZoomLevel::Month => 4.0,
            ZoomLevel::Year => 0.75,
        }
    }

    /// Days added before the earliest and after the latest phase date.
    pub fn padding_days(self) -> i64 {
        match self {
            ZoomLevel::Day => 3,
            ZoomLevel::Week => 7,
            ZoomLevel::Month => 14,
            ZoomLevel::Year => 60,
        }
    }

    /// Half-width of the window shown when no phase has a date.
    pub fn default_half_span_days(self) -> i64 {
        match self {
            ZoomLevel::Day => 14,
            ZoomLevel::Week => 42,
            ZoomLevel::Month => 120,
            ZoomLevel::Year => 540,
        }
    }

    /// Next finer level, if any.
    pub fn finer(self) -> Option<ZoomLevel> {
        match self {
            ZoomLevel::Day => None,
            ZoomLevel::Week => Some(ZoomLevel::Day),
            ZoomLevel::Month => Some(ZoomLevel::Week),
            ZoomLevel::Year => Some(ZoomLevel::Month),
        }
    }

    /// Next coarser level, if any.
    pub fn coarser(self) -> Option<ZoomLevel> {
        match self {
            ZoomLevel::Day => Some(ZoomLevel::Week),
            ZoomLevel::Week => Some(ZoomLevel::Month),
            ZoomLevel::Month => Some(ZoomLevel::Year),
            ZoomLevel::Year => None,
        }
    }
}

/// Holds the active zoom level.
///
/// Every setter reports whether the level actually changed; callers rebuild
/// the whole layout (bounds and positions) when it did, since padding and
/// snapping differ per level.
#[derive(Debug, Clone, Default)]
pub struct ZoomController {
    level: ZoomLevel,
}

impl ZoomController {
    pub fn new(level: ZoomLevel) -> Self {
        Self { level }
    }

    pub fn level(&self) -> ZoomLevel {
        self.level
    }

    pub fn pixels_per_day(&self) -> f32 {
        self.level.pixels_per_day()
    }

    pub fn set_level(&mut self, level: ZoomLevel) -> bool {
        if self.level == level {
            return false;
        }
        log::debug!("zoom {:?} -> {:?}", self.level, level);
        self.level = level;
        true
    }

    /// Step to the next finer level.
    pub fn zoom_in(&mut self) -> bool {
        match self.level.finer() {
            Some(level) => self.set_level(level),
            None => false,
        }
    }

    /// Step to the next coarser level.
    pub fn zoom_out(&mut self) -> bool {
        match self.level.coarser() {
            Some(level) => self.set_level(level),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coarser_levels_are_smaller_and_padded_more() {
        for pair in ZoomLevel::all().windows(2) {
            let (fine, coarse) = (pair[0], pair[1]);
            assert!(coarse.pixels_per_day() < fine.pixels_per_day());
            assert!(coarse.padding_days() > fine.padding_days());
            assert!(coarse.default_half_span_days() > fine.default_half_span_days());
        }
    }

    #[test]
    fn stepping_stops_at_the_ends() {
        let mut zoom = ZoomController::new(ZoomLevel::Week);
        assert!(zoom.zoom_in());
        assert_eq!(zoom.level(), ZoomLevel::Day);
        assert!(!zoom.zoom_in());

        let mut zoom = ZoomController::new(ZoomLevel::Month);
        assert!(zoom.zoom_out());
        assert!(!zoom.zoom_out());
        assert_eq!(zoom.level(), ZoomLevel::Year);
    }

    #[test]
    fn setting_same_level_is_not_a_change() {
        let mut zoom = ZoomController::default();
        assert_eq!(zoom.level(), ZoomLevel::Month);
        assert!(!zoom.set_level(ZoomLevel::Month));
        assert!(zoom.set_level(ZoomLevel::Day));
        assert_eq!(zoom.pixels_per_day(), 40.0);
    }
}

use chrono::NaiveDate;

use super::axis::{ticks, AxisTick, TimelineWindow};
use super::bounds::timeline_bounds;
use super::connector::{connectors, Connector};
use super::drag::DragController;
use super::position::{phase_positions, PhasePosition};
use super::today::today_offset;
use super::zoom::ZoomLevel;
use crate::model::{Dependency, Phase};

/// Everything needed to paint one frame of the timeline.
#[derive(Debug, Clone)]
pub struct GanttLayout {
    pub zoom: ZoomLevel,
    pub pixels_per_day: f32,
    pub window: TimelineWindow,
    pub ticks: Vec<AxisTick>,
    /// One entry per phase, in row order.
    pub positions: Vec<PhasePosition>,
    pub connectors: Vec<Connector>,
    pub today_x: Option<f32>,
}

impl GanttLayout {
    /// Full recompute: window, then bars, then connectors and the today marker.
    ///
    /// `phases` must already be in row order. The window is taken from stored
    /// dates only, so it stays put while a bar is being dragged.
    pub fn compute(
        phases: &[Phase],
        dependencies: &[Dependency],
        zoom: ZoomLevel,
        drag: &DragController,
        today: NaiveDate,
        row_pitch: f32,
    ) -> Self {
        let pixels_per_day = zoom.pixels_per_day();
        let window = timeline_bounds(phases, zoom, today);
        let positions = phase_positions(phases, &window, pixels_per_day, |p| drag.dates_for(p));
        let connectors = connectors(dependencies, &positions, row_pitch);
        Self {
            zoom,
            pixels_per_day,
            ticks: ticks(&window, zoom),
            today_x: today_offset(today, &window, pixels_per_day),
            window,
            positions,
            connectors,
        }
    }

    pub fn total_width(&self) -> f32 {
        self.window.width(self.pixels_per_day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::drag::Gesture;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn zoom_change_rescales_everything() {
        let a = Phase::new("a", 0).with_dates(Some(d(2024, 3, 1)), Some(d(2024, 3, 31)));
        let drag = DragController::new();
        let month = GanttLayout::compute(
            &[a.clone()],
            &[],
            ZoomLevel::Month,
            &drag,
            d(2024, 3, 5),
            32.0,
        );
        let day = GanttLayout::compute(
            &[a],
            &[],
            ZoomLevel::Day,
            &drag,
            d(2024, 3, 5),
            32.0,
        );
        assert!(day.positions[0].width > month.positions[0].width);
        assert!(day.total_width() > month.total_width());
    }

    #[test]
    fn window_does_not_follow_the_preview() {
        let a = Phase::new("a", 0).with_dates(Some(d(2024, 3, 1)), Some(d(2024, 3, 10)));
        let mut drag = DragController::new();
        let still = GanttLayout::compute(
            &[a.clone()],
            &[],
            ZoomLevel::Week,
            &drag,
            d(2024, 3, 5),
            32.0,
        );
        drag.pointer_down(&a, Gesture::Move, 0.0);
        drag.pointer_move(14.0 * 60.0, 14.0);
        let dragged = GanttLayout::compute(
            &[a.clone()],
            &[],
            ZoomLevel::Week,
            &drag,
            d(2024, 3, 5),
            32.0,
        );
        assert_eq!(still.window, dragged.window);
        assert!(dragged.positions[0].is_preview);
        assert_eq!(dragged.positions[0].left, still.positions[0].left + 60.0 * 14.0);
    }
}

//! Timeline layout engine: date/pixel mapping, window bounds, bar placement,
//! dependency connectors, drag gestures and the today marker.

pub mod axis;
pub mod bounds;
pub mod connector;
pub mod drag;
pub mod layout;
pub mod position;
pub mod today;
pub mod zoom;

pub use axis::{date_to_offset, offset_to_date, AxisTick, TimelineWindow};
pub use bounds::timeline_bounds;
pub use connector::{connectors, Connector};
pub use drag::{DateCommit, DragController, DragSession, DragState, Gesture};
pub use layout::GanttLayout;
pub use position::{phase_positions, resolve_dates, PhasePosition, Resolution};
pub use today::{today_offset, Clock, FixedClock, SystemClock};
pub use zoom::{ZoomController, ZoomLevel};

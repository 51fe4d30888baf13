//! Phase timeline: a Gantt view of project phases with drag-to-reschedule.

pub mod app;
pub mod config;
pub mod error;
pub mod io;
pub mod model;
pub mod store;
pub mod timeline;
pub mod ui;

pub use error::{Result, TimelineError};

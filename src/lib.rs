//! Timesheet PDF Library
//!
//! This library renders a timesheet document (header, one row per calendar
//! day with time-range blocks, a legend, and a signature box) as a
//! single-page A4 PDF artifact.

pub mod helpers;
pub mod models;
pub mod service;

pub use service::{TimesheetConfig, TimesheetService};

// Re-export key types for convenience
pub use helpers::layout::{LayoutConfig, LegendEntry, LEGEND};
pub use helpers::page::{Align, DrawCommand, Page};
pub use helpers::render::render_timesheet;
pub use models::timesheet::{DayEntry, TimeOfDay, TimeRange, TimesheetDocument};

//! Timeline construction engine
//!
//! Calendar dates, the canonical usage record, and the pure transformations
//! that turn a collection of records into a day-by-day occupancy grid.

pub mod calendar;
pub mod date;
pub mod raster;
pub mod record;
pub mod sort;
pub mod span;
pub mod timeline;

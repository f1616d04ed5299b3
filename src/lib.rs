//! # Bikeshare - US Bikeshare Trip Explorer
//!
//! Loads the published trip records of Chicago, New York City and Washington,
//! narrows them by month and weekday, and reports the popular travel times,
//! stations, trip durations and user demographics.
//!
//! ## Quick Start
//!
//! ```no_run
//! use bikeshare::explorer::{City, FilterCriteria, MonthFilter, ReportOptions, WeekdayFilter};
//! use bikeshare::explorer::{load_trips, report_all};
//! use std::path::Path;
//!
//! # fn example() -> bikeshare::error::Result<()> {
//! let criteria = FilterCriteria::new(
//!     City::NewYorkCity,
//!     MonthFilter::only(3).expect("March is in range"),
//!     WeekdayFilter::ALL,
//! );
//! let trips = load_trips(Path::new("data"), criteria)?;
//! if !trips.is_empty() {
//!     report_all(&mut std::io::stdout(), &trips, ReportOptions::default())?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Modules
//!
//! - [`explorer`]: Loading, filtering, statistics and the interactive session
//! - [`config`]: JSON settings file
//! - [`error`]: Error types and handling utilities
//! - [`logging`]: Rotating file logs via `tracing`
//!
//! ## Lazy Evaluation
//!
//! Loading builds a Polars `LazyFrame` plan (CSV scan, timestamp parsing,
//! derived calendar columns) that runs once per session cycle. Statistics
//! are group-by queries over the resulting `DataFrame`.

#![warn(clippy::all, rust_2018_idioms)]

pub mod config;
pub mod error;
pub mod explorer;
pub mod logging;

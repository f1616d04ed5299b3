//! Filtering and reporting over bikeshare trip records.
//!
//! - [`types`]: city codes, filters, lookup tables and [`TripDataset`]
//! - [`validation`]: pure checks for operator input
//! - [`io`]: CSV loading, derived calendar columns and filtering
//! - [`stats`]: aggregate computations
//! - [`report`]: printed reports
//! - [`prompt`], [`raw`], [`session`]: the interactive console

pub mod io;
pub mod prompt;
pub mod raw;
pub mod report;
pub mod session;
pub mod stats;
pub mod types;
pub mod validation;

pub use io::{apply_filters, dataset_path, load_trips, scan_trips};
pub use prompt::{Console, select_filters};
pub use report::{ReportOptions, report_all};
pub use session::{SessionOptions, SessionState, run_cycle, run_session};
pub use stats::{
    BirthYearStats, DurationStats, Share, StationStats, TemporalStats, UserStats,
    compute_duration_stats, compute_station_stats, compute_time_stats, compute_user_stats,
};
pub use types::{City, FilterCriteria, MonthFilter, TripDataset, WeekdayFilter};

#[cfg(test)]
mod tests;

//! Filter → load → report cycles until the operator declines to restart.

use super::io::load_trips;
use super::prompt::{Console, select_filters};
use super::raw::page_raw_data;
use super::report::{ReportOptions, report_all};
use super::types::{FilterCriteria, TripDataset};
use crate::error::Result;
use std::io::{BufRead, Write};
use std::path::PathBuf;

pub const RESTART_PROMPT: &str =
    "\nWould you like to restart? Please enter y,Y (for yes) or n,N (for no).\n";
pub const NO_MATCHES: &str = "No trips match the selected filters.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Stopped,
}

impl SessionState {
    /// Transition taken on the answer to the restart question.
    pub fn after_restart_answer(restart: bool) -> Self {
        if restart { Self::Running } else { Self::Stopped }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    pub data_dir: PathBuf,
    pub report: ReportOptions,
    /// Page size for the raw data pager; `None` leaves the pager off.
    pub raw_page_size: Option<usize>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            report: ReportOptions::default(),
            raw_page_size: None,
        }
    }
}

/// Loads the trips for `criteria` and prints every report, or a notice when
/// nothing matched. Returns the dataset that was reported on.
///
/// # Errors
///
/// Propagates data errors from loading or computing statistics.
pub fn run_cycle<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    options: &SessionOptions,
    criteria: FilterCriteria,
) -> Result<TripDataset> {
    let data = load_trips(&options.data_dir, criteria)?;

    if let Some(page_size) = options.raw_page_size {
        page_raw_data(console, data.frame(), page_size)?;
    }

    if data.is_empty() {
        tracing::info!("No trips for {criteria}, skipping reports");
        writeln!(console.output(), "\n{NO_MATCHES}")?;
    } else {
        report_all(console.output(), &data, options.report)?;
    }
    Ok(data)
}

/// Runs cycles starting in [`SessionState::Running`] until the operator
/// answers no to the restart question.
///
/// # Errors
///
/// Data errors end the session. Closed input ends it with
/// [`crate::error::BikeshareError::Aborted`].
pub fn run_session<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    options: &SessionOptions,
) -> Result<()> {
    let mut state = SessionState::Running;
    let mut cycles = 0_usize;
    tracing::info!("Session started with data from {}", options.data_dir.display());

    while state == SessionState::Running {
        let criteria = select_filters(console)?;
        run_cycle(console, options, criteria)?;
        cycles += 1;

        state = SessionState::after_restart_answer(console.confirm(RESTART_PROMPT)?);
    }

    tracing::info!("Session stopped after {cycles} cycle(s)");
    Ok(())
}

//! Printed reports, one per statistic category.
//!
//! Each `report_*` function prints a heading, computes its statistics with
//! [`super::stats`], prints the result lines and closes with the elapsed time
//! and a separator. They only read the dataset.

use super::stats::{
    DurationStats, StationStats, TemporalStats, UserStats, compute_duration_stats,
    compute_station_stats, compute_time_stats, compute_user_stats,
};
use super::types::{TripDataset, month_name, weekday_name};
use crate::error::Result;
use std::io::Write;
use std::time::Instant;

pub const SEPARATOR: &str = "----------------------------------------";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Print "This took N seconds." after each report.
    pub show_timing: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self { show_timing: true }
    }
}

fn finish<W: Write + ?Sized>(
    out: &mut W,
    name: &str,
    start: Instant,
    options: ReportOptions,
) -> Result<()> {
    let elapsed = start.elapsed();
    tracing::debug!("{name} report took {elapsed:?}");
    if options.show_timing {
        writeln!(out, "\nThis took {} seconds.", elapsed.as_secs_f64())?;
    }
    writeln!(out, "{SEPARATOR}")?;
    Ok(())
}

pub fn write_time_stats<W: Write + ?Sized>(out: &mut W, stats: &TemporalStats) -> Result<()> {
    writeln!(
        out,
        "Most travels ({:.1}%) were in the month {}",
        stats.month.percent(),
        month_name(stats.month.value)
    )?;
    writeln!(
        out,
        "Most travels ({:.1}%) were on the weekday {}",
        stats.weekday.percent(),
        weekday_name(stats.weekday.value)
    )?;
    let hour = stats.hour.value;
    writeln!(
        out,
        "Most travels ({:.1}%) started in the hour from {hour}:00h to {hour}:59h",
        stats.hour.percent()
    )?;
    Ok(())
}

pub fn write_station_stats<W: Write + ?Sized>(out: &mut W, stats: &StationStats) -> Result<()> {
    writeln!(
        out,
        "Most travels ({:.2}%) started from {}",
        stats.start.percent(),
        stats.start.value
    )?;
    writeln!(
        out,
        "Most travels ({:.2}%) ended at {}",
        stats.end.percent(),
        stats.end.value
    )?;
    let (from, to) = &stats.trip.value;
    writeln!(
        out,
        "Most travels ({:.2}%) are from {from} to {to}",
        stats.trip.percent()
    )?;
    Ok(())
}

pub fn write_duration_stats<W: Write + ?Sized>(out: &mut W, stats: &DurationStats) -> Result<()> {
    writeln!(out, "Total travel time in seconds is {:.1}", stats.total_seconds)?;
    writeln!(out, "Mean travel time in seconds is {:.1}", stats.mean_seconds)?;
    Ok(())
}

pub fn write_user_stats<W: Write + ?Sized>(out: &mut W, stats: &UserStats) -> Result<()> {
    for (user_type, count) in &stats.user_types {
        writeln!(out, "Bikeshare was used by {count} {user_type} Users")?;
    }

    if let Some(genders) = &stats.genders {
        for (gender, count) in genders {
            writeln!(out, "Bikeshare was used by {count} {gender} Users")?;
        }
    }

    if let Some(years) = &stats.birth_years {
        writeln!(out, "The oldest bikeshare user is born in {}", years.earliest)?;
        writeln!(out, "The youngest bikeshare user is born in {}", years.latest)?;
        writeln!(
            out,
            "The most common year of birth of bikeshare users is {}",
            years.most_common
        )?;
    }
    Ok(())
}

/// Popular month, weekday and start hour.
pub fn report_time_stats<W: Write + ?Sized>(
    out: &mut W,
    data: &TripDataset,
    options: ReportOptions,
) -> Result<()> {
    writeln!(out, "\nCalculating The Most Frequent Times of Travel...\n")?;
    let start = Instant::now();
    write_time_stats(out, &compute_time_stats(data)?)?;
    finish(out, "time", start, options)
}

/// Popular start station, end station and trip.
pub fn report_station_stats<W: Write + ?Sized>(
    out: &mut W,
    data: &TripDataset,
    options: ReportOptions,
) -> Result<()> {
    writeln!(out, "\nCalculating The Most Popular Stations and Trip...\n")?;
    let start = Instant::now();
    write_station_stats(out, &compute_station_stats(data)?)?;
    finish(out, "station", start, options)
}

pub fn report_trip_duration_stats<W: Write + ?Sized>(
    out: &mut W,
    data: &TripDataset,
    options: ReportOptions,
) -> Result<()> {
    writeln!(out, "\nCalculating Trip Duration...\n")?;
    let start = Instant::now();
    write_duration_stats(out, &compute_duration_stats(data)?)?;
    finish(out, "duration", start, options)
}

pub fn report_user_stats<W: Write + ?Sized>(
    out: &mut W,
    data: &TripDataset,
    options: ReportOptions,
) -> Result<()> {
    writeln!(out, "\nCalculating User Stats...\n")?;
    let start = Instant::now();
    write_user_stats(out, &compute_user_stats(data)?)?;
    finish(out, "user", start, options)
}

/// Runs the four reports in their fixed order. The dataset must not be empty.
pub fn report_all<W: Write + ?Sized>(
    out: &mut W,
    data: &TripDataset,
    options: ReportOptions,
) -> Result<()> {
    report_time_stats(out, data, options)?;
    report_station_stats(out, data, options)?;
    report_trip_duration_stats(out, data, options)?;
    report_user_stats(out, data, options)
}

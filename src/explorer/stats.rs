//! Aggregate statistics over a filtered trip dataset.
//!
//! Every "most frequent" figure comes from a polars group-by sorted by count
//! (descending) and then by the key columns (ascending), so ties always
//! resolve to the smallest key. Missing values never win a most-frequent
//! statistic, but they are counted under [`UNKNOWN_LABEL`] in category
//! breakdowns so the breakdown adds up to the number of trips.

use super::types::{
    BIRTH_YEAR, DAY_OF_WEEK, END_STATION, GENDER, HOUR, MONTH, START_STATION, START_TIME,
    TRIP_DURATION, TripDataset, UNKNOWN_LABEL, USER_TYPE,
};
use crate::error::{BikeshareError, Result};
use polars::prelude::*;

const COUNT: &str = "count";

/// The most frequent value of some field and how many trips it covers.
#[derive(Debug, Clone, PartialEq)]
pub struct Share<T> {
    pub value: T,
    pub count: usize,
    pub total: usize,
}

impl<T> Share<T> {
    /// Share of all trips, 0-100.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.count as f64 / self.total as f64 * 100.0
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemporalStats {
    pub month: Share<u32>,
    pub weekday: Share<u32>,
    pub hour: Share<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StationStats {
    pub start: Share<String>,
    pub end: Share<String>,
    pub trip: Share<(String, String)>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationStats {
    pub total_seconds: f64,
    pub mean_seconds: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthYearStats {
    pub earliest: i64,
    pub latest: i64,
    pub most_common: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserStats {
    pub user_types: Vec<(String, usize)>,
    /// `None` when the city publishes no gender column.
    pub genders: Option<Vec<(String, usize)>>,
    /// `None` when the city publishes no birth years, or all are missing.
    pub birth_years: Option<BirthYearStats>,
}

/// Group-by count over `keys`, highest count first, ties by ascending key.
fn frequency_table(df: &DataFrame, keys: &[&str], drop_nulls: bool) -> Result<DataFrame> {
    let key_exprs: Vec<Expr> = keys.iter().map(|k| col(*k)).collect();

    let mut lf = df.clone().lazy().select(key_exprs.clone());
    if drop_nulls {
        for key in keys {
            lf = lf.filter(col(*key).is_not_null());
        }
    }

    let mut sort_by = vec![col(COUNT)];
    sort_by.extend(key_exprs.iter().cloned());
    let mut descending = vec![true];
    descending.extend(std::iter::repeat_n(false, keys.len()));

    lf.group_by(key_exprs)
        .agg([len().alias(COUNT)])
        .sort_by_exprs(
            sort_by,
            SortMultipleOptions::default()
                .with_order_descending_multi(descending)
                .with_nulls_last(true),
        )
        .collect()
        .map_err(|e| {
            BikeshareError::DataProcessing(format!("Failed to count {}: {e}", keys.join(", ")))
        })
}

fn count_at(table: &DataFrame, row: usize) -> Result<usize> {
    Ok(table.column(COUNT)?.get(row)?.try_extract::<usize>()?)
}

fn text_at(table: &DataFrame, name: &str, row: usize) -> Result<Option<String>> {
    let value = table.column(name)?.get(row)?;
    Ok(match value {
        AnyValue::Null => None,
        other => Some(
            other
                .get_str()
                .map(str::to_owned)
                .unwrap_or_else(|| other.to_string()),
        ),
    })
}

fn u32_at(table: &DataFrame, name: &str, row: usize) -> Result<u32> {
    Ok(table.column(name)?.get(row)?.try_extract::<u32>()?)
}

fn empty_dataset(what: &str) -> BikeshareError {
    BikeshareError::DataProcessing(format!("no trips to compute the most frequent {what}"))
}

fn most_frequent_u32(df: &DataFrame, name: &str, total: usize) -> Result<Share<u32>> {
    let table = frequency_table(df, &[name], true)?;
    if table.height() == 0 {
        return Err(empty_dataset(name));
    }
    Ok(Share {
        value: u32_at(&table, name, 0)?,
        count: count_at(&table, 0)?,
        total,
    })
}

fn most_frequent_text(df: &DataFrame, name: &str, total: usize) -> Result<Share<String>> {
    let table = frequency_table(df, &[name], true)?;
    let value = match table.height() {
        0 => None,
        _ => text_at(&table, name, 0)?,
    };
    let value = value.ok_or_else(|| empty_dataset(name))?;
    Ok(Share {
        value,
        count: count_at(&table, 0)?,
        total,
    })
}

fn most_frequent_pair(
    df: &DataFrame,
    first: &str,
    second: &str,
    total: usize,
) -> Result<Share<(String, String)>> {
    let table = frequency_table(df, &[first, second], true)?;
    if table.height() == 0 {
        return Err(empty_dataset("trip"));
    }
    let (Some(from), Some(to)) = (text_at(&table, first, 0)?, text_at(&table, second, 0)?) else {
        return Err(empty_dataset("trip"));
    };
    Ok(Share {
        value: (from, to),
        count: count_at(&table, 0)?,
        total,
    })
}

/// Counts per distinct value, missing values labelled [`UNKNOWN_LABEL`].
pub fn category_counts(df: &DataFrame, name: &str) -> Result<Vec<(String, usize)>> {
    let table = frequency_table(df, &[name], false)?;
    (0..table.height())
        .map(|row| {
            let label = text_at(&table, name, row)?.unwrap_or_else(|| UNKNOWN_LABEL.to_owned());
            Ok((label, count_at(&table, row)?))
        })
        .collect()
}

/// Most frequent month, weekday and start hour.
///
/// # Errors
///
/// Fails on an empty dataset.
pub fn compute_time_stats(data: &TripDataset) -> Result<TemporalStats> {
    let df = data.frame();
    let total = data.len();

    let hours = df
        .clone()
        .lazy()
        .select([col(START_TIME).dt().hour().cast(DataType::UInt32).alias(HOUR)])
        .collect()?;

    Ok(TemporalStats {
        month: most_frequent_u32(df, MONTH, total)?,
        weekday: most_frequent_u32(df, DAY_OF_WEEK, total)?,
        hour: most_frequent_u32(&hours, HOUR, total)?,
    })
}

/// Most frequent start station, end station and station pair.
///
/// # Errors
///
/// Fails on an empty dataset or when a station column is missing.
pub fn compute_station_stats(data: &TripDataset) -> Result<StationStats> {
    let df = data.frame();
    let total = data.len();

    Ok(StationStats {
        start: most_frequent_text(df, START_STATION, total)?,
        end: most_frequent_text(df, END_STATION, total)?,
        trip: most_frequent_pair(df, START_STATION, END_STATION, total)?,
    })
}

/// Total and mean trip duration in seconds.
///
/// # Errors
///
/// Fails when `Trip Duration` is missing, not numeric, or entirely empty.
pub fn compute_duration_stats(data: &TripDataset) -> Result<DurationStats> {
    let series = data
        .frame()
        .column(TRIP_DURATION)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    let ca = series.f64()?;

    let mean_seconds = ca
        .mean()
        .ok_or_else(|| BikeshareError::DataProcessing("no trip durations to average".to_owned()))?;

    Ok(DurationStats {
        total_seconds: ca.sum().unwrap_or(0.0),
        mean_seconds,
    })
}

fn compute_birth_years(df: &DataFrame) -> Result<Option<BirthYearStats>> {
    let years = df
        .column(BIRTH_YEAR)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    let ca = years.f64()?;

    let (Some(earliest), Some(latest)) = (ca.min(), ca.max()) else {
        return Ok(None);
    };

    let frame = DataFrame::new(vec![years.clone().into_column()])?;
    let table = frequency_table(&frame, &[BIRTH_YEAR], true)?;
    let most_common = table.column(BIRTH_YEAR)?.get(0)?.try_extract::<f64>()?;

    Ok(Some(BirthYearStats {
        earliest: earliest.trunc() as i64,
        latest: latest.trunc() as i64,
        most_common: most_common.trunc() as i64,
    }))
}

/// User type breakdown, plus gender and birth year figures where the city
/// publishes them.
///
/// # Errors
///
/// Fails when `User Type` is missing.
pub fn compute_user_stats(data: &TripDataset) -> Result<UserStats> {
    let df = data.frame();

    let genders = if data.has_gender() {
        Some(category_counts(df, GENDER)?)
    } else {
        None
    };

    let birth_years = if data.has_birth_year() {
        compute_birth_years(df)?
    } else {
        None
    };

    Ok(UserStats {
        user_types: category_counts(df, USER_TYPE)?,
        genders,
        birth_years,
    })
}

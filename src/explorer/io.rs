use super::types::{
    City, DAY_OF_WEEK, FilterCriteria, MONTH, MonthFilter, START_TIME, TripDataset, WeekdayFilter,
};
use crate::error::{BikeshareError, Result, ResultExt as _};
use polars::prelude::*;
use std::path::{Path, PathBuf};

pub fn dataset_path(data_dir: &Path, city: City) -> PathBuf {
    data_dir.join(city.file_name())
}

/// Scans a city CSV and attaches the derived `month` and `day_of_week` columns.
///
/// `Start Time` is parsed while reading when polars recognises the format;
/// otherwise it is strictly cast, so a single malformed timestamp fails the
/// load instead of silently becoming null.
pub fn scan_trips(path: &Path) -> Result<LazyFrame> {
    if !path.is_file() {
        return Err(BikeshareError::InvalidPath(format!(
            "dataset not found: {}",
            path.display()
        )));
    }

    let mut lf = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(10000))
        .with_has_header(true)
        .with_try_parse_dates(true)
        .finish()
        .with_context(|| format!("Failed to scan CSV {}", path.display()))?;

    let schema = lf.collect_schema()?;
    let Some(start_dtype) = schema.get(START_TIME) else {
        return Err(BikeshareError::MissingColumn(START_TIME.to_owned()));
    };

    if !matches!(start_dtype, DataType::Datetime(_, _)) {
        tracing::debug!(
            "'{START_TIME}' read as {start_dtype}, casting to datetime in {}",
            path.display()
        );
        lf = lf.with_column(
            col(START_TIME).strict_cast(DataType::Datetime(TimeUnit::Milliseconds, None)),
        );
    }

    Ok(lf.with_columns([
        col(START_TIME)
            .dt()
            .month()
            .cast(DataType::UInt32)
            .alias(MONTH),
        // ISO weekday is 1 = Monday; shift to 0 = Monday.
        (col(START_TIME).dt().weekday() - lit(1))
            .cast(DataType::UInt32)
            .alias(DAY_OF_WEEK),
    ]))
}

/// Keeps the rows matching both filters. An unset filter keeps every row on
/// that axis.
pub fn apply_filters(
    df: DataFrame,
    month: MonthFilter,
    weekday: WeekdayFilter,
) -> Result<DataFrame> {
    let mut lf = df.lazy();
    if let Some(m) = month.month() {
        lf = lf.filter(col(MONTH).eq(lit(m)));
    }
    if let Some(d) = weekday.day() {
        lf = lf.filter(col(DAY_OF_WEEK).eq(lit(d)));
    }
    lf.collect()
        .map_err(|e| BikeshareError::DataProcessing(format!("Failed to filter trips: {e}")))
}

/// Loads the city's trips from `data_dir` and narrows them to `criteria`.
///
/// # Errors
///
/// Fails when the CSV is missing or unreadable, when `Start Time` is absent,
/// or when a timestamp cannot be parsed.
pub fn load_trips(data_dir: &Path, criteria: FilterCriteria) -> Result<TripDataset> {
    let path = dataset_path(data_dir, criteria.city);
    let start = std::time::Instant::now();

    let df = scan_trips(&path)?
        .collect()
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let unfiltered_rows = df.height();

    let df = apply_filters(df, criteria.month, criteria.weekday)?;

    tracing::info!(
        "Loaded {} of {} trips from {} for {criteria} in {:?}",
        df.height(),
        unfiltered_rows,
        path.display(),
        start.elapsed()
    );

    Ok(TripDataset::new(criteria, df, unfiltered_rows))
}

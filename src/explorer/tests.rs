#![expect(clippy::unwrap_used, clippy::indexing_slicing)]
use super::stats::category_counts;
use super::types::{BIRTH_YEAR, END_STATION, GENDER, MONTH, START_STATION, TRIP_DURATION, USER_TYPE};
use super::*;
use anyhow::Result;
use polars::prelude::*;
use std::io::Write as _;

const TRIPS: &str = "\
Start Time,End Time,Trip Duration,Start Station,End Station,User Type
2017-03-06 08:00:00,2017-03-06 08:10:00,600,A,B,Subscriber
2017-03-13 09:00:00,2017-03-13 09:05:00,300,A,C,Customer
2017-04-04 10:00:00,2017-04-04 10:20:00,1200,B,A,Subscriber
2017-06-04 18:30:00,2017-06-04 18:31:00,60,C,A,Subscriber
";

fn load_sample() -> Result<TripDataset> {
    let dir = tempfile::tempdir()?;
    let mut file = std::fs::File::create(dataset_path(dir.path(), City::Chicago))?;
    file.write_all(TRIPS.as_bytes())?;
    drop(file);
    Ok(load_trips(dir.path(), FilterCriteria::unfiltered(City::Chicago))?)
}

fn dataset(df: DataFrame) -> TripDataset {
    let rows = df.height();
    TripDataset::new(FilterCriteria::unfiltered(City::NewYorkCity), df, rows)
}

#[test]
fn test_time_stats_from_loaded_trips() -> Result<()> {
    let data = load_sample()?;
    let stats = compute_time_stats(&data)?;

    assert_eq!(stats.month.value, 3);
    assert_eq!(stats.month.count, 2);
    assert!((stats.month.percent() - 50.0).abs() < f64::EPSILON);

    assert_eq!(stats.weekday.value, 0, "two Monday trips");
    assert_eq!(stats.weekday.count, 2);

    // Every hour occurs once: the earliest wins the tie.
    assert_eq!(stats.hour.value, 8);
    assert_eq!(stats.hour.count, 1);
    Ok(())
}

#[test]
fn test_month_counts_sum_to_row_count() -> Result<()> {
    let data = load_sample()?;
    let counts = category_counts(data.frame(), MONTH)?;
    let total: usize = counts.iter().map(|(_, c)| c).sum();
    assert_eq!(total, data.len());
    assert_eq!(counts[0], ("3".to_owned(), 2));
    Ok(())
}

#[test]
fn test_station_ties_pick_smallest_name() -> Result<()> {
    let data = load_sample()?;
    let stats = compute_station_stats(&data)?;

    assert_eq!(stats.start.value, "A");
    assert_eq!(stats.start.count, 2);
    assert_eq!(stats.end.value, "A");
    // All pairs are distinct.
    assert_eq!(stats.trip.value, ("A".to_owned(), "B".to_owned()));
    assert_eq!(stats.trip.count, 1);
    Ok(())
}

#[test]
fn test_most_frequent_station_pair() -> Result<()> {
    let df = df!(
        START_STATION => &["Canal St", "Lake Shore", "Canal St", "Canal St"],
        END_STATION => &["Clark St", "Canal St", "Clark St", "Lake Shore"]
    )?;
    let stats = compute_station_stats(&dataset(df))?;

    assert_eq!(stats.start.value, "Canal St");
    assert!((stats.start.percent() - 75.0).abs() < f64::EPSILON);
    assert_eq!(stats.end.value, "Clark St");
    assert_eq!(
        stats.trip.value,
        ("Canal St".to_owned(), "Clark St".to_owned())
    );
    assert!((stats.trip.percent() - 50.0).abs() < f64::EPSILON);
    Ok(())
}

#[test]
fn test_percentages_within_bounds() -> Result<()> {
    let data = load_sample()?;
    let time = compute_time_stats(&data)?;
    let stations = compute_station_stats(&data)?;

    for pct in [
        time.month.percent(),
        time.weekday.percent(),
        time.hour.percent(),
        stations.start.percent(),
        stations.end.percent(),
        stations.trip.percent(),
    ] {
        assert!((0.0..=100.0).contains(&pct), "{pct} out of range");
    }
    Ok(())
}

#[test]
fn test_duration_totals() -> Result<()> {
    let data = load_sample()?;
    let stats = compute_duration_stats(&data)?;
    assert!((stats.total_seconds - 2160.0).abs() < 1e-9);
    assert!((stats.mean_seconds - 540.0).abs() < 1e-9);
    Ok(())
}

#[test]
fn test_user_types_include_unknown() -> Result<()> {
    let df = df!(
        USER_TYPE => &[Some("Subscriber"), None, Some("Customer"), Some("Subscriber")]
    )?;
    let data = dataset(df);
    let stats = compute_user_stats(&data)?;

    assert_eq!(
        stats.user_types,
        vec![
            ("Subscriber".to_owned(), 2),
            ("Customer".to_owned(), 1),
            ("Unknown".to_owned(), 1),
        ]
    );
    let total: usize = stats.user_types.iter().map(|(_, c)| c).sum();
    assert_eq!(total, data.len());
    assert!(stats.genders.is_none());
    assert!(stats.birth_years.is_none());
    Ok(())
}

#[test]
fn test_gender_and_birth_years() -> Result<()> {
    let df = df!(
        USER_TYPE => &["Subscriber", "Subscriber", "Customer", "Subscriber"],
        GENDER => &[Some("Male"), Some("Female"), None, Some("Male")],
        BIRTH_YEAR => &[Some(1980.0), None, Some(1992.0), Some(1980.0)]
    )?;
    let data = dataset(df);
    assert!(data.has_gender());
    assert!(data.has_birth_year());

    let stats = compute_user_stats(&data)?;
    let genders = stats.genders.unwrap();
    assert_eq!(genders[0], ("Male".to_owned(), 2));
    assert_eq!(genders.iter().map(|(_, c)| c).sum::<usize>(), 4);

    assert_eq!(
        stats.birth_years,
        Some(BirthYearStats {
            earliest: 1980,
            latest: 1992,
            most_common: 1980,
        })
    );
    Ok(())
}

#[test]
fn test_birth_year_tie_picks_earliest() -> Result<()> {
    let df = df!(
        USER_TYPE => &["Subscriber", "Subscriber"],
        BIRTH_YEAR => &[1995_i64, 1971]
    )?;
    let stats = compute_user_stats(&dataset(df))?;
    assert_eq!(stats.birth_years.map(|b| b.most_common), Some(1971));
    Ok(())
}

#[test]
fn test_all_missing_birth_years_are_skipped() -> Result<()> {
    let df = df!(
        USER_TYPE => &["Customer", "Customer"],
        BIRTH_YEAR => &[None::<f64>, None]
    )?;
    let stats = compute_user_stats(&dataset(df))?;
    assert!(stats.birth_years.is_none());
    Ok(())
}

#[test]
fn test_empty_dataset_has_no_most_frequent_value() -> Result<()> {
    let df = df!(
        START_STATION => Vec::<String>::new(),
        END_STATION => Vec::<String>::new(),
        TRIP_DURATION => Vec::<f64>::new()
    )?;
    let data = dataset(df);
    assert!(data.is_empty());
    assert!(compute_station_stats(&data).is_err());
    assert!(compute_duration_stats(&data).is_err());
    Ok(())
}

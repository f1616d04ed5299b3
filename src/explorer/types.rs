use polars::prelude::DataFrame;
use std::fmt;

pub const START_TIME: &str = "Start Time";
pub const START_STATION: &str = "Start Station";
pub const END_STATION: &str = "End Station";
pub const TRIP_DURATION: &str = "Trip Duration";
pub const USER_TYPE: &str = "User Type";
pub const GENDER: &str = "Gender";
pub const BIRTH_YEAR: &str = "Birth Year";

/// Derived at load time, 1-12.
pub const MONTH: &str = "month";
/// Derived at load time, 0 = Monday .. 6 = Sunday.
pub const DAY_OF_WEEK: &str = "day_of_week";
/// Derived by the temporal report, 0-23.
pub const HOUR: &str = "hour";

/// Indexed by month number; slot 0 is never used.
pub const MONTH_NAMES: [&str; 13] = [
    "",
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Label used for missing categorical values in user breakdowns.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Months covered by the published datasets.
pub const MAX_MONTH: u32 = 6;

pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES
        .get(month as usize)
        .copied()
        .filter(|name| !name.is_empty())
        .unwrap_or("?")
}

pub fn weekday_name(day: u32) -> &'static str {
    WEEKDAY_NAMES.get(day as usize).copied().unwrap_or("?")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    pub const ALL: [Self; 3] = [Self::Chicago, Self::NewYorkCity, Self::Washington];

    pub fn code(self) -> char {
        match self {
            Self::Chicago => 'c',
            Self::NewYorkCity => 'n',
            Self::Washington => 'w',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|city| city.code() == code.to_ascii_lowercase())
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Self::Chicago => "chicago.csv",
            Self::NewYorkCity => "new_york_city.csv",
            Self::Washington => "washington.csv",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Chicago => "chicago",
            Self::NewYorkCity => "new york city",
            Self::Washington => "washington",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Month filter: `None` keeps every month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonthFilter(Option<u32>);

impl MonthFilter {
    pub const ALL: Self = Self(None);

    /// Returns `None` unless `month` is in 1..=6.
    pub fn only(month: u32) -> Option<Self> {
        (1..=MAX_MONTH).contains(&month).then_some(Self(Some(month)))
    }

    pub fn month(self) -> Option<u32> {
        self.0
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(m) => f.write_str(month_name(m)),
            None => f.write_str("all months"),
        }
    }
}

/// Weekday filter, 0 = Monday: `None` keeps every day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WeekdayFilter(Option<u32>);

impl WeekdayFilter {
    pub const ALL: Self = Self(None);

    /// Returns `None` unless `day` is in 0..=6.
    pub fn only(day: u32) -> Option<Self> {
        (day < 7).then_some(Self(Some(day)))
    }

    pub fn day(self) -> Option<u32> {
        self.0
    }
}

impl fmt::Display for WeekdayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(d) => f.write_str(weekday_name(d)),
            None => f.write_str("all days"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterCriteria {
    pub city: City,
    pub month: MonthFilter,
    pub weekday: WeekdayFilter,
}

impl FilterCriteria {
    pub fn new(city: City, month: MonthFilter, weekday: WeekdayFilter) -> Self {
        Self {
            city,
            month,
            weekday,
        }
    }

    pub fn unfiltered(city: City) -> Self {
        Self::new(city, MonthFilter::ALL, WeekdayFilter::ALL)
    }
}

impl fmt::Display for FilterCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.city, self.month, self.weekday)
    }
}

/// Trip records of one city after filtering, with derived calendar columns.
///
/// The optional demographic columns differ between cities, so reporters ask
/// [`TripDataset::has_gender`] and [`TripDataset::has_birth_year`] instead of
/// probing the frame themselves.
#[derive(Debug, Clone)]
pub struct TripDataset {
    criteria: FilterCriteria,
    df: DataFrame,
    unfiltered_rows: usize,
}

impl TripDataset {
    pub fn new(criteria: FilterCriteria, df: DataFrame, unfiltered_rows: usize) -> Self {
        Self {
            criteria,
            df,
            unfiltered_rows,
        }
    }

    pub fn criteria(&self) -> FilterCriteria {
        self.criteria
    }

    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    pub fn len(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// Row count of the city file before the month and weekday filters.
    pub fn unfiltered_len(&self) -> usize {
        self.unfiltered_rows
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.df.schema().contains(name)
    }

    pub fn has_gender(&self) -> bool {
        self.has_column(GENDER)
    }

    pub fn has_birth_year(&self) -> bool {
        self.has_column(BIRTH_YEAR)
    }
}

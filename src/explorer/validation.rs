//! Pure checks for operator input.
//!
//! Nothing here touches the console: each parser turns a raw line into a
//! typed value or an [`InputError`] whose `Display` is the corrective message
//! shown before re-prompting.

use super::types::{City, MonthFilter, WeekdayFilter};
use std::fmt;

/// Entered at the month and weekday prompts to disable that filter.
pub const NO_FILTER: i64 = -1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    UnknownCity,
    NotANumber,
    MonthOutOfRange(i64),
    WeekdayOutOfRange(i64),
    NotYesOrNo,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCity => {
                write!(f, "The character that you entered is not valid. Please try again.")
            }
            Self::NotANumber => {
                write!(f, "The string that you entered is not a number. Please try again.")
            }
            Self::MonthOutOfRange(_) => write!(
                f,
                "The number that you entered is not a valid month, i.e. 1,2,..,6 or -1. Please try again."
            ),
            Self::WeekdayOutOfRange(_) => write!(
                f,
                "The number that you entered is not a valid day, i.e. 0,1,2,..,6 or -1. Please try again."
            ),
            Self::NotYesOrNo => {
                write!(f, "Your input is invalid. Please enter only 'y' or 'n'.")
            }
        }
    }
}

impl std::error::Error for InputError {}

pub fn parse_city(input: &str) -> Result<City, InputError> {
    let mut chars = input.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(code), None) => City::from_code(code).ok_or(InputError::UnknownCity),
        _ => Err(InputError::UnknownCity),
    }
}

/// Parses an integer answer. Integers too wide for `i64` saturate, so they
/// are reported as out of range rather than as non-numbers.
fn parse_number(input: &str) -> Result<i64, InputError> {
    let text = input.trim();
    text.parse::<i64>().or_else(|_| {
        let digits = text.strip_prefix(['-', '+']).unwrap_or(text);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InputError::NotANumber);
        }
        Ok(if text.starts_with('-') { i64::MIN } else { i64::MAX })
    })
}

pub fn parse_month(input: &str) -> Result<MonthFilter, InputError> {
    let value = parse_number(input)?;
    if value == NO_FILTER {
        return Ok(MonthFilter::ALL);
    }
    u32::try_from(value)
        .ok()
        .and_then(MonthFilter::only)
        .ok_or(InputError::MonthOutOfRange(value))
}

pub fn parse_weekday(input: &str) -> Result<WeekdayFilter, InputError> {
    let value = parse_number(input)?;
    if value == NO_FILTER {
        return Ok(WeekdayFilter::ALL);
    }
    u32::try_from(value)
        .ok()
        .and_then(WeekdayFilter::only)
        .ok_or(InputError::WeekdayOutOfRange(value))
}

/// Accepts `y`/`Y` and `n`/`N` only.
pub fn parse_yes_no(input: &str) -> Result<bool, InputError> {
    match input.trim() {
        "y" | "Y" => Ok(true),
        "n" | "N" => Ok(false),
        _ => Err(InputError::NotYesOrNo),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_codes_are_case_insensitive() {
        assert_eq!(parse_city("c"), Ok(City::Chicago));
        assert_eq!(parse_city("N"), Ok(City::NewYorkCity));
        assert_eq!(parse_city(" w \n"), Ok(City::Washington));
    }

    #[test]
    fn test_unknown_city_rejected() {
        assert_eq!(parse_city("x"), Err(InputError::UnknownCity));
        assert_eq!(parse_city(""), Err(InputError::UnknownCity));
        assert_eq!(parse_city("chicago"), Err(InputError::UnknownCity));
    }

    #[test]
    fn test_month_parsing() {
        assert_eq!(parse_month("-1"), Ok(MonthFilter::ALL));
        assert_eq!(parse_month("3").map(MonthFilter::month), Ok(Some(3)));
        assert_eq!(parse_month(" 6 ").map(MonthFilter::month), Ok(Some(6)));
        assert_eq!(parse_month("abc"), Err(InputError::NotANumber));
        assert_eq!(parse_month("2.5"), Err(InputError::NotANumber));
        assert_eq!(parse_month("0"), Err(InputError::MonthOutOfRange(0)));
        assert_eq!(parse_month("7"), Err(InputError::MonthOutOfRange(7)));
        assert_eq!(parse_month("-2"), Err(InputError::MonthOutOfRange(-2)));
    }

    #[test]
    fn test_weekday_parsing() {
        assert_eq!(parse_weekday("-1"), Ok(WeekdayFilter::ALL));
        assert_eq!(parse_weekday("0").map(WeekdayFilter::day), Ok(Some(0)));
        assert_eq!(parse_weekday("6").map(WeekdayFilter::day), Ok(Some(6)));
        assert_eq!(parse_weekday("7"), Err(InputError::WeekdayOutOfRange(7)));
        assert_eq!(parse_weekday("mon"), Err(InputError::NotANumber));
    }

    #[test]
    fn test_oversized_integers_are_out_of_range() {
        assert_eq!(
            parse_month("99999999999999999999"),
            Err(InputError::MonthOutOfRange(i64::MAX))
        );
        assert_eq!(
            parse_weekday(" -99999999999999999999 "),
            Err(InputError::WeekdayOutOfRange(i64::MIN))
        );
        assert_eq!(parse_month("+4").map(MonthFilter::month), Ok(Some(4)));
        assert_eq!(parse_month("-"), Err(InputError::NotANumber));
        assert_eq!(parse_month("12a45678901234567890"), Err(InputError::NotANumber));
    }

    #[test]
    fn test_yes_no() {
        assert_eq!(parse_yes_no("Y"), Ok(true));
        assert_eq!(parse_yes_no("n\n"), Ok(false));
        assert_eq!(parse_yes_no("yes"), Err(InputError::NotYesOrNo));
    }

    #[test]
    fn test_messages_match_prompts() {
        assert!(InputError::NotANumber.to_string().contains("not a number"));
        assert!(
            InputError::MonthOutOfRange(9)
                .to_string()
                .contains("not a valid month")
        );
    }
}

//! Console prompting. The only code in the explorer that reads operator input.

use super::report::SEPARATOR;
use super::types::FilterCriteria;
use super::validation::{InputError, parse_city, parse_month, parse_weekday, parse_yes_no};
use crate::error::{BikeshareError, Result};
use std::io::{BufRead, Write};

pub const WELCOME: &str = "Hello! Let's explore some US bikeshare data!";
pub const CITY_PROMPT: &str = "Enter the name of the city to analyze (feasible entries are: c,C=chicago, n,N=new york city, w,W=washington): ";
pub const MONTH_PROMPT: &str = "Enter the (number of the) month to analyze (feasible entries are: 1=Jan, 2=Feb, 3=Mar, 4=Apr, 5=May, 6=Jun, -1=all): ";
pub const WEEKDAY_PROMPT: &str = "Enter the (number of the) weekday to analyze (feasible entries are: 0=Mon, 1=Tue, 2=Wed, 3=Thu, 4=Fri, 5=Sat, 6=Sun, -1=all): ";

/// Line-oriented console over any reader and writer, so sessions can be
/// driven from a buffer in tests.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Prints `prompt` and reads one line.
    ///
    /// # Errors
    ///
    /// Returns [`BikeshareError::Aborted`] when input has ended.
    pub fn read_answer(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            tracing::info!("Input closed while prompting");
            return Err(BikeshareError::Aborted);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_owned())
    }

    /// Asks until `parse` accepts the answer, printing its correction after
    /// every rejected line.
    pub fn ask<T>(
        &mut self,
        prompt: &str,
        parse: impl Fn(&str) -> std::result::Result<T, InputError>,
    ) -> Result<T> {
        loop {
            let answer = self.read_answer(prompt)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(err) => {
                    tracing::debug!("Rejected input {answer:?}: {err:?}");
                    writeln!(self.output, "{err}")?;
                }
            }
        }
    }

    /// Asks a y/n question, repeating the same prompt without comment until
    /// the answer is one of `y`, `Y`, `n`, `N`.
    pub fn confirm(&mut self, prompt: &str) -> Result<bool> {
        loop {
            if let Ok(answer) = parse_yes_no(&self.read_answer(prompt)?) {
                return Ok(answer);
            }
        }
    }
}

/// Collects a validated city, month and weekday from the operator.
pub fn select_filters<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<FilterCriteria> {
    writeln!(console.output(), "{WELCOME}")?;

    let city = console.ask(CITY_PROMPT, parse_city)?;
    let month = console.ask(MONTH_PROMPT, parse_month)?;
    let weekday = console.ask(WEEKDAY_PROMPT, parse_weekday)?;

    writeln!(console.output(), "{SEPARATOR}")?;

    let criteria = FilterCriteria::new(city, month, weekday);
    tracing::info!("Selected {criteria}");
    Ok(criteria)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explorer::types::{City, MonthFilter, WeekdayFilter};
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_select_filters_happy_path() -> anyhow::Result<()> {
        let mut console = console("C\n3\n-1\n");
        let criteria = select_filters(&mut console)?;

        assert_eq!(criteria.city, City::Chicago);
        assert_eq!(criteria.month, MonthFilter::only(3).expect("valid month"));
        assert_eq!(criteria.weekday, WeekdayFilter::ALL);
        Ok(())
    }

    #[test]
    fn test_select_filters_reprompts_on_bad_input() -> anyhow::Result<()> {
        let mut console = console("x\nn\nabc\n9\n-1\n7\n4\n");
        let criteria = select_filters(&mut console)?;
        assert_eq!(criteria.city, City::NewYorkCity);
        assert_eq!(criteria.month, MonthFilter::ALL);
        assert_eq!(criteria.weekday.day(), Some(4));

        let text = String::from_utf8(console.into_output())?;
        assert_eq!(text.matches(CITY_PROMPT).count(), 2);
        assert_eq!(text.matches(MONTH_PROMPT).count(), 3);
        assert_eq!(text.matches(WEEKDAY_PROMPT).count(), 2);
        assert!(text.contains(&InputError::UnknownCity.to_string()));
        assert!(text.contains(&InputError::NotANumber.to_string()));
        assert!(text.contains(&InputError::MonthOutOfRange(9).to_string()));
        assert!(text.contains(&InputError::WeekdayOutOfRange(7).to_string()));
        Ok(())
    }

    #[test]
    fn test_end_of_input_aborts() {
        let mut console = console("c\nabc\n");
        let err = select_filters(&mut console).expect_err("input ends mid-prompt");
        assert!(err.is_aborted());
    }

    #[test]
    fn test_confirm_repeats_silently() -> anyhow::Result<()> {
        let mut console = console("maybe\nyes\nN\n");
        assert!(!console.confirm("Again? ")?);

        let text = String::from_utf8(console.into_output())?;
        assert_eq!(text, "Again? Again? Again? ");
        Ok(())
    }

    #[test]
    fn test_windows_line_endings() -> anyhow::Result<()> {
        let mut console = console("w\r\n-1\r\n0\r\n");
        let criteria = select_filters(&mut console)?;
        assert_eq!(criteria.city, City::Washington);
        assert_eq!(criteria.weekday.day(), Some(0));
        Ok(())
    }
}

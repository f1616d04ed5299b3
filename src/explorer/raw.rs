//! Paged display of the filtered rows.

use super::prompt::Console;
use super::validation::parse_yes_no;
use crate::error::Result;
use polars::prelude::{CsvWriter, DataFrame, SerWriter as _};
use std::io::{BufRead, Write};

pub const DEFAULT_PAGE_SIZE: usize = 5;

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn page_prompt(first: bool, page_size: usize) -> String {
    let which = if first { "first" } else { "next" };
    format!(
        "\nWould you like to see the {which} {page_size} lines of raw data? Please enter y,Y (for yes) or n,N (for no)\n"
    )
}

/// Writes every column of `page` as CSV with a header line.
fn write_page<W: Write>(out: &mut W, page: &mut DataFrame) -> Result<()> {
    writeln!(out)?;
    CsvWriter::new(&mut *out)
        .include_header(true)
        .with_datetime_format(Some(DATETIME_FORMAT.to_owned()))
        .finish(page)?;
    writeln!(out)?;
    Ok(())
}

/// Shows `df` `page_size` rows at a time while the operator answers yes.
///
/// An answer other than y/n is met with the correction alone as the next
/// prompt. Returns the number of rows shown. Stops on its own once every row
/// has been displayed, so an empty frame asks nothing.
pub fn page_raw_data<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    df: &DataFrame,
    page_size: usize,
) -> Result<usize> {
    let page_size = page_size.max(1);
    let mut shown = 0;
    let mut prompt = page_prompt(true, page_size);

    while shown < df.height() {
        match parse_yes_no(&console.read_answer(&prompt)?) {
            Ok(false) => break,
            Ok(true) => {
                let offset = i64::try_from(shown).unwrap_or(i64::MAX);
                let mut page = df.slice(offset, page_size);
                write_page(console.output(), &mut page)?;
                shown += page.height();
                prompt = page_prompt(false, page_size);
            }
            Err(err) => prompt = format!("\n{err}\n"),
        }
    }

    tracing::debug!("Displayed {shown} raw rows");
    Ok(shown)
}

use anyhow::{Context as _, Result};
use bikeshare::config::{
    AppSettings, get_config_path, load_app_config, load_app_config_from, save_app_config,
    save_app_config_to,
};
use bikeshare::explorer::validation::{parse_city, parse_month, parse_weekday};
use bikeshare::explorer::{Console, FilterCriteria, run_cycle, run_session};
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "bikeshare",
    about = "Explore US bikeshare trip data interactively",
    allow_negative_numbers = true
)]
pub struct Cli {
    /// Directory containing chicago.csv, new_york_city.csv and washington.csv
    #[arg(long, env = "BIKESHARE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Settings file. Defaults to bikeshare/config.json in the user config directory.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Offer to page through the raw rows after loading
    #[arg(long)]
    pub raw: bool,

    /// Write the effective settings (file plus flags) back to the settings file
    #[arg(long)]
    pub save_config: bool,

    /// City code for a single non-interactive run (c, n or w)
    #[arg(long, requires_all = ["month", "day"])]
    pub city: Option<String>,

    /// Month for a single run: 1-6, or -1 for all months
    #[arg(long, requires = "city")]
    pub month: Option<String>,

    /// Weekday for a single run: 0 (Monday) to 6, or -1 for all days
    #[arg(long, requires = "city")]
    pub day: Option<String>,
}

impl Cli {
    fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(get_config_path)
    }

    /// File settings with command line overrides applied.
    pub fn settings(&self) -> AppSettings {
        let mut settings = match &self.config {
            Some(path) => load_app_config_from(path),
            None => load_app_config(),
        };
        if let Some(dir) = &self.data_dir {
            settings.data_dir = dir.to_string_lossy().into_owned();
        }
        if self.raw {
            settings.show_raw_data = true;
        }
        settings
    }

    /// Criteria for one-shot mode, validated like interactive answers.
    pub fn one_shot_criteria(&self) -> Result<Option<FilterCriteria>> {
        let (Some(city), Some(month), Some(day)) = (&self.city, &self.month, &self.day) else {
            return Ok(None);
        };
        let city = parse_city(city).context("Invalid --city")?;
        let month = parse_month(month).context("Invalid --month")?;
        let day = parse_weekday(day).context("Invalid --day")?;
        Ok(Some(FilterCriteria::new(city, month, day)))
    }
}

/// Runs one cycle for the criteria given on the command line, or an
/// interactive session otherwise.
pub fn run<R: BufRead, W: Write>(cli: &Cli, console: &mut Console<R, W>) -> Result<()> {
    let settings = cli.settings();
    if cli.save_config {
        let path = cli.config_path();
        match &cli.config {
            Some(file) => save_app_config_to(&settings, file),
            None => save_app_config(&settings),
        }
        .with_context(|| format!("Failed to save settings to {}", path.display()))?;
        tracing::info!("Saved settings to {}", path.display());
    }
    let options = settings.session_options();

    let outcome = match cli.one_shot_criteria()? {
        Some(criteria) => {
            tracing::info!("One-shot run for {criteria}");
            run_cycle(console, &options, criteria).map(drop)
        }
        None => run_session(console, &options),
    };

    match outcome {
        Err(e) if e.is_aborted() => {
            writeln!(console.output())?;
            Ok(())
        }
        other => other.map_err(Into::into),
    }
}

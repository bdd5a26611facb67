//! Command implementations for the CVD CLI.
//!
//! Every subcommand loads the table through the same cached loader and the
//! same view builders as the web dashboard, then prints a text rendering.

use chrono::NaiveDate;
use clap::Subcommand;
use cvd_data::cache::DatasetCache;
use cvd_data::controls::{ControlEvent, ControlState};
use cvd_db::Database;
use cvd_utils::dates::parse_date;
use log::info;

pub mod report;
pub mod snapshot;
pub mod source;

use source::DataSource;

#[derive(Subcommand)]
pub enum Command {
    /// Download the OWID dataset and save the columns the dashboard uses
    Snapshot {
        /// Output path; gzip-compressed when it ends in `.gz`
        #[arg(short = 'o', long)]
        output: String,
    },

    /// Print the worldwide counters at the latest date
    Summary {
        /// Local CSV or .csv.gz snapshot instead of the remote dataset
        #[arg(short = 's', long)]
        source: Option<String>,
    },

    /// Print the smoothed death-rate series of the selected countries
    Series {
        #[arg(short = 's', long)]
        source: Option<String>,

        /// Country to include (repeatable); defaults apply when none is given
        #[arg(short = 'c', long = "country")]
        countries: Vec<String>,
    },

    /// Print the vaccination map for one date
    Map {
        #[arg(short = 's', long)]
        source: Option<String>,

        /// Date as YYYY-MM-DD, clamped into the observed range
        #[arg(short = 'd', long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
}

/// Load the cleaned table and the first-render control state.
async fn load(source: Option<String>) -> anyhow::Result<(Database, ControlState)> {
    let cache = DatasetCache::new(DataSource::from_arg(source));
    let dataset = cache.load().await?;
    let db = Database::from_dataset(&dataset)?;
    let controls = ControlState::initial(db.query_locations()?, db.query_date_range()?);
    info!(
        "Loaded {} rows, {} locations",
        db.query_row_count()?,
        controls.options().len()
    );
    Ok((db, controls))
}

/// Execute `command` and return the text it prints.
pub async fn render(command: Command) -> anyhow::Result<String> {
    match command {
        Command::Snapshot { output } => {
            let rows = snapshot::run_snapshot(&DataSource::from_arg(None), &output).await?;
            Ok(format!("Wrote {} rows to {}\n", rows, output))
        }
        Command::Summary { source } => {
            let (db, _) = load(source).await?;
            Ok(report::render_summary(&db.summary_view()?))
        }
        Command::Series { source, countries } => {
            let (db, mut controls) = load(source).await?;
            if !countries.is_empty() {
                controls = controls.apply(ControlEvent::SetCountries(countries));
            }
            let view = db.time_series_view(controls.selected_countries())?;
            Ok(report::render_series(&view))
        }
        Command::Map { source, date } => {
            let (db, mut controls) = load(source).await?;
            if let Some(date) = date {
                controls = controls.apply(ControlEvent::SelectDate(date));
            }
            Ok(report::render_map(&db.map_view(controls.selected_date())?))
        }
    }
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    print!("{}", render(command).await?);
    Ok(())
}

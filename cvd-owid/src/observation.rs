use crate::error::{OwidError, Result};
use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};
use cvd_utils::dates::DATE_FORMAT;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Location of the public OWID COVID-19 dataset.
pub const OWID_CSV_URL: &str =
    "https://raw.githubusercontent.com/owid/covid-19-data/master/public/data/owid-covid-data.csv";

/// Columns the pipeline reads. The published file carries many more; those are ignored.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "iso_code",
    "location",
    "date",
    "total_cases",
    "total_deaths",
    "new_deaths",
    "population",
    "people_fully_vaccinated_per_hundred",
];

/// One CSV row as it appears on the wire, before date parsing.
///
/// Numeric cells that are empty or not numbers become `None`.
#[derive(Debug, Deserialize)]
struct CsvRow {
    iso_code: String,
    location: String,
    date: String,
    #[serde(deserialize_with = "csv::invalid_option")]
    total_cases: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    total_deaths: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    new_deaths: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    population: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    people_fully_vaccinated_per_hundred: Option<f64>,
}

/// A (location, date) row of the OWID table as published.
///
/// `date` is `None` when the cell does not parse as `YYYY-MM-DD`; such rows
/// are carried along but never take part in date-based computations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawObservation {
    pub iso_code: String,
    pub location: String,
    pub date: Option<NaiveDate>,
    pub total_cases: Option<f64>,
    pub total_deaths: Option<f64>,
    pub new_deaths: Option<f64>,
    pub population: Option<f64>,
    pub people_fully_vaccinated_per_hundred: Option<f64>,
}

/// A row of the cleaned working table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub iso_code: String,
    pub location: String,
    pub date: Option<NaiveDate>,
    pub total_cases: Option<f64>,
    pub total_deaths: Option<f64>,
    pub new_deaths: Option<f64>,
    pub population: Option<f64>,
    /// Percentage of the population fully vaccinated; missing values are stored as 0.
    pub people_fully_vaccinated_per_hundred: f64,
    /// 7-sample trailing mean of `new_deaths` per million inhabitants.
    pub new_deaths_smoothed_per_million: Option<f64>,
}

impl From<CsvRow> for RawObservation {
    fn from(row: CsvRow) -> Self {
        let date = NaiveDate::parse_from_str(row.date.trim(), DATE_FORMAT).ok();
        RawObservation {
            iso_code: row.iso_code,
            location: row.location,
            date,
            total_cases: row.total_cases,
            total_deaths: row.total_deaths,
            new_deaths: row.new_deaths,
            population: row.population,
            people_fully_vaccinated_per_hundred: row.people_fully_vaccinated_per_hundred,
        }
    }
}

impl RawObservation {
    /// Parse the OWID CSV text into raw rows.
    ///
    /// Fails if a required column is absent from the header or a row is
    /// structurally malformed. Unparseable dates are not errors.
    pub fn parse_owid_csv(csv_body: &str) -> Result<Vec<RawObservation>> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(csv_body.as_bytes());

        let headers = rdr.headers()?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h.trim() == column) {
                return Err(OwidError::MissingColumn(column.to_string()));
            }
        }

        let mut rows = Vec::new();
        let mut undated = 0usize;
        for result in rdr.deserialize::<CsvRow>() {
            let row: RawObservation = result?.into();
            if row.date.is_none() {
                undated += 1;
            }
            rows.push(row);
        }
        if undated > 0 {
            warn!("{} rows have an unparseable date", undated);
        }
        info!("Parsed {} OWID rows", rows.len());
        Ok(rows)
    }

    /// Write rows as a CSV holding only [`REQUIRED_COLUMNS`], readable again
    /// by [`RawObservation::parse_owid_csv`].
    pub fn write_trimmed_csv<W: Write>(rows: &[RawObservation], writer: W) -> Result<()> {
        let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
        wtr.write_record(REQUIRED_COLUMNS)?;
        for row in rows {
            let date = row
                .date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default();
            wtr.write_record([
                row.iso_code.clone(),
                row.location.clone(),
                date,
                format_cell(row.total_cases),
                format_cell(row.total_deaths),
                format_cell(row.new_deaths),
                format_cell(row.population),
                format_cell(row.people_fully_vaccinated_per_hundred),
            ])?;
        }
        wtr.flush().map_err(|e| OwidError::CsvParse(e.into()))?;
        Ok(())
    }
}

fn format_cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod test {
    use super::{RawObservation, REQUIRED_COLUMNS};
    use crate::error::OwidError;
    use chrono::NaiveDate;

    // Trimmed excerpt of owid-covid-data.csv (extra columns kept to check they are ignored)
    const STR_RESULT: &str = r#"iso_code,continent,location,date,total_cases,new_cases,total_deaths,new_deaths,people_fully_vaccinated_per_hundred,population
DEU,Europe,Germany,2022-06-30,28129540.0,112000.0,140292.0,98.0,76.1,83369840.0
DEU,Europe,Germany,2022-07-01,28234567.0,105027.0,140380.0,88.0,,83369840.0
OWID_WRL,,World,2022-07-01,548000000.0,700000.0,6330000.0,1500.0,60.1,7975105024.0
FRA,Europe,France,07/01/2022,31000000.0,,150000.0,,78.0,67813000.0
"#;

    #[test]
    fn test_parse_owid_csv() {
        let rows = RawObservation::parse_owid_csv(STR_RESULT).unwrap();
        assert_eq!(rows.len(), 4);

        let first = &rows[0];
        assert_eq!(first.iso_code, "DEU");
        assert_eq!(first.location, "Germany");
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2022, 6, 30));
        assert_eq!(first.total_cases, Some(28129540.0));
        assert_eq!(first.new_deaths, Some(98.0));
        assert_eq!(first.people_fully_vaccinated_per_hundred, Some(76.1));
        assert_eq!(first.population, Some(83369840.0));

        // empty vaccination cell stays missing at this stage
        assert_eq!(rows[1].people_fully_vaccinated_per_hundred, None);
    }

    #[test]
    fn test_unparseable_date_is_kept_as_missing() {
        let rows = RawObservation::parse_owid_csv(STR_RESULT).unwrap();
        let france = rows.iter().find(|r| r.location == "France").unwrap();
        assert_eq!(france.date, None);
        assert_eq!(france.new_deaths, None);
        assert_eq!(france.total_deaths, Some(150000.0));
    }

    #[test]
    fn test_non_numeric_cell_is_missing() {
        let csv = "\
iso_code,location,date,total_cases,total_deaths,new_deaths,population,people_fully_vaccinated_per_hundred
ITA,Italy,2021-03-01,n/a,97000,300,59000000,abc
";
        let rows = RawObservation::parse_owid_csv(csv).unwrap();
        assert_eq!(rows[0].total_cases, None);
        assert_eq!(rows[0].people_fully_vaccinated_per_hundred, None);
        assert_eq!(rows[0].new_deaths, Some(300.0));
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let csv = "\
iso_code,location,date,total_cases,total_deaths,population,people_fully_vaccinated_per_hundred
ITA,Italy,2021-03-01,1,2,59000000,3
";
        let err = RawObservation::parse_owid_csv(csv).unwrap_err();
        match err {
            OwidError::MissingColumn(column) => assert_eq!(column, "new_deaths"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_ragged_row_is_fatal() {
        let csv = "\
iso_code,location,date,total_cases,total_deaths,new_deaths,population,people_fully_vaccinated_per_hundred
ITA,Italy,2021-03-01,1,2,3
";
        let err = RawObservation::parse_owid_csv(csv).unwrap_err();
        assert!(matches!(err, OwidError::CsvParse(_)));
        assert!(err.is_parse_failure());
    }

    #[test]
    fn test_trimmed_csv_reloads() {
        let rows = RawObservation::parse_owid_csv(STR_RESULT).unwrap();
        let mut buffer = Vec::new();
        RawObservation::write_trimmed_csv(&rows, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let header = text.lines().next().unwrap();
        assert_eq!(header, REQUIRED_COLUMNS.join(","));
        assert!(!text.contains("continent"));

        let reloaded = RawObservation::parse_owid_csv(&text).unwrap();
        assert_eq!(reloaded, rows);
    }
}

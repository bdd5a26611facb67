//! Typed query methods over the `observations` table.
//!
//! All queries return plain values or structs from [`crate::models`] that can
//! be serialized to JSON for consumption by D3.js chart components.
//!
//! Rows whose date failed to parse are stored with a NULL date. They still
//! count toward [`query_row_count`](Database::query_row_count) and
//! [`query_locations`](Database::query_locations), but every date-based
//! query excludes them.

use crate::models::{LatestTotals, LocationDateValue, VaccinationRegion};
use crate::Database;
use chrono::NaiveDate;
use cvd_data::controls::DateBounds;
use cvd_utils::dates::{format_date, parse_date};
use rusqlite::{params, params_from_iter, OptionalExtension};

impl Database {
    /// Number of rows in the working table.
    pub fn query_row_count(&self) -> anyhow::Result<usize> {
        let conn = self.conn.borrow();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM observations", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Distinct location names, sorted.
    pub fn query_locations(&self) -> anyhow::Result<Vec<String>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare("SELECT DISTINCT location FROM observations ORDER BY location")?;
        let rows = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        log::info!(
            "[CVD] query: query_locations returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    /// Earliest and latest observed dates, or `None` if no row has a date.
    pub fn query_date_range(&self) -> anyhow::Result<Option<DateBounds>> {
        let conn = self.conn.borrow();
        let (min, max): (Option<String>, Option<String>) = conn.query_row(
            "SELECT MIN(date), MAX(date) FROM observations WHERE date IS NOT NULL",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        let bounds = match (min, max) {
            (Some(min), Some(max)) => Some(DateBounds::new(parse_date(&min)?, parse_date(&max)?)),
            _ => None,
        };
        log::info!("[CVD] query: query_date_range returned {:?}", bounds);
        Ok(bounds)
    }

    /// Worldwide cases and deaths summed over the rows at the latest date.
    ///
    /// Missing cells count as zero. With no dated rows the totals are zero
    /// and `date` is `None`.
    pub fn query_latest_totals(&self) -> anyhow::Result<LatestTotals> {
        let conn = self.conn.borrow();
        let latest: Option<String> = conn
            .query_row(
                "SELECT MAX(date) FROM observations WHERE date IS NOT NULL",
                [],
                |row| row.get(0),
            )
            .optional()?
            .flatten();

        let Some(date) = latest else {
            log::info!("[CVD] query: query_latest_totals found no dated rows");
            return Ok(LatestTotals {
                date: None,
                total_cases: 0.0,
                total_deaths: 0.0,
                rows: 0,
            });
        };

        let (total_cases, total_deaths, rows): (f64, f64, i64) = conn.query_row(
            "SELECT TOTAL(total_cases), TOTAL(total_deaths), COUNT(*)
             FROM observations
             WHERE date = ?1",
            params![date],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )?;
        log::info!(
            "[CVD] query: query_latest_totals returned {} records for {}",
            rows,
            date
        );
        Ok(LatestTotals {
            date: Some(date),
            total_cases,
            total_deaths,
            rows: rows as usize,
        })
    }

    /// Smoothed daily deaths per million for the given locations.
    ///
    /// Ordered by location then date; undated rows are skipped. An empty
    /// `locations` slice returns no rows without touching the database.
    pub fn query_death_series(&self, locations: &[String]) -> anyhow::Result<Vec<LocationDateValue>> {
        if locations.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = (1..=locations.len())
            .map(|i| format!("?{}", i))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "SELECT location, date, new_deaths_smoothed_per_million
             FROM observations
             WHERE date IS NOT NULL AND location IN ({})
             ORDER BY location, date",
            placeholders
        );

        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(locations.iter()), |row| {
                Ok(LocationDateValue {
                    location: row.get(0)?,
                    date: row.get(1)?,
                    value: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[CVD] query: query_death_series returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    /// Fully-vaccinated percentage per ISO code on one date.
    ///
    /// When several rows share an ISO code on that date only the first (by
    /// location name) is kept. A date with no rows yields an empty list.
    pub fn query_vaccination_map(&self, date: &NaiveDate) -> anyhow::Result<Vec<VaccinationRegion>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT iso_code, location, people_fully_vaccinated_per_hundred
             FROM observations
             WHERE date = ?1
             ORDER BY iso_code, location",
        )?;
        let mut rows = stmt
            .query_map(params![format_date(date)], |row| {
                Ok(VaccinationRegion {
                    iso_code: row.get(0)?,
                    location: row.get(1)?,
                    value: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        rows.dedup_by(|next, kept| next.iso_code == kept.iso_code);
        log::info!(
            "[CVD] query: query_vaccination_map returned {} records",
            rows.len()
        );
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use crate::Database;
    use chrono::NaiveDate;
    use cvd_data::dataset::Dataset;

    const CSV: &str = "\
iso_code,location,date,total_cases,total_deaths,new_deaths,population,people_fully_vaccinated_per_hundred
DEU,Germany,2022-06-30,28129540,140292,98,83369840,76.1
DEU,Germany,2022-07-01,28234567,140380,88,83369840,
FRA,France,2022-06-30,31000000,150000,40,67813000,78.0
FRA,France,2022-07-01,31100000,150050,,67813000,78.1
OWID_WRL,World,2022-07-01,548000000,6330000,1500,7975105024,60.1
ITA,Italy,not-a-date,1,1,1,59000000,1
";

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn setup_db() -> Database {
        let dataset = Dataset::from_csv(CSV).unwrap();
        Database::from_dataset(&dataset).unwrap()
    }

    #[test]
    fn test_query_row_count_excludes_aggregates() {
        let db = setup_db();
        // World removed; the undated Italy row is kept
        assert_eq!(db.query_row_count().unwrap(), 5);
    }

    #[test]
    fn test_query_locations() {
        let db = setup_db();
        assert_eq!(
            db.query_locations().unwrap(),
            vec!["France".to_string(), "Germany".to_string(), "Italy".to_string()]
        );
    }

    #[test]
    fn test_query_date_range() {
        let db = setup_db();
        let bounds = db.query_date_range().unwrap().unwrap();
        assert_eq!(bounds.min(), date(2022, 6, 30));
        assert_eq!(bounds.max(), date(2022, 7, 1));
    }

    #[test]
    fn test_query_date_range_empty() {
        let db = Database::new().unwrap();
        assert!(db.query_date_range().unwrap().is_none());
    }

    #[test]
    fn test_query_latest_totals() {
        let db = setup_db();
        let totals = db.query_latest_totals().unwrap();
        assert_eq!(totals.date.as_deref(), Some("2022-07-01"));
        assert_eq!(totals.rows, 2);
        assert_eq!(totals.total_cases, 28234567.0 + 31100000.0);
        assert_eq!(totals.total_deaths, 140380.0 + 150050.0);
    }

    #[test]
    fn test_query_latest_totals_treats_missing_as_zero() {
        let csv = "\
iso_code,location,date,total_cases,total_deaths,new_deaths,population,people_fully_vaccinated_per_hundred
AAA,Alpha,2021-01-01,100,,1,1000,
BBB,Beta,2021-01-01,,7,1,1000,
";
        let db = Database::from_dataset(&Dataset::from_csv(csv).unwrap()).unwrap();
        let totals = db.query_latest_totals().unwrap();
        assert_eq!(totals.total_cases, 100.0);
        assert_eq!(totals.total_deaths, 7.0);
    }

    #[test]
    fn test_query_latest_totals_empty_table() {
        let db = Database::new().unwrap();
        let totals = db.query_latest_totals().unwrap();
        assert_eq!(totals.date, None);
        assert_eq!(totals.total_cases, 0.0);
        assert_eq!(totals.total_deaths, 0.0);
    }

    #[test]
    fn test_query_death_series() {
        let db = setup_db();
        let rows = db
            .query_death_series(&["Germany".to_string(), "France".to_string()])
            .unwrap();
        assert_eq!(rows.len(), 4);
        // ordered by location, then date
        assert_eq!(rows[0].location, "France");
        assert_eq!(rows[0].date, "2022-06-30");
        assert_eq!(rows[3].location, "Germany");
        assert_eq!(rows[3].date, "2022-07-01");
        // too few samples for a 7-day mean
        assert!(rows.iter().all(|r| r.value.is_none()));
    }

    #[test]
    fn test_query_death_series_skips_undated_and_unknown() {
        let db = setup_db();
        assert!(db.query_death_series(&["Italy".to_string()]).unwrap().is_empty());
        assert!(db.query_death_series(&["Atlantis".to_string()]).unwrap().is_empty());
        assert!(db.query_death_series(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_query_vaccination_map() {
        let db = setup_db();
        let regions = db.query_vaccination_map(&date(2022, 7, 1)).unwrap();
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].iso_code, "DEU");
        // the empty cell was zero-filled during cleaning
        assert_eq!(regions[0].value, 0.0);
        assert_eq!(regions[1].iso_code, "FRA");
        assert_eq!(regions[1].value, 78.1);
        assert!(regions.iter().all(|r| r.location != "World"));
    }

    #[test]
    fn test_query_vaccination_map_no_rows() {
        let db = setup_db();
        let regions = db.query_vaccination_map(&date(1999, 1, 1)).unwrap();
        assert!(regions.is_empty());
    }

    #[test]
    fn test_query_vaccination_map_one_region_per_code() {
        let csv = "\
iso_code,location,date,total_cases,total_deaths,new_deaths,population,people_fully_vaccinated_per_hundred
XKX,Kosovo,2021-06-01,1,1,1,1000,10
XKX,Kosovo (alt),2021-06-01,1,1,1,1000,20
";
        let db = Database::from_dataset(&Dataset::from_csv(csv).unwrap()).unwrap();
        let regions = db.query_vaccination_map(&date(2021, 6, 1)).unwrap();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].location, "Kosovo");
        assert_eq!(regions[0].value, 10.0);
    }
}

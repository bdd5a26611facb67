//! Populates the in-memory table from cleaned observations.
//!
//! Rows are inserted inside one transaction with a single prepared
//! statement; the full OWID table is a few hundred thousand rows.

use crate::Database;
use cvd_owid::observation::Observation;
use cvd_utils::dates::format_date;
use rusqlite::params;

impl Database {
    /// Insert cleaned observations, keeping their order.
    ///
    /// Dates are stored as `YYYY-MM-DD` text; an undated row stores NULL.
    pub fn load_observations(&self, observations: &[Observation]) -> anyhow::Result<()> {
        let mut conn = self.conn.borrow_mut();
        let tx = conn.transaction()?;
        let mut count = 0u32;
        let mut undated = 0u32;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO observations (
                    location, iso_code, date, total_cases, total_deaths, new_deaths,
                    population, people_fully_vaccinated_per_hundred,
                    new_deaths_smoothed_per_million
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;
            for obs in observations {
                let date = obs.date.as_ref().map(format_date);
                if date.is_none() {
                    undated += 1;
                }
                stmt.execute(params![
                    obs.location,
                    obs.iso_code,
                    date,
                    obs.total_cases,
                    obs.total_deaths,
                    obs.new_deaths,
                    obs.population,
                    obs.people_fully_vaccinated_per_hundred,
                    obs.new_deaths_smoothed_per_million,
                ])?;
                count += 1;
            }
        }
        tx.commit()?;
        log::info!(
            "[CVD] loader: Loaded {} observations ({} without a date)",
            count,
            undated
        );
        Ok(())
    }
}

//! Cleaning and feature engineering applied once per load.
//!
//! Steps, in order:
//! 1. smoothed deaths per million, computed per location over the dated
//!    rows sorted by date,
//! 2. missing vaccination percentages filled with zero,
//! 3. rows whose location is on the non-country denylist removed.

use crate::smoothing::{per_million, rolling_mean, ROLLING_WINDOW};
use cvd_owid::location::is_non_country;
use cvd_owid::observation::{Observation, RawObservation};
use log::info;
use std::collections::HashMap;

/// Compute the smoothed deaths-per-million value for every row.
///
/// Returned vector is parallel to `rows`. Rows with no date get `None` and do
/// not occupy a slot in any location's window.
pub fn smoothed_deaths_per_million(rows: &[RawObservation]) -> Vec<Option<f64>> {
    let mut by_location: HashMap<&str, Vec<usize>> = HashMap::new();
    for (idx, row) in rows.iter().enumerate() {
        if row.date.is_some() {
            by_location.entry(row.location.as_str()).or_default().push(idx);
        }
    }

    let mut smoothed = vec![None; rows.len()];
    for indices in by_location.values_mut() {
        // stable: rows sharing a date keep file order
        indices.sort_by_key(|&idx| rows[idx].date);
        let new_deaths: Vec<Option<f64>> = indices.iter().map(|&idx| rows[idx].new_deaths).collect();
        let means = rolling_mean(&new_deaths, ROLLING_WINDOW);
        for (&idx, mean) in indices.iter().zip(means) {
            smoothed[idx] = per_million(mean, rows[idx].population);
        }
    }
    smoothed
}

/// Run the full cleaning pipeline over the parsed rows.
pub fn clean_observations(rows: Vec<RawObservation>) -> Vec<Observation> {
    let total = rows.len();
    let smoothed = smoothed_deaths_per_million(&rows);

    let cleaned: Vec<Observation> = rows
        .into_iter()
        .zip(smoothed)
        .filter(|(row, _)| !is_non_country(&row.location))
        .map(|(row, new_deaths_smoothed_per_million)| Observation {
            iso_code: row.iso_code,
            location: row.location,
            date: row.date,
            total_cases: row.total_cases,
            total_deaths: row.total_deaths,
            new_deaths: row.new_deaths,
            population: row.population,
            people_fully_vaccinated_per_hundred: row
                .people_fully_vaccinated_per_hundred
                .unwrap_or(0.0),
            new_deaths_smoothed_per_million,
        })
        .collect();

    info!(
        "Cleaned OWID table: {} rows kept, {} aggregate rows removed",
        cleaned.len(),
        total - cleaned.len()
    );
    cleaned
}

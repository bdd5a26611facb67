//! Query result model structs.
//!
//! All structs derive `Serialize` so they can be passed to D3.js as JSON
//! from the Dioxus WASM frontend.

use serde::Serialize;

/// One point of a location's smoothed death-rate series.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LocationDateValue {
    pub location: String,
    /// YYYY-MM-DD
    pub date: String,
    /// Deaths per million, 7-day average; `None` breaks the line.
    pub value: Option<f64>,
}

/// A region of the vaccination choropleth.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VaccinationRegion {
    /// ISO 3166-1 alpha-3 code (OWID aggregates use `OWID_*` codes).
    pub iso_code: String,
    /// Location name, shown on hover.
    pub location: String,
    /// Percentage of the population fully vaccinated.
    pub value: f64,
}

/// Sums over the rows sharing the latest date of the table.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LatestTotals {
    /// The latest date (YYYY-MM-DD), `None` when no row has a date.
    pub date: Option<String>,
    pub total_cases: f64,
    pub total_deaths: f64,
    /// Rows in the latest slice.
    pub rows: usize,
}

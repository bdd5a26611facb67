//! View models for the three dashboard panels.
//!
//! A view is rebuilt from the table plus the relevant part of the control
//! state: the summary depends on nothing, the time series on the selected
//! countries, and the map on the selected date.

use crate::models::{LocationDateValue, VaccinationRegion};
use crate::Database;
use chrono::NaiveDate;
use cvd_data::controls::ControlState;
use cvd_utils::dates::format_date;
use cvd_utils::numbers::format_thousands;
use serde::Serialize;

pub const PAGE_TITLE: &str = "COVID-19 Global Dashboard";
pub const HEADING: &str = "COVID-19 Interactive Global Dashboard";
pub const INTRO: &str =
    "This dashboard provides an interactive way to explore the COVID-19 pandemic data. Use the sidebar to filter data.";
pub const SIDEBAR_HEADER: &str = "Dashboard Controls";
pub const COUNTRY_CONTROL_LABEL: &str = "Select Countries for Time-Series Plot";
pub const DATE_CONTROL_LABEL: &str = "Select Date for World Map";

pub const SUMMARY_HEADING: &str = "Global Overview";
pub const CASES_LABEL: &str = "Total Confirmed Cases (Worldwide)";
pub const DEATHS_LABEL: &str = "Total Deaths (Worldwide)";

pub const TIME_SERIES_HEADING: &str = "Time-Series Analysis of Daily Deaths";
pub const TIME_SERIES_TITLE: &str = "7-Day Average of Daily Deaths per Million People";
pub const TIME_SERIES_X_LABEL: &str = "Date";
pub const TIME_SERIES_Y_LABEL: &str = "Daily Deaths per Million (Smoothed)";
pub const EMPTY_SELECTION_WARNING: &str =
    "Please select at least one country from the sidebar to display the time-series plot.";

pub const MAP_HEADING: &str = "Geospatial Map of Vaccination Rates";
pub const MAP_COLOR_SCALE: &str = "Plasma";
pub const MAP_COLOR_RANGE: [f64; 2] = [0.0, 100.0];

/// Worldwide counters at the most recent date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryView {
    pub date: Option<String>,
    pub total_cases: f64,
    pub total_deaths: f64,
}

impl SummaryView {
    /// Cases as a whole number with thousands separators.
    pub fn cases_display(&self) -> String {
        format_thousands(self.total_cases)
    }

    pub fn deaths_display(&self) -> String {
        format_thousands(self.total_deaths)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub date: String,
    pub value: Option<f64>,
}

/// One line of the time-series chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub location: String,
    pub points: Vec<SeriesPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
}

/// The time-series panel: a chart, or a warning when nothing is selected.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimeSeriesView {
    Warning { message: String },
    Chart(TimeSeriesChart),
}

impl TimeSeriesView {
    pub fn chart(&self) -> Option<&TimeSeriesChart> {
        match self {
            TimeSeriesView::Chart(chart) => Some(chart),
            TimeSeriesView::Warning { .. } => None,
        }
    }
}

/// Choropleth of the fully-vaccinated percentage on one date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub title: String,
    pub date: Option<String>,
    pub color_scale: String,
    pub color_range: [f64; 2],
    pub regions: Vec<VaccinationRegion>,
}

/// All three panels for one control state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub summary: SummaryView,
    pub time_series: TimeSeriesView,
    pub map: MapView,
}

/// Title of the map for `date`.
pub fn map_title(date: Option<&NaiveDate>) -> String {
    match date {
        Some(date) => format!(
            "Percentage of Population Fully Vaccinated as of {}",
            format_date(date)
        ),
        None => "Percentage of Population Fully Vaccinated".to_string(),
    }
}

/// Split location-ordered rows into one series per location.
fn group_series(rows: Vec<LocationDateValue>) -> Vec<Series> {
    let mut series: Vec<Series> = Vec::new();
    for row in rows {
        let point = SeriesPoint {
            date: row.date,
            value: row.value,
        };
        match series.last_mut() {
            Some(last) if last.location == row.location => last.points.push(point),
            _ => series.push(Series {
                location: row.location,
                points: vec![point],
            }),
        }
    }
    series
}

impl Database {
    pub fn summary_view(&self) -> anyhow::Result<SummaryView> {
        let totals = self.query_latest_totals()?;
        Ok(SummaryView {
            date: totals.date,
            total_cases: totals.total_cases,
            total_deaths: totals.total_deaths,
        })
    }

    /// Time-series panel for the selected countries.
    ///
    /// Selected countries with no dated rows produce no line.
    pub fn time_series_view(&self, countries: &[String]) -> anyhow::Result<TimeSeriesView> {
        if countries.is_empty() {
            return Ok(TimeSeriesView::Warning {
                message: EMPTY_SELECTION_WARNING.to_string(),
            });
        }
        let rows = self.query_death_series(countries)?;
        Ok(TimeSeriesView::Chart(TimeSeriesChart {
            title: TIME_SERIES_TITLE.to_string(),
            x_label: TIME_SERIES_X_LABEL.to_string(),
            y_label: TIME_SERIES_Y_LABEL.to_string(),
            series: group_series(rows),
        }))
    }

    /// Map panel for the selected date. A date without rows gives an empty map.
    pub fn map_view(&self, date: Option<NaiveDate>) -> anyhow::Result<MapView> {
        let regions = match date.as_ref() {
            Some(date) => self.query_vaccination_map(date)?,
            None => Vec::new(),
        };
        Ok(MapView {
            title: map_title(date.as_ref()),
            date: date.as_ref().map(format_date),
            color_scale: MAP_COLOR_SCALE.to_string(),
            color_range: MAP_COLOR_RANGE,
            regions,
        })
    }

    pub fn dashboard_view(&self, controls: &ControlState) -> anyhow::Result<DashboardView> {
        Ok(DashboardView {
            summary: self.summary_view()?,
            time_series: self.time_series_view(controls.selected_countries())?,
            map: self.map_view(controls.selected_date())?,
        })
    }
}

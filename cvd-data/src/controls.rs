//! Sidebar control state.
//!
//! Each user interaction is a [`ControlEvent`]; applying it to the current
//! [`ControlState`] yields a new immutable record. Views are derived from the
//! record, never from the widgets directly.

use chrono::NaiveDate;
use cvd_utils::dates::{clamp_date, date_at_offset, days_between};
use log::debug;
use serde::Serialize;

/// Countries preselected for the time-series chart.
pub const DEFAULT_COUNTRIES: [&str; 5] = [
    "United States",
    "India",
    "Brazil",
    "United Kingdom",
    "Germany",
];

/// Date preselected for the vaccination map, before clamping.
pub fn default_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2022, 7, 1).unwrap_or(NaiveDate::MIN)
}

/// Inclusive range of dates observed in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateBounds {
    min: NaiveDate,
    max: NaiveDate,
}

impl DateBounds {
    /// Build bounds, swapping the ends if given in reverse.
    pub fn new(a: NaiveDate, b: NaiveDate) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    pub fn min(&self) -> NaiveDate {
        self.min
    }

    pub fn max(&self) -> NaiveDate {
        self.max
    }

    pub fn clamp(&self, date: NaiveDate) -> NaiveDate {
        clamp_date(date, self.min, self.max)
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        *date >= self.min && *date <= self.max
    }

    /// Number of days between the ends (0 for a single-day table). Never
    /// negative.
    pub fn span_days(&self) -> i64 {
        days_between(&self.min, &self.max).max(0)
    }

    /// Slider position of `date`, in days from `min`.
    pub fn offset_of(&self, date: &NaiveDate) -> i64 {
        days_between(&self.min, &self.clamp(*date)).clamp(0, self.span_days())
    }

    /// Date at slider position `offset`, clamped into the bounds.
    pub fn date_at(&self, offset: i64) -> NaiveDate {
        let offset = offset.clamp(0, self.span_days());
        date_at_offset(&self.min, offset).unwrap_or(self.max)
    }
}

/// A single user interaction with the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlEvent {
    AddCountry(String),
    RemoveCountry(String),
    SetCountries(Vec<String>),
    ClearCountries,
    SelectDate(NaiveDate),
    /// Slider position in days from the first observed date.
    SelectDateOffset(i64),
}

/// The user's current selections together with the choices offered.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ControlState {
    options: Vec<String>,
    bounds: Option<DateBounds>,
    selected_countries: Vec<String>,
    selected_date: Option<NaiveDate>,
}

impl ControlState {
    /// State shown on first render.
    ///
    /// `options` are the distinct locations of the table; `bounds` its observed
    /// date range (`None` when no row carries a date).
    pub fn initial(mut options: Vec<String>, bounds: Option<DateBounds>) -> Self {
        options.sort();
        options.dedup();
        let mut state = Self {
            options,
            bounds,
            selected_countries: Vec::new(),
            selected_date: bounds.map(|b| b.clamp(default_date())),
        };
        state.selected_countries = state.valid_selection(DEFAULT_COUNTRIES.iter().map(|c| c.to_string()));
        state
    }

    /// Sorted distinct location names offered by the country control.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn bounds(&self) -> Option<DateBounds> {
        self.bounds
    }

    /// Selected countries in the order they were picked.
    pub fn selected_countries(&self) -> &[String] {
        &self.selected_countries
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn has_selection(&self) -> bool {
        !self.selected_countries.is_empty()
    }

    /// Options not yet selected, for the "add country" dropdown.
    pub fn unselected_options(&self) -> impl Iterator<Item = &String> {
        self.options
            .iter()
            .filter(move |o| !self.selected_countries.contains(o))
    }

    pub fn is_option(&self, location: &str) -> bool {
        self.options
            .binary_search_by(|o| o.as_str().cmp(location))
            .is_ok()
    }

    /// Produce the state that follows `event`.
    pub fn apply(&self, event: ControlEvent) -> ControlState {
        debug!("control event: {:?}", event);
        let mut next = self.clone();
        match event {
            ControlEvent::AddCountry(country) => {
                if self.is_option(&country) && !next.selected_countries.contains(&country) {
                    next.selected_countries.push(country);
                }
            }
            ControlEvent::RemoveCountry(country) => {
                next.selected_countries.retain(|c| *c != country);
            }
            ControlEvent::SetCountries(countries) => {
                next.selected_countries = self.valid_selection(countries.into_iter());
            }
            ControlEvent::ClearCountries => {
                next.selected_countries.clear();
            }
            ControlEvent::SelectDate(date) => {
                next.selected_date = self.bounds.map(|b| b.clamp(date));
            }
            ControlEvent::SelectDateOffset(offset) => {
                next.selected_date = self.bounds.map(|b| b.date_at(offset));
            }
        }
        next
    }

    fn valid_selection(&self, countries: impl Iterator<Item = String>) -> Vec<String> {
        let mut selection: Vec<String> = Vec::new();
        for country in countries {
            if self.is_option(&country) && !selection.contains(&country) {
                selection.push(country);
            }
        }
        selection
    }
}

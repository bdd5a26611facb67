//! Reusable Dioxus RSX components for the dashboard.

mod chart_container;
mod chart_header;
mod country_selector;
mod date_slider;
mod error_display;
mod loading_spinner;
mod page_header;
mod summary_counters;
mod warning_banner;

pub use chart_container::ChartContainer;
pub use chart_header::ChartHeader;
pub use country_selector::CountrySelector;
pub use date_slider::DateSlider;
pub use error_display::ErrorDisplay;
pub use loading_spinner::LoadingSpinner;
pub use page_header::PageHeader;
pub use summary_counters::SummaryCounters;
pub use warning_banner::WarningBanner;

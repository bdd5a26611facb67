//! COVID-19 Interactive Global Dashboard
//!
//! A single page with a sidebar of controls and three panels: worldwide
//! counters, a time series of smoothed daily deaths per million for the
//! selected countries, and a world map of the fully-vaccinated percentage on
//! the selected date.
//!
//! Data flow:
//! 1. On mount, the OWID CSV is fetched through the memoized `DatasetCache`
//!    (browser `fetch`), parsed and cleaned.
//! 2. The cleaned table is copied into an in-memory SQLite database, and the
//!    control state is initialized from its locations and date range.
//! 3. Two memos split the control state: the selected countries drive only
//!    the time-series chart, the selected date drives only the map.
//! 4. Each view is built from the database and handed to D3.js as JSON.

use cvd_chart_ui::components::{
    ChartContainer, ChartHeader, CountrySelector, DateSlider, ErrorDisplay, LoadingSpinner,
    PageHeader, SummaryCounters, WarningBanner,
};
use cvd_chart_ui::js_bridge;
use cvd_chart_ui::source::BrowserSource;
use cvd_chart_ui::state::AppState;
use cvd_data::cache::DatasetCache;
use cvd_data::controls::ControlState;
use cvd_data::dataset::Dataset;
use cvd_db::views::{
    SummaryView, TimeSeriesView, EMPTY_SELECTION_WARNING, HEADING, INTRO, MAP_HEADING, PAGE_TITLE,
    SIDEBAR_HEADER, SUMMARY_HEADING, TIME_SERIES_HEADING,
};
use cvd_db::Database;
use dioxus::prelude::*;
use std::rc::Rc;

/// Chart container DOM element IDs used by D3.js to render into.
const TIME_SERIES_CHART_ID: &str = "death-rate-chart";
const MAP_ID: &str = "vaccination-map";

/// World country outlines keyed by ISO 3166-1 alpha-3 code.
const WORLD_GEOJSON_URL: &str =
    "https://raw.githubusercontent.com/holtzy/D3-graph-gallery/master/DATA/world.geojson";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("cvd-dashboard-root"))
        .launch(App);
}

/// Copy the cleaned table into SQLite and derive the first-render state.
fn prepare(dataset: &Dataset) -> anyhow::Result<(Database, ControlState, SummaryView)> {
    let db = Database::from_dataset(dataset)?;
    let controls = ControlState::initial(db.query_locations()?, db.query_date_range()?);
    let summary = db.summary_view()?;
    Ok((db, controls, summary))
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);
    let cache = use_hook(|| Rc::new(DatasetCache::new(BrowserSource::owid())));

    // Load the dataset on mount; any failure replaces the whole page
    use_effect(move || {
        let cache = Rc::clone(&cache);
        spawn(async move {
            let dataset = match cache.load().await {
                Ok(dataset) => dataset,
                Err(e) => {
                    state.fail(format!("Failed to load COVID-19 data: {}", e));
                    return;
                }
            };
            match prepare(&dataset) {
                Ok((db, controls, summary)) => {
                    state.controls.set(controls);
                    state.summary.set(Some(summary));
                    state.db.set(Some(db));
                    state.loading.set(false);
                }
                Err(e) => state.fail(format!("Database initialization failed: {}", e)),
            }
        });
    });

    let selected_countries = use_memo(move || state.controls.read().selected_countries().to_vec());
    let selected_date = use_memo(move || state.controls.read().selected_date());

    // Time-series chart: depends on the country selection only
    use_effect(move || {
        let countries = selected_countries();
        let Some(db) = state.db.read().clone() else {
            return;
        };

        js_bridge::init_charts();

        match db.time_series_view(&countries) {
            Ok(TimeSeriesView::Chart(chart)) => {
                let data_json = serde_json::to_string(&chart.series).unwrap_or_default();
                let config_json = serde_json::json!({
                    "title": chart.title,
                    "xLabel": chart.x_label,
                    "yLabel": chart.y_label,
                })
                .to_string();
                log::info!(
                    "[CVD] rendering {} series for {} countries",
                    chart.series.len(),
                    countries.len()
                );
                js_bridge::render_multi_line_chart(TIME_SERIES_CHART_ID, &data_json, &config_json);
            }
            Ok(TimeSeriesView::Warning { message }) => {
                log::info!("[CVD] {}", message);
                js_bridge::destroy_chart(TIME_SERIES_CHART_ID);
            }
            Err(e) => log::error!("[CVD] time-series query failed: {}", e),
        }
    });

    // Vaccination map: depends on the selected date only
    use_effect(move || {
        let date = selected_date();
        let Some(db) = state.db.read().clone() else {
            return;
        };

        js_bridge::init_charts();

        match db.map_view(date) {
            Ok(map) => {
                let data_json = serde_json::to_string(&map.regions).unwrap_or_default();
                let config_json = serde_json::json!({
                    "title": map.title,
                    "colorScale": map.color_scale,
                    "colorRange": map.color_range,
                    "geoJsonUrl": WORLD_GEOJSON_URL,
                })
                .to_string();
                log::info!(
                    "[CVD] rendering map for {:?} with {} regions",
                    map.date,
                    map.regions.len()
                );
                js_bridge::render_choropleth(MAP_ID, &data_json, &config_json);
            }
            Err(e) => log::error!("[CVD] map query failed: {}", e),
        }
    });

    rsx! {
        document::Title { "{PAGE_TITLE}" }
        div {
            style: "font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",

            if let Some(err) = (state.error_msg)() {
                div {
                    style: "padding: 16px;",
                    ErrorDisplay { message: err }
                }
            } else if (state.loading)() {
                LoadingSpinner {}
            } else {
                div {
                    style: "display: flex; min-height: 100vh;",

                    aside {
                        style: "width: 300px; flex-shrink: 0; padding: 16px; background: #F5F5F5; border-right: 1px solid #ddd;",
                        h3 {
                            style: "margin-top: 0;",
                            "{SIDEBAR_HEADER}"
                        }
                        CountrySelector {}
                        DateSlider {}
                    }

                    main {
                        style: "flex: 1; padding: 16px; min-width: 0;",

                        PageHeader {
                            title: HEADING.to_string(),
                            intro: INTRO.to_string(),
                        }

                        ChartHeader { title: SUMMARY_HEADING.to_string() }
                        if let Some(summary) = (state.summary)() {
                            SummaryCounters { summary }
                        }

                        ChartHeader { title: TIME_SERIES_HEADING.to_string() }
                        if selected_countries().is_empty() {
                            WarningBanner { message: EMPTY_SELECTION_WARNING.to_string() }
                        } else {
                            ChartContainer {
                                id: TIME_SERIES_CHART_ID.to_string(),
                                min_height: 420,
                            }
                        }

                        ChartHeader { title: MAP_HEADING.to_string() }
                        ChartContainer {
                            id: MAP_ID.to_string(),
                            min_height: 480,
                        }
                    }
                }
            }
        }
    }
}

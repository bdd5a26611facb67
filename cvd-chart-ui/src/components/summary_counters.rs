//! Worldwide counters of the Global Overview section.

use cvd_db::views::{SummaryView, CASES_LABEL, DEATHS_LABEL};
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct SummaryCountersProps {
    pub summary: SummaryView,
}

/// Two side-by-side metrics: total cases and total deaths.
#[component]
pub fn SummaryCounters(props: SummaryCountersProps) -> Element {
    let cases = props.summary.cases_display();
    let deaths = props.summary.deaths_display();
    let as_of = props.summary.date.clone().unwrap_or_default();

    rsx! {
        div {
            style: "display: flex; gap: 24px; flex-wrap: wrap;",
            Metric { label: CASES_LABEL.to_string(), value: cases }
            Metric { label: DEATHS_LABEL.to_string(), value: deaths }
        }
        if !as_of.is_empty() {
            p {
                style: "margin: 4px 0 0 0; font-size: 12px; color: #666;",
                "As of {as_of}"
            }
        }
    }
}

#[component]
fn Metric(label: String, value: String) -> Element {
    rsx! {
        div {
            style: "flex: 1; min-width: 220px; padding: 12px 16px; border: 1px solid #ddd; border-radius: 4px;",
            div {
                style: "font-size: 13px; color: #666;",
                "{label}"
            }
            div {
                style: "font-size: 28px; font-weight: bold;",
                "{value}"
            }
        }
    }
}

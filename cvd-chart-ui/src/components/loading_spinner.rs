//! Placeholder shown while the dataset downloads.

use dioxus::prelude::*;

#[component]
pub fn LoadingSpinner() -> Element {
    rsx! {
        div {
            style: "display: flex; flex-direction: column; align-items: center; gap: 8px; padding: 64px 16px; color: #555;",
            div {
                style: "font-size: 1.1em; font-weight: 600;",
                "Fetching the Our World in Data COVID-19 table"
            }
            div {
                style: "font-size: 0.85em; color: #888;",
                "The full dataset is large; the charts appear once it is parsed."
            }
        }
    }
}

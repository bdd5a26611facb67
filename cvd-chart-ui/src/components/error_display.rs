//! Full-page panel shown when the dataset cannot be loaded.

use cvd_owid::observation::OWID_CSV_URL;
use dioxus::prelude::*;

pub const LOAD_FAILURE_HEADING: &str = "The COVID-19 dataset could not be loaded";

#[derive(Props, Clone, PartialEq)]
pub struct ErrorDisplayProps {
    pub message: String,
}

/// Replaces the whole dashboard; nothing else renders after a failed load.
#[component]
pub fn ErrorDisplay(props: ErrorDisplayProps) -> Element {
    rsx! {
        section {
            style: "max-width: 720px; margin: 48px auto; padding: 24px 28px; background: #FFF5F5; border-left: 6px solid #B71C1C; border-radius: 2px;",
            h2 {
                style: "margin: 0 0 12px 0; color: #B71C1C; font-size: 1.3em;",
                "{LOAD_FAILURE_HEADING}"
            }
            pre {
                style: "margin: 0 0 16px 0; white-space: pre-wrap; word-break: break-word; font-size: 0.9em; color: #5D1010;",
                "{props.message}"
            }
            p {
                style: "margin: 0; font-size: 0.85em; color: #666;",
                "Source: "
                a { href: OWID_CSV_URL, "{OWID_CSV_URL}" }
            }
        }
    }
}

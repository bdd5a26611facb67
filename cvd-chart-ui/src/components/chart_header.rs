//! Section header with title and optional description.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ChartHeaderProps {
    /// Section title
    pub title: String,
    /// Short line under the title
    #[props(default = String::new())]
    pub description: String,
}

/// Header for dashboard sections.
#[component]
pub fn ChartHeader(props: ChartHeaderProps) -> Element {
    rsx! {
        div {
            style: "margin: 16px 0 8px 0;",
            h2 {
                style: "margin: 0 0 4px 0; font-size: 20px;",
                "{props.title}"
            }
            if !props.description.is_empty() {
                p {
                    style: "margin: 0; font-size: 12px; color: #666;",
                    "{props.description}"
                }
            }
        }
    }
}

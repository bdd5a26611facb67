//! Page heading and introduction.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct PageHeaderProps {
    pub title: String,
    pub intro: String,
}

#[component]
pub fn PageHeader(props: PageHeaderProps) -> Element {
    rsx! {
        header {
            style: "margin-bottom: 16px;",
            h1 {
                style: "margin: 0 0 8px 0; font-size: 28px;",
                "{props.title}"
            }
            p {
                style: "margin: 0; color: #444;",
                "{props.intro}"
            }
        }
    }
}

//! Multi-select control for the time-series countries.
//!
//! Selected countries are shown as removable chips in selection order; a
//! dropdown adds one of the remaining options.

use crate::state::AppState;
use cvd_data::controls::ControlEvent;
use cvd_db::views::COUNTRY_CONTROL_LABEL;
use dioxus::prelude::*;

#[component]
pub fn CountrySelector() -> Element {
    let mut state = use_context::<AppState>();
    let controls = state.controls.read().clone();
    let selected: Vec<String> = controls.selected_countries().to_vec();
    let remaining: Vec<String> = controls.unselected_options().cloned().collect();

    let on_add = move |evt: Event<FormData>| {
        let value = evt.value();
        if !value.is_empty() {
            state.dispatch(ControlEvent::AddCountry(value));
        }
    };

    rsx! {
        div {
            style: "margin: 8px 0 16px 0;",
            label {
                r#for: "country-select",
                style: "display: block; font-weight: bold; margin-bottom: 6px;",
                "{COUNTRY_CONTROL_LABEL}"
            }
            div {
                style: "display: flex; flex-wrap: wrap; gap: 6px; margin-bottom: 6px;",
                for country in selected.into_iter() {
                    span {
                        key: "{country}",
                        style: "display: inline-flex; align-items: center; gap: 4px; padding: 2px 8px; background: #E3F2FD; border-radius: 12px; font-size: 13px;",
                        "{country}"
                        button {
                            style: "border: none; background: none; cursor: pointer; padding: 0 2px;",
                            title: "Remove",
                            onclick: {
                                let country = country.clone();
                                move |_| state.dispatch(ControlEvent::RemoveCountry(country.clone()))
                            },
                            "\u{00d7}"
                        }
                    }
                }
            }
            select {
                id: "country-select",
                style: "width: 100%;",
                onchange: on_add,
                option { value: "", selected: true, "Add a country..." }
                for country in remaining.iter() {
                    option {
                        value: "{country}",
                        "{country}"
                    }
                }
            }
            if controls.has_selection() {
                button {
                    style: "margin-top: 6px; font-size: 12px;",
                    onclick: move |_| state.dispatch(ControlEvent::ClearCountries),
                    "Clear selection"
                }
            }
        }
    }
}

//! Single-date control for the vaccination map.
//!
//! A range slider walks the observed dates one day per step; a date input
//! next to it jumps straight to a day. Both are clamped to the observed range.

use crate::state::AppState;
use cvd_data::controls::ControlEvent;
use cvd_db::views::DATE_CONTROL_LABEL;
use cvd_utils::dates::{format_date, parse_date};
use dioxus::prelude::*;

#[component]
pub fn DateSlider() -> Element {
    let mut state = use_context::<AppState>();
    let controls = state.controls.read().clone();

    let (Some(bounds), Some(selected)) = (controls.bounds(), controls.selected_date()) else {
        return rsx! {
            div {
                style: "margin: 8px 0; color: #666;",
                "{DATE_CONTROL_LABEL}: no dated observations"
            }
        };
    };

    let span = bounds.span_days();
    let offset = bounds.offset_of(&selected);
    let selected_text = format_date(&selected);
    let min_text = format_date(&bounds.min());
    let max_text = format_date(&bounds.max());

    let on_slide = move |evt: Event<FormData>| {
        if let Ok(offset) = evt.value().parse::<i64>() {
            state.dispatch(ControlEvent::SelectDateOffset(offset));
        }
    };

    let on_pick = move |evt: Event<FormData>| match parse_date(&evt.value()) {
        Ok(date) => state.dispatch(ControlEvent::SelectDate(date)),
        Err(e) => log::warn!("ignoring date input: {}", e),
    };

    rsx! {
        div {
            style: "margin: 8px 0 16px 0;",
            label {
                r#for: "date-slider",
                style: "display: block; font-weight: bold; margin-bottom: 6px;",
                "{DATE_CONTROL_LABEL}"
            }
            input {
                id: "date-slider",
                r#type: "range",
                style: "width: 100%;",
                min: "0",
                max: "{span}",
                step: "1",
                value: "{offset}",
                oninput: on_slide,
            }
            div {
                style: "display: flex; justify-content: space-between; font-size: 11px; color: #666;",
                span { "{min_text}" }
                span { "{max_text}" }
            }
            input {
                r#type: "date",
                style: "margin-top: 6px;",
                min: "{min_text}",
                max: "{max_text}",
                value: "{selected_text}",
                onchange: on_pick,
            }
        }
    }
}

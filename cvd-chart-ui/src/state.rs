//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.

use cvd_data::controls::{ControlEvent, ControlState};
use cvd_db::views::SummaryView;
use cvd_db::Database;
use dioxus::prelude::*;

/// Shared application state for the dashboard.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Database instance (None until loaded)
    pub db: Signal<Option<Database>>,
    /// Whether the app is still loading
    pub loading: Signal<bool>,
    /// Error message if something went wrong
    pub error_msg: Signal<Option<String>>,
    /// Sidebar selections and the choices offered
    pub controls: Signal<ControlState>,
    /// Global Overview counters, computed once per load
    pub summary: Signal<Option<SummaryView>>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new() -> Self {
        Self {
            db: Signal::new(None),
            loading: Signal::new(true),
            error_msg: Signal::new(None),
            controls: Signal::new(ControlState::default()),
            summary: Signal::new(None),
        }
    }

    /// Apply a sidebar interaction to the control state.
    pub fn dispatch(&mut self, event: ControlEvent) {
        let next = self.controls.read().apply(event);
        self.controls.set(next);
    }

    /// Record a fatal load error; the page shows only the error afterwards.
    pub fn fail(&mut self, message: String) {
        log::error!("{}", message);
        self.error_msg.set(Some(message));
        self.loading.set(false);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

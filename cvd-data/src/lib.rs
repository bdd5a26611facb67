//! Data loading and control state for the COVID-19 dashboard.
//!
//! This crate turns the raw OWID rows into the cleaned working table,
//! memoizes that table for the life of the process, and models the
//! user's selections as immutable records.

pub mod cache;
pub mod cleaning;
pub mod controls;
pub mod dataset;
pub mod smoothing;
pub mod source;

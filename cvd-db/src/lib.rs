//! In-memory SQLite database layer for the COVID-19 dashboard.
//!
//! The cleaned OWID table is copied once into an in-memory SQLite database;
//! every view then reads a slice of it through a typed query:
//!
//! - distinct locations and the observed date range (control options),
//! - the latest-date slice (summary counters),
//! - a location-membership filter (time-series chart),
//! - a date-equality filter (vaccination map).
//!
//! # Usage
//!
//! ```rust
//! use cvd_data::dataset::Dataset;
//! use cvd_db::Database;
//!
//! let dataset = Dataset::from_csv(
//!     "iso_code,location,date,total_cases,total_deaths,new_deaths,population,people_fully_vaccinated_per_hundred\n\
//!      DEU,Germany,2022-07-01,28234567,140380,88,83369840,76.1\n",
//! )
//! .unwrap();
//! let db = Database::from_dataset(&dataset).unwrap();
//! assert_eq!(db.query_locations().unwrap(), vec!["Germany".to_string()]);
//! ```
//!
//! # Tables
//!
//! See [`schema::create_schema`] for the SQL schema.

pub mod schema;
mod loader;
mod queries;
pub mod models;
pub mod views;

use cvd_data::dataset::Dataset;
use rusqlite::Connection;
use std::cell::RefCell;
use std::rc::Rc;

/// In-memory SQLite database holding the cleaned table.
///
/// This struct is cheaply cloneable (via `Rc`) and suitable for sharing
/// across Dioxus components in a single-threaded WASM environment.
#[derive(Clone)]
pub struct Database {
    conn: Rc<RefCell<Connection>>,
}

impl Database {
    /// Create a new in-memory database with the schema applied.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Rc::new(RefCell::new(conn)),
        })
    }

    /// Create a database and load every row of `dataset` into it.
    pub fn from_dataset(dataset: &Dataset) -> anyhow::Result<Self> {
        let db = Self::new()?;
        db.load_observations(dataset.observations())?;
        Ok(db)
    }
}

impl PartialEq for Database {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.conn, &other.conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_creates_successfully() {
        let db = Database::new();
        assert!(db.is_ok(), "Database should create without errors");
    }

    #[test]
    fn database_is_cloneable() {
        let db = Database::new().unwrap();
        let db2 = db.clone();
        let dataset = Dataset::from_csv(
            "iso_code,location,date,total_cases,total_deaths,new_deaths,population,people_fully_vaccinated_per_hundred\n\
             DEU,Germany,2022-07-01,28234567,140380,88,83369840,76.1\n",
        )
        .unwrap();
        db.load_observations(dataset.observations()).unwrap();
        assert_eq!(db2.query_row_count().unwrap(), 1, "Clone should see same data via shared Rc");
        assert!(db == db2);
        assert!(db != Database::new().unwrap());
    }

    #[test]
    fn database_starts_empty() {
        let db = Database::new().unwrap();
        assert_eq!(db.query_row_count().unwrap(), 0);
        assert!(db.query_locations().unwrap().is_empty());
    }
}

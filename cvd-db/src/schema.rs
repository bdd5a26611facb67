//! SQL schema for the in-memory working table.

/// Returns the full SQL schema as a single batch string.
///
/// One table, `observations`, holds the cleaned rows. `date` is ISO-8601
/// text so lexical order equals chronological order; it is NULL for rows
/// whose date failed to parse. No primary key: rows are stored as loaded.
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS observations (
        location TEXT NOT NULL,
        iso_code TEXT NOT NULL,
        date TEXT,
        total_cases REAL,
        total_deaths REAL,
        new_deaths REAL,
        population REAL,
        people_fully_vaccinated_per_hundred REAL NOT NULL DEFAULT 0,
        new_deaths_smoothed_per_million REAL
    );
    CREATE INDEX IF NOT EXISTS idx_obs_location_date ON observations(location, date);
    CREATE INDEX IF NOT EXISTS idx_obs_date ON observations(date);
    "#
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn schema_is_valid_sql() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema())
            .expect("Schema SQL should be valid");
    }

    #[test]
    fn schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema()).unwrap();
        conn.execute_batch(create_schema())
            .expect("Schema should apply twice");
    }
}

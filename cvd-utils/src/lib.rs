//! Shared utility functions for CVD crates.

/// Date utility functions
pub mod dates {
    use chrono::{NaiveDate, TimeDelta};

    /// Date format used by the OWID dataset and by every date shown in the UI.
    pub const DATE_FORMAT: &str = "%Y-%m-%d";

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format(DATE_FORMAT).to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)?)
    }

    /// Clamp a date into the inclusive range `[min, max]`.
    pub fn clamp_date(date: NaiveDate, min: NaiveDate, max: NaiveDate) -> NaiveDate {
        if date < min {
            min
        } else if date > max {
            max
        } else {
            date
        }
    }

    /// Whole days from `start` to `end` (negative when `end` is earlier).
    pub fn days_between(start: &NaiveDate, end: &NaiveDate) -> i64 {
        (*end - *start).num_days()
    }

    /// The date `offset` days after `start`, used to map slider positions back
    /// to calendar dates.
    pub fn date_at_offset(start: &NaiveDate, offset: i64) -> Option<NaiveDate> {
        TimeDelta::try_days(offset).and_then(|delta| start.checked_add_signed(delta))
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::NaiveDate;

        #[test]
        fn test_format_and_parse() {
            let date = NaiveDate::from_ymd_opt(2022, 7, 1).unwrap();
            let formatted = format_date(&date);
            assert_eq!(formatted, "2022-07-01");
            let parsed = parse_date(&formatted).unwrap();
            assert_eq!(parsed, date);
        }

        #[test]
        fn test_parse_rejects_garbage() {
            assert!(parse_date("not-a-date").is_err());
            assert!(parse_date("2021-02-30").is_err());
            assert!(parse_date("").is_err());
        }

        #[test]
        fn test_clamp_date() {
            let min = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
            let max = NaiveDate::from_ymd_opt(2020, 12, 31).unwrap();
            let before = NaiveDate::from_ymd_opt(2019, 6, 1).unwrap();
            let inside = NaiveDate::from_ymd_opt(2020, 6, 1).unwrap();
            let after = NaiveDate::from_ymd_opt(2022, 7, 1).unwrap();
            assert_eq!(clamp_date(before, min, max), min);
            assert_eq!(clamp_date(inside, min, max), inside);
            assert_eq!(clamp_date(after, min, max), max);
        }

        #[test]
        fn test_offsets() {
            let start = NaiveDate::from_ymd_opt(2021, 12, 30).unwrap();
            let end = NaiveDate::from_ymd_opt(2022, 1, 2).unwrap();
            assert_eq!(days_between(&start, &end), 3);
            assert_eq!(days_between(&end, &start), -3);
            assert_eq!(date_at_offset(&start, 3), Some(end));
            assert_eq!(date_at_offset(&start, 0), Some(start));
        }
    }
}

/// Number formatting for dashboard counters
pub mod numbers {
    /// Format a count as an integer with `,` thousands separators.
    ///
    /// Fractional parts are truncated toward zero. Non-finite values render as "0".
    pub fn format_thousands(value: f64) -> String {
        if !value.is_finite() {
            return "0".to_string();
        }
        let truncated = value.trunc() as i64;
        let digits = truncated.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        if truncated < 0 {
            format!("-{}", grouped)
        } else {
            grouped
        }
    }

}

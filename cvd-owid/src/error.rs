/// Error types for the OWID dataset pipeline
use thiserror::Error;

/// Main error type for loading the OWID table.
///
/// Variants fall into two classes, both fatal to a dashboard render:
/// fetch failures and parse failures.
#[derive(Error, Debug)]
pub enum OwidError {
    /// HTTP request failed
    #[cfg(feature = "api")]
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Transport failure reported by a non-reqwest source (browser fetch, file read)
    #[error("Failed to fetch dataset: {0}")]
    Fetch(String),

    /// Server answered with a non-success status
    #[error("Bad response status {status} from {url}")]
    ResponseStatus { status: u16, url: String },

    /// Failed to parse CSV data
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// The header row lacks a column the pipeline needs
    #[error("Dataset is missing required column: {0}")]
    MissingColumn(String),

    /// Failed to decompress data
    #[error("Failed to decompress data: {0}")]
    Decompression(String),

    /// Failed to gzip a snapshot before writing it
    #[error("Failed to compress data: {0}")]
    Compression(String),

    /// Body is not valid UTF-8
    #[error("Dataset body is not valid UTF-8: {0}")]
    Encoding(String),
}

impl OwidError {
    /// True for errors raised while obtaining the raw bytes.
    pub fn is_fetch_failure(&self) -> bool {
        match self {
            #[cfg(feature = "api")]
            OwidError::HttpRequest(_) => true,
            OwidError::Fetch(_) | OwidError::ResponseStatus { .. } => true,
            _ => false,
        }
    }

    /// True for errors raised while turning bytes into rows.
    pub fn is_parse_failure(&self) -> bool {
        !self.is_fetch_failure()
    }
}

/// Type alias for Results using OwidError
pub type Result<T> = std::result::Result<T, OwidError>;

#[cfg(test)]
mod tests {
    use super::OwidError;

    #[test]
    fn test_error_classes() {
        let fetch = OwidError::ResponseStatus {
            status: 404,
            url: "https://example.org/owid.csv".to_string(),
        };
        assert!(fetch.is_fetch_failure());
        assert!(!fetch.is_parse_failure());
        assert_eq!(
            fetch.to_string(),
            "Bad response status 404 from https://example.org/owid.csv"
        );

        let parse = OwidError::MissingColumn("date".to_string());
        assert!(parse.is_parse_failure());
        assert_eq!(parse.to_string(), "Dataset is missing required column: date");
    }

    #[test]
    fn test_compression_is_not_reported_as_decompression() {
        let err = OwidError::Compression("broken pipe".to_string());
        assert_eq!(err.to_string(), "Failed to compress data: broken pipe");
        assert!(!err.is_fetch_failure());
        assert!(!matches!(err, OwidError::Decompression(_)));
    }
}

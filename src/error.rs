use thiserror::Error;

/// Everything that can abort a dashboard load.
///
/// A load is all-or-nothing, so there is a single error type for fetching,
/// schema checks and field parsing alike.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("source did not respond within {secs}s")]
    Timeout { secs: u64 },

    #[error("failed to read source: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),

    #[error("row {row}: invalid {column} value {value:?}")]
    InvalidField {
        row: usize,
        column: &'static str,
        value: String,
    },
}

impl LoadError {
    pub fn invalid(row: usize, column: &'static str, value: &str) -> Self {
        LoadError::InvalidField {
            row,
            column,
            value: value.to_string(),
        }
    }
}

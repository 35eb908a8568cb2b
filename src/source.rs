//! Where the sales CSV comes from.

use crate::error::LoadError;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// CSV export of the "Dataset Dummy" sheet.
pub const DEFAULT_SOURCE_URL: &str = "https://docs.google.com/spreadsheets/d/1M4ZG7-CsPGvhyU7_YHOSUo-dssu-jSs0E4ralASFg60/export?format=csv&gid=678977029";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(String),
    File(PathBuf),
}

impl Source {
    /// `http://` and `https://` strings are URLs, everything else is a path.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        let lower = s.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Source::Url(s.to_string())
        } else {
            Source::File(PathBuf::from(s))
        }
    }

    /// Read the whole resource as text.
    pub fn fetch(&self, timeout: Duration) -> Result<String, LoadError> {
        match self {
            Source::Url(url) => fetch_url(url, timeout),
            Source::File(path) => {
                debug!("Reading {}", path.display());
                Ok(std::fs::read_to_string(path)?)
            }
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Url(url) => write!(f, "{}", url),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

fn fetch_url(url: &str, timeout: Duration) -> Result<String, LoadError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()?;

    debug!("GET {} (timeout {}s)", url, timeout.as_secs());
    let result = client
        .get(url)
        .send()
        .and_then(|resp| resp.error_for_status())
        .and_then(|resp| resp.text());

    result.map_err(|e| {
        if e.is_timeout() {
            LoadError::Timeout {
                secs: timeout.as_secs(),
            }
        } else {
            LoadError::Http(e)
        }
    })
}

//! Command-line arguments.

use crate::source::{Source, DEFAULT_SOURCE_URL};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Terminal sales dashboard
///
/// Pulls a CSV export of sales orders, shows revenue KPIs and chart series,
/// and answers a few scripted questions about them.
///
/// Examples:
///   sales_dashboard
///   sales_dashboard --source ./orders.csv --once
///   sales_dashboard --timeout 10 --out-dir reports
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// CSV source: an http(s) URL or a local file path
    #[arg(
        short,
        long,
        value_name = "URL|FILE",
        default_value = DEFAULT_SOURCE_URL,
        env = "SALES_DASHBOARD_SOURCE"
    )]
    pub source: String,

    /// Network timeout for fetching the source, in seconds
    #[arg(
        short,
        long,
        default_value = "30",
        value_name = "SECS",
        env = "SALES_DASHBOARD_TIMEOUT"
    )]
    pub timeout: u64,

    /// Directory for exported CSV/JSON files
    #[arg(short, long, default_value = ".", value_name = "DIR")]
    pub out_dir: PathBuf,

    /// Rows shown per chart series in the terminal
    #[arg(long, default_value = "10", value_name = "COUNT")]
    pub max_rows: usize,

    /// Load once, print the dashboard and exit
    #[arg(long)]
    pub once: bool,

    /// Enable verbose logging output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn source(&self) -> Source {
        Source::parse(&self.source)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Default log filter; `RUST_LOG` takes precedence when set.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["sales_dashboard"]).unwrap();
        assert_eq!(args.source(), Source::Url(DEFAULT_SOURCE_URL.to_string()));
        assert_eq!(args.timeout(), Duration::from_secs(30));
        assert_eq!(args.out_dir, PathBuf::from("."));
        assert!(!args.once);
        assert_eq!(args.log_level(), tracing::Level::WARN);
    }

    #[test]
    fn test_file_source_and_flags() {
        let args = Args::try_parse_from([
            "sales_dashboard",
            "--source",
            "orders.csv",
            "--timeout",
            "5",
            "--once",
            "-v",
        ])
        .unwrap();
        assert_eq!(args.source(), Source::File(PathBuf::from("orders.csv")));
        assert_eq!(args.timeout(), Duration::from_secs(5));
        assert!(args.once);
        assert_eq!(args.log_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Args::try_parse_from(["sales_dashboard", "-v", "-q"]).is_err());
    }
}

//! Parse raw email headers and flag common spoofing indicators.
//!
//! ```rust
//! let report = hdrcheck::analyze_str("From: a@example.org\r\nReceived: from x by y\r\n");
//! assert_eq!(report.record.from.as_deref(), Some("a@example.org"));
//! print!("{}", report.render_text("None"));
//! ```

pub mod cli;
pub mod error;
pub mod header;
pub mod report;
pub mod spoofing;

pub use error::{Error, Result};
pub use header::{Field, HeaderRecord, RelayPath};
pub use report::Report;
pub use spoofing::{MAX_HOPS, Warning, WarningList, evaluate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Presentation settings. The heuristics themselves take no configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub format: OutputFormat,
    /// Shown in the text report for a header that is not present.
    pub placeholder: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            format: OutputFormat::Text,
            placeholder: "None".to_string(),
        }
    }
}

/// Parse a header block and run the spoofing heuristics over it.
pub fn analyze(raw: &[u8]) -> Report {
    Report::new(HeaderRecord::parse(raw))
}

pub fn analyze_str(raw: &str) -> Report {
    analyze(raw.as_bytes())
}

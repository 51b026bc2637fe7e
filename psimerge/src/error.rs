//! Error types for psimerge

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for psimerge operations
pub type Result<T> = std::result::Result<T, MergeError>;

/// Fatal conditions raised while merging.
///
/// Recoverable anomalies (junction position sums, ignored files, optional
/// format count mismatches) never surface here; they are logged instead.
#[derive(Debug, Error)]
pub enum MergeError {
    /// Invalid or unusable configuration, detected before merging starts
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input file that cannot be opened or parsed
    #[error("Format error in {}{}: {msg}", .path.display(), line_suffix(.line))]
    Format {
        /// File the error occurred in
        path: PathBuf,
        /// 1-based line number, if known
        line: Option<u64>,
        /// Error message
        msg:  String,
    },

    /// Subsample counts of formats that must co-occur disagree
    #[error("Consistency error: {}", .0.join("; "))]
    Consistency(Vec<String>),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure of the tab-separated writer
    #[error("Table writing error: {0}")]
    Csv(#[from] csv::Error),
}

fn line_suffix(line: &Option<u64>) -> String {
    line.map(|l| format!(" (line {l})")).unwrap_or_default()
}

impl MergeError {
    pub(crate) fn format<P: Into<PathBuf>, S: Into<String>>(
        path: P,
        line: Option<u64>,
        msg: S,
    ) -> Self {
        MergeError::Format {
            path: path.into(),
            line,
            msg: msg.into(),
        }
    }

    /// Whether the error is one of the configuration errors reported before
    /// any input is read.
    pub fn is_config(&self) -> bool {
        matches!(self, MergeError::Config(_))
    }
}

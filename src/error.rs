use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Every way a cleaning run can fail. None of them is recovered from.
#[derive(Debug, Error)]
pub enum CleanError {
    #[error("invalid column number {input:?}: not a base-10 integer")]
    InvalidColumnNumber { input: String },

    #[error("input closed before a value was entered")]
    InputClosed,

    #[error("terminal I/O failed")]
    Terminal(#[source] io::Error),

    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("not a valid xlsx workbook: {}: {reason}", path.display())]
    InvalidFormat { path: PathBuf, reason: String },

    #[error("workbook has no worksheets: {}", path.display())]
    NoWorksheet { path: PathBuf },

    #[error("Column number {column} is not valid")]
    InvalidColumn { column: i64 },

    #[error("could not save {}: {reason}", path.display())]
    Save { path: PathBuf, reason: String },
}

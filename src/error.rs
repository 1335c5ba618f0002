//! Error taxonomy shared by the reader, accumulator and presenter.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("cannot read profile log {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("profile log parse error at {}:{line}: {message}", path.display())]
    Format {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// File name does not follow `prefix-N.ext`.
    #[error("cannot extract run parameter from file name {name:?} (expected prefix-N.ext)")]
    FileName { name: String },

    #[error("profile log {} contains no samples", path.display())]
    EmptyInput { path: PathBuf },

    /// Series spans zero time, so a per-time ratio is undefined.
    #[error("profile log {} spans zero time; CPU utilization is undefined", path.display())]
    DegenerateDuration { path: PathBuf },

    /// A running total or relative timestamp left the `i64` range.
    #[error("profile log {} overflows 64-bit totals at sample {sample}", path.display())]
    Overflow { path: PathBuf, sample: usize },

    #[error("failed to render chart: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, ProfileError>;

//! Error taxonomy for a report run.
//!
//! Every failure aborts the run: nothing here is retried or recovered locally.

use std::{io, path::PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReportError>;

#[derive(Debug, Error)]
pub enum ReportError {
    /// Input missing/unreadable or output path unwritable.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("required column `{column}` is missing from the CSV header")]
    MissingColumn { column: &'static str },

    #[error("line {line}: invalid value {value:?} in column `{column}`")]
    InvalidValue {
        line: u64,
        column: &'static str,
        value: String,
    },

    #[error("cannot interpret locale {name:?}")]
    Locale { name: String },

    #[error("dataset contains no rows")]
    EmptyDataset,

    #[error("found {found} distinct withBalancing values, the grid has only 2 columns")]
    TooManyBalancingValues { found: usize },

    #[error("palette exhausted: combination #{requested} requested, {available} styles available")]
    PaletteExhausted { requested: usize, available: usize },

    #[error("drawing failed: {0}")]
    Render(String),

    #[error("PDF conversion failed: {0}")]
    Pdf(String),
}

impl ReportError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ReportError::Io {
            path: path.into(),
            source,
        }
    }

    /// Wraps a plotters drawing error.
    pub fn render<E: std::fmt::Display>(err: E) -> Self {
        ReportError::Render(err.to_string())
    }
}

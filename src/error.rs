//! Error types for role classification

use std::path::PathBuf;

use thiserror::Error;

use crate::metrics::MetricKind;

/// Failure to turn a persisted edge list into graph views.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be opened or read.
    #[error("failed to read edge list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader rejected a record.
    #[error("unreadable record on line {line}: {source}")]
    Csv {
        line: u64,
        #[source]
        source: csv::Error,
    },

    /// A row has fewer than three fields.
    #[error("line {line}: missing {field}")]
    MissingField { line: u64, field: &'static str },

    /// A row has more fields than `source, target, weight`.
    #[error("line {line}: expected 3 fields, found {found}")]
    TooManyFields { line: u64, found: usize },

    /// The weight column is not a finite, non-negative number.
    #[error("line {line}: invalid weight {value:?}")]
    InvalidWeight { line: u64, value: String },

    /// A node identifier is blank after trimming.
    #[error("line {line}: empty node identifier")]
    EmptyNodeId { line: u64 },
}

/// A power-iteration centrality did not reach its tolerance.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{metric} failed to converge within {iterations} iterations")]
pub struct ConvergenceError {
    pub metric: MetricKind,
    pub iterations: usize,
}

/// Anything that stops a classification run.
#[derive(Error, Debug)]
pub enum RoleError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Convergence(#[from] ConvergenceError),

    /// The directed and undirected views were built over different node sets.
    #[error("graph views disagree on node set: {0}")]
    ViewMismatch(String),
}

/// Result type for classification operations.
pub type Result<T> = std::result::Result<T, RoleError>;

// Error taxonomy
// Retrieval/parse failures travel as values past the resolver boundary;
// lookup/aggregate failures are raised by the specific operation for the
// immediate caller to handle.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn a source descriptor into a parsed document.
///
/// Always carries the underlying cause. Callers branch on the `Result`;
/// nothing here panics past the resolver.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The outbound request failed or returned a non-success status.
    #[error("failed to fetch {url}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The file could not be opened or read.
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The retrieved text could not be parsed as markup.
    #[error("malformed markup: {0}")]
    Malformed(String),
}

/// Failure raised by a single pipeline operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// Strict `find` matched nothing. Use `try_find` when absence is an
    /// expected outcome rather than an error.
    #[error("no record matched the predicate")]
    NotFound,

    /// An averaging aggregate was applied to an empty sequence.
    #[error("cannot average over an empty sequence")]
    EmptyAggregate,
}

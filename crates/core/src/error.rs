use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong between the CLI and the provider.
#[derive(Debug, Error)]
pub enum RaxError {
    /// The credentials file could not be read or parsed at all. Missing
    /// individual keys are not an error; see the loader.
    #[error("unable to read credentials from {}: {message}", path.display())]
    Credentials { path: PathBuf, message: String },

    #[error("{0}")]
    Validation(String),

    /// Network-level failure before the provider could answer.
    #[error("request failed: {0}")]
    Transport(String),

    /// The provider answered with an HTTP error.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("no node named '{0}' was found")]
    NotFound(String),

    #[error("name '{name}' matches {count} nodes, refusing to guess")]
    Ambiguous { name: String, count: usize },

    /// Invalid flag combination, reported before any provider call.
    #[error("{0}")]
    Usage(String),

    /// Overall outcome of a batch where at least one entry failed.
    #[error("{failed} of {total} node operations failed")]
    Batch { failed: usize, total: usize },
}

//! Patch error types.

use std::path::PathBuf;

/// Errors that abort a patch run.
///
/// A stage whose pattern is absent does not produce one of these unless the
/// run is strict; it reports a miss instead.
#[derive(thiserror::Error, Debug)]
pub enum PatchError {
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read fragment '{name}': {source}")]
    Fragment {
        name: String,
        source: std::io::Error,
    },

    #[error("invalid pattern: {0}")]
    Regex(#[from] regex::Error),

    #[error("unknown stage '{0}'")]
    UnknownStage(String),

    #[error("stage '{0}' appears more than once")]
    DuplicateStage(String),

    #[error("stage '{stage}' requires '{requires}', which is not in the pipeline")]
    MissingDependency { stage: String, requires: String },

    #[error("stage '{stage}' must run after '{requires}'")]
    Order { stage: String, requires: String },

    #[error("stage '{stage}' found nothing to patch: {reason}")]
    Missed { stage: String, reason: String },

    #[error("stage '{stage}' failed: {message}")]
    Stage { stage: String, message: String },
}

impl PatchError {
    /// Create a stage-specific error.
    pub fn stage(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Stage {
            stage: stage.into(),
            message: message.into(),
        }
    }

    /// Wrap an I/O error with the path it happened at.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

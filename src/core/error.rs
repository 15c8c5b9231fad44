//! Error types for tago
//!
//! This module provides structured error handling using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for tagging operations
pub type Result<T> = std::result::Result<T, TagsError>;

/// Errors that can occur while building or saving a TAGS index
#[derive(Error, Debug)]
pub enum TagsError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error (config files)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Source text is not valid Go
    #[error("{}:{line}:{column}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    /// A tagged identifier's source line could not be read back
    #[error("line {line} not found in {}", .path.display())]
    LineNotFound { path: PathBuf, line: usize },

    /// The run produced nothing worth persisting
    #[error("run aborted: {reason}")]
    AbortedRun {
        reason: String,
        #[source]
        source: Option<Box<TagsError>>,
    },

    /// The destination could not be opened or written
    #[error("cannot write tags file {}: {source}", .path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Tree-sitter grammar could not be loaded
    #[error("Tree-sitter initialization failed: {0}")]
    Initialization(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<TagsError>,
    },
}

impl TagsError {
    /// Wrap an error with additional context
    pub fn with_context(self, context: impl Into<String>) -> Self {
        TagsError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Create an aborted-run error without an underlying cause
    pub fn aborted(reason: impl Into<String>) -> Self {
        TagsError::AbortedRun {
            reason: reason.into(),
            source: None,
        }
    }

    /// Create an aborted-run error caused by `cause`
    pub fn aborted_by(reason: impl Into<String>, cause: TagsError) -> Self {
        TagsError::AbortedRun {
            reason: reason.into(),
            source: Some(Box::new(cause)),
        }
    }

    /// True for parse failures, looking through context wrappers
    pub fn is_parse_error(&self) -> bool {
        match self {
            TagsError::Parse { .. } => true,
            TagsError::WithContext { source, .. } => source.is_parse_error(),
            _ => false,
        }
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(ctx))
    }
}

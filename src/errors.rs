use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;

/// Error types for the mcftest harness
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("{}:{line}: malformed annotation: {reason}", path.display())]
    MalformedAnnotation { path: PathBuf, line: usize, reason: String },

    #[error("collection `{collection}` references unknown property `{name}`")]
    UnknownProperty { collection: String, name: String },

    #[error("{0}")]
    ToolFailure(ToolFailure),

    #[error("{case}: expected {expected} but the property {actual} on trace `{trace}`")]
    VerdictMismatch { case: String, trace: String, expected: String, actual: String },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type specific to harness operations
pub type HarnessResult<T> = Result<T, HarnessError>;

impl HarnessError {
    pub fn malformed(path: impl Into<PathBuf>, line: usize, reason: impl Into<String>) -> Self {
        HarnessError::MalformedAnnotation { path: path.into(), line, reason: reason.into() }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        HarnessError::Io { path: path.into(), source }
    }
}

/// The external checker could not produce a verdict.
///
/// Carried as its own terminal state for a case; it is never compared
/// against an expected PASS/FAIL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolFailure {
    /// Tool (or pipeline step) that failed
    pub tool: String,
    /// Human readable detail, usually the tool's stderr
    pub detail: String,
}

impl ToolFailure {
    pub fn new(tool: impl Into<String>, detail: impl Into<String>) -> Self {
        Self { tool: tool.into(), detail: detail.into() }
    }
}

impl fmt::Display for ToolFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` failed: {}", self.tool, self.detail.trim_end())
    }
}

impl From<ToolFailure> for HarnessError {
    fn from(failure: ToolFailure) -> Self {
        HarnessError::ToolFailure(failure)
    }
}

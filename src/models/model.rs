use std::fs;
use std::path::{ Path, PathBuf };

use crate::errors::{ HarnessError, HarnessResult };
use crate::models::trace::Trace;

/// Behavioral template: an mCRL2 specification without an `init` section,
/// declaring the actions that traces and formulas may use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub path: PathBuf,
    pub text: String,
}

impl Template {
    pub fn load(path: &Path) -> HarnessResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| HarnessError::io(path, e))?;
        Ok(Self { path: path.to_path_buf(), text })
    }

    pub fn from_text(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self { path: path.into(), text: text.into() }
    }
}

/// A complete, checkable model whose only behavior is its trace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    /// Full model description handed to the checker
    pub text: String,
    /// The trace spliced into the template
    pub trace: Trace,
}

use chrono::{ DateTime, Utc };
use serde::Serialize;
use std::path::{ Path, PathBuf };

use crate::errors::HarnessError;
use crate::models::case::CaseKind;
use crate::models::verification::{ CaseStatus, TestResult };

/// A file that could not be turned into test cases
#[derive(Debug, Clone, Serialize)]
pub struct SetupError {
    pub path: PathBuf,
    pub kind: SetupErrorKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SetupErrorKind {
    MalformedAnnotation,
    UnknownProperty,
    Io,
    Other,
}

impl SetupError {
    pub fn from_error(path: impl Into<PathBuf>, error: &HarnessError) -> Self {
        let kind = match error {
            HarnessError::MalformedAnnotation { .. } => SetupErrorKind::MalformedAnnotation,
            HarnessError::UnknownProperty { .. } => SetupErrorKind::UnknownProperty,
            HarnessError::Io { .. } => SetupErrorKind::Io,
            _ => SetupErrorKind::Other,
        };
        Self { path: path.into(), kind, message: error.to_string() }
    }
}

/// A definition file that takes part in the run
#[derive(Debug, Clone, Serialize)]
pub struct SuiteFile {
    pub path: PathBuf,
    pub kind: CaseKind,
    /// Number of directives that will be executed
    pub cases: usize,
}

/// Tallies over a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub tool_failures: usize,
    pub setup_errors: usize,
}

impl Summary {
    pub fn tally(results: &[TestResult], setup_errors: usize) -> Self {
        let mut summary = Summary { setup_errors, ..Summary::default() };
        for result in results {
            summary.total += 1;
            match result.status {
                CaseStatus::Match => summary.matches += 1,
                CaseStatus::Mismatch => summary.mismatches += 1,
                CaseStatus::ToolFailure => summary.tool_failures += 1,
            }
        }
        summary
    }

    /// Cases that did not match
    pub fn failed(&self) -> usize {
        self.mismatches + self.tool_failures
    }
}

/// Everything a run produced, in reporting order
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub files: Vec<SuiteFile>,
    pub results: Vec<TestResult>,
    pub setup_errors: Vec<SetupError>,
    pub summary: Summary,
    /// The run was cancelled; `results` holds what had completed
    pub aborted: bool,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        !self.aborted
            && self.setup_errors.is_empty()
            && self.results.iter().all(TestResult::is_match)
    }

    pub fn results_for<'a>(&'a self, path: &'a Path) -> impl Iterator<Item = &'a TestResult> + 'a {
        self.results.iter().filter(move |r| r.id.path == path)
    }
}

use async_trait::async_trait;

use crate::errors::ToolFailure;
use crate::models::model::Model;
use crate::models::verification::Verdict;

/// Capability to decide whether a formula holds for a model.
///
/// The harness only ever talks to the checker through this trait, so tests
/// can substitute a scripted implementation for the real tool.
#[async_trait]
pub trait ModelChecker: Send + Sync {
    /// Decide `formula` on `model`.
    ///
    /// Anything that prevents a boolean answer (the tool is missing, crashes,
    /// times out or prints something unexpected) is a `ToolFailure`.
    async fn evaluate(&self, formula: &str, model: &Model) -> Result<Verdict, ToolFailure>;

    /// Name used in logs and reports
    fn name(&self) -> &str;
}

/// Availability of one external tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolStatus {
    pub tool: String,
    pub command: String,
    /// First line of `--version` output, or the reason it is unavailable
    pub detail: String,
    pub available: bool,
}

/// Checker backed by external binaries that can be probed before a run
#[async_trait]
pub trait ToolBackend {
    async fn check_tools(&self) -> Vec<ToolStatus>;
}

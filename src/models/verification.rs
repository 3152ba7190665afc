use serde::Serialize;
use std::{ fmt, time::Duration };

use crate::errors::{ HarnessError, ToolFailure };
use crate::models::case::CaseId;
use crate::models::directive::ExpectedVerdict;
use crate::models::trace::Trace;

/// The checker's boolean answer for a model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Holds,
    Violated,
}

impl Verdict {
    pub fn from_bool(holds: bool) -> Self {
        if holds { Verdict::Holds } else { Verdict::Violated }
    }

    pub fn holds(&self) -> bool {
        matches!(self, Verdict::Holds)
    }

    pub fn and(self, other: Verdict) -> Verdict {
        Verdict::from_bool(self.holds() && other.holds())
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Holds => write!(f, "holds"),
            Verdict::Violated => write!(f, "is violated"),
        }
    }
}

/// What one check (or one conjunction of checks) produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Verdict { verdict: Verdict },
    ToolFailure { failure: ToolFailure },
}

impl Outcome {
    pub fn verdict(&self) -> Option<Verdict> {
        match self {
            Outcome::Verdict { verdict } => Some(*verdict),
            Outcome::ToolFailure { .. } => None,
        }
    }
}

impl From<Result<Verdict, ToolFailure>> for Outcome {
    fn from(result: Result<Verdict, ToolFailure>) -> Self {
        match result {
            Ok(verdict) => Outcome::Verdict { verdict },
            Err(failure) => Outcome::ToolFailure { failure },
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Verdict { verdict } => write!(f, "{}", verdict),
            Outcome::ToolFailure { failure } => write!(f, "tool failure: {}", failure),
        }
    }
}

/// Outcome of one member property inside a collection case
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberOutcome {
    pub property: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// Status of a finished case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    Match,
    Mismatch,
    ToolFailure,
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaseStatus::Match => write!(f, "ok"),
            CaseStatus::Mismatch => write!(f, "MISMATCH"),
            CaseStatus::ToolFailure => write!(f, "TOOL FAILURE"),
        }
    }
}

/// Result of executing one directive
#[derive(Debug, Clone, Serialize)]
pub struct TestResult {
    pub id: CaseId,
    pub trace: Trace,
    pub expected: ExpectedVerdict,
    #[serde(flatten)]
    pub outcome: Outcome,
    /// Per-member outcomes; empty for plain property cases
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<MemberOutcome>,
    pub status: CaseStatus,
    pub elapsed_ms: u64,
}

impl TestResult {
    pub fn new(
        id: CaseId,
        trace: Trace,
        expected: ExpectedVerdict,
        outcome: Outcome,
        members: Vec<MemberOutcome>,
        elapsed: Duration
    ) -> Self {
        let status = match outcome.verdict() {
            Some(verdict) if expected.is_met_by(verdict) => CaseStatus::Match,
            Some(_) => CaseStatus::Mismatch,
            None => CaseStatus::ToolFailure,
        };
        Self {
            id,
            trace,
            expected,
            outcome,
            members,
            status,
            elapsed_ms: elapsed.as_millis() as u64,
        }
    }

    pub fn is_match(&self) -> bool {
        self.status == CaseStatus::Match
    }

    /// Members whose verdict was `Violated`
    pub fn violated_members(&self) -> impl Iterator<Item = &MemberOutcome> {
        self.members.iter().filter(|m| m.outcome.verdict() == Some(Verdict::Violated))
    }

    /// The failure this result represents, if it is not a match
    pub fn to_error(&self) -> Option<HarnessError> {
        match (&self.status, &self.outcome) {
            (CaseStatus::Match, _) => None,
            (_, Outcome::ToolFailure { failure }) => Some(HarnessError::ToolFailure(failure.clone())),
            (_, Outcome::Verdict { verdict }) =>
                Some(HarnessError::VerdictMismatch {
                    case: format!("{} ({})", self.id.name, self.id.location()),
                    trace: self.trace.describe(),
                    expected: self.expected.to_string(),
                    actual: verdict.to_string(),
                }),
        }
    }
}

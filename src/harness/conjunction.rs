use log::debug;
use std::sync::Arc;

use crate::errors::ToolFailure;
use crate::harness::driver::VerificationDriver;
use crate::models::case::PropertyCase;
use crate::models::trace::Trace;
use crate::models::verification::{ MemberOutcome, Outcome, Verdict };

/// Combined outcome of a collection on one trace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conjunction {
    pub outcome: Outcome,
    pub members: Vec<MemberOutcome>,
}

/// Check every member property on `trace` and AND the verdicts.
///
/// Every member is checked even after one is violated or fails, so the
/// report can name each failing member.
pub async fn evaluate_conjunction(
    driver: &VerificationDriver,
    members: &[Arc<PropertyCase>],
    trace: &Trace
) -> Conjunction {
    let mut outcomes = Vec::with_capacity(members.len());
    for property in members {
        let outcome: Outcome = driver.verify_property(property, trace).await.into();
        debug!("Member `{}` on `{}`: {}", property.name, trace.describe(), outcome);
        outcomes.push(MemberOutcome { property: property.name.clone(), outcome });
    }

    Conjunction { outcome: fold(&outcomes), members: outcomes }
}

/// AND over member outcomes; any tool failure makes the whole a tool failure
pub fn fold(members: &[MemberOutcome]) -> Outcome {
    let failures: Vec<(&str, &ToolFailure)> = members
        .iter()
        .filter_map(|m| match &m.outcome {
            Outcome::ToolFailure { failure } => Some((m.property.as_str(), failure)),
            Outcome::Verdict { .. } => None,
        })
        .collect();

    if let Some((_, first)) = failures.first() {
        let detail = failures
            .iter()
            .map(|(property, failure)| format!("property `{}`: {}", property, failure))
            .collect::<Vec<_>>()
            .join("; ");
        return Outcome::ToolFailure { failure: ToolFailure::new(first.tool.clone(), detail) };
    }

    let verdict = members
        .iter()
        .filter_map(|m| m.outcome.verdict())
        .fold(Verdict::Holds, Verdict::and);
    Outcome::Verdict { verdict }
}

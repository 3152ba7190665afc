use serde::Serialize;
use std::fmt;

use crate::models::trace::Trace;
use crate::models::verification::Verdict;

/// Annotated expectation for a trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExpectedVerdict {
    /// The trace, as the sole behavior of the model, satisfies the formula
    Pass,
    /// The trace violates the formula
    Fail,
}

impl ExpectedVerdict {
    pub fn keyword(&self) -> &'static str {
        match self {
            ExpectedVerdict::Pass => "PASS",
            ExpectedVerdict::Fail => "FAIL",
        }
    }

    /// The verdict that satisfies this expectation
    pub fn verdict(&self) -> Verdict {
        match self {
            ExpectedVerdict::Pass => Verdict::Holds,
            ExpectedVerdict::Fail => Verdict::Violated,
        }
    }

    pub fn is_met_by(&self, verdict: Verdict) -> bool {
        self.verdict() == verdict
    }
}

impl fmt::Display for ExpectedVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// One parsed `%!` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    PassTrace(Trace),
    FailTrace(Trace),
    PropRef(String),
}

/// A PASS/FAIL directive as held by a test case
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceDirective {
    /// 1-based source line
    pub line: usize,
    pub expected: ExpectedVerdict,
    pub trace: Trace,
}

impl TraceDirective {
    pub fn new(line: usize, expected: ExpectedVerdict, trace: Trace) -> Self {
        Self { line, expected, trace }
    }
}

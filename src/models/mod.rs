pub mod trace;
pub mod directive;
pub mod case;
pub mod model;
pub mod verification;
pub mod report;

// Re-export common model types
pub use trace::{ Trace, TraceParseError };
pub use directive::{ Directive, ExpectedVerdict, TraceDirective };
pub use case::{ CaseId, CaseKind, CollectionCase, PropertyCase };
pub use model::{ Model, Template };
pub use verification::{ CaseStatus, MemberOutcome, Outcome, TestResult, Verdict };
pub use report::{ RunReport, SetupError, SetupErrorKind, SuiteFile, Summary };

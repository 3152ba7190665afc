pub mod models;
pub mod traits;
pub mod errors;
pub mod config;
pub mod implementations;
pub mod harness;
pub mod cli;
#[cfg(test)]
pub mod tests;

// Re-export core components
pub use config::{ HarnessConfig, ToolsConfig };
pub use errors::{ HarnessError, HarnessResult, ToolFailure };
pub use implementations::{
    annotation::{ parse_directive, parse_property, PropertyDefinition },
    collection::{ parse_collection, CollectionDefinition },
    instantiator::instantiate,
    mcrl2::Mcrl2Checker,
};
pub use harness::{ load_suite, Aggregator, Suite, SuiteSource, VerificationDriver };
pub use models::{
    CaseId,
    CaseKind,
    CaseStatus,
    CollectionCase,
    Directive,
    ExpectedVerdict,
    Model,
    Outcome,
    PropertyCase,
    RunReport,
    Summary,
    Template,
    TestResult,
    Trace,
    TraceDirective,
    Verdict,
};
pub use traits::{ ModelChecker, ToolBackend, ToolStatus };

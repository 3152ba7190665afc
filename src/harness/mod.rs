pub mod driver;
pub mod conjunction;
pub mod suite;
pub mod aggregator;

pub use driver::VerificationDriver;
pub use conjunction::{ evaluate_conjunction, Conjunction };
pub use suite::{ load_suite, Definition, ResolvedCollection, Suite, SuiteSource };
pub use aggregator::{ Aggregator, Job, JobTarget };

pub mod model_checker;

// Re-export traits
pub use model_checker::{ ModelChecker, ToolBackend, ToolStatus };

pub mod annotation;
pub mod collection;
pub mod instantiator;
pub mod mcrl2;

//! CLI command implementations.

pub mod pairs;
pub mod run;
pub mod validate;

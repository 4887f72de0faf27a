//! CLI command implementations

pub mod validate;

pub use validate::{ValidateArgs, ValidateCommand};

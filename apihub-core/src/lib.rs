//! Core building blocks for the APIHub CLI.
//!
//! This crate knows how to load an API definition from a file or URL,
//! import its external `$ref` targets, and hand back the text to upload.
//! It is deliberately schema-agnostic: documents are plain JSON trees.

pub mod definition;
pub mod document;
pub mod error;
pub mod location;
pub mod resolver;
pub mod resource;

// Re-export commonly used types
pub use definition::Definition;
pub use document::Format;
pub use error::{CoreError, CoreResult};
pub use location::Location;
pub use resolver::{ReferenceResolver, ResolutionContext, REF_KEY};
pub use resource::Resource;

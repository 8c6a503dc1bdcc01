//! Input tree traversal and file omission

pub mod error;
pub mod omitter;
pub mod walker;

pub use error::{Result, SourceError};
pub use omitter::Omitter;
pub use walker::{SourceFile, walk};

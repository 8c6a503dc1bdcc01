//! Redaction run orchestration: omission, path and content obfuscation,
//! output writing and the run report.

pub mod cleaner;
pub mod report;

pub use cleaner::Cleaner;
pub use report::{OmittedFile, RunReport};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ObfuscatorError {
    #[error("Unknown replacement type: {0} (expected \"static\" or \"consistent\")")]
    UnknownReplacementType(String),

    #[error("The {kind} obfuscator requires at least one {what}")]
    MissingValues {
        kind: &'static str,
        what: &'static str,
    },

    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Invalid keyword set: {0}")]
    InvalidKeywords(#[from] aho_corasick::BuildError),
}

pub type Result<T> = std::result::Result<T, ObfuscatorError>;

//! Error types for ferriscan.
//!
//! Data-shape problems in captured logs (missing command output, missing
//! interface block, no matches) are never errors: they are reported as a
//! status on the emitted finding. The types here cover rule construction
//! and configuration loading only.

use thiserror::Error;

/// Main error type for ferriscan operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Rule definition errors
    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Rule table and pattern errors.
#[derive(Error, Debug)]
pub enum RuleError {
    /// Invalid regex pattern
    #[error("Invalid regex pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// A rule already exists for this check and family
    #[error("Rule for check '{check}' and family '{family}' is already registered")]
    AlreadyRegistered { check: String, family: String },
}

/// Scan configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The prompt delimiter is empty or unset
    #[error("Prompt delimiter must not be empty")]
    MissingPromptDelimiter,

    /// A required variable is missing
    #[error("Missing required variable '{name}'")]
    MissingVariable { name: String },

    /// A variable does not hold valid JSON of the expected shape
    #[error("'{name}' is not valid JSON: {source}")]
    InvalidJson {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias using ferriscan's Error.
pub type Result<T> = std::result::Result<T, Error>;

//! Typed error variants for the icon-classes-config crate.
//!
//! Callers that only need a message can coerce these into `anyhow::Error`;
//! callers that care about the failure mode can match on the variants.

use thiserror::Error;

/// Errors that can occur when loading settings or font records.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An I/O error occurred reading the settings file.
    #[error("I/O error reading settings: {0}")]
    Io(#[from] std::io::Error),

    /// The document was not valid YAML, or did not have the shape of the
    /// expected record.
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml_ng::Error),

    /// A field value failed semantic validation.
    ///
    /// The inner string describes which field is invalid and why.
    #[error("Settings validation error: {0}")]
    Validation(String),
}

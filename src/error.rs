// Error types for renewal-audit
//
// Structured errors for the run-level failures of a renewal audit. Per-record
// problems (missing files, unreadable certificates) are not errors here: they
// are collected as messages on the record itself.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for renewal-audit operations
#[derive(Debug, Error)]
pub enum AuditError {
    /// The renewal directory (or the configuration root) could not be listed
    #[error("Cannot read directory {}: {source}", path.display())]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A renewal record could not be read from disk
    #[error("Cannot read renewal record {}: {source}", path.display())]
    RecordRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A renewal record was read but is not valid INI
    #[error("Parse error in {} at line {line}: {message}", path.display())]
    RecordParse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// Invalid configuration or parameters
    #[error("Invalid configuration: {message}")]
    ConfigError { message: String },

    /// The configuration file could not be read
    #[error("Cannot read configuration file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration file is not valid TOML
    #[error("Configuration syntax error: {0}")]
    ConfigSyntax(#[from] toml::de::Error),

    /// The configuration could not be rendered as TOML
    #[error("Configuration serialization error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Generic I/O error
    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: io::Error,
    },
}

impl AuditError {
    /// Attach a file path to a parse failure reported by the INI reader
    pub fn parse_at(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        AuditError::RecordParse {
            path: path.into(),
            line,
            message: message.into(),
        }
    }

    /// True for failures that belong to one record file rather than the whole run
    pub fn is_record_failure(&self) -> bool {
        matches!(
            self,
            AuditError::RecordRead { .. } | AuditError::RecordParse { .. }
        )
    }
}

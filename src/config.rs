// Audit Configuration
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

use crate::error::AuditError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// What to do when a renewal record cannot be read or parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseFailurePolicy {
    /// Stop the whole run and surface the error
    #[default]
    Abort,
    /// Log a warning, report the file and continue with the others
    Skip,
}

/// Settings for one audit run
///
/// Built once at startup (defaults, then the optional TOML file, then CLI
/// flags) and handed to the collector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Root of the ACME client state directory
    pub config_dir: PathBuf,

    /// Sub-directory of `config_dir` holding the renewal records
    pub renewal_subdir: String,

    /// Regular expression a file name must match to be read as a record
    pub record_pattern: String,

    /// Skip unparsable records instead of aborting the run
    pub skip_invalid: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            config_dir: PathBuf::from("/etc/letsencrypt"),
            renewal_subdir: "renewal".to_string(),
            record_pattern: r"\.conf$".to_string(),
            skip_invalid: false,
        }
    }
}

impl AuditConfig {
    /// Create config from file
    pub fn from_file(path: &Path) -> Result<Self, AuditError> {
        let content = fs::read_to_string(path).map_err(|source| AuditError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AuditConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Create example config file
    pub fn create_example(path: &Path) -> Result<(), AuditError> {
        let body = toml::to_string_pretty(&Self::default())?;
        let content = format!(
            "# renewal-audit configuration\n\
             # Command line flags override the values below.\n\n{}",
            body
        );
        fs::write(path, content)?;
        Ok(())
    }

    /// Directory scanned for renewal records
    pub fn renewal_dir(&self) -> PathBuf {
        self.config_dir.join(&self.renewal_subdir)
    }

    pub fn parse_failure_policy(&self) -> ParseFailurePolicy {
        if self.skip_invalid {
            ParseFailurePolicy::Skip
        } else {
            ParseFailurePolicy::Abort
        }
    }

    /// Compile `record_pattern`
    pub fn compiled_pattern(&self) -> Result<Regex, AuditError> {
        Regex::new(&self.record_pattern).map_err(|e| AuditError::ConfigError {
            message: format!("invalid record_pattern '{}': {}", self.record_pattern, e),
        })
    }

    /// Reject settings that cannot describe a renewal directory
    pub fn validate(&self) -> Result<(), AuditError> {
        if self.config_dir.as_os_str().is_empty() {
            return Err(AuditError::ConfigError {
                message: "config_dir must not be empty".to_string(),
            });
        }
        if self.renewal_subdir.trim().is_empty() {
            return Err(AuditError::ConfigError {
                message: "renewal_subdir must not be empty".to_string(),
            });
        }
        self.compiled_pattern()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = AuditConfig::default();
        assert_eq!(config.renewal_dir(), PathBuf::from("/etc/letsencrypt/renewal"));
        assert_eq!(config.parse_failure_policy(), ParseFailurePolicy::Abort);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("audit.toml");
        fs::write(&path, "config_dir = \"/srv/acme\"\nskip_invalid = true\n").unwrap();

        let config = AuditConfig::from_file(&path).unwrap();
        assert_eq!(config.config_dir, PathBuf::from("/srv/acme"));
        assert_eq!(config.renewal_subdir, "renewal");
        assert_eq!(config.parse_failure_policy(), ParseFailurePolicy::Skip);
    }

    #[test]
    fn test_example_round_trips() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("example.toml");
        AuditConfig::create_example(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# renewal-audit configuration"));
        assert_eq!(AuditConfig::from_file(&path).unwrap(), AuditConfig::default());
    }

    #[test]
    fn test_bad_toml() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("audit.toml");
        fs::write(&path, "config_dir = [unclosed").unwrap();

        assert!(matches!(
            AuditConfig::from_file(&path),
            Err(AuditError::ConfigSyntax(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            AuditConfig::from_file(&tmp.path().join("nope.toml")),
            Err(AuditError::ConfigRead { .. })
        ));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let config = AuditConfig {
            record_pattern: "(".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(AuditError::ConfigError { .. })));
    }

    #[test]
    fn test_empty_subdir_rejected() {
        let config = AuditConfig {
            renewal_subdir: " ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}

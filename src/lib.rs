// renewal-audit - Certificate status report for ACME client renewal records
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

//! renewal-audit reads the renewal records of an ACME client (such as the
//! `renewal/*.conf` files under `/etc/letsencrypt`), checks that the
//! certificate files they reference exist, and reports whether each
//! certificate is valid or expired.

pub mod certificates;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod records;
pub mod renewal;

// Re-export commonly used types
pub use crate::cli::Args;
pub use crate::config::{AuditConfig, ParseFailurePolicy};
pub use crate::error::AuditError;
pub use crate::output::OutputFormat;
pub use crate::renewal::{Collection, DomainFilter, RenewalCollector, RenewalRecord};

/// Result type for renewal-audit operations
pub type Result<T> = anyhow::Result<T>;

/// Error type for renewal-audit operations
pub use anyhow::Error;

// CLI module - Command line interface and argument parsing
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

use crate::config::AuditConfig;
use crate::error::AuditError;
use crate::output::{DisplayFilter, OutputFormat};
use crate::renewal::DomainFilter;
use clap::Parser;
use std::path::PathBuf;

mod filter_args;
mod output_args;

pub use filter_args::FilterArgs;
pub use output_args::OutputArgs;

/// renewal-audit - Expiry report for ACME client renewal records
///
/// Reads every renewal record under `<config-dir>/renewal`, checks that the
/// certificate files it names exist, and reports whether each certificate is
/// still valid.
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
#[command(name = "renewal-audit")]
#[command(about = "Report certificate status for ACME renewal records", long_about = None)]
pub struct Args {
    /// Only report records covering one of these domains (case-insensitive)
    #[arg(value_name = "DOMAIN")]
    pub domains: Vec<String>,

    /// ACME client configuration directory [default: /etc/letsencrypt]
    #[arg(short = 'd', long = "config-dir", value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Load settings from a TOML file (flags override it)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write an example configuration file and exit
    #[arg(long = "config-example", value_name = "FILE")]
    pub config_example: Option<PathBuf>,

    /// Skip renewal records that cannot be parsed instead of aborting
    #[arg(long = "skip-invalid")]
    pub skip_invalid: bool,

    #[command(flatten)]
    pub filter: FilterArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl Args {
    /// Build the run configuration: defaults, then `--config`, then flags
    pub fn audit_config(&self) -> Result<AuditConfig, AuditError> {
        let mut config = match &self.config {
            Some(path) => AuditConfig::from_file(path)?,
            None => AuditConfig::default(),
        };

        if let Some(dir) = &self.config_dir {
            config.config_dir = dir.clone();
        }
        if self.skip_invalid {
            config.skip_invalid = true;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn domain_filter(&self) -> DomainFilter {
        DomainFilter::new(&self.domains)
    }

    pub fn display_filter(&self) -> DisplayFilter {
        self.filter.display_filter()
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output.format()
    }
}

// Record filter arguments
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

use crate::output::DisplayFilter;
use clap::Args;

/// Record display filter options
///
/// These only affect which collected records are shown (and therefore counted
/// in the exit code); the domain filter is given as positional arguments.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Filter: Show only expired records and records with errors
    #[arg(long = "errors", visible_alias = "error", conflicts_with = "valid")]
    pub errors: bool,

    /// Filter: Show only valid records without errors
    #[arg(long = "valid", visible_alias = "valids")]
    pub valid: bool,
}

impl FilterArgs {
    pub fn display_filter(&self) -> DisplayFilter {
        if self.errors {
            DisplayFilter::ProblemsOnly
        } else if self.valid {
            DisplayFilter::HealthyOnly
        } else {
            DisplayFilter::All
        }
    }
}

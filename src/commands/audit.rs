// AuditCommand - Collect renewal records and report their status
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

use super::Command;
use crate::output::ReportPresenter;
use crate::renewal::RenewalCollector;
use crate::{Args, Result};
use anyhow::Context;
use chrono::Utc;
use std::io;
use tracing::{debug, info};

/// AuditCommand handles the default mode
///
/// This command is responsible for:
/// - Building the run configuration from the config file and flags
/// - Collecting renewal records from the renewal directory
/// - Printing the report (terminal or JSON) and skip notices
/// - Deriving the exit code from what was shown
pub struct AuditCommand {
    args: Args,
}

impl AuditCommand {
    /// Create a new AuditCommand with the given arguments
    pub fn new(args: Args) -> Self {
        Self { args }
    }
}

impl Command for AuditCommand {
    fn execute(&self) -> Result<u8> {
        let config = self.args.audit_config()?;
        let collector = RenewalCollector::new(&config)?;
        debug!("Auditing renewal records in {}", collector.renewal_dir().display());

        let now = Utc::now();
        let collection = collector
            .collect(&self.args.domain_filter(), now)
            .with_context(|| format!("Audit of {} failed", collector.renewal_dir().display()))?;

        let presenter = ReportPresenter::new(self.args.output_format(), self.args.display_filter())
            .quiet(self.args.output.quiet);

        let summary = presenter.present(
            &collection,
            now,
            &mut io::stdout().lock(),
            &mut io::stderr().lock(),
        )?;

        info!(
            "Reported {} record(s): {} expired, {} error(s), {} skipped, {} invalid",
            summary.shown, summary.expired, summary.errors, summary.skipped, summary.invalid
        );

        Ok(summary.exit_code())
    }

    fn name(&self) -> &'static str {
        "AuditCommand"
    }
}

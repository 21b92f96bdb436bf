// Output module - Report presentation (Terminal, JSON) and exit code tally

use crate::Result;
use crate::renewal::{Collection, RenewalRecord};
use chrono::{DateTime, Utc};
use std::io::Write;

pub mod json;
pub mod summary;
pub mod terminal;

pub use summary::{FATAL_EXIT_CODE, RunSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Terminal,
    JSON,
    JSONPretty,
}

/// Which collected records are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayFilter {
    #[default]
    All,
    /// Expired records and records carrying errors
    ProblemsOnly,
    /// Records that are neither expired nor carrying errors
    HealthyOnly,
}

impl DisplayFilter {
    pub fn shows(&self, record: &RenewalRecord) -> bool {
        match self {
            DisplayFilter::All => true,
            DisplayFilter::ProblemsOnly => record.has_problems(),
            DisplayFilter::HealthyOnly => record.is_healthy(),
        }
    }
}

/// Renders a collection and tallies what was shown
#[derive(Debug, Clone, Default)]
pub struct ReportPresenter {
    format: OutputFormat,
    filter: DisplayFilter,
    quiet: bool,
}

impl ReportPresenter {
    pub fn new(format: OutputFormat, filter: DisplayFilter) -> Self {
        Self {
            format,
            filter,
            quiet: false,
        }
    }

    /// Suppress skip and invalid-record notices
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Write the report to `out` and notices to `notices`
    ///
    /// Notices never go to `out`, so JSON output stays machine-readable.
    pub fn present<W: Write, E: Write>(
        &self,
        collection: &Collection,
        now: DateTime<Utc>,
        out: &mut W,
        notices: &mut E,
    ) -> Result<RunSummary> {
        let mut summary = RunSummary {
            skipped: collection.skipped.len(),
            invalid: collection.invalid.len(),
            ..Default::default()
        };

        if !self.quiet {
            for notice in &collection.skipped {
                notices.write_all(terminal::format_skip_notice(notice).as_bytes())?;
            }
            for failure in &collection.invalid {
                notices.write_all(terminal::format_parse_failure(failure).as_bytes())?;
            }
        }

        for record in collection.records.iter().filter(|r| self.filter.shows(r)) {
            summary.shown += 1;
            summary.errors += record.errors.len();
            if record.is_expired() {
                summary.expired += 1;
            }

            match self.format {
                OutputFormat::Terminal => {
                    out.write_all(terminal::format_record(record, now).as_bytes())?;
                }
                OutputFormat::JSON | OutputFormat::JSONPretty => {
                    let json = json::generate_json(record, self.format == OutputFormat::JSONPretty)?;
                    writeln!(out, "{}", json)?;
                }
            }
        }

        out.flush()?;
        Ok(summary)
    }
}

// Terminal Output - One line per renewal record plus its error lines

use crate::renewal::{ExpiryStatus, ParseFailure, RenewalRecord, SkipNotice};
use chrono::{DateTime, Utc};
use colored::*;

/// Coloured VALID / EXPIRED / UNKNOWN marker for a record
fn format_status(record: &RenewalRecord, now: DateTime<Utc>) -> ColoredString {
    match &record.expired {
        ExpiryStatus::Valid => match record.cert.metadata() {
            Some(meta) => format!("VALID ({})", meta.expiry_countdown(now)).green(),
            None => "VALID".green(),
        },
        ExpiryStatus::Expired { .. } => {
            let days = record.expired.days_since_expiry(now).unwrap_or(0);
            let ago = if days == 1 {
                "1 day ago".to_string()
            } else {
                format!("{} days ago", days)
            };
            format!("EXPIRED ({})", ago).red().bold()
        }
        ExpiryStatus::Indeterminate => "UNKNOWN".yellow(),
    }
}

/// Render a record as its summary line followed by one line per error
pub fn format_record(record: &RenewalRecord, now: DateTime<Utc>) -> String {
    let domains = if record.domains.is_empty() {
        "(none)".to_string()
    } else {
        record.domains.join(", ")
    };

    let mut out = format!(
        "Domains: {} {} File: {}\n",
        domains.yellow(),
        format_status(record, now),
        record.source.display().to_string().dimmed()
    );

    for error in &record.errors {
        out.push_str(&format!("\tERROR: {}\n", error.red()));
    }

    out
}

pub fn format_skip_notice(notice: &SkipNotice) -> String {
    format!("{} {}\n", "SKIPPED:".yellow().bold(), notice)
}

pub fn format_parse_failure(failure: &ParseFailure) -> String {
    format!("{} {}\n", "INVALID:".red().bold(), failure)
}

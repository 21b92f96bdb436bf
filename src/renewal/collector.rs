// Renewal Collector - Build validated renewal records from a renewal directory

use super::record::{
    ExpiryStatus, FileRole, ParseFailure, RecordFiles, RenewalRecord, SkipNotice,
};
use crate::certificates::inspector::{CertInspection, inspect_certificate};
use crate::config::{AuditConfig, ParseFailurePolicy};
use crate::error::AuditError;
use crate::records::{RecordParser, list_matching};
use chrono::{DateTime, Utc};
use regex::Regex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// The only authenticator whose records carry a domain list we can read
pub const SUPPORTED_AUTHENTICATOR: &str = "webroot";

const WEBROOT_MAP_SECTION: &str = "webroot_map";
const RENEWAL_PARAMS_SECTION: &str = "renewalparams";

/// Set of domains the caller is interested in
///
/// An empty filter matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainFilter {
    domains: HashSet<String>,
}

impl DomainFilter {
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            domains: domains
                .into_iter()
                .map(|d| d.as_ref().trim().to_lowercase())
                .filter(|d| !d.is_empty())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// True if the filter is empty or one of `domains` was requested
    pub fn matches(&self, domains: &[String]) -> bool {
        self.is_empty()
            || domains
                .iter()
                .any(|d| self.domains.contains(&d.to_lowercase()))
    }
}

/// Everything one collection run produced
#[derive(Debug, Clone, Default)]
pub struct Collection {
    /// Kept records, in discovery order
    pub records: Vec<RenewalRecord>,
    /// Records excluded because of an unsupported authenticator
    pub skipped: Vec<SkipNotice>,
    /// Records that could not be parsed (only with `ParseFailurePolicy::Skip`)
    pub invalid: Vec<ParseFailure>,
}

/// Outcome of evaluating one record file
#[derive(Debug, Clone)]
pub enum RecordOutcome {
    Supported(RenewalRecord),
    Unsupported(SkipNotice),
}

/// Collects renewal records from `<config_dir>/<renewal_subdir>`
pub struct RenewalCollector {
    renewal_dir: PathBuf,
    pattern: Regex,
    policy: ParseFailurePolicy,
}

impl RenewalCollector {
    /// Create a collector from a validated configuration
    pub fn new(config: &AuditConfig) -> Result<Self, AuditError> {
        Ok(Self {
            renewal_dir: config.renewal_dir(),
            pattern: config.compiled_pattern()?,
            policy: config.parse_failure_policy(),
        })
    }

    pub fn renewal_dir(&self) -> &Path {
        &self.renewal_dir
    }

    /// Evaluate every record file and keep the ones matching `filter`
    ///
    /// # Errors
    /// Fails if the renewal directory cannot be listed, or if a record cannot
    /// be parsed while the policy is `ParseFailurePolicy::Abort`.
    pub fn collect(&self, filter: &DomainFilter, now: DateTime<Utc>) -> Result<Collection, AuditError> {
        let files = list_matching(&self.renewal_dir, &self.pattern)?;
        debug!(
            "Found {} renewal record(s) in {}",
            files.len(),
            self.renewal_dir.display()
        );

        let mut collection = Collection::default();

        for file in files {
            let outcome = match evaluate_record(&file, now) {
                Ok(outcome) => outcome,
                Err(e) if e.is_record_failure() && self.policy == ParseFailurePolicy::Skip => {
                    warn!("Skipping invalid renewal record: {}", e);
                    collection.invalid.push(ParseFailure {
                        source: file,
                        message: e.to_string(),
                    });
                    continue;
                }
                Err(e) => return Err(e),
            };

            match outcome {
                RecordOutcome::Unsupported(notice) => {
                    info!("Skipping {}", notice);
                    collection.skipped.push(notice);
                }
                RecordOutcome::Supported(record) if filter.matches(&record.domains) => {
                    collection.records.push(record);
                }
                RecordOutcome::Supported(record) => {
                    debug!("{} does not match the domain filter", record.source.display());
                }
            }
        }

        info!(
            "Collected {} record(s), skipped {} unsupported, {} invalid",
            collection.records.len(),
            collection.skipped.len(),
            collection.invalid.len()
        );

        Ok(collection)
    }
}

/// Build the validated record for one renewal file
///
/// # Errors
/// `AuditError::RecordRead` / `AuditError::RecordParse` when the file is not a
/// readable INI record. Missing certificate files and unusable certificates
/// are recorded on the record instead.
pub fn evaluate_record(path: &Path, now: DateTime<Utc>) -> Result<RecordOutcome, AuditError> {
    let parser = RecordParser::from_path(path)?;

    let mut files = RecordFiles::default();
    for role in FileRole::ALL {
        let resolved = parser
            .get(None, role.key())
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);
        files.set(role, resolved);
    }

    let mut errors = Vec::new();
    for role in FileRole::ALL {
        if let Some(message) = missing_file_error(role, files.get(role)) {
            errors.push(message);
        }
    }

    let cert_path = files.cert.clone().unwrap_or_default();
    let cert = inspect_certificate(&cert_path);
    if let CertInspection::Failed(err) = &cert
        && cert_path.exists()
    {
        errors.push(format!(
            "{} file {} could not be inspected: {}",
            FileRole::Cert,
            cert_path.display(),
            err
        ));
    }

    let expired = match &cert {
        CertInspection::Metadata(meta) if meta.is_expired_at(now) => ExpiryStatus::Expired {
            at_millis: meta.expires_at_millis,
        },
        CertInspection::Metadata(_) => ExpiryStatus::Valid,
        CertInspection::Failed(_) => ExpiryStatus::Indeterminate,
    };

    let authenticator = parser
        .get(Some(RENEWAL_PARAMS_SECTION), "authenticator")
        .map(str::to_string);

    if authenticator.as_deref() != Some(SUPPORTED_AUTHENTICATOR) {
        return Ok(RecordOutcome::Unsupported(SkipNotice {
            source: path.to_path_buf(),
            authenticator,
        }));
    }

    let domains = parser
        .options(Some(WEBROOT_MAP_SECTION))
        .into_iter()
        .map(str::to_lowercase)
        .collect();

    Ok(RecordOutcome::Supported(RenewalRecord {
        source: path.to_path_buf(),
        domains,
        version: parser.get(None, "version").map(str::to_string),
        archive_dir: parser.get(None, "archive_dir").map(str::to_string),
        files,
        authenticator,
        cert,
        expired,
        errors,
    }))
}

fn missing_file_error(role: FileRole, path: Option<&Path>) -> Option<String> {
    match path {
        Some(p) if p.exists() => None,
        Some(p) => Some(format!("{} file {} does not exist", role, p.display())),
        None => Some(format!("{} file <unset> does not exist", role)),
    }
}

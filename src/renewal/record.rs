// Renewal Record - Validated status of one renewal configuration file

use crate::certificates::inspector::CertInspection;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};

/// The four certificate files tracked by a renewal record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileRole {
    Cert,
    PrivKey,
    Chain,
    FullChain,
}

impl FileRole {
    pub const ALL: [FileRole; 4] = [
        FileRole::Cert,
        FileRole::PrivKey,
        FileRole::Chain,
        FileRole::FullChain,
    ];

    /// Key of this role in the record's global section
    pub fn key(&self) -> &'static str {
        match self {
            FileRole::Cert => "cert",
            FileRole::PrivKey => "privkey",
            FileRole::Chain => "chain",
            FileRole::FullChain => "fullchain",
        }
    }

    /// Label used in error messages
    pub fn label(&self) -> &'static str {
        match self {
            FileRole::Cert => "CERT",
            FileRole::PrivKey => "PRIVKEY",
            FileRole::Chain => "CHAIN",
            FileRole::FullChain => "FULLCHAIN",
        }
    }
}

impl fmt::Display for FileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Paths of the certificate files, as written in the record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecordFiles {
    pub cert: Option<PathBuf>,
    pub privkey: Option<PathBuf>,
    pub chain: Option<PathBuf>,
    pub fullchain: Option<PathBuf>,
}

impl RecordFiles {
    pub fn get(&self, role: FileRole) -> Option<&Path> {
        let path = match role {
            FileRole::Cert => &self.cert,
            FileRole::PrivKey => &self.privkey,
            FileRole::Chain => &self.chain,
            FileRole::FullChain => &self.fullchain,
        };
        path.as_deref()
    }

    pub fn set(&mut self, role: FileRole, path: Option<PathBuf>) {
        let slot = match role {
            FileRole::Cert => &mut self.cert,
            FileRole::PrivKey => &mut self.privkey,
            FileRole::Chain => &mut self.chain,
            FileRole::FullChain => &mut self.fullchain,
        };
        *slot = path;
    }
}

/// Expiry state of a record's certificate
///
/// Serialized as `false` (valid), the expiry instant in epoch milliseconds
/// (expired), or `null` (no usable certificate metadata).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpiryStatus {
    Valid,
    Expired { at_millis: i64 },
    #[default]
    Indeterminate,
}

impl ExpiryStatus {
    pub fn is_expired(&self) -> bool {
        matches!(self, ExpiryStatus::Expired { .. })
    }

    /// Whole days elapsed between expiry and `now`
    pub fn days_since_expiry(&self, now: DateTime<Utc>) -> Option<i64> {
        match self {
            ExpiryStatus::Expired { at_millis } => {
                Some((now.timestamp_millis() - at_millis).max(0) / 86_400_000)
            }
            _ => None,
        }
    }
}

impl Serialize for ExpiryStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ExpiryStatus::Valid => serializer.serialize_bool(false),
            ExpiryStatus::Expired { at_millis } => serializer.serialize_i64(*at_millis),
            ExpiryStatus::Indeterminate => serializer.serialize_none(),
        }
    }
}

/// Status of one renewal record after validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenewalRecord {
    pub source: PathBuf,
    pub domains: Vec<String>,
    pub version: Option<String>,
    pub archive_dir: Option<String>,
    pub files: RecordFiles,
    pub authenticator: Option<String>,
    pub cert: CertInspection,
    pub expired: ExpiryStatus,
    pub errors: Vec<String>,
}

impl RenewalRecord {
    pub fn is_expired(&self) -> bool {
        self.expired.is_expired()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Expired or carrying at least one error
    pub fn has_problems(&self) -> bool {
        self.is_expired() || self.has_errors()
    }

    /// Not expired and free of errors
    pub fn is_healthy(&self) -> bool {
        !self.has_problems()
    }
}

/// A record left out because its authenticator cannot be audited
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkipNotice {
    pub source: PathBuf,
    pub authenticator: Option<String>,
}

impl fmt::Display for SkipNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.authenticator {
            Some(auth) => write!(
                f,
                "{} uses unsupported authenticator '{}'",
                self.source.display(),
                auth
            ),
            None => write!(f, "{} does not declare an authenticator", self.source.display()),
        }
    }
}

/// A record file that could not be parsed and was skipped
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseFailure {
    pub source: PathBuf,
    pub message: String,
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::certificates::inspector::CertError;
    use chrono::TimeZone;

    fn record(expired: ExpiryStatus, errors: Vec<String>) -> RenewalRecord {
        RenewalRecord {
            source: PathBuf::from("/etc/letsencrypt/renewal/example.com.conf"),
            domains: vec!["example.com".to_string()],
            version: Some("2.9.0".to_string()),
            archive_dir: None,
            files: RecordFiles::default(),
            authenticator: Some("webroot".to_string()),
            cert: CertInspection::Failed(CertError::InvalidPem {
                reason: "test".to_string(),
            }),
            expired,
            errors,
        }
    }

    #[test]
    fn test_role_labels() {
        let labels: Vec<_> = FileRole::ALL.iter().map(|r| r.label()).collect();
        assert_eq!(labels, vec!["CERT", "PRIVKEY", "CHAIN", "FULLCHAIN"]);
        assert_eq!(FileRole::FullChain.key(), "fullchain");
    }

    #[test]
    fn test_record_files_get_set() {
        let mut files = RecordFiles::default();
        files.set(FileRole::Chain, Some(PathBuf::from("/a/chain.pem")));
        assert_eq!(files.get(FileRole::Chain), Some(Path::new("/a/chain.pem")));
        assert_eq!(files.get(FileRole::Cert), None);
    }

    #[test]
    fn test_expiry_serialization() {
        assert_eq!(serde_json::to_string(&ExpiryStatus::Valid).unwrap(), "false");
        assert_eq!(
            serde_json::to_string(&ExpiryStatus::Expired { at_millis: 1_700_000_000_000 }).unwrap(),
            "1700000000000"
        );
        assert_eq!(serde_json::to_string(&ExpiryStatus::Indeterminate).unwrap(), "null");
    }

    #[test]
    fn test_days_since_expiry() {
        let expired_at = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let status = ExpiryStatus::Expired {
            at_millis: expired_at.timestamp_millis(),
        };

        let now = expired_at + chrono::Duration::days(3) + chrono::Duration::hours(5);
        assert_eq!(status.days_since_expiry(now), Some(3));
        assert_eq!(ExpiryStatus::Valid.days_since_expiry(now), None);
    }

    #[test]
    fn test_health_classification() {
        assert!(record(ExpiryStatus::Valid, vec![]).is_healthy());
        assert!(record(ExpiryStatus::Indeterminate, vec![]).is_healthy());
        assert!(record(ExpiryStatus::Expired { at_millis: 0 }, vec![]).has_problems());
        assert!(record(ExpiryStatus::Valid, vec!["x".to_string()]).has_problems());
    }

    #[test]
    fn test_skip_notice_display() {
        let notice = SkipNotice {
            source: PathBuf::from("/r/a.conf"),
            authenticator: Some("dns-01".to_string()),
        };
        assert_eq!(notice.to_string(), "/r/a.conf uses unsupported authenticator 'dns-01'");

        let notice = SkipNotice {
            source: PathBuf::from("/r/b.conf"),
            authenticator: None,
        };
        assert!(notice.to_string().contains("does not declare"));
    }

    #[test]
    fn test_record_json_shape() {
        let json = serde_json::to_value(record(ExpiryStatus::Valid, vec!["e".to_string()])).unwrap();
        assert_eq!(json["expired"], serde_json::Value::Bool(false));
        assert_eq!(json["domains"][0], "example.com");
        assert_eq!(json["files"]["cert"], serde_json::Value::Null);
        assert_eq!(json["cert"]["status"], "error");
        assert_eq!(json["errors"][0], "e");
    }
}

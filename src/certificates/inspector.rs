// Certificate Inspector - Extract subject and expiry metadata from certificate files

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use x509_parser::prelude::{ASN1Time, FromDer, GeneralName, X509Certificate};

/// Metadata extracted from a certificate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertMetadata {
    pub subject: String,
    pub issuer: String,
    pub serial_number: String,
    pub not_before: DateTime<Utc>,
    pub not_after: DateTime<Utc>,
    /// Expiry instant in milliseconds since the Unix epoch
    pub expires_at_millis: i64,
    pub san: Vec<String>, // Subject Alternative Names (DNS entries)
    pub fingerprint_sha256: String, // SHA256 of the DER encoding, colon-separated hex
}

/// Why a certificate file yielded no usable metadata
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CertError {
    #[error("cannot read {}: {reason}", path.display())]
    Unreadable { path: PathBuf, reason: String },

    #[error("invalid PEM data: {reason}")]
    InvalidPem { reason: String },

    #[error("invalid X.509 certificate: {reason}")]
    InvalidCertificate { reason: String },
}

/// Result of inspecting a certificate file
///
/// Inspection never fails hard: an unreadable or malformed file is reported as
/// `Failed` and the caller decides what that means for the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status")]
pub enum CertInspection {
    #[serde(rename = "ok")]
    Metadata(CertMetadata),
    #[serde(rename = "error")]
    Failed(CertError),
}

impl CertInspection {
    /// Subject of the certificate, if inspection produced metadata
    ///
    /// The subject may be empty: SAN-only certificates carry an empty DN.
    pub fn subject(&self) -> Option<&str> {
        self.metadata().map(|meta| meta.subject.as_str())
    }

    pub fn metadata(&self) -> Option<&CertMetadata> {
        match self {
            CertInspection::Metadata(meta) => Some(meta),
            CertInspection::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&CertError> {
        match self {
            CertInspection::Metadata(_) => None,
            CertInspection::Failed(err) => Some(err),
        }
    }
}

impl CertMetadata {
    /// Check whether `now` is past the expiry instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp_millis() > self.expires_at_millis
    }

    /// Human-readable countdown to expiry (or time since expiry)
    ///
    /// Examples: "expires in 2 months and 28 days", "expired 5 days ago",
    /// "expires today".
    pub fn expiry_countdown(&self, now: DateTime<Utc>) -> String {
        let duration = self.not_after.signed_duration_since(now);

        if duration.num_seconds() < 0 {
            let days = (-duration).num_days();
            if days == 0 {
                "expired today".to_string()
            } else {
                format!("expired {} ago", describe_days(days))
            }
        } else {
            let days = duration.num_days();
            if days == 0 {
                "expires today".to_string()
            } else {
                format!("expires in {}", describe_days(days))
            }
        }
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", n, unit)
    }
}

/// Express a day count as days, months and days, or years and months
fn describe_days(days: i64) -> String {
    if days < 30 {
        return plural(days, "day");
    }

    let (major, minor) = if days < 365 {
        (plural(days / 30, "month"), (days % 30, "day"))
    } else {
        (plural(days / 365, "year"), ((days % 365) / 30, "month"))
    };

    if minor.0 == 0 {
        major
    } else {
        format!("{} and {}", major, plural(minor.0, minor.1))
    }
}

/// Inspect the certificate stored at `path`
///
/// Accepts PEM (the first `CERTIFICATE` block is used, so a fullchain file
/// yields its leaf) or raw DER.
pub fn inspect_certificate(path: &Path) -> CertInspection {
    match read_metadata(path) {
        Ok(meta) => CertInspection::Metadata(meta),
        Err(err) => {
            debug!("Certificate inspection failed for {}: {}", path.display(), err);
            CertInspection::Failed(err)
        }
    }
}

fn read_metadata(path: &Path) -> Result<CertMetadata, CertError> {
    let bytes = fs::read(path).map_err(|e| CertError::Unreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let der = decode_certificate_bytes(&bytes)?;
    parse_der(&der)
}

fn decode_certificate_bytes(bytes: &[u8]) -> Result<Vec<u8>, CertError> {
    let looks_like_pem = bytes.windows(10).any(|w| w == b"-----BEGIN");
    if !looks_like_pem {
        return Ok(bytes.to_vec());
    }

    let blocks = ::pem::parse_many(bytes).map_err(|e| CertError::InvalidPem {
        reason: e.to_string(),
    })?;

    blocks
        .into_iter()
        .find(|block| block.tag() == "CERTIFICATE")
        .map(|block| block.into_contents())
        .ok_or_else(|| CertError::InvalidPem {
            reason: "no CERTIFICATE block found".to_string(),
        })
}

/// Parse a single DER-encoded certificate
pub fn parse_der(der: &[u8]) -> Result<CertMetadata, CertError> {
    let (rest, cert) = X509Certificate::from_der(der).map_err(|e| CertError::InvalidCertificate {
        reason: e.to_string(),
    })?;
    // Trailing bytes after the certificate are not part of its fingerprint
    let cert_der = &der[..der.len() - rest.len()];

    let validity = cert.validity();
    let not_before = to_datetime(validity.not_before)?;
    let not_after = to_datetime(validity.not_after)?;

    let san: Vec<String> = cert
        .subject_alternative_name()
        .ok()
        .flatten()
        .map(|ext| {
            ext.value
                .general_names
                .iter()
                .filter_map(|name| match name {
                    GeneralName::DNSName(dns) => Some(dns.to_string()),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(CertMetadata {
        subject: cert.subject().to_string(),
        issuer: cert.issuer().to_string(),
        serial_number: format!("{:x}", cert.serial),
        not_before,
        not_after,
        expires_at_millis: not_after.timestamp_millis(),
        san,
        fingerprint_sha256: fingerprint_sha256(cert_der),
    })
}

fn to_datetime(time: ASN1Time) -> Result<DateTime<Utc>, CertError> {
    DateTime::from_timestamp(time.timestamp(), 0).ok_or_else(|| CertError::InvalidCertificate {
        reason: format!("validity timestamp out of range: {}", time),
    })
}

fn fingerprint_sha256(der: &[u8]) -> String {
    Sha256::digest(der)
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(":")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rcgen::{CertificateParams, DistinguishedName, DnType, KeyPair};
    use tempfile::TempDir;

    fn self_signed_pem(cn: &str, not_after_year: i32) -> (String, String) {
        let mut params = CertificateParams::new(vec![cn.to_string()]).unwrap();
        let mut dn = DistinguishedName::new();
        dn.push(DnType::CommonName, cn);
        params.distinguished_name = dn;
        params.not_before = rcgen::date_time_ymd(2020, 1, 1);
        params.not_after = rcgen::date_time_ymd(not_after_year, 6, 1);

        let key_pair = KeyPair::generate().unwrap();
        let cert = params.self_signed(&key_pair).unwrap();
        (cert.pem(), key_pair.serialize_pem())
    }

    fn metadata_with_expiry(not_after: DateTime<Utc>) -> CertMetadata {
        CertMetadata {
            subject: "CN=example.com".to_string(),
            issuer: "CN=example.com".to_string(),
            serial_number: "01".to_string(),
            not_before: not_after - chrono::Duration::days(90),
            not_after,
            expires_at_millis: not_after.timestamp_millis(),
            san: vec!["example.com".to_string()],
            fingerprint_sha256: String::new(),
        }
    }

    #[test]
    fn test_inspects_pem_certificate() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("cert.pem");
        let (cert_pem, _) = self_signed_pem("example.com", 2045);
        fs::write(&path, cert_pem).unwrap();

        let inspection = inspect_certificate(&path);
        let meta = inspection.metadata().expect("certificate should parse");

        assert!(meta.subject.contains("example.com"));
        assert_eq!(inspection.subject(), Some(meta.subject.as_str()));
        assert_eq!(meta.san, vec!["example.com".to_string()]);
        assert_eq!(meta.not_after.format("%Y-%m-%d").to_string(), "2045-06-01");
        assert_eq!(meta.expires_at_millis, meta.not_after.timestamp_millis());
        assert_eq!(meta.fingerprint_sha256.split(':').count(), 32);
    }

    #[test]
    fn test_fullchain_yields_leaf() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("fullchain.pem");
        let (leaf, _) = self_signed_pem("leaf.example.com", 2045);
        let (issuer, _) = self_signed_pem("issuer.example.com", 2046);
        fs::write(&path, format!("{}{}", leaf, issuer)).unwrap();

        let meta = inspect_certificate(&path).metadata().cloned().unwrap();
        assert!(meta.subject.contains("leaf.example.com"));
    }

    #[test]
    fn test_empty_subject_still_yields_metadata() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("cert.pem");
        let mut params = CertificateParams::new(vec!["san-only.example.com".to_string()]).unwrap();
        params.distinguished_name = DistinguishedName::new();
        let key_pair = KeyPair::generate().unwrap();
        fs::write(&path, params.self_signed(&key_pair).unwrap().pem()).unwrap();

        let inspection = inspect_certificate(&path);
        let meta = inspection.metadata().expect("SAN-only certificate should parse");
        assert!(meta.subject.is_empty());
        assert_eq!(inspection.subject(), Some(""));
        assert_eq!(meta.san, vec!["san-only.example.com".to_string()]);
    }

    #[test]
    fn test_der_fingerprint_ignores_trailing_bytes() {
        let params = CertificateParams::new(vec!["example.com".to_string()]).unwrap();
        let key_pair = KeyPair::generate().unwrap();
        let cert = params.self_signed(&key_pair).unwrap();
        let der = cert.der().to_vec();

        let mut padded = der.clone();
        padded.extend_from_slice(b"\n\n trailing junk");

        let exact = parse_der(&der).unwrap();
        let with_trailer = parse_der(&padded).unwrap();
        assert_eq!(exact.fingerprint_sha256, with_trailer.fingerprint_sha256);
        assert_eq!(exact.fingerprint_sha256, fingerprint_sha256(&der));
    }

    #[test]
    fn test_private_key_is_not_a_certificate() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("privkey.pem");
        let (_, key_pem) = self_signed_pem("example.com", 2045);
        fs::write(&path, key_pem).unwrap();

        let inspection = inspect_certificate(&path);
        assert!(matches!(
            inspection,
            CertInspection::Failed(CertError::InvalidPem { .. })
        ));
        assert_eq!(inspection.subject(), None);
    }

    #[test]
    fn test_missing_file_is_reported_not_raised() {
        let tmp = TempDir::new().unwrap();
        let inspection = inspect_certificate(&tmp.path().join("missing.pem"));
        assert!(matches!(
            inspection.error(),
            Some(CertError::Unreadable { .. })
        ));
    }

    #[test]
    fn test_garbage_is_invalid_certificate() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("cert.pem");
        fs::write(&path, b"definitely not a certificate").unwrap();

        assert!(matches!(
            inspect_certificate(&path).error(),
            Some(CertError::InvalidCertificate { .. })
        ));
    }

    #[test]
    fn test_expiry_comparison() {
        let not_after = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let meta = metadata_with_expiry(not_after);

        assert!(!meta.is_expired_at(not_after - chrono::Duration::seconds(1)));
        assert!(!meta.is_expired_at(not_after));
        assert!(meta.is_expired_at(not_after + chrono::Duration::seconds(1)));
    }

    #[test]
    fn test_expiry_countdown_wording() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let in_days = |d: i64| metadata_with_expiry(now + chrono::Duration::days(d) + chrono::Duration::hours(1));
        let ago_days = |d: i64| metadata_with_expiry(now - chrono::Duration::days(d) - chrono::Duration::hours(1));

        assert_eq!(in_days(0).expiry_countdown(now), "expires today");
        assert_eq!(in_days(1).expiry_countdown(now), "expires in 1 day");
        assert_eq!(in_days(15).expiry_countdown(now), "expires in 15 days");
        assert_eq!(in_days(60).expiry_countdown(now), "expires in 2 months");
        assert_eq!(in_days(88).expiry_countdown(now), "expires in 2 months and 28 days");
        assert_eq!(in_days(400).expiry_countdown(now), "expires in 1 year and 1 month");
        assert_eq!(ago_days(0).expiry_countdown(now), "expired today");
        assert_eq!(ago_days(5).expiry_countdown(now), "expired 5 days ago");
        assert_eq!(ago_days(730).expiry_countdown(now), "expired 2 years ago");
    }

    #[test]
    fn test_inspection_serializes_with_status_tag() {
        let failed = CertInspection::Failed(CertError::InvalidPem {
            reason: "bad base64".to_string(),
        });
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["kind"], "invalid_pem");

        let meta = metadata_with_expiry(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap());
        let json = serde_json::to_value(CertInspection::Metadata(meta)).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["subject"], "CN=example.com");
    }
}

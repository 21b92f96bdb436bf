// Certificates module - Certificate inspection for renewal records

pub mod inspector;

pub use inspector::{CertError, CertInspection, CertMetadata, inspect_certificate, parse_der};

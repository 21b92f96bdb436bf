// Renewal module - Renewal record collection and validation

pub mod collector;
pub mod record;

pub use collector::{
    Collection, DomainFilter, RecordOutcome, RenewalCollector, SUPPORTED_AUTHENTICATOR,
    evaluate_record,
};
pub use record::{ExpiryStatus, FileRole, ParseFailure, RecordFiles, RenewalRecord, SkipNotice};

// JSON Output Module

use crate::Result;
use crate::renewal::RenewalRecord;

/// Generate JSON output for one record
pub fn generate_json(record: &RenewalRecord, pretty: bool) -> Result<String> {
    if pretty {
        Ok(serde_json::to_string_pretty(record)?)
    } else {
        Ok(serde_json::to_string(record)?)
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A key/value row backing site content: phone number, service area,
/// homepage carousel configuration, and the like. Values are free-form
/// strings; JSON payloads are stored as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SiteSetting {
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

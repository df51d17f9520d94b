use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::ReviewSource;

/// A customer review of the repair business.
///
/// Reviews are about the business, not about individual listings. Unpublished
/// reviews are held for moderation and never leave the back office.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Review {
    pub id: String,
    pub author: String,
    /// 1–5 stars.
    pub rating: i64,
    pub body: String,
    pub source: ReviewSource,
    pub published: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when a review is submitted or imported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewDraft {
    pub author: String,
    pub rating: i64,
    pub body: String,
    pub source: ReviewSource,
}

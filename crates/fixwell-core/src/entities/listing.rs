use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{Condition, ListingStatus};

/// A used appliance offered in the classifieds marketplace.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Listing {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub brand: Option<String>,
    /// Free-form category, e.g. `"washer"`, `"refrigerator"`.
    pub category: String,
    pub condition: Condition,
    /// Price in cents to avoid float money.
    pub price_cents: i64,
    pub status: ListingStatus,
    pub image_url: Option<String>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied by the back office when creating a listing.
/// ID, status, and timestamps are assigned by the database layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingDraft {
    pub title: String,
    pub description: Option<String>,
    pub brand: Option<String>,
    pub category: String,
    pub condition: Condition,
    pub price_cents: i64,
    pub image_url: Option<String>,
}

//! Status enums for Fixwell domain records.

use serde::{Deserialize, Serialize};

/// Lifecycle of a used-appliance listing in the marketplace.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    /// Visible in the marketplace.
    Active,
    /// Sold; kept for record, hidden from the storefront.
    Sold,
    /// Drafted by the back office, not yet published.
    Draft,
    /// Pulled from the storefront without being sold.
    Archived,
}

impl ListingStatus {
    /// String form as stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Sold => "sold",
            Self::Draft => "draft",
            Self::Archived => "archived",
        }
    }
}

/// Physical condition grade for a used appliance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    LikeNew,
    Good,
    Fair,
    ForParts,
}

impl Condition {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LikeNew => "like_new",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::ForParts => "for_parts",
        }
    }
}

/// Where a review came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReviewSource {
    /// Submitted through the site's review form.
    Site,
    /// Imported from Google Business reviews.
    Google,
    /// Entered manually by the back office.
    Manual,
}

impl ReviewSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Site => "site",
            Self::Google => "google",
            Self::Manual => "manual",
        }
    }
}

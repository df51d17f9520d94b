//! Seed data for a fresh install.
//!
//! Installs the homepage setting defaults and a handful of demo rows so the
//! storefront and back office render something before real content exists.
//! Existing settings are left alone; demo rows are only inserted into an
//! empty table.

use fixwell_core::entities::{ListingDraft, ReviewDraft};
use fixwell_core::enums::{Condition, ListingStatus, ReviewSource};
use tracing::info;

use crate::error::DatabaseError;
use crate::repos::HOMEPAGE_DEFAULTS;
use crate::service::StoreService;

/// What [`StoreService::seed`] ended up doing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub settings_added: usize,
    pub listings_added: usize,
    pub reviews_added: usize,
}

fn demo_listings() -> Vec<ListingDraft> {
    vec![
        ListingDraft {
            title: "Whirlpool top-load washer".into(),
            description: Some("Refurbished in our shop, 90-day warranty.".into()),
            brand: Some("Whirlpool".into()),
            category: "washer".into(),
            condition: Condition::Good,
            price_cents: 22_000,
            image_url: None,
        },
        ListingDraft {
            title: "LG french-door refrigerator".into(),
            description: Some("New compressor, minor door scuffs.".into()),
            brand: Some("LG".into()),
            category: "refrigerator".into(),
            condition: Condition::Fair,
            price_cents: 48_500,
            image_url: None,
        },
        ListingDraft {
            title: "Miele dishwasher, for parts".into(),
            description: None,
            brand: Some("Miele".into()),
            category: "dishwasher".into(),
            condition: Condition::ForParts,
            price_cents: 6_000,
            image_url: None,
        },
    ]
}

fn demo_reviews() -> Vec<ReviewDraft> {
    vec![
        ReviewDraft {
            author: "M. Okafor".into(),
            rating: 5,
            body: "Oven element replaced in under an hour.".into(),
            source: ReviewSource::Manual,
        },
        ReviewDraft {
            author: "S. Lindqvist".into(),
            rating: 4,
            body: "Honest diagnosis, told me the fridge wasn't worth fixing.".into(),
            source: ReviewSource::Google,
        },
    ]
}

impl StoreService {
    /// Seed defaults and demo content. Idempotent: re-running adds nothing.
    ///
    /// `contact_phone` comes from site configuration when present, so the
    /// seeded storefront shows the real number.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if any write fails after all retries.
    pub async fn seed(&self, contact_phone: &str) -> Result<SeedReport, DatabaseError> {
        let mut report = SeedReport::default();

        for (key, default_value) in HOMEPAGE_DEFAULTS.iter().copied() {
            if self.get_setting(key).await?.is_some() {
                continue;
            }
            let value = if key == "contact_phone" && !contact_phone.is_empty() {
                contact_phone
            } else {
                default_value
            };
            self.set_setting(key, value).await?;
            report.settings_added += 1;
        }

        if self.list_listings(None).await?.is_empty() {
            for draft in demo_listings() {
                let listing = self.create_listing(&draft).await?;
                self.set_listing_status(&listing.id, ListingStatus::Active)
                    .await?;
                self.set_listing_featured(&listing.id, true).await?;
                report.listings_added += 1;
            }
        }

        if self.list_reviews(false).await?.is_empty() {
            for draft in demo_reviews() {
                let review = self.create_review(&draft).await?;
                self.set_review_published(&review.id, true).await?;
                report.reviews_added += 1;
            }
        }

        info!(
            settings = report.settings_added,
            listings = report.listings_added,
            reviews = report.reviews_added,
            "seed complete"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn seed_populates_everything_once() {
        let svc = StoreService::open_local(":memory:").await.unwrap();

        let first = svc.seed("555-0100").await.unwrap();
        assert_eq!(first.settings_added, HOMEPAGE_DEFAULTS.len());
        assert_eq!(first.listings_added, 3);
        assert_eq!(first.reviews_added, 2);

        let phone = svc.get_setting("contact_phone").await.unwrap().unwrap();
        assert_eq!(phone.value, "555-0100");
        assert_eq!(svc.featured_listings().await.len(), 3);

        let second = svc.seed("555-0100").await.unwrap();
        assert_eq!(second, SeedReport::default());
    }
}

//! Used-appliance listing repository — CRUD plus the storefront carousel read.

use fixwell_core::entities::{Listing, ListingDraft};
use fixwell_core::enums::ListingStatus;
use fixwell_core::ids;
use tracing::warn;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, parse_enum};
use crate::retry::{execute_with_fresh_client, with_retry};
use crate::service::StoreService;

const LISTING_COLUMNS: &str = "id, title, description, brand, category, condition, price_cents, \
                               status, image_url, featured, created_at, updated_at";

fn row_to_listing(row: &libsql::Row) -> Result<Listing, DatabaseError> {
    Ok(Listing {
        id: row.get::<String>(0)?,
        title: row.get::<String>(1)?,
        description: get_opt_string(row, 2)?,
        brand: get_opt_string(row, 3)?,
        category: row.get::<String>(4)?,
        condition: parse_enum(&row.get::<String>(5)?)?,
        price_cents: row.get::<i64>(6)?,
        status: parse_enum(&row.get::<String>(7)?)?,
        image_url: get_opt_string(row, 8)?,
        featured: row.get::<i64>(9)? != 0,
        created_at: parse_datetime(&row.get::<String>(10)?)?,
        updated_at: parse_datetime(&row.get::<String>(11)?)?,
    })
}

impl StoreService {
    /// Create a draft listing and return the stored row.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the insert fails after all retries.
    pub async fn create_listing(&self, draft: &ListingDraft) -> Result<Listing, DatabaseError> {
        with_retry(self.supervisor(), self.retry_config(), move || async move {
            let handle = self.supervisor().get_handle().await?;
            let id = handle.generate_id(ids::LISTING).await?;
            handle
                .conn()
                .execute(
                    "INSERT INTO listings (id, title, description, brand, category, condition, price_cents, image_url)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                    libsql::params![
                        id.as_str(),
                        draft.title.as_str(),
                        draft.description.as_deref(),
                        draft.brand.as_deref(),
                        draft.category.as_str(),
                        draft.condition.as_str(),
                        draft.price_cents,
                        draft.image_url.as_deref()
                    ],
                )
                .await?;
            self.fetch_listing(&handle, &id)
                .await?
                .ok_or(DatabaseError::NoResult)
        })
        .await
    }

    /// Look a listing up by ID.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails after all retries.
    pub async fn get_listing(&self, id: &str) -> Result<Option<Listing>, DatabaseError> {
        with_retry(self.supervisor(), self.retry_config(), move || async move {
            let handle = self.supervisor().get_handle().await?;
            self.fetch_listing(&handle, id).await
        })
        .await
    }

    /// List listings, optionally filtered by status, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails after all retries.
    pub async fn list_listings(
        &self,
        status: Option<ListingStatus>,
    ) -> Result<Vec<Listing>, DatabaseError> {
        with_retry(self.supervisor(), self.retry_config(), move || async move {
            let handle = self.supervisor().get_handle().await?;
            let mut rows = match status {
                Some(status) => {
                    handle
                        .conn()
                        .query(
                            &format!(
                                "SELECT {LISTING_COLUMNS} FROM listings WHERE status = ?1 ORDER BY created_at DESC"
                            ),
                            [status.as_str()],
                        )
                        .await?
                }
                None => {
                    handle
                        .conn()
                        .query(
                            &format!("SELECT {LISTING_COLUMNS} FROM listings ORDER BY created_at DESC"),
                            (),
                        )
                        .await?
                }
            };
            let mut listings = Vec::new();
            while let Some(row) = rows.next().await? {
                listings.push(row_to_listing(&row)?);
            }
            Ok(listings)
        })
        .await
    }

    /// Replace a listing's editable fields with the draft's. Status and
    /// featured flag are managed separately and stay as they were.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the listing does not exist.
    pub async fn update_listing(
        &self,
        id: &str,
        draft: &ListingDraft,
    ) -> Result<Listing, DatabaseError> {
        with_retry(self.supervisor(), self.retry_config(), move || async move {
            let handle = self.supervisor().get_handle().await?;
            let changed = handle
                .conn()
                .execute(
                    "UPDATE listings SET title = ?2, description = ?3, brand = ?4, category = ?5,
                            condition = ?6, price_cents = ?7, image_url = ?8
                     WHERE id = ?1",
                    libsql::params![
                        id,
                        draft.title.as_str(),
                        draft.description.as_deref(),
                        draft.brand.as_deref(),
                        draft.category.as_str(),
                        draft.condition.as_str(),
                        draft.price_cents,
                        draft.image_url.as_deref()
                    ],
                )
                .await?;
            if changed == 0 {
                return Err(DatabaseError::NoResult);
            }
            self.fetch_listing(&handle, id)
                .await?
                .ok_or(DatabaseError::NoResult)
        })
        .await
    }

    /// Move a listing to a new status.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the listing does not exist.
    pub async fn set_listing_status(
        &self,
        id: &str,
        status: ListingStatus,
    ) -> Result<(), DatabaseError> {
        with_retry(self.supervisor(), self.retry_config(), move || async move {
            let handle = self.supervisor().get_handle().await?;
            let changed = handle
                .conn()
                .execute(
                    "UPDATE listings SET status = ?2 WHERE id = ?1",
                    libsql::params![id, status.as_str()],
                )
                .await?;
            if changed == 0 {
                return Err(DatabaseError::NoResult);
            }
            Ok(())
        })
        .await
    }

    /// Mark or unmark a listing for the homepage carousel.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the listing does not exist.
    pub async fn set_listing_featured(&self, id: &str, featured: bool) -> Result<(), DatabaseError> {
        with_retry(self.supervisor(), self.retry_config(), move || async move {
            let handle = self.supervisor().get_handle().await?;
            let changed = handle
                .conn()
                .execute(
                    "UPDATE listings SET featured = ?2 WHERE id = ?1",
                    libsql::params![id, i64::from(featured)],
                )
                .await?;
            if changed == 0 {
                return Err(DatabaseError::NoResult);
            }
            Ok(())
        })
        .await
    }

    /// Delete a listing.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the delete fails after all retries.
    pub async fn delete_listing(&self, id: &str) -> Result<bool, DatabaseError> {
        with_retry(self.supervisor(), self.retry_config(), move || async move {
            let handle = self.supervisor().get_handle().await?;
            let changed = handle
                .conn()
                .execute("DELETE FROM listings WHERE id = ?1", [id])
                .await?;
            Ok(changed > 0)
        })
        .await
    }

    /// Featured active listings for the homepage carousel.
    ///
    /// Three-tier degraded read: retry-wrapped query, then a single shot on a
    /// forced-fresh handle, then an empty carousel rather than a failed page.
    pub async fn featured_listings(&self) -> Vec<Listing> {
        let query = move |handle: std::sync::Arc<crate::connector::DbHandle>| async move {
            let mut rows = handle
                .conn()
                .query(
                    &format!(
                        "SELECT {LISTING_COLUMNS} FROM listings \
                         WHERE featured = 1 AND status = 'active' ORDER BY updated_at DESC"
                    ),
                    (),
                )
                .await?;
            let mut listings = Vec::new();
            while let Some(row) = rows.next().await? {
                listings.push(row_to_listing(&row)?);
            }
            Ok(listings)
        };

        let retried = with_retry(self.supervisor(), self.retry_config(), move || async move {
            let handle = self.supervisor().get_handle().await?;
            query(handle).await
        })
        .await;
        match retried {
            Ok(listings) => return listings,
            Err(error) => warn!(%error, "carousel read failed, trying a fresh client"),
        }

        match execute_with_fresh_client(self.supervisor(), query).await {
            Ok(listings) => listings,
            Err(error) => {
                warn!(%error, "carousel read failed on fresh client, serving empty carousel");
                Vec::new()
            }
        }
    }

    pub(crate) async fn fetch_listing(
        &self,
        handle: &crate::connector::DbHandle,
        id: &str,
    ) -> Result<Option<Listing>, DatabaseError> {
        let mut rows = handle
            .conn()
            .query(
                &format!("SELECT {LISTING_COLUMNS} FROM listings WHERE id = ?1"),
                [id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_listing(&row)?)),
            None => Ok(None),
        }
    }
}

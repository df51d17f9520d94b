//! Customer review repository — moderation-oriented CRUD.

use fixwell_core::entities::{Review, ReviewDraft};
use fixwell_core::ids;

use crate::error::DatabaseError;
use crate::helpers::{parse_datetime, parse_enum};
use crate::retry::with_retry;
use crate::service::StoreService;

const REVIEW_COLUMNS: &str = "id, author, rating, body, source, published, created_at";

fn row_to_review(row: &libsql::Row) -> Result<Review, DatabaseError> {
    Ok(Review {
        id: row.get::<String>(0)?,
        author: row.get::<String>(1)?,
        rating: row.get::<i64>(2)?,
        body: row.get::<String>(3)?,
        source: parse_enum(&row.get::<String>(4)?)?,
        published: row.get::<i64>(5)? != 0,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

impl StoreService {
    /// Store a submitted or imported review. Reviews land unpublished and
    /// wait for moderation.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the insert fails after all retries; ratings
    /// outside 1–5 are rejected by a schema CHECK constraint.
    pub async fn create_review(&self, draft: &ReviewDraft) -> Result<Review, DatabaseError> {
        with_retry(self.supervisor(), self.retry_config(), move || async move {
            let handle = self.supervisor().get_handle().await?;
            let id = handle.generate_id(ids::REVIEW).await?;
            handle
                .conn()
                .execute(
                    "INSERT INTO reviews (id, author, rating, body, source)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    libsql::params![
                        id.as_str(),
                        draft.author.as_str(),
                        draft.rating,
                        draft.body.as_str(),
                        draft.source.as_str()
                    ],
                )
                .await?;
            self.fetch_review(&handle, &id)
                .await?
                .ok_or(DatabaseError::NoResult)
        })
        .await
    }

    /// Look a review up by ID.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails after all retries.
    pub async fn get_review(&self, id: &str) -> Result<Option<Review>, DatabaseError> {
        with_retry(self.supervisor(), self.retry_config(), move || async move {
            let handle = self.supervisor().get_handle().await?;
            self.fetch_review(&handle, id).await
        })
        .await
    }

    /// List reviews, newest first. `published_only` hides the moderation queue.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails after all retries.
    pub async fn list_reviews(&self, published_only: bool) -> Result<Vec<Review>, DatabaseError> {
        with_retry(self.supervisor(), self.retry_config(), move || async move {
            let handle = self.supervisor().get_handle().await?;
            let sql = if published_only {
                format!(
                    "SELECT {REVIEW_COLUMNS} FROM reviews WHERE published = 1 ORDER BY created_at DESC"
                )
            } else {
                format!("SELECT {REVIEW_COLUMNS} FROM reviews ORDER BY created_at DESC")
            };
            let mut rows = handle.conn().query(&sql, ()).await?;
            let mut reviews = Vec::new();
            while let Some(row) = rows.next().await? {
                reviews.push(row_to_review(&row)?);
            }
            Ok(reviews)
        })
        .await
    }

    /// Publish or unpublish a review.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the review does not exist.
    pub async fn set_review_published(
        &self,
        id: &str,
        published: bool,
    ) -> Result<(), DatabaseError> {
        with_retry(self.supervisor(), self.retry_config(), move || async move {
            let handle = self.supervisor().get_handle().await?;
            let changed = handle
                .conn()
                .execute(
                    "UPDATE reviews SET published = ?2 WHERE id = ?1",
                    libsql::params![id, i64::from(published)],
                )
                .await?;
            if changed == 0 {
                return Err(DatabaseError::NoResult);
            }
            Ok(())
        })
        .await
    }

    /// Delete a review.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the delete fails after all retries.
    pub async fn delete_review(&self, id: &str) -> Result<bool, DatabaseError> {
        with_retry(self.supervisor(), self.retry_config(), move || async move {
            let handle = self.supervisor().get_handle().await?;
            let changed = handle
                .conn()
                .execute("DELETE FROM reviews WHERE id = ?1", [id])
                .await?;
            Ok(changed > 0)
        })
        .await
    }

    async fn fetch_review(
        &self,
        handle: &crate::connector::DbHandle,
        id: &str,
    ) -> Result<Option<Review>, DatabaseError> {
        let mut rows = handle
            .conn()
            .query(
                &format!("SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = ?1"),
                [id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_review(&row)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixwell_core::enums::ReviewSource;
    use pretty_assertions::assert_eq;

    fn five_stars() -> ReviewDraft {
        ReviewDraft {
            author: "Priya N.".into(),
            rating: 5,
            body: "Dryer fixed the same afternoon. Fair price.".into(),
            source: ReviewSource::Site,
        }
    }

    #[tokio::test]
    async fn reviews_start_unpublished() {
        let svc = StoreService::open_local(":memory:").await.unwrap();
        let review = svc.create_review(&five_stars()).await.unwrap();
        assert!(!review.published);
        assert_eq!(review.rating, 5);
        assert_eq!(review.source, ReviewSource::Site);
    }

    #[tokio::test]
    async fn moderation_flow_controls_visibility() {
        let svc = StoreService::open_local(":memory:").await.unwrap();
        let review = svc.create_review(&five_stars()).await.unwrap();

        assert!(svc.list_reviews(true).await.unwrap().is_empty());
        svc.set_review_published(&review.id, true).await.unwrap();
        assert_eq!(svc.list_reviews(true).await.unwrap().len(), 1);
        assert_eq!(svc.list_reviews(false).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn out_of_range_rating_is_rejected() {
        // File-backed so the mid-retry reconnect keeps the schema around.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fixwell.db");
        let svc = StoreService::open_local(path.to_str().unwrap())
            .await
            .unwrap();
        let mut draft = five_stars();
        draft.rating = 6;
        assert!(svc.create_review(&draft).await.is_err());
    }

    #[tokio::test]
    async fn delete_review_round_trip() {
        let svc = StoreService::open_local(":memory:").await.unwrap();
        let review = svc.create_review(&five_stars()).await.unwrap();
        assert!(svc.delete_review(&review.id).await.unwrap());
        assert!(svc.get_review(&review.id).await.unwrap().is_none());
    }
}

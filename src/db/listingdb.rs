use async_trait::async_trait;
use uuid::Uuid;

use crate::db::db::DBClient;
use crate::dtos::propertydtos::CreateListingDto;
use crate::dtos::querydtos::ListScope;
use crate::models::propertymodel::{Listing, ListingStatus};

const LISTING_COLUMNS: &str = "id, title, location, min_price, max_price, agent_name, \
     agent_email, image_url, facilities, description, status, created_at";

#[async_trait]
pub trait ListingExt {
    async fn create_listing(&self, data: CreateListingDto) -> Result<Listing, sqlx::Error>;

    async fn get_listing(&self, listing_id: Uuid) -> Result<Option<Listing>, sqlx::Error>;

    async fn get_listings(
        &self,
        scope: ListScope,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Listing>, sqlx::Error>;

    async fn get_listings_by_status(
        &self,
        status: ListingStatus,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Listing>, sqlx::Error>;

    /// Guarded transition `pending -> verified`. Returns the updated
    /// listing iff exactly this transition happened; `None` otherwise
    /// (absent id, already verified, already rejected).
    async fn verify_listing(&self, listing_id: Uuid) -> Result<Option<Listing>, sqlx::Error>;

    /// Sets `rejected` on anything that is not verified. Returns the
    /// number of matched documents; re-rejecting matches and is not an
    /// error.
    async fn reject_listing(&self, listing_id: Uuid) -> Result<u64, sqlx::Error>;

    async fn delete_listing(&self, listing_id: Uuid) -> Result<u64, sqlx::Error>;
}

#[async_trait]
impl ListingExt for DBClient {
    async fn create_listing(&self, data: CreateListingDto) -> Result<Listing, sqlx::Error> {
        sqlx::query_as::<_, Listing>(&format!(
            "INSERT INTO agent_listings \
                 (title, location, min_price, max_price, agent_name, agent_email, \
                  image_url, facilities, description, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {}",
            LISTING_COLUMNS
        ))
        .bind(data.title)
        .bind(data.location)
        .bind(data.min_price)
        .bind(data.max_price)
        .bind(data.agent_name)
        .bind(data.agent_email)
        .bind(data.image_url)
        .bind(data.facilities)
        .bind(data.description)
        .bind(ListingStatus::Pending)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_listing(&self, listing_id: Uuid) -> Result<Option<Listing>, sqlx::Error> {
        sqlx::query_as::<_, Listing>(&format!(
            "SELECT {} FROM agent_listings WHERE id = $1",
            LISTING_COLUMNS
        ))
        .bind(listing_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_listings(
        &self,
        scope: ListScope,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Listing>, sqlx::Error> {
        let offset = (page - 1) * limit as u32;

        match scope {
            ListScope::All => {
                sqlx::query_as::<_, Listing>(&format!(
                    "SELECT {} FROM agent_listings ORDER BY created_at DESC LIMIT $1 OFFSET $2",
                    LISTING_COLUMNS
                ))
                .bind(limit as i64)
                .bind(offset as i64)
                .fetch_all(&self.pool)
                .await
            }
            ListScope::ByEmail(email) => {
                sqlx::query_as::<_, Listing>(&format!(
                    "SELECT {} FROM agent_listings WHERE agent_email = $1 \
                     ORDER BY created_at DESC LIMIT $2 OFFSET $3",
                    LISTING_COLUMNS
                ))
                .bind(email)
                .bind(limit as i64)
                .bind(offset as i64)
                .fetch_all(&self.pool)
                .await
            }
        }
    }

    async fn get_listings_by_status(
        &self,
        status: ListingStatus,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Listing>, sqlx::Error> {
        let offset = (page - 1) * limit as u32;

        sqlx::query_as::<_, Listing>(&format!(
            "SELECT {} FROM agent_listings WHERE status = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
            LISTING_COLUMNS
        ))
        .bind(status)
        .bind(limit as i64)
        .bind(offset as i64)
        .fetch_all(&self.pool)
        .await
    }

    async fn verify_listing(&self, listing_id: Uuid) -> Result<Option<Listing>, sqlx::Error> {
        sqlx::query_as::<_, Listing>(&format!(
            "UPDATE agent_listings SET status = $1 WHERE id = $2 AND status = $3 RETURNING {}",
            LISTING_COLUMNS
        ))
        .bind(ListingStatus::Verified)
        .bind(listing_id)
        .bind(ListingStatus::Pending)
        .fetch_optional(&self.pool)
        .await
    }

    async fn reject_listing(&self, listing_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE agent_listings SET status = $1 WHERE id = $2 AND status <> $3",
        )
        .bind(ListingStatus::Rejected)
        .bind(listing_id)
        .bind(ListingStatus::Verified)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete_listing(&self, listing_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM agent_listings WHERE id = $1")
            .bind(listing_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

use async_trait::async_trait;
use uuid::Uuid;

use crate::db::db::DBClient;
use crate::dtos::wishlistdtos::CreateWishlistDto;
use crate::models::wishlistmodel::WishlistEntry;

const WISHLIST_COLUMNS: &str =
    "id, owner_email, property_id, title, location, image_url, created_at";

#[async_trait]
pub trait WishlistExt {
    async fn add_wishlist_entry(
        &self,
        owner_email: &str,
        data: CreateWishlistDto,
    ) -> Result<WishlistEntry, sqlx::Error>;

    async fn get_wishlist_by_owner(
        &self,
        owner_email: &str,
    ) -> Result<Vec<WishlistEntry>, sqlx::Error>;

    /// Scoped to the owner so nobody can delete another user's entry.
    async fn delete_wishlist_entry(
        &self,
        entry_id: Uuid,
        owner_email: &str,
    ) -> Result<u64, sqlx::Error>;
}

#[async_trait]
impl WishlistExt for DBClient {
    async fn add_wishlist_entry(
        &self,
        owner_email: &str,
        data: CreateWishlistDto,
    ) -> Result<WishlistEntry, sqlx::Error> {
        sqlx::query_as::<_, WishlistEntry>(&format!(
            "INSERT INTO wishlists (owner_email, property_id, title, location, image_url) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            WISHLIST_COLUMNS
        ))
        .bind(owner_email)
        .bind(data.property_id)
        .bind(data.title)
        .bind(data.location)
        .bind(data.image_url)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_wishlist_by_owner(
        &self,
        owner_email: &str,
    ) -> Result<Vec<WishlistEntry>, sqlx::Error> {
        sqlx::query_as::<_, WishlistEntry>(&format!(
            "SELECT {} FROM wishlists WHERE owner_email = $1 ORDER BY created_at DESC",
            WISHLIST_COLUMNS
        ))
        .bind(owner_email)
        .fetch_all(&self.pool)
        .await
    }

    async fn delete_wishlist_entry(
        &self,
        entry_id: Uuid,
        owner_email: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM wishlists WHERE id = $1 AND owner_email = $2")
            .bind(entry_id)
            .bind(owner_email)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

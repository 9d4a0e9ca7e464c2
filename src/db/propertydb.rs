use async_trait::async_trait;
use uuid::Uuid;

use crate::db::db::DBClient;
use crate::dtos::querydtos::PropertySort;
use crate::models::propertymodel::{AdStatus, Advertise, Listing, Property};

const PROPERTY_COLUMNS: &str = "id, listing_id, title, location, min_price, max_price, \
     agent_name, agent_email, image_url, facilities, description, ad_status, created_at";

const ADVERTISE_COLUMNS: &str =
    "id, property_id, title, location, min_price, max_price, image_url, created_at";

#[async_trait]
pub trait PropertyExt {
    /// Copies a freshly verified listing into the public collection.
    /// The unique constraint on `listing_id` backs the one-property-per-
    /// listing invariant at the storage layer.
    async fn create_property_from_listing(
        &self,
        listing: &Listing,
    ) -> Result<Property, sqlx::Error>;

    async fn get_property(&self, property_id: Uuid) -> Result<Option<Property>, sqlx::Error>;

    async fn get_properties(
        &self,
        sort: PropertySort,
        page: u32,
        size: usize,
    ) -> Result<Vec<Property>, sqlx::Error>;

    async fn get_property_count(&self) -> Result<i64, sqlx::Error>;

    /// Flips the advertisement status. Returns the updated property, or
    /// `None` when the id matched nothing.
    async fn set_ad_status(
        &self,
        property_id: Uuid,
        ad_status: AdStatus,
    ) -> Result<Option<Property>, sqlx::Error>;

    /// Removes everything a fraudulent agent has published.
    async fn delete_properties_by_agent(&self, agent_email: &str) -> Result<u64, sqlx::Error>;

    async fn upsert_advertise(&self, property: &Property) -> Result<Advertise, sqlx::Error>;

    async fn delete_advertise(&self, property_id: Uuid) -> Result<u64, sqlx::Error>;

    async fn get_advertises(&self) -> Result<Vec<Advertise>, sqlx::Error>;
}

#[async_trait]
impl PropertyExt for DBClient {
    async fn create_property_from_listing(
        &self,
        listing: &Listing,
    ) -> Result<Property, sqlx::Error> {
        sqlx::query_as::<_, Property>(&format!(
            "INSERT INTO properties \
                 (listing_id, title, location, min_price, max_price, agent_name, \
                  agent_email, image_url, facilities, description, ad_status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {}",
            PROPERTY_COLUMNS
        ))
        .bind(listing.id)
        .bind(&listing.title)
        .bind(&listing.location)
        .bind(listing.min_price)
        .bind(listing.max_price)
        .bind(&listing.agent_name)
        .bind(&listing.agent_email)
        .bind(&listing.image_url)
        .bind(&listing.facilities)
        .bind(&listing.description)
        .bind(AdStatus::NotAdd)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_property(&self, property_id: Uuid) -> Result<Option<Property>, sqlx::Error> {
        sqlx::query_as::<_, Property>(&format!(
            "SELECT {} FROM properties WHERE id = $1",
            PROPERTY_COLUMNS
        ))
        .bind(property_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_properties(
        &self,
        sort: PropertySort,
        page: u32,
        size: usize,
    ) -> Result<Vec<Property>, sqlx::Error> {
        let offset = (page - 1) * size as u32;

        // The order clause comes from a closed enum pair, never from
        // raw caller input.
        sqlx::query_as::<_, Property>(&format!(
            "SELECT {} FROM properties ORDER BY {} LIMIT $1 OFFSET $2",
            PROPERTY_COLUMNS,
            sort.order_clause()
        ))
        .bind(size as i64)
        .bind(offset as i64)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_property_count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM properties")
            .fetch_one(&self.pool)
            .await
    }

    async fn set_ad_status(
        &self,
        property_id: Uuid,
        ad_status: AdStatus,
    ) -> Result<Option<Property>, sqlx::Error> {
        sqlx::query_as::<_, Property>(&format!(
            "UPDATE properties SET ad_status = $1 WHERE id = $2 RETURNING {}",
            PROPERTY_COLUMNS
        ))
        .bind(ad_status)
        .bind(property_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_properties_by_agent(&self, agent_email: &str) -> Result<u64, sqlx::Error> {
        sqlx::query(
            "DELETE FROM advertises WHERE property_id IN \
             (SELECT id FROM properties WHERE agent_email = $1)",
        )
        .bind(agent_email)
        .execute(&self.pool)
        .await?;

        let result = sqlx::query("DELETE FROM properties WHERE agent_email = $1")
            .bind(agent_email)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn upsert_advertise(&self, property: &Property) -> Result<Advertise, sqlx::Error> {
        sqlx::query_as::<_, Advertise>(&format!(
            "INSERT INTO advertises (property_id, title, location, min_price, max_price, image_url) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (property_id) DO UPDATE SET title = $2, location = $3, \
                 min_price = $4, max_price = $5, image_url = $6 \
             RETURNING {}",
            ADVERTISE_COLUMNS
        ))
        .bind(property.id)
        .bind(&property.title)
        .bind(&property.location)
        .bind(property.min_price)
        .bind(property.max_price)
        .bind(&property.image_url)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_advertise(&self, property_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM advertises WHERE property_id = $1")
            .bind(property_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn get_advertises(&self) -> Result<Vec<Advertise>, sqlx::Error> {
        sqlx::query_as::<_, Advertise>(&format!(
            "SELECT {} FROM advertises ORDER BY created_at DESC",
            ADVERTISE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
    }
}

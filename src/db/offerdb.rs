use async_trait::async_trait;
use uuid::Uuid;

use crate::db::db::DBClient;
use crate::dtos::offerdtos::CreateOfferDto;
use crate::dtos::querydtos::ListScope;
use crate::models::offermodel::{Offer, OfferStatus};

const OFFER_COLUMNS: &str = "id, property_id, title, location, buyer_name, buyer_email, \
     agent_email, offered_price, status, created_at";

#[async_trait]
pub trait OfferExt {
    async fn create_offer(&self, data: CreateOfferDto) -> Result<Offer, sqlx::Error>;

    async fn get_offer(&self, offer_id: Uuid) -> Result<Option<Offer>, sqlx::Error>;

    async fn get_offers_by_buyer(
        &self,
        scope: ListScope,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Offer>, sqlx::Error>;

    async fn get_offers_by_agent(
        &self,
        agent_email: &str,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Offer>, sqlx::Error>;

    /// Guarded transition `pending -> accepted`, scoped to the agent the
    /// offer was addressed to. `None` when nothing matched.
    async fn accept_offer(
        &self,
        offer_id: Uuid,
        agent_email: &str,
    ) -> Result<Option<Offer>, sqlx::Error>;

    /// Guarded transition `pending -> rejected`, same scoping.
    async fn reject_offer(
        &self,
        offer_id: Uuid,
        agent_email: &str,
    ) -> Result<Option<Offer>, sqlx::Error>;

    /// Guarded transition `accepted -> brought`, run after payment
    /// capture.
    async fn mark_offer_paid(&self, offer_id: Uuid) -> Result<Option<Offer>, sqlx::Error>;

    async fn delete_offer(&self, offer_id: Uuid) -> Result<u64, sqlx::Error>;
}

#[async_trait]
impl OfferExt for DBClient {
    async fn create_offer(&self, data: CreateOfferDto) -> Result<Offer, sqlx::Error> {
        sqlx::query_as::<_, Offer>(&format!(
            "INSERT INTO offers \
                 (property_id, title, location, buyer_name, buyer_email, agent_email, \
                  offered_price, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {}",
            OFFER_COLUMNS
        ))
        .bind(data.property_id)
        .bind(data.title)
        .bind(data.location)
        .bind(data.buyer_name)
        .bind(data.buyer_email)
        .bind(data.agent_email)
        .bind(data.offered_price)
        .bind(OfferStatus::Pending)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_offer(&self, offer_id: Uuid) -> Result<Option<Offer>, sqlx::Error> {
        sqlx::query_as::<_, Offer>(&format!(
            "SELECT {} FROM offers WHERE id = $1",
            OFFER_COLUMNS
        ))
        .bind(offer_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_offers_by_buyer(
        &self,
        scope: ListScope,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Offer>, sqlx::Error> {
        let offset = (page - 1) * limit as u32;

        match scope {
            ListScope::All => {
                sqlx::query_as::<_, Offer>(&format!(
                    "SELECT {} FROM offers ORDER BY created_at DESC LIMIT $1 OFFSET $2",
                    OFFER_COLUMNS
                ))
                .bind(limit as i64)
                .bind(offset as i64)
                .fetch_all(&self.pool)
                .await
            }
            ListScope::ByEmail(email) => {
                sqlx::query_as::<_, Offer>(&format!(
                    "SELECT {} FROM offers WHERE buyer_email = $1 \
                     ORDER BY created_at DESC LIMIT $2 OFFSET $3",
                    OFFER_COLUMNS
                ))
                .bind(email)
                .bind(limit as i64)
                .bind(offset as i64)
                .fetch_all(&self.pool)
                .await
            }
        }
    }

    async fn get_offers_by_agent(
        &self,
        agent_email: &str,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Offer>, sqlx::Error> {
        let offset = (page - 1) * limit as u32;

        sqlx::query_as::<_, Offer>(&format!(
            "SELECT {} FROM offers WHERE agent_email = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
            OFFER_COLUMNS
        ))
        .bind(agent_email)
        .bind(limit as i64)
        .bind(offset as i64)
        .fetch_all(&self.pool)
        .await
    }

    async fn accept_offer(
        &self,
        offer_id: Uuid,
        agent_email: &str,
    ) -> Result<Option<Offer>, sqlx::Error> {
        sqlx::query_as::<_, Offer>(&format!(
            "UPDATE offers SET status = $1 \
             WHERE id = $2 AND status = $3 AND agent_email = $4 \
             RETURNING {}",
            OFFER_COLUMNS
        ))
        .bind(OfferStatus::Accepted)
        .bind(offer_id)
        .bind(OfferStatus::Pending)
        .bind(agent_email)
        .fetch_optional(&self.pool)
        .await
    }

    async fn reject_offer(
        &self,
        offer_id: Uuid,
        agent_email: &str,
    ) -> Result<Option<Offer>, sqlx::Error> {
        sqlx::query_as::<_, Offer>(&format!(
            "UPDATE offers SET status = $1 \
             WHERE id = $2 AND status = $3 AND agent_email = $4 \
             RETURNING {}",
            OFFER_COLUMNS
        ))
        .bind(OfferStatus::Rejected)
        .bind(offer_id)
        .bind(OfferStatus::Pending)
        .bind(agent_email)
        .fetch_optional(&self.pool)
        .await
    }

    async fn mark_offer_paid(&self, offer_id: Uuid) -> Result<Option<Offer>, sqlx::Error> {
        sqlx::query_as::<_, Offer>(&format!(
            "UPDATE offers SET status = $1 WHERE id = $2 AND status = $3 RETURNING {}",
            OFFER_COLUMNS
        ))
        .bind(OfferStatus::Brought)
        .bind(offer_id)
        .bind(OfferStatus::Accepted)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_offer(&self, offer_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM offers WHERE id = $1")
            .bind(offer_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

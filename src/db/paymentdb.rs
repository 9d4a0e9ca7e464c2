use async_trait::async_trait;
use uuid::Uuid;

use crate::db::db::DBClient;
use crate::models::paymentmodel::Payment;

const PAYMENT_COLUMNS: &str =
    "id, offer_id, payer_email, agent_email, amount, transaction_id, created_at";

#[async_trait]
pub trait PaymentExt {
    async fn create_payment(
        &self,
        offer_id: Uuid,
        payer_email: &str,
        agent_email: &str,
        amount: i64,
        transaction_id: &str,
    ) -> Result<Payment, sqlx::Error>;

    async fn get_payments_by_payer(
        &self,
        payer_email: &str,
    ) -> Result<Vec<Payment>, sqlx::Error>;
}

#[async_trait]
impl PaymentExt for DBClient {
    async fn create_payment(
        &self,
        offer_id: Uuid,
        payer_email: &str,
        agent_email: &str,
        amount: i64,
        transaction_id: &str,
    ) -> Result<Payment, sqlx::Error> {
        sqlx::query_as::<_, Payment>(&format!(
            "INSERT INTO payments (offer_id, payer_email, agent_email, amount, transaction_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            PAYMENT_COLUMNS
        ))
        .bind(offer_id)
        .bind(payer_email)
        .bind(agent_email)
        .bind(amount)
        .bind(transaction_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_payments_by_payer(
        &self,
        payer_email: &str,
    ) -> Result<Vec<Payment>, sqlx::Error> {
        sqlx::query_as::<_, Payment>(&format!(
            "SELECT {} FROM payments WHERE payer_email = $1 ORDER BY created_at DESC",
            PAYMENT_COLUMNS
        ))
        .bind(payer_email)
        .fetch_all(&self.pool)
        .await
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Record of a completed purchase. Written once, never updated.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Payment {
    pub id: Uuid,
    pub offer_id: Uuid,
    pub payer_email: String,
    pub agent_email: String,
    pub amount: i64,
    pub transaction_id: String,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Review {
    pub id: Uuid,
    pub reviewer_name: String,
    pub reviewer_email: String,
    pub rating: i32,
    pub comment: String,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

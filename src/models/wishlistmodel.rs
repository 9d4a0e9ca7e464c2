use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct WishlistEntry {
    pub id: Uuid,
    pub owner_email: String,
    pub property_id: Uuid,
    pub title: String,
    pub location: String,
    pub image_url: Option<String>,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "listing_status", rename_all = "lowercase")]
pub enum ListingStatus {
    Pending,
    Verified,
    Rejected,
}

impl ListingStatus {
    pub fn to_str(&self) -> &str {
        match self {
            ListingStatus::Pending => "pending",
            ListingStatus::Verified => "verified",
            ListingStatus::Rejected => "rejected",
        }
    }

    /// Only a pending listing may become verified. Verified and rejected
    /// are terminal for verification purposes.
    pub fn can_verify(&self) -> bool {
        matches!(self, ListingStatus::Pending)
    }

    /// Rejecting is idempotent, but a verified listing has already been
    /// published and cannot be pulled back through this transition.
    pub fn can_reject(&self) -> bool {
        !matches!(self, ListingStatus::Verified)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "ad_status", rename_all = "snake_case")]
pub enum AdStatus {
    NotAdd,
    Advertised,
}

impl AdStatus {
    pub fn to_str(&self) -> &str {
        match self {
            AdStatus::NotAdd => "not_add",
            AdStatus::Advertised => "advertised",
        }
    }
}

/// An agent-submitted listing awaiting admin review.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Listing {
    pub id: Uuid,
    pub title: String,
    pub location: String,
    pub min_price: i64,
    pub max_price: i64,
    pub agent_name: String,
    pub agent_email: String,
    pub image_url: Option<String>,
    pub facilities: Option<String>,
    pub description: Option<String>,
    pub status: ListingStatus,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// The public, admin-approved form of a listing. Immutable except for
/// its advertisement status.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Property {
    pub id: Uuid,
    pub listing_id: Uuid,
    pub title: String,
    pub location: String,
    pub min_price: i64,
    pub max_price: i64,
    pub agent_name: String,
    pub agent_email: String,
    pub image_url: Option<String>,
    pub facilities: Option<String>,
    pub description: Option<String>,
    pub ad_status: AdStatus,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Entry in the advertisement collection, kept in sync with
/// `Property.ad_status` by the placement handlers.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Advertise {
    pub id: Uuid,
    pub property_id: Uuid,
    pub title: String,
    pub location: String,
    pub min_price: i64,
    pub max_price: i64,
    pub image_url: Option<String>,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_pending_listings_can_be_verified() {
        assert!(ListingStatus::Pending.can_verify());
        assert!(!ListingStatus::Verified.can_verify());
        assert!(!ListingStatus::Rejected.can_verify());
    }

    #[test]
    fn reject_is_idempotent_but_never_unpublishes() {
        assert!(ListingStatus::Pending.can_reject());
        assert!(ListingStatus::Rejected.can_reject());
        assert!(!ListingStatus::Verified.can_reject());
    }

    #[test]
    fn ad_status_names_match_store_values() {
        assert_eq!(AdStatus::NotAdd.to_str(), "not_add");
        assert_eq!(AdStatus::Advertised.to_str(), "advertised");
    }
}

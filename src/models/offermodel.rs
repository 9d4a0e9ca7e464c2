use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "offer_status", rename_all = "lowercase")]
pub enum OfferStatus {
    Pending,
    Accepted,
    Rejected,
    Brought,
}

impl OfferStatus {
    pub fn to_str(&self) -> &str {
        match self {
            OfferStatus::Pending => "pending",
            OfferStatus::Accepted => "accepted",
            OfferStatus::Rejected => "rejected",
            OfferStatus::Brought => "brought",
        }
    }

    /// An agent decision (accept or reject) is only valid while the
    /// offer is still pending.
    pub fn can_decide(&self) -> bool {
        matches!(self, OfferStatus::Pending)
    }

    /// Payment completion requires a prior acceptance.
    pub fn can_mark_paid(&self) -> bool {
        matches!(self, OfferStatus::Accepted)
    }
}

/// A buyer's proposal to purchase a published property.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Offer {
    pub id: Uuid,
    pub property_id: Uuid,
    pub title: String,
    pub location: String,
    pub buyer_name: String,
    pub buyer_email: String,
    pub agent_email: String,
    pub offered_price: i64,
    pub status: OfferStatus,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agent_decisions_only_apply_to_pending_offers() {
        assert!(OfferStatus::Pending.can_decide());
        assert!(!OfferStatus::Accepted.can_decide());
        assert!(!OfferStatus::Rejected.can_decide());
        assert!(!OfferStatus::Brought.can_decide());
    }

    #[test]
    fn payment_requires_prior_acceptance() {
        assert!(OfferStatus::Accepted.can_mark_paid());
        assert!(!OfferStatus::Pending.can_mark_paid());
        assert!(!OfferStatus::Rejected.can_mark_paid());
        assert!(!OfferStatus::Brought.can_mark_paid());
    }

    #[test]
    fn no_decision_leaves_a_brought_offer() {
        // A paid-for offer can be neither re-accepted nor rejected.
        assert!(!OfferStatus::Brought.can_decide());
        assert!(!OfferStatus::Brought.can_mark_paid());
    }
}

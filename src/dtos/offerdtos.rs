use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::offermodel::Offer;

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CreateOfferDto {
    pub property_id: Uuid,

    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,

    #[validate(length(min = 1, message = "Buyer name is required"))]
    pub buyer_name: String,

    #[validate(
        length(min = 1, message = "Buyer email is required"),
        email(message = "Buyer email is invalid")
    )]
    pub buyer_email: String,

    #[validate(
        length(min = 1, message = "Agent email is required"),
        email(message = "Agent email is invalid")
    )]
    pub agent_email: String,

    #[validate(range(min = 1, message = "Offered price must be positive"))]
    pub offered_price: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OfferResponseDto {
    pub status: String,
    pub data: Offer,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OfferListResponseDto {
    pub status: String,
    pub offers: Vec<Offer>,
    pub results: i64,
}

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::propertymodel::{Advertise, Listing, Property};

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct CreateListingDto {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,

    #[validate(range(min = 0, message = "Minimum price must not be negative"))]
    pub min_price: i64,

    #[validate(range(min = 0, message = "Maximum price must not be negative"))]
    pub max_price: i64,

    #[validate(length(min = 1, message = "Agent name is required"))]
    pub agent_name: String,

    #[validate(
        length(min = 1, message = "Agent email is required"),
        email(message = "Agent email is invalid")
    )]
    pub agent_email: String,

    pub image_url: Option<String>,
    pub facilities: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListingResponseDto {
    pub status: String,
    pub data: Listing,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListingListResponseDto {
    pub status: String,
    pub listings: Vec<Listing>,
    pub results: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PropertyResponseDto {
    pub status: String,
    pub data: Property,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PropertyListResponseDto {
    pub status: String,
    pub properties: Vec<Property>,
    pub results: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdvertiseListResponseDto {
    pub status: String,
    pub advertises: Vec<Advertise>,
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::wishlistmodel::WishlistEntry;

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CreateWishlistDto {
    pub property_id: Uuid,

    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,

    pub image_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WishlistResponseDto {
    pub status: String,
    pub data: WishlistEntry,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WishlistListResponseDto {
    pub status: String,
    pub wishlists: Vec<WishlistEntry>,
}

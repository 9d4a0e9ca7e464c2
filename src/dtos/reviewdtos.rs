use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::reviewmodel::Review;

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CreateReviewDto {
    #[validate(length(min = 1, message = "Reviewer name is required"))]
    pub reviewer_name: String,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,

    #[validate(length(min = 1, message = "Comment is required"))]
    pub comment: String,
}

#[derive(Serialize, Deserialize, Validate)]
pub struct ReviewListQueryDto {
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewResponseDto {
    pub status: String,
    pub data: Review,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewListResponseDto {
    pub status: String,
    pub reviews: Vec<Review>,
}

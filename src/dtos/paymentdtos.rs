use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::paymentmodel::Payment;

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CreatePaymentIntentDto {
    /// Amount in minor currency units.
    #[validate(range(min = 1, message = "Price must be positive"))]
    pub price: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PaymentIntentResponseDto {
    pub status: String,
    #[serde(rename = "clientSecret")]
    pub client_secret: String,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct RecordPaymentDto {
    pub offer_id: Uuid,

    #[validate(
        length(min = 1, message = "Agent email is required"),
        email(message = "Agent email is invalid")
    )]
    pub agent_email: String,

    #[validate(range(min = 1, message = "Amount must be positive"))]
    pub amount: i64,

    #[validate(length(min = 1, message = "Transaction id is required"))]
    pub transaction_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PaymentResponseDto {
    pub status: String,
    pub data: Payment,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PaymentListResponseDto {
    pub status: String,
    pub payments: Vec<Payment>,
}

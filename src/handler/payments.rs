use std::sync::Arc;

use axum::{
    extract::Query,
    middleware,
    response::IntoResponse,
    routing::post,
    Extension, Json, Router,
};
use validator::Validate;

use crate::{
    db::{offerdb::OfferExt, paymentdb::PaymentExt},
    dtos::paymentdtos::{
        CreatePaymentIntentDto, PaymentIntentResponseDto, PaymentListResponseDto,
        PaymentResponseDto, RecordPaymentDto,
    },
    dtos::querydtos::EmailScopeQueryDto,
    error::{ErrorMessage, HttpError},
    middleware::{auth, JWTAuthMiddeware},
    AppState,
};

pub fn payments_handler() -> Router {
    Router::new()
        .route("/", post(record_payment).get(get_payments))
        .layer(middleware::from_fn(auth))
}

/// Asks the payment provider for a client secret the web client uses to
/// capture the card payment. Amount is in minor currency units.
pub async fn create_payment_intent(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreatePaymentIntentDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let client_secret = app_state
        .payment_provider
        .create_payment_intent(body.price, "usd")
        .await?;

    Ok(Json(PaymentIntentResponseDto {
        status: "success".to_string(),
        client_secret,
    }))
}

/// Records the completed transaction and finalizes the sale: the offer
/// moves `accepted -> brought`, and only then is the payment written.
pub async fn record_payment(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<RecordPaymentDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let offer = app_state
        .db_client
        .get_offer(body.offer_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found(ErrorMessage::OfferNotFound.to_string()))?;

    // Only the buyer who made the offer can pay for it.
    if offer.buyer_email != user.user.email {
        return Err(HttpError::forbidden(ErrorMessage::PermissionDenied.to_string()));
    }

    if !offer.status.can_mark_paid() {
        return Err(HttpError::bad_request(ErrorMessage::InvalidTransition.to_string()));
    }

    let brought = app_state
        .db_client
        .mark_offer_paid(body.offer_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let offer = brought
        .ok_or_else(|| HttpError::bad_request(ErrorMessage::InvalidTransition.to_string()))?;

    let payment = app_state
        .db_client
        .create_payment(
            offer.id,
            &user.user.email,
            &body.agent_email,
            body.amount,
            &body.transaction_id,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    tracing::info!(
        "offer {} brought by {}, payment {} recorded",
        offer.id,
        user.user.email,
        payment.id
    );

    Ok(Json(PaymentResponseDto {
        status: "success".to_string(),
        data: payment,
    }))
}

pub async fn get_payments(
    Query(query_params): Query<EmailScopeQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    query_params
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let email = query_params.email.unwrap_or_else(|| user.user.email.clone());
    if email != user.user.email {
        return Err(HttpError::forbidden(ErrorMessage::PermissionDenied.to_string()));
    }

    let payments = app_state
        .db_client
        .get_payments_by_payer(&email)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(PaymentListResponseDto {
        status: "success".to_string(),
        payments,
    }))
}

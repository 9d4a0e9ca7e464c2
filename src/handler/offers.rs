use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    middleware,
    response::IntoResponse,
    routing::{delete, get, patch, post},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::offerdb::OfferExt,
    dtos::offerdtos::{CreateOfferDto, OfferListResponseDto, OfferResponseDto},
    dtos::querydtos::{EmailScopeQueryDto, ListScope},
    dtos::userdtos::AffectedResponseDto,
    error::{ErrorMessage, HttpError},
    middleware::{auth, role_check, JWTAuthMiddeware},
    models::offermodel::OfferStatus,
    models::usermodel::UserRole,
    AppState,
};

pub fn offers_handler() -> Router {
    let buyer_routes = Router::new()
        .route("/", post(create_offer).get(get_buyer_offers))
        .route("/:id", delete(delete_offer))
        .layer(middleware::from_fn(auth));

    let agent_routes = Router::new()
        .route("/agent", get(get_agent_offers))
        .route("/accept/:id", patch(accept_offer))
        .route("/reject/:id", patch(reject_offer))
        .layer(middleware::from_fn(|state, req, next| {
            role_check(state, req, next, vec![UserRole::Agent])
        }))
        .layer(middleware::from_fn(auth));

    Router::new().merge(buyer_routes).merge(agent_routes)
}

/// A buyer may hold any number of offers against the same property.
pub async fn create_offer(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateOfferDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    if body.buyer_email != user.user.email {
        return Err(HttpError::forbidden(ErrorMessage::PermissionDenied.to_string()));
    }

    let offer = app_state
        .db_client
        .create_offer(body)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    tracing::info!(
        "buyer {} offered {} on property {}",
        offer.buyer_email,
        offer.offered_price,
        offer.property_id
    );

    Ok(Json(OfferResponseDto {
        status: "success".to_string(),
        data: offer,
    }))
}

pub async fn get_buyer_offers(
    Query(query_params): Query<EmailScopeQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    query_params
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let scope = match ListScope::from_query(query_params.email) {
        ListScope::All => ListScope::ByEmail(user.user.email.clone()),
        ListScope::ByEmail(email) if email != user.user.email => {
            return Err(HttpError::forbidden(ErrorMessage::PermissionDenied.to_string()));
        }
        scope => scope,
    };

    let page = query_params.page.unwrap_or(1);
    let limit = query_params.limit.unwrap_or(10);

    let offers = app_state
        .db_client
        .get_offers_by_buyer(scope, page as u32, limit)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let results = offers.len() as i64;

    Ok(Json(OfferListResponseDto {
        status: "success".to_string(),
        offers,
        results,
    }))
}

pub async fn get_agent_offers(
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

    let page = query_params.page.unwrap_or(1);
    let limit = query_params.limit.unwrap_or(10);

    let offers = app_state
        .db_client
        .get_offers_by_agent(&email, page as u32, limit)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let results = offers.len() as i64;

    Ok(Json(OfferListResponseDto {
        status: "success".to_string(),
        offers,
        results,
    }))
}

pub async fn accept_offer(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Path(offer_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    apply_decision(&app_state, offer_id, &user.user.email, OfferStatus::Accepted).await
}

pub async fn reject_offer(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Path(offer_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    apply_decision(&app_state, offer_id, &user.user.email, OfferStatus::Rejected).await
}

/// Runs the guarded pending-only transition, then classifies a miss:
/// absent offer, someone else's offer, or an offer already past
/// pending.
async fn apply_decision(
    app_state: &Arc<AppState>,
    offer_id: Uuid,
    agent_email: &str,
    decision: OfferStatus,
) -> Result<axum::response::Response, HttpError> {
    let updated = match decision {
        OfferStatus::Accepted => app_state.db_client.accept_offer(offer_id, agent_email).await,
        OfferStatus::Rejected => app_state.db_client.reject_offer(offer_id, agent_email).await,
        _ => {
            return Err(HttpError::server_error(
                "apply_decision only handles accept and reject",
            ))
        }
    }
    .map_err(|e| HttpError::server_error(e.to_string()))?;

    if let Some(offer) = updated {
        tracing::info!(
            "agent {} moved offer {} to {}",
            agent_email,
            offer.id,
            offer.status.to_str()
        );
        return Ok(Json(OfferResponseDto {
            status: "success".to_string(),
            data: offer,
        })
        .into_response());
    }

    let existing = app_state
        .db_client
        .get_offer(offer_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    match existing {
        None => Err(HttpError::not_found(ErrorMessage::OfferNotFound.to_string())),
        Some(offer) if offer.agent_email != agent_email => {
            Err(HttpError::forbidden(ErrorMessage::PermissionDenied.to_string()))
        }
        Some(offer) if !offer.status.can_decide() => {
            Err(HttpError::bad_request(ErrorMessage::InvalidTransition.to_string()))
        }
        // The guarded update lost a race it should have won; surface it.
        Some(_) => Err(HttpError::server_error("offer decision did not apply")),
    }
}

pub async fn delete_offer(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(offer_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let affected = app_state
        .db_client
        .delete_offer(offer_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(AffectedResponseDto {
        status: "success".to_string(),
        affected,
    }))
}

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
    db::{listingdb::ListingExt, propertydb::PropertyExt},
    dtos::propertydtos::{
        CreateListingDto, ListingListResponseDto, ListingResponseDto, PropertyResponseDto,
    },
    dtos::querydtos::{EmailScopeQueryDto, ListScope, RequestQueryDto},
    dtos::userdtos::AffectedResponseDto,
    error::{ErrorMessage, HttpError},
    middleware::{auth, role_check, JWTAuthMiddeware},
    models::propertymodel::ListingStatus,
    models::usermodel::UserRole,
    AppState,
};

pub fn listings_handler() -> Router {
    let agent_routes = Router::new()
        .route("/", post(create_listing).get(get_agent_listings))
        .layer(middleware::from_fn(|state, req, next| {
            role_check(state, req, next, vec![UserRole::Agent])
        }))
        .layer(middleware::from_fn(auth));

    let admin_routes = Router::new()
        .route("/pending", get(get_pending_listings))
        .route("/verify/:id", patch(verify_listing))
        .route("/reject/:id", patch(reject_listing))
        .layer(middleware::from_fn(|state, req, next| {
            role_check(state, req, next, vec![UserRole::Admin])
        }))
        .layer(middleware::from_fn(auth));

    let shared_routes = Router::new()
        .route("/:id", delete(delete_listing))
        .layer(middleware::from_fn(|state, req, next| {
            role_check(state, req, next, vec![UserRole::Agent, UserRole::Admin])
        }))
        .layer(middleware::from_fn(auth));

    Router::new()
        .merge(agent_routes)
        .merge(admin_routes)
        .merge(shared_routes)
}

pub async fn create_listing(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateListingDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    // The submission is tagged with the submitter's identity; an agent
    // cannot file a listing under another agent's email.
    if body.agent_email != user.user.email {
        return Err(HttpError::forbidden(ErrorMessage::PermissionDenied.to_string()));
    }

    let listing = app_state
        .db_client
        .create_listing(body)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    tracing::info!("agent {} submitted listing {}", listing.agent_email, listing.id);

    Ok(Json(ListingResponseDto {
        status: "success".to_string(),
        data: listing,
    }))
}

pub async fn get_agent_listings(
    Query(query_params): Query<EmailScopeQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    query_params
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    // Agents only ever see their own submissions; an unscoped query
    // falls back to the caller's identity.
    let scope = match ListScope::from_query(query_params.email) {
        ListScope::All => ListScope::ByEmail(user.user.email.clone()),
        ListScope::ByEmail(email) if email != user.user.email => {
            return Err(HttpError::forbidden(ErrorMessage::PermissionDenied.to_string()));
        }
        scope => scope,
    };

    let page = query_params.page.unwrap_or(1);
    let limit = query_params.limit.unwrap_or(10);

    let listings = app_state
        .db_client
        .get_listings(scope, page as u32, limit)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let results = listings.len() as i64;

    Ok(Json(ListingListResponseDto {
        status: "success".to_string(),
        listings,
        results,
    }))
}

pub async fn get_pending_listings(
    Query(query_params): Query<RequestQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    query_params
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = query_params.page.unwrap_or(1);
    let limit = query_params.limit.unwrap_or(10);

    let listings = app_state
        .db_client
        .get_listings_by_status(ListingStatus::Pending, page as u32, limit)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let results = listings.len() as i64;

    Ok(Json(ListingListResponseDto {
        status: "success".to_string(),
        listings,
        results,
    }))
}

/// Admin approval. The status flip and the public copy are tied
/// together: only the request that actually moved the listing out of
/// `pending` creates the property, so a repeated verify answers 404 and
/// never duplicates.
pub async fn verify_listing(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(listing_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let verified = app_state
        .db_client
        .verify_listing(listing_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let listing = match verified {
        Some(listing) => listing,
        None => {
            // Either the id matched nothing or the listing already left
            // pending; both answer 404 and nothing was published.
            if let Some(existing) = app_state
                .db_client
                .get_listing(listing_id)
                .await
                .map_err(|e| HttpError::server_error(e.to_string()))?
            {
                if !existing.status.can_verify() {
                    tracing::debug!(
                        "verify refused, listing {} is already {}",
                        existing.id,
                        existing.status.to_str()
                    );
                }
            }
            return Err(HttpError::not_found(ErrorMessage::ListingNotFound.to_string()));
        }
    };

    let property = app_state
        .db_client
        .create_property_from_listing(&listing)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    tracing::info!("listing {} verified, published as property {}", listing.id, property.id);

    Ok(Json(PropertyResponseDto {
        status: "success".to_string(),
        data: property,
    }))
}

/// Admin rejection. Re-rejecting matches zero or one documents and is
/// reported, not treated as an error.
pub async fn reject_listing(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(listing_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let affected = app_state
        .db_client
        .reject_listing(listing_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if affected == 0 {
        // A verified listing is terminal and cannot be pulled back; a
        // missing id is reported as zero matched documents.
        if let Some(existing) = app_state
            .db_client
            .get_listing(listing_id)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?
        {
            if !existing.status.can_reject() {
                return Err(HttpError::bad_request(
                    ErrorMessage::InvalidTransition.to_string(),
                ));
            }
        }
    }

    Ok(Json(AffectedResponseDto {
        status: "success".to_string(),
        affected,
    }))
}

pub async fn delete_listing(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(listing_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let affected = app_state
        .db_client
        .delete_listing(listing_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(AffectedResponseDto {
        status: "success".to_string(),
        affected,
    }))
}

use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    middleware,
    response::IntoResponse,
    routing::{delete, post},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::wishlistdb::WishlistExt,
    dtos::querydtos::EmailScopeQueryDto,
    dtos::userdtos::AffectedResponseDto,
    dtos::wishlistdtos::{CreateWishlistDto, WishlistListResponseDto, WishlistResponseDto},
    error::{ErrorMessage, HttpError},
    middleware::{auth, JWTAuthMiddeware},
    AppState,
};

pub fn wishlists_handler() -> Router {
    Router::new()
        .route("/", post(add_wishlist_entry).get(get_wishlist))
        .route("/:id", delete(delete_wishlist_entry))
        .layer(middleware::from_fn(auth))
}

pub async fn add_wishlist_entry(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateWishlistDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let entry = app_state
        .db_client
        .add_wishlist_entry(&user.user.email, body)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(WishlistResponseDto {
        status: "success".to_string(),
        data: entry,
    }))
}

pub async fn get_wishlist(
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

    let wishlists = app_state
        .db_client
        .get_wishlist_by_owner(&email)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(WishlistListResponseDto {
        status: "success".to_string(),
        wishlists,
    }))
}

/// Scoped to the owner; deleting someone else's entry matches nothing
/// and reports zero.
pub async fn delete_wishlist_entry(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Path(entry_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let affected = app_state
        .db_client
        .delete_wishlist_entry(entry_id, &user.user.email)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(AffectedResponseDto {
        status: "success".to_string(),
        affected,
    }))
}

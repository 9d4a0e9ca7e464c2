use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    middleware,
    response::IntoResponse,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::reviewdb::ReviewExt,
    dtos::reviewdtos::{CreateReviewDto, ReviewListQueryDto, ReviewListResponseDto, ReviewResponseDto},
    dtos::userdtos::AffectedResponseDto,
    error::HttpError,
    middleware::{auth, role_check, JWTAuthMiddeware},
    models::usermodel::UserRole,
    AppState,
};

pub fn reviews_handler() -> Router {
    let public_routes = Router::new().route("/", get(get_reviews));

    let authed_routes = Router::new()
        .route("/", post(create_review))
        .layer(middleware::from_fn(auth));

    let admin_routes = Router::new()
        .route("/:id", delete(delete_review))
        .layer(middleware::from_fn(|state, req, next| {
            role_check(state, req, next, vec![UserRole::Admin])
        }))
        .layer(middleware::from_fn(auth));

    Router::new()
        .merge(public_routes)
        .merge(authed_routes)
        .merge(admin_routes)
}

pub async fn create_review(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateReviewDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let review = app_state
        .db_client
        .create_review(&body.reviewer_name, &user.user.email, body.rating, &body.comment)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ReviewResponseDto {
        status: "success".to_string(),
        data: review,
    }))
}

/// Home-page feed, newest first.
pub async fn get_reviews(
    Query(query_params): Query<ReviewListQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    query_params
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let limit = query_params.limit.unwrap_or(6);

    let reviews = app_state
        .db_client
        .get_reviews(limit)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ReviewListResponseDto {
        status: "success".to_string(),
        reviews,
    }))
}

pub async fn delete_review(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(review_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let affected = app_state
        .db_client
        .delete_review(review_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(AffectedResponseDto {
        status: "success".to_string(),
        affected,
    }))
}

use std::sync::Arc;

use axum::{
    extract::Path,
    middleware,
    response::IntoResponse,
    routing::{get, patch},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::{
    db::propertydb::PropertyExt,
    dtos::propertydtos::{AdvertiseListResponseDto, PropertyResponseDto},
    error::{ErrorMessage, HttpError},
    middleware::{auth, role_check},
    models::propertymodel::AdStatus,
    models::usermodel::UserRole,
    AppState,
};

pub fn advertise_handler() -> Router {
    let public_routes = Router::new().route("/", get(get_advertised));

    let admin_routes = Router::new()
        .route("/promote/:id", patch(promote_property))
        .route("/demote/:id", patch(demote_property))
        .layer(middleware::from_fn(|state, req, next| {
            role_check(state, req, next, vec![UserRole::Admin])
        }))
        .layer(middleware::from_fn(auth));

    Router::new().merge(public_routes).merge(admin_routes)
}

pub async fn get_advertised(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let advertises = app_state
        .db_client
        .get_advertises()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(AdvertiseListResponseDto {
        status: "success".to_string(),
        advertises,
    }))
}

/// Marks the property as advertised and mirrors it into the
/// advertisement collection so the public list and the flag never
/// drift.
pub async fn promote_property(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(property_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let updated = app_state
        .db_client
        .set_ad_status(property_id, AdStatus::Advertised)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let property = updated
        .ok_or_else(|| HttpError::not_found(ErrorMessage::PropertyNotFound.to_string()))?;

    app_state
        .db_client
        .upsert_advertise(&property)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    tracing::info!(
        "property {} moved to {}",
        property.id,
        property.ad_status.to_str()
    );

    Ok(Json(PropertyResponseDto {
        status: "success".to_string(),
        data: property,
    }))
}

/// Inverse of promote; repeated calls settle on the same state.
pub async fn demote_property(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(property_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let updated = app_state
        .db_client
        .set_ad_status(property_id, AdStatus::NotAdd)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let property = updated
        .ok_or_else(|| HttpError::not_found(ErrorMessage::PropertyNotFound.to_string()))?;

    app_state
        .db_client
        .delete_advertise(property.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    tracing::info!(
        "property {} moved to {}",
        property.id,
        property.ad_status.to_str()
    );

    Ok(Json(PropertyResponseDto {
        status: "success".to_string(),
        data: property,
    }))
}

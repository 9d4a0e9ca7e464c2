use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::propertydb::PropertyExt,
    dtos::propertydtos::{PropertyListResponseDto, PropertyResponseDto},
    dtos::querydtos::{PropertyListQueryDto, PropertySort},
    error::{ErrorMessage, HttpError},
    AppState,
};

/// Public, unauthenticated reads over the verified collection.
pub fn properties_handler() -> Router {
    Router::new()
        .route("/", get(get_properties))
        .route("/:id", get(get_property))
}

pub async fn get_properties(
    Query(query_params): Query<PropertyListQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    query_params
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let sort = PropertySort::parse(
        query_params.field.as_deref(),
        query_params.order.as_deref(),
    )
    .map_err(HttpError::bad_request)?;

    let page = query_params.page.unwrap_or(1);
    let size = query_params.size.unwrap_or(10);

    let properties = app_state
        .db_client
        .get_properties(sort, page as u32, size)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let property_count = app_state
        .db_client
        .get_property_count()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(PropertyListResponseDto {
        status: "success".to_string(),
        properties,
        results: property_count,
    }))
}

pub async fn get_property(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(property_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let property = app_state
        .db_client
        .get_property(property_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let property = property
        .ok_or_else(|| HttpError::not_found(ErrorMessage::PropertyNotFound.to_string()))?;

    Ok(Json(PropertyResponseDto {
        status: "success".to_string(),
        data: property,
    }))
}

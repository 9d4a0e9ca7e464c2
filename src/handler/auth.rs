use std::sync::Arc;

use axum::{response::IntoResponse, Extension, Json};
use validator::Validate;

use crate::{
    dtos::userdtos::{TokenRequestDto, TokenResponseDto},
    error::HttpError,
    utils::token,
    AppState,
};

/// Issues a long-lived bearer token binding the client to the supplied
/// email identity. Stateless; there is no revocation.
pub async fn issue_token(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<TokenRequestDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let token = token::create_token(
        &body.email,
        app_state.env.jwt_secret.as_bytes(),
        app_state.env.jwt_maxage,
    )
    .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(TokenResponseDto {
        status: "success".to_string(),
        token,
    }))
}

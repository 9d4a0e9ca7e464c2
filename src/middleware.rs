use std::sync::Arc;

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::IntoResponse,
    Extension,
};

use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};

use crate::{
    db::userdb::UserExt,
    error::{ErrorMessage, HttpError},
    models::usermodel::{User, UserRole},
    utils::token,
    AppState,
};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct JWTAuthMiddeware {
    pub user: User,
}

/// Authentication gate. Pulls the token from the `token` cookie or the
/// bearer header, verifies it, and re-reads the user (and therefore the
/// current role) from the store on every request, so a role change is
/// effective on the very next call.
pub async fn auth(
    cookie_jar: CookieJar,
    Extension(app_state): Extension<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<impl IntoResponse, HttpError> {
    let cookies = cookie_jar
        .get("token")
        .map(|cookie| cookie.value().to_string())
        .or_else(|| {
            req.headers()
                .get(header::AUTHORIZATION)
                .and_then(|auth_header| auth_header.to_str().ok())
                .and_then(|auth_value| {
                    if auth_value.starts_with("Bearer ") {
                        Some(auth_value[7..].to_owned())
                    } else {
                        None
                    }
                })
        });

    let token = cookies
        .ok_or_else(|| HttpError::unauthorized(ErrorMessage::TokenNotProvided.to_string()))?;

    let email = match token::decode_token(token, app_state.env.jwt_secret.as_bytes()) {
        Ok(email) => email,
        Err(_) => {
            return Err(HttpError::unauthorized(ErrorMessage::InvalidToken.to_string()));
        }
    };

    let user = app_state
        .db_client
        .get_user(None, Some(&email))
        .await
        .map_err(|_| HttpError::unauthorized(ErrorMessage::UserNoLongerExist.to_string()))?;

    let user =
        user.ok_or_else(|| HttpError::unauthorized(ErrorMessage::UserNoLongerExist.to_string()))?;

    req.extensions_mut().insert(JWTAuthMiddeware { user });

    Ok(next.run(req).await)
}

/// Role gate. Must be layered after `auth`; a missing extension here is
/// a routing mistake, answered as 401 rather than a panic.
pub async fn role_check(
    Extension(_app_state): Extension<Arc<AppState>>,
    req: Request,
    next: Next,
    required_roles: Vec<UserRole>,
) -> Result<impl IntoResponse, HttpError> {
    let user = req
        .extensions()
        .get::<JWTAuthMiddeware>()
        .ok_or_else(|| HttpError::unauthorized(ErrorMessage::UserNotAuthenticated.to_string()))?;

    check_required_roles(&user.user.role, &required_roles)?;

    Ok(next.run(req).await)
}

pub fn check_required_roles(role: &UserRole, required_roles: &[UserRole]) -> Result<(), HttpError> {
    if !required_roles.contains(role) {
        return Err(HttpError::new(
            ErrorMessage::PermissionDenied.to_string(),
            StatusCode::FORBIDDEN,
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_role_passes() {
        assert!(check_required_roles(&UserRole::Admin, &[UserRole::Admin]).is_ok());
        assert!(
            check_required_roles(&UserRole::Agent, &[UserRole::Agent, UserRole::Admin]).is_ok()
        );
    }

    #[test]
    fn mismatched_role_is_forbidden() {
        let err = check_required_roles(&UserRole::Agent, &[UserRole::Admin]).unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }

    #[test]
    fn fraud_role_passes_no_gate() {
        assert!(check_required_roles(&UserRole::Fraud, &[UserRole::Admin]).is_err());
        assert!(check_required_roles(&UserRole::Fraud, &[UserRole::Agent]).is_err());
        assert!(check_required_roles(&UserRole::Fraud, &[UserRole::User]).is_err());
    }
}

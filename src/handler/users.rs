use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{propertydb::PropertyExt, userdb::UserExt},
    dtos::querydtos::RequestQueryDto,
    dtos::userdtos::{
        AffectedResponseDto, FilterUserDto, RegisterUserDto, RoleResponseDto, UserData,
        UserListResponseDto, UserResponseDto, UserUpsertResponseDto,
    },
    error::{ErrorMessage, HttpError},
    middleware::{auth, role_check, JWTAuthMiddeware},
    models::usermodel::UserRole,
    AppState,
};

pub fn users_handler() -> Router {
    let public_routes = Router::new().route("/", post(create_user));

    let self_routes = Router::new()
        .route("/role/:email", get(get_user_role))
        .layer(middleware::from_fn(auth));

    let admin_routes = Router::new()
        .route("/", get(get_users))
        .route("/make-admin/:id", put(make_admin))
        .route("/make-agent/:id", put(make_agent))
        .route("/mark-fraud/:id", put(mark_fraud))
        .route("/:id", get(get_user_by_id).delete(delete_user))
        .layer(middleware::from_fn(|state, req, next| {
            role_check(state, req, next, vec![UserRole::Admin])
        }))
        .layer(middleware::from_fn(auth));

    Router::new()
        .merge(public_routes)
        .merge(self_routes)
        .merge(admin_routes)
}

/// Upsert-by-email. The client calls this on every sign-in, so an
/// existing email answers with a sentinel instead of an error.
pub async fn create_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<RegisterUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let saved = app_state
        .db_client
        .save_user(&body.name, &body.email)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    match saved {
        Some(user) => Ok(Json(UserResponseDto {
            status: "success".to_string(),
            data: UserData {
                user: FilterUserDto::filter_user(&user),
            },
        })
        .into_response()),
        None => Ok(Json(UserUpsertResponseDto {
            status: "success".to_string(),
            message: "user already exists".to_string(),
            inserted: false,
        })
        .into_response()),
    }
}

pub async fn get_users(
    Query(query_params): Query<RequestQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    query_params
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = query_params.page.unwrap_or(1);
    let limit = query_params.limit.unwrap_or(10);

    let users = app_state
        .db_client
        .get_users(page as u32, limit)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let user_count = app_state
        .db_client
        .get_user_count()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(UserListResponseDto {
        status: "success".to_string(),
        users: FilterUserDto::filter_users(&users),
        results: user_count,
    }))
}

pub async fn get_user_by_id(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let user = app_state
        .db_client
        .get_user(Some(user_id), None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let user = user.ok_or_else(|| HttpError::not_found("User was not found"))?;

    Ok(Json(UserResponseDto {
        status: "success".to_string(),
        data: UserData {
            user: FilterUserDto::filter_user(&user),
        },
    }))
}

/// Role probe for the client's dashboard routing. Callers may only ask
/// about themselves.
pub async fn get_user_role(
    Path(email): Path<String>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    if user.user.email != email {
        return Err(HttpError::forbidden(ErrorMessage::PermissionDenied.to_string()));
    }

    Ok(Json(RoleResponseDto {
        status: "success".to_string(),
        email,
        role: user.user.role.to_str().to_string(),
    }))
}

pub async fn make_admin(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth_user): Extension<JWTAuthMiddeware>,
    Path(target_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    set_role(&app_state, &auth_user, target_id, UserRole::Admin).await
}

pub async fn make_agent(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth_user): Extension<JWTAuthMiddeware>,
    Path(target_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    set_role(&app_state, &auth_user, target_id, UserRole::Agent).await
}

/// Marking an agent as fraudulent also pulls everything they have
/// published out of the public collection.
pub async fn mark_fraud(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth_user): Extension<JWTAuthMiddeware>,
    Path(target_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    if auth_user.user.id == target_id {
        return Err(HttpError::bad_request(
            "Admins cannot mark themselves as fraudulent",
        ));
    }

    let updated = app_state
        .db_client
        .update_user_role(target_id, UserRole::Fraud)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let user = updated.ok_or_else(|| HttpError::not_found("User was not found"))?;

    let removed = app_state
        .db_client
        .delete_properties_by_agent(&user.email)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    tracing::info!(
        "marked {} as fraud, removed {} published properties",
        user.email,
        removed
    );

    Ok(Json(UserResponseDto {
        status: "success".to_string(),
        data: UserData {
            user: FilterUserDto::filter_user(&user),
        },
    }))
}

async fn set_role(
    app_state: &Arc<AppState>,
    auth_user: &JWTAuthMiddeware,
    target_id: Uuid,
    role: UserRole,
) -> Result<axum::response::Response, HttpError> {
    // An admin cannot silently drop their own admin status.
    if auth_user.user.id == target_id && role != UserRole::Admin {
        return Err(HttpError::bad_request(
            "Admins cannot remove their own admin status",
        ));
    }

    let updated = app_state
        .db_client
        .update_user_role(target_id, role)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let user = updated.ok_or_else(|| HttpError::not_found("User was not found"))?;

    Ok(Json(UserResponseDto {
        status: "success".to_string(),
        data: UserData {
            user: FilterUserDto::filter_user(&user),
        },
    })
    .into_response())
}

pub async fn delete_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(target_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let affected = app_state
        .db_client
        .delete_user(target_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(AffectedResponseDto {
        status: "success".to_string(),
        affected,
    }))
}

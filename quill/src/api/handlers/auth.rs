//! Signup and login handlers.

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    api::models::{
        auth::{LoginRequest, LoginResponse, SignupRequest, SignupResponse},
        users::UserResponse,
    },
    auth::{password, session},
    db::{
        handlers::{Repository, Users},
        models::users::UserCreateDBRequest,
    },
    errors::Error,
    AppState,
};

/// Create a new account and return a session token for it.
#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = SignupRequest,
    tag = "authentication",
    responses(
        (status = 201, description = "Account created", body = SignupResponse),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Email already registered"),
    )
)]
#[tracing::instrument(skip_all, fields(email = %request.email))]
pub async fn signup(State(state): State<AppState>, Json(request): Json<SignupRequest>) -> Result<(StatusCode, Json<SignupResponse>), Error> {
    let password_config = &state.config.auth.password;
    if request.password.len() < password_config.min_length {
        return Err(Error::BadRequest {
            message: format!("Password must be at least {} characters", password_config.min_length),
        });
    }
    if request.password.len() > password_config.max_length {
        return Err(Error::BadRequest {
            message: format!("Password must be no more than {} characters", password_config.max_length),
        });
    }

    // Hash on a blocking thread, argon2 is deliberately slow
    let password = request.password.clone();
    let password_hash = tokio::task::spawn_blocking(move || password::hash_string(&password))
        .await
        .map_err(|e| Error::Internal {
            operation: format!("spawn password hashing task: {e}"),
        })??;

    let create_request = UserCreateDBRequest {
        firstname: request.firstname,
        lastname: request.lastname,
        email: request.email,
        password_hash,
    };

    // No pre-check for an existing email: the unique constraint decides, so
    // two concurrent signups for the same address cannot both win.
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let created_user = Users::new(&mut conn).create(&create_request).await?;

    let token = session::create_session_token(created_user.id, &state.config)?;
    let response = SignupResponse::new(token, UserResponse::from(created_user));

    Ok((StatusCode::CREATED, Json(response)))
}

/// Exchange credentials for a session token.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    tag = "authentication",
    responses(
        (status = 200, description = "Authenticated", body = LoginResponse),
        (status = 401, description = "Missing or invalid credentials"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn login(State(state): State<AppState>, Json(request): Json<LoginRequest>) -> Result<Json<LoginResponse>, Error> {
    let email = request.email.ok_or(Error::Validation {
        message: "email is required".to_string(),
    })?;
    let password = request.password.ok_or(Error::Validation {
        message: "password is required".to_string(),
    })?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let user = Users::new(&mut conn)
        .get_user_by_email(&email)
        .await?
        .ok_or(Error::Unauthenticated { message: None })?;

    let hash = user.password_hash.clone();
    let verified = tokio::task::spawn_blocking(move || password::verify_string(&password, &hash))
        .await
        .map_err(|e| Error::Internal {
            operation: format!("spawn password verification task: {e}"),
        })?;

    if !verified {
        return Err(Error::Unauthenticated { message: None });
    }

    let token = session::create_session_token(user.id, &state.config)?;
    Ok(Json(LoginResponse::new(token)))
}

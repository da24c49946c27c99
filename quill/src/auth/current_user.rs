use crate::{
    api::models::users::CurrentUser,
    auth::session,
    db::handlers::{Repository, Users},
    errors::{Error, Result},
    AppState,
};
use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::{debug, instrument, trace};

/// Extract the bearer token from the Authorization header.
///
/// The scheme match is strict: a case-sensitive `Bearer` prefix followed by a
/// single space, with the token being everything after it. Anything else is
/// treated as no credentials at all.
fn extract_bearer_token(parts: &Parts) -> Result<&str> {
    let auth_header = parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(Error::Unauthenticated { message: None })?;

    let auth_str = auth_header.to_str().map_err(|e| {
        tracing::trace!("Authorization header is not visible ASCII: {e}");
        Error::Unauthenticated { message: None }
    })?;

    auth_str.strip_prefix("Bearer ").ok_or(Error::Unauthenticated { message: None })
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Error;

    /// The authentication state machine, as a linear sequence of fallible
    /// steps: extract the bearer token, verify its signature and expiry,
    /// then resolve the subject against the credential store. A token whose
    /// subject no longer exists (user deleted after issuance) is rejected the
    /// same way as a missing or invalid one.
    ///
    /// Nothing here touches the database before the token has been verified,
    /// and no step mutates stored state.
    #[instrument(skip(parts, state))]
    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let token = extract_bearer_token(parts)?;

        let user_id = session::verify_session_token(token, &state.config).map_err(|e| {
            trace!("Session token verification failed: {e}");
            Error::Auth(e)
        })?;

        let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
        let mut user_repo = Users::new(&mut conn);

        let user = user_repo.get_by_id(user_id).await?.ok_or_else(|| {
            trace!("Token subject no longer exists: {user_id}");
            Error::Unauthenticated { message: None }
        })?;

        debug!("Authenticated user: {}", user.id);
        Ok(CurrentUser::from(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_app_state, create_test_config, create_test_user};
    use axum::http::StatusCode;
    use sqlx::PgPool;

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = axum::http::Request::builder().uri("http://localhost/author");
        if let Some(value) = value {
            builder = builder.header("authorization", value);
        }
        let (parts, _body) = builder.body(()).unwrap().into_parts();
        parts
    }

    #[sqlx::test]
    async fn test_valid_token_resolves_user(pool: PgPool) {
        let config = create_test_config();
        let user = create_test_user(&pool).await;
        let token = session::create_session_token(user.id, &config).unwrap();
        let state = create_test_app_state(pool, config);

        let mut parts = parts_with_auth(Some(&format!("Bearer {token}")));
        let current = CurrentUser::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(current.id, user.id);
        assert_eq!(current.email, user.email);
    }

    #[sqlx::test]
    async fn test_missing_header_rejected(pool: PgPool) {
        let state = create_test_app_state(pool, create_test_config());

        let mut parts = parts_with_auth(None);
        let err = CurrentUser::from_request_parts(&mut parts, &state).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[sqlx::test]
    async fn test_wrong_scheme_rejected(pool: PgPool) {
        let config = create_test_config();
        let user = create_test_user(&pool).await;
        let token = session::create_session_token(user.id, &config).unwrap();
        let state = create_test_app_state(pool, config);

        // The prefix match is case-sensitive and requires a single space
        for value in [format!("bearer {token}"), format!("Basic {token}"), token.clone()] {
            let mut parts = parts_with_auth(Some(&value));
            let err = CurrentUser::from_request_parts(&mut parts, &state).await.unwrap_err();
            assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED, "value: {value}");
        }
    }

    #[sqlx::test]
    async fn test_non_ascii_header_rejected(pool: PgPool) {
        let state = create_test_app_state(pool, create_test_config());

        let mut parts = parts_with_auth(None);
        parts.headers.insert(
            axum::http::header::AUTHORIZATION,
            axum::http::HeaderValue::from_bytes(b"Bearer \xff\xfe").unwrap(),
        );
        let err = CurrentUser::from_request_parts(&mut parts, &state).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.user_message(), "Unauthorized");
    }

    #[sqlx::test]
    async fn test_garbage_token_rejected(pool: PgPool) {
        let state = create_test_app_state(pool, create_test_config());

        let mut parts = parts_with_auth(Some("Bearer not-a-jwt"));
        let err = CurrentUser::from_request_parts(&mut parts, &state).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        // The body must not reveal which verification step failed
        assert_eq!(err.user_message(), "Unauthorized");
    }

    #[sqlx::test]
    async fn test_deleted_user_rejected(pool: PgPool) {
        let config = create_test_config();
        let user = create_test_user(&pool).await;
        let token = session::create_session_token(user.id, &config).unwrap();

        // Delete the account while the token is still valid
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Users::new(&mut conn);
        assert!(repo.delete(user.id).await.unwrap());

        let state = create_test_app_state(pool, config);
        let mut parts = parts_with_auth(Some(&format!("Bearer {token}")));
        let err = CurrentUser::from_request_parts(&mut parts, &state).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }
}

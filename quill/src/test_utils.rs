//! Test utilities for integration testing (available with `test-utils` feature).

use crate::api::models::posts::estimate_reading_time;
use crate::auth::password;
use crate::db::{
    handlers::{Posts, Repository, Users},
    models::{
        posts::{PostCreateDBRequest, PostDBResponse, PostUpdateDBRequest},
        users::{UserCreateDBRequest, UserDBResponse},
    },
};
use crate::types::UserId;
use axum_test::TestServer;
use sqlx::PgPool;
use uuid::Uuid;

/// Password used by every test user created through [`create_test_user`].
pub const TEST_PASSWORD: &str = "correct horse battery staple";

pub fn create_test_config() -> crate::config::Config {
    crate::config::Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: None, // tests run on a pool supplied by the harness
        secret_key: Some("test-secret-key-for-testing-only".to_string()),
        ..Default::default()
    }
}

pub fn create_test_app_state(pool: PgPool, config: crate::config::Config) -> crate::AppState {
    crate::AppState::builder().db(pool).config(config).build()
}

/// Spin up a test server over the given pool.
pub fn create_test_app(pool: PgPool) -> TestServer {
    let config = create_test_config();
    let app = crate::Application::from_pool(config, pool).expect("Failed to create application");
    app.into_test_server()
}

/// Create a user with a unique email and the shared [`TEST_PASSWORD`].
pub async fn create_test_user(pool: &PgPool) -> UserDBResponse {
    create_test_user_with_email(pool, &format!("user-{}@example.com", Uuid::new_v4())).await
}

pub async fn create_test_user_with_email(pool: &PgPool, email: &str) -> UserDBResponse {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    Users::new(&mut conn)
        .create(&UserCreateDBRequest {
            firstname: "Test".to_string(),
            lastname: "User".to_string(),
            email: email.to_string(),
            password_hash: password::hash_string(TEST_PASSWORD).expect("Failed to hash test password"),
        })
        .await
        .expect("Failed to create test user")
}

/// Create a post for `author_id` in the given state.
pub async fn create_test_post(pool: &PgPool, author_id: UserId, title: &str, state: &str) -> PostDBResponse {
    let body = "Some body text for a test post";
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    let mut repo = Posts::new(&mut conn);

    let post = repo
        .create(&PostCreateDBRequest {
            author_id,
            title: title.to_string(),
            description: None,
            tags: vec![],
            body: body.to_string(),
            reading_time: estimate_reading_time(body),
        })
        .await
        .expect("Failed to create test post");

    if state == "draft" {
        return post;
    }
    repo.update(
        post.id,
        &PostUpdateDBRequest {
            state: Some(state.to_string()),
            ..Default::default()
        },
    )
    .await
    .expect("Failed to set test post state")
}

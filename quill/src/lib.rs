//! Quill: a self-hostable blogging backend.
//!
//! Accounts sign up with an email and password, log in for a JWT session
//! token, and author posts that move from `draft` to `published`. Published
//! posts are readable by anyone; everything else is scoped to its owner.
//!
//! # Architecture
//!
//! - [`api`]: HTTP handlers and wire models (Axum)
//! - [`auth`]: password hashing, session tokens, and the request extractor
//! - [`db`]: repositories over PostgreSQL (SQLx)
//! - [`config`]: YAML + environment configuration (figment)
//!
//! The [`Application`] type ties these together: it connects to the
//! database, runs migrations, builds the router, and serves it with
//! graceful shutdown.

use anyhow::Context;
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use bon::Builder;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{debug, info, instrument, Level};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
mod openapi;
pub mod telemetry;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
pub mod types;

pub use config::Config;
use config::CorsOrigin;

/// Shared application state available to every handler.
#[derive(Clone, Builder)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
}

/// Get the database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Connect to PostgreSQL and bring the schema up to date.
async fn setup_database(config: &Config) -> anyhow::Result<PgPool> {
    let database_url = config
        .database_url
        .as_deref()
        .context("database_url is not configured; set DATABASE_URL or database_url in the config file")?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .context("failed to connect to PostgreSQL")?;

    migrator().run(&pool).await.context("failed to run database migrations")?;

    Ok(pool)
}

fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let has_wildcard = config
        .cors
        .allowed_origins
        .iter()
        .any(|origin| matches!(origin, CorsOrigin::Wildcard));

    let allow_origin = if has_wildcard {
        // tower-http panics if "*" is passed to `AllowOrigin::list`
        AllowOrigin::any()
    } else {
        let mut origins = Vec::new();
        for origin in &config.cors.allowed_origins {
            let header_value = match origin {
                CorsOrigin::Wildcard => unreachable!(),
                CorsOrigin::Url(url) => url.as_str().parse::<HeaderValue>()?,
            };
            origins.push(header_value);
        }
        AllowOrigin::list(origins)
    };

    let mut cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_credentials(config.cors.allow_credentials);

    if let Some(max_age) = config.cors.max_age {
        cors = cors.max_age(std::time::Duration::from_secs(max_age));
    }

    Ok(cors)
}

/// Build the application router with all endpoints and middleware.
#[instrument(skip_all)]
pub fn build_router(state: &AppState) -> anyhow::Result<Router> {
    let cors = create_cors_layer(&state.config)?;

    let router = Router::new()
        .route("/auth/signup", post(api::handlers::auth::signup))
        .route("/auth/login", post(api::handlers::auth::login))
        .route("/author", get(api::handlers::posts::list_posts))
        .route("/posts", post(api::handlers::posts::create_post))
        .route(
            "/posts/{id}",
            get(api::handlers::posts::get_post)
                .patch(api::handlers::posts::update_post)
                .delete(api::handlers::posts::delete_post),
        )
        .with_state(state.clone())
        .merge(Scalar::with_url("/docs", openapi::ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    Ok(router)
}

/// A fully initialized application: database connected, migrations run,
/// router built. Call [`serve`](Application::serve) to start it.
pub struct Application {
    router: Router,
    config: Config,
    pool: PgPool,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting quill with configuration: {:#?}", config);

        let pool = setup_database(&config).await?;
        Self::from_pool(config, pool)
    }

    /// Create an application on an existing pool. Used by tests, where the
    /// pool comes from the test harness and migrations have already run.
    pub fn from_pool(config: Config, pool: PgPool) -> anyhow::Result<Self> {
        let state = AppState::builder().db(pool.clone()).config(config.clone()).build();
        let router = build_router(&state)?;

        Ok(Self { router, config, pool })
    }

    /// Convert application into a test server (for tests)
    #[cfg(any(test, feature = "test-utils"))]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router.into_make_service()).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!("Quill listening on http://{bind_addr}");

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Closing database connections...");
        self.pool.close().await;

        Ok(())
    }
}

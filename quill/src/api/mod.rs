//! API layer for HTTP request handling and data models.
//!
//! - **[`handlers`]**: Axum route handlers for all endpoints
//! - **[`models`]**: Request/response structures, the public wire contract
//!
//! # Endpoints
//!
//! - `POST /signup`, `POST /login`: account creation and session issuance
//! - `GET /author`: the caller's own posts, paginated and filterable
//! - `POST /posts`, `GET /posts/{id}`, `PATCH /posts/{id}`,
//!   `DELETE /posts/{id}`: post authoring and public reads
//!
//! All endpoints carry `utoipa` annotations; the rendered documentation is
//! served at `/docs`.

pub mod handlers;
pub mod models;

//! API request and response data models.
//!
//! These structures define the public HTTP contract and are kept separate
//! from the database records in [`crate::db::models`], so the wire format
//! and the storage format can evolve independently. Everything is annotated
//! with `utoipa` for the generated API docs.

pub mod auth;
pub mod pagination;
pub mod posts;
pub mod users;

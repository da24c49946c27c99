//! Database record structures matching table schemas.
//!
//! These are the repository-layer DTOs: `*CreateDBRequest` / `*UpdateDBRequest`
//! going in, `*DBResponse` coming out. API models in [`crate::api::models`]
//! are built from these so the storage representation can evolve without
//! changing the public contract.

pub mod posts;
pub mod users;

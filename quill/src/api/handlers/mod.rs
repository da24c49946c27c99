//! HTTP request handlers.
//!
//! Each handler deserializes its request, checks authentication where
//! required, calls into the repositories, and serializes a response. Errors
//! flow out as [`crate::errors::Error`], which maps itself to a status code
//! and a user-safe body.

pub mod auth;
pub mod posts;

//! Authentication system.
//!
//! Credentials are verified against Argon2id digests ([`password`]), sessions
//! are stateless HS256 JWTs ([`session`]), and protected handlers receive the
//! authenticated identity through the [`CurrentUser`] extractor
//! ([`current_user`]).
//!
//! # Flow
//!
//! 1. `POST /auth/signup` / `POST /auth/login` verify credentials and return a
//!    signed token embedding the user id and an expiry.
//! 2. Every protected request presents `Authorization: Bearer <token>`. The
//!    extractor verifies the signature, then the expiry, then resolves the
//!    subject against the `users` table. Any failure along the way is a 401;
//!    the response body never says which step failed.
//!
//! Both hashing and token verification are pure functions of their inputs plus
//! the configured secret, so they are safe to call from any number of request
//! tasks without coordination.
//!
//! [`CurrentUser`]: crate::api::models::users::CurrentUser

pub mod current_user;
pub mod password;
pub mod session;

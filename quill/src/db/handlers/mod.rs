//! Repository implementations over raw database connections.
//!
//! Each handler wraps a `&mut PgConnection`, so callers decide whether a
//! group of operations shares a transaction or runs on a pooled connection.

pub mod posts;
pub mod repository;
pub mod users;

pub use posts::Posts;
pub use repository::Repository;
pub use users::Users;

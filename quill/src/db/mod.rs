//! Database layer for data persistence and access.
//!
//! Built on SQLx with PostgreSQL, following the repository pattern:
//! API handlers call repositories in [`handlers`], which operate on the
//! record structures in [`models`] and surface failures as
//! [`errors::DbError`].
//!
//! Repositories take a `&mut PgConnection`, so a handler that needs several
//! operations to be atomic creates them from a transaction:
//!
//! ```ignore
//! let mut tx = pool.begin().await?;
//! let mut users = Users::new(&mut tx);
//! let user = users.create(&request).await?;
//! tx.commit().await?;
//! ```
//!
//! Migrations live in `migrations/` and are exposed through
//! [`crate::migrator`].

pub mod errors;
pub mod handlers;
pub mod models;

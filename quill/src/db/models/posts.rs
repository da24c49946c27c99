//! Database models for posts.

use crate::types::{PostId, UserId};
use chrono::{DateTime, Utc};

/// Database request for creating a new post
#[derive(Debug, Clone)]
pub struct PostCreateDBRequest {
    pub author_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub body: String,
    pub reading_time: i64,
}

/// Database request for updating a post. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct PostUpdateDBRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub body: Option<String>,
    pub state: Option<String>,
    pub reading_time: Option<i64>,
}

/// Database response for a post
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PostDBResponse {
    pub id: PostId,
    pub author_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub body: String,
    pub state: String,
    pub read_count: i64,
    pub reading_time: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

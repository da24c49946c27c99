//! API request/response models for posts.

use super::pagination::Page;
use crate::db::models::posts::{PostDBResponse, PostUpdateDBRequest};
use crate::types::{PostId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Words-per-minute figure used to derive a post's reading time.
const READING_WPM: i64 = 200;

/// Estimated minutes to read `body`, never less than one.
pub fn estimate_reading_time(body: &str) -> i64 {
    let words = body.split_whitespace().count() as i64;
    (words / READING_WPM).max(1)
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PostCreate {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub body: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub body: Option<String>,
    pub state: Option<String>,
}

impl From<PostUpdate> for PostUpdateDBRequest {
    fn from(update: PostUpdate) -> Self {
        // Reading time follows the body: edits that change the text change
        // the estimate as well.
        let reading_time = update.body.as_deref().map(estimate_reading_time);
        Self {
            title: update.title,
            description: update.description,
            tags: update.tags,
            body: update.body,
            state: update.state,
            reading_time,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PostResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: PostId,
    #[schema(value_type = String, format = "uuid")]
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

impl From<PostDBResponse> for PostResponse {
    fn from(db: PostDBResponse) -> Self {
        Self {
            id: db.id,
            author_id: db.author_id,
            title: db.title,
            description: db.description,
            tags: db.tags,
            body: db.body,
            state: db.state,
            read_count: db.read_count,
            reading_time: db.reading_time,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

/// Query parameters for listing the caller's posts.
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ListPostsQuery {
    #[serde(flatten)]
    #[param(inline)]
    pub page: Page,

    /// Workflow state to filter on (default: "published")
    pub state: Option<String>,

    /// Sort key: one of `read_count`, `reading_time`, `timestamp`.
    /// Anything else sorts by timestamp.
    #[serde(rename = "orderBy")]
    pub order_by: Option<String>,
}

/// Envelope for a page of posts.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostListResponse {
    pub status: String,
    pub current_page: i64,
    pub total_pages: i64,
    pub total_count: i64,
    pub posts: Vec<PostResponse>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PostEnvelope {
    pub status: String,
    pub post: PostResponse,
}

impl PostEnvelope {
    pub fn new(post: PostResponse) -> Self {
        Self {
            status: "success".to_string(),
            post,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_time_floor_is_one_minute() {
        assert_eq!(estimate_reading_time(""), 1);
        assert_eq!(estimate_reading_time("just a few words"), 1);
    }

    #[test]
    fn test_reading_time_scales_with_word_count() {
        let body = vec!["word"; 450].join(" ");
        assert_eq!(estimate_reading_time(&body), 2);
    }

    #[test]
    fn test_list_query_parses_camel_case_order_by() {
        let q: ListPostsQuery = serde_urlencoded::from_str("state=draft&page=2&orderBy=read_count").unwrap();
        assert_eq!(q.state.as_deref(), Some("draft"));
        assert_eq!(q.page.current_page(), 2);
        assert_eq!(q.order_by.as_deref(), Some("read_count"));
    }

    #[test]
    fn test_list_envelope_serializes_camel_case() {
        let envelope = PostListResponse {
            status: "success".to_string(),
            current_page: 1,
            total_pages: 0,
            total_count: 0,
            posts: vec![],
        };
        let json = serde_json::to_value(&envelope).unwrap();
        assert!(json.get("currentPage").is_some());
        assert!(json.get("totalPages").is_some());
        assert!(json.get("totalCount").is_some());
    }
}

//! Database repository for posts.

use crate::types::{abbrev_uuid, PostId, UserId};
use crate::{
    db::{
        errors::{DbError, Result},
        handlers::repository::Repository,
        models::posts::{PostCreateDBRequest, PostDBResponse, PostUpdateDBRequest},
    },
};
use sqlx::PgConnection;
use tracing::instrument;
use uuid::Uuid;

/// Sort key for post listings. Unknown values coming off the wire fall back
/// to [`PostOrder::Timestamp`], so the column name here is always one of a
/// fixed set and safe to splice into SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostOrder {
    ReadCount,
    ReadingTime,
    #[default]
    Timestamp,
}

impl PostOrder {
    pub fn column_name(&self) -> &'static str {
        match self {
            PostOrder::ReadCount => "read_count",
            PostOrder::ReadingTime => "reading_time",
            PostOrder::Timestamp => "created_at",
        }
    }
}

impl std::str::FromStr for PostOrder {
    type Err = std::convert::Infallible;

    /// Unknown sort keys are not an error, they silently map to the default.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "read_count" => PostOrder::ReadCount,
            "reading_time" => PostOrder::ReadingTime,
            _ => PostOrder::Timestamp,
        })
    }
}

/// Filter for scoped post listings. The author id is always the requester's:
/// every listing is confined to the caller's own posts.
#[derive(Debug, Clone)]
pub struct PostFilter {
    pub author_id: UserId,
    pub state: String,
    pub order: PostOrder,
    pub skip: i64,
    pub limit: i64,
}

pub struct Posts<'c> {
    db: &'c mut PgConnection,
}

#[async_trait::async_trait]
impl<'c> Repository for Posts<'c> {
    type CreateRequest = PostCreateDBRequest;
    type UpdateRequest = PostUpdateDBRequest;
    type Response = PostDBResponse;
    type Id = PostId;
    type Filter = PostFilter;

    #[instrument(skip(self, request), fields(author_id = %abbrev_uuid(&request.author_id)), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let post_id = Uuid::new_v4();

        let post = sqlx::query_as::<_, PostDBResponse>(
            r#"
            INSERT INTO posts (id, author_id, title, description, tags, body, reading_time)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(post_id)
        .bind(request.author_id)
        .bind(&request.title)
        .bind(&request.description)
        .bind(&request.tags)
        .bind(&request.body)
        .bind(request.reading_time)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(post)
    }

    #[instrument(skip(self), fields(post_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let post = sqlx::query_as::<_, PostDBResponse>("SELECT * FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(post)
    }

    #[instrument(skip(self, filter), fields(author_id = %abbrev_uuid(&filter.author_id), state = %filter.state), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        // Order column is drawn from a fixed allowlist; everything user
        // supplied goes through binds. Ties break on recency.
        let query = format!(
            r#"
            SELECT * FROM posts
            WHERE author_id = $1 AND state = $2
            ORDER BY {} DESC, created_at DESC
            LIMIT $3 OFFSET $4
            "#,
            filter.order.column_name()
        );

        let posts = sqlx::query_as::<_, PostDBResponse>(&query)
            .bind(filter.author_id)
            .bind(&filter.state)
            .bind(filter.limit)
            .bind(filter.skip)
            .fetch_all(&mut *self.db)
            .await?;

        Ok(posts)
    }

    #[instrument(skip(self), fields(post_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1").bind(id).execute(&mut *self.db).await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, request), fields(post_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let post = sqlx::query_as::<_, PostDBResponse>(
            r#"
            UPDATE posts SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                tags = COALESCE($4, tags),
                body = COALESCE($5, body),
                state = COALESCE($6, state),
                reading_time = COALESCE($7, reading_time),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.title)
        .bind(&request.description)
        .bind(&request.tags)
        .bind(&request.body)
        .bind(&request.state)
        .bind(request.reading_time)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(post)
    }
}

impl<'c> Posts<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Count of posts matching the filter's scope, ignoring pagination.
    #[instrument(skip(self, filter), err)]
    pub async fn count(&mut self, filter: &PostFilter) -> Result<i64> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts WHERE author_id = $1 AND state = $2")
            .bind(filter.author_id)
            .bind(&filter.state)
            .fetch_one(&mut *self.db)
            .await?;

        Ok(total)
    }

    /// One page of the caller's posts plus the unpaginated total for the
    /// same scope.
    pub async fn list_scoped(&mut self, filter: &PostFilter) -> Result<(Vec<PostDBResponse>, i64)> {
        let total = self.count(filter).await?;
        let posts = self.list(filter).await?;
        Ok((posts, total))
    }

    /// Bump the read counter in a single statement so concurrent readers
    /// never lose increments.
    #[instrument(skip(self), fields(post_id = %abbrev_uuid(&id)), err)]
    pub async fn increment_read_count(&mut self, id: PostId) -> Result<PostDBResponse> {
        let post = sqlx::query_as::<_, PostDBResponse>(
            "UPDATE posts SET read_count = read_count + 1 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(post)
    }
}

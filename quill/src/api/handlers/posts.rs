//! Post handlers: authoring CRUD plus the owner-scoped listing.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    api::models::{
        pagination::{total_pages, PER_PAGE},
        posts::{estimate_reading_time, ListPostsQuery, PostCreate, PostEnvelope, PostListResponse, PostResponse, PostUpdate},
        users::CurrentUser,
    },
    db::{
        handlers::{
            posts::{PostFilter, PostOrder, Posts},
            Repository,
        },
        models::posts::PostCreateDBRequest,
    },
    errors::Error,
    types::PostId,
    AppState,
};

fn post_not_found(id: PostId) -> Error {
    Error::NotFound {
        resource: "Post".to_string(),
        id: id.to_string(),
    }
}

/// List the caller's own posts, one fixed-size page at a time.
///
/// Results never include another author's posts, whatever the query says.
#[utoipa::path(
    get,
    path = "/author",
    tag = "posts",
    params(ListPostsQuery),
    responses(
        (status = 200, description = "One page of the caller's posts", body = PostListResponse),
        (status = 401, description = "Not authenticated"),
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip(state, query), fields(user_id = %user.id))]
pub async fn list_posts(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<ListPostsQuery>,
) -> Result<Json<PostListResponse>, Error> {
    let filter = PostFilter {
        author_id: user.id,
        state: query.state.unwrap_or_else(|| "published".to_string()),
        order: query.order_by.as_deref().unwrap_or("").parse().unwrap_or(PostOrder::Timestamp),
        skip: query.page.skip(),
        limit: PER_PAGE,
    };

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let (posts, total_count) = Posts::new(&mut conn).list_scoped(&filter).await?;

    Ok(Json(PostListResponse {
        status: "success".to_string(),
        current_page: query.page.current_page(),
        total_pages: total_pages(total_count),
        total_count,
        posts: posts.into_iter().map(PostResponse::from).collect(),
    }))
}

/// Create a draft post owned by the caller.
#[utoipa::path(
    post,
    path = "/posts",
    request_body = PostCreate,
    tag = "posts",
    responses(
        (status = 201, description = "Post created", body = PostEnvelope),
        (status = 401, description = "Not authenticated"),
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip(state, request), fields(user_id = %user.id))]
pub async fn create_post(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<PostCreate>,
) -> Result<(StatusCode, Json<PostEnvelope>), Error> {
    let create_request = PostCreateDBRequest {
        author_id: user.id,
        title: request.title,
        description: request.description,
        tags: request.tags,
        reading_time: estimate_reading_time(&request.body),
        body: request.body,
    };

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let post = Posts::new(&mut conn).create(&create_request).await?;

    Ok((StatusCode::CREATED, Json(PostEnvelope::new(post.into()))))
}

/// Fetch a single published post. Each successful read bumps the post's
/// read counter. Drafts are invisible here, including to their author.
#[utoipa::path(
    get,
    path = "/posts/{id}",
    tag = "posts",
    params(("id" = Uuid, Path, description = "Post ID")),
    responses(
        (status = 200, description = "The post", body = PostEnvelope),
        (status = 404, description = "No published post with this ID"),
    )
)]
#[tracing::instrument(skip(state))]
pub async fn get_post(State(state): State<AppState>, Path(id): Path<PostId>) -> Result<Json<PostEnvelope>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Posts::new(&mut conn);

    let post = repo.get_by_id(id).await?.ok_or_else(|| post_not_found(id))?;
    if post.state != "published" {
        return Err(post_not_found(id));
    }

    let post = repo.increment_read_count(id).await?;
    Ok(Json(PostEnvelope::new(post.into())))
}

/// Update one of the caller's posts. Posts belonging to anyone else look
/// exactly like posts that do not exist.
#[utoipa::path(
    patch,
    path = "/posts/{id}",
    request_body = PostUpdate,
    tag = "posts",
    params(("id" = Uuid, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Updated post", body = PostEnvelope),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Post not found or not owned by caller"),
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip(state, request), fields(user_id = %user.id))]
pub async fn update_post(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<PostId>,
    Json(request): Json<PostUpdate>,
) -> Result<Json<PostEnvelope>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Posts::new(&mut conn);

    let existing = repo.get_by_id(id).await?.ok_or_else(|| post_not_found(id))?;
    if existing.author_id != user.id {
        return Err(post_not_found(id));
    }

    let post = repo.update(id, &request.into()).await?;
    Ok(Json(PostEnvelope::new(post.into())))
}

/// Delete one of the caller's posts.
#[utoipa::path(
    delete,
    path = "/posts/{id}",
    tag = "posts",
    params(("id" = Uuid, Path, description = "Post ID")),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Post not found or not owned by caller"),
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip(state), fields(user_id = %user.id))]
pub async fn delete_post(State(state): State<AppState>, user: CurrentUser, Path(id): Path<PostId>) -> Result<StatusCode, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Posts::new(&mut conn);

    let existing = repo.get_by_id(id).await?.ok_or_else(|| post_not_found(id))?;
    if existing.author_id != user.id {
        return Err(post_not_found(id));
    }

    repo.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

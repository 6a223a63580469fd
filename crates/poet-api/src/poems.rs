//! Handlers for `/poems` endpoints and `/authors/:id/poems`.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/poems` | Body: [`PoemInput`]; 400 if the author does not exist |
//! | `GET`    | `/poems` | `?page`; paginated |
//! | `GET`    | `/poems/:id` | 404 if not found |
//! | `PUT`    | `/poems/:id` | Full replace; 404 if not found, then 400 if the author does not exist |
//! | `DELETE` | `/poems/:id` | 404 if not found |
//! | `GET`    | `/authors/:id/poems` | `?page`; 400 if `id` is not an integer |

use std::sync::Arc;

use axum::{
  Json,
  extract::{
    Path, Query, State,
    rejection::{JsonRejection, PathRejection, QueryRejection},
  },
  http::StatusCode,
  response::IntoResponse,
};
use poet_core::{
  page::Page,
  poem::{Poem, PoemInput},
  store::{CatalogStore, PoemFilter},
};
use serde_json::json;

use crate::{error::ApiError, params::PageParams};

/// A poem must point at a stored author.
async fn ensure_author<S: CatalogStore>(store: &S, author_id: i64) -> Result<(), ApiError> {
  match store.get_author(author_id).await.map_err(ApiError::store)? {
    Some(_) => Ok(()),
    None => Err(ApiError::BadRequest(format!("author {author_id} does not exist"))),
  }
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /poems` — returns 201 + `{"message", "poem_id"}`.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<PoemInput>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore,
{
  let Json(input) = body?;
  ensure_author(store.as_ref(), input.author_id).await?;
  let poem = store.create_poem(input).await.map_err(ApiError::store)?;
  tracing::info!(poem_id = poem.poem_id, author_id = poem.author_id, "poem created");
  Ok((
    StatusCode::CREATED,
    Json(json!({ "message": "Poem created", "poem_id": poem.poem_id })),
  ))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /poems[?page=<n>]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  params: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<Page<Poem>>, ApiError>
where
  S: CatalogStore,
{
  let Query(params) = params?;
  let page = store
    .list_poems(PoemFilter::All, params.page())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(page))
}

/// `GET /authors/:id/poems[?page=<n>]`
///
/// An unknown author yields an empty page, not a 404.
pub async fn by_author<S>(
  State(store): State<Arc<S>>,
  id: Result<Path<i64>, PathRejection>,
  params: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<Page<Poem>>, ApiError>
where
  S: CatalogStore,
{
  let Path(author_id) = id.map_err(|_| ApiError::BadRequest("invalid author_id".into()))?;
  let Query(params) = params?;
  let page = params.page();
  let (poems, total) = store
    .poems_for_author(author_id, page)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(Page::new(page, total, poems)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /poems/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Poem>, ApiError>
where
  S: CatalogStore,
{
  let Path(id) = id?;
  let poem = store
    .get_poem(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("poem {id} not found")))?;
  Ok(Json(poem))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /poems/:id` — replaces title, author_id and content.
pub async fn update<S>(
  State(store): State<Arc<S>>,
  id: Result<Path<i64>, PathRejection>,
  body: Result<Json<PoemInput>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore,
{
  let Path(id) = id?;
  let Json(input) = body?;
  if store.get_poem(id).await.map_err(ApiError::store)?.is_none() {
    tracing::warn!(poem_id = id, "update of missing poem");
    return Err(ApiError::NotFound(format!("poem {id} not found")));
  }
  ensure_author(store.as_ref(), input.author_id).await?;
  if !store.update_poem(id, input).await.map_err(ApiError::store)? {
    tracing::warn!(poem_id = id, "update of missing poem");
    return Err(ApiError::NotFound(format!("poem {id} not found")));
  }
  tracing::info!(poem_id = id, "poem updated");
  Ok(Json(json!({ "message": "Poem updated" })))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /poems/:id`
pub async fn delete<S>(
  State(store): State<Arc<S>>,
  id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore,
{
  let Path(id) = id?;
  if !store.delete_poem(id).await.map_err(ApiError::store)? {
    tracing::warn!(poem_id = id, "delete of missing poem");
    return Err(ApiError::NotFound(format!("poem {id} not found")));
  }
  tracing::info!(poem_id = id, "poem deleted");
  Ok(Json(json!({ "message": "Poem deleted" })))
}

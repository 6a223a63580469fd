//! Handlers for `/authors` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/authors` | Body: [`AuthorInput`]; 201 + generated id |
//! | `GET`    | `/authors` | `?page`; paginated |
//! | `GET`    | `/authors/num/:number` | First N authors plus grand total |
//! | `GET`    | `/authors/:id` | 404 if not found |
//! | `PUT`    | `/authors/:id` | Full replace; 404 if not found |
//! | `DELETE` | `/authors/:id` | Also deletes the author's poems; 404 if not found |

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
  author::{Author, AuthorInput, AuthorSample},
  page::{Page, parse_count},
  store::{AuthorFilter, CatalogStore},
};
use serde_json::json;

use crate::{error::ApiError, params::PageParams};

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /authors` — returns 201 + `{"message", "author_id"}`.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<AuthorInput>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore,
{
  let Json(input) = body?;
  let author = store.create_author(input).await.map_err(ApiError::store)?;
  tracing::info!(author_id = author.author_id, name = %author.name, "author created");
  Ok((
    StatusCode::CREATED,
    Json(json!({ "message": "Author created", "author_id": author.author_id })),
  ))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /authors[?page=<n>]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  params: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<Page<Author>>, ApiError>
where
  S: CatalogStore,
{
  let Query(params) = params?;
  let page = store
    .list_authors(AuthorFilter::All, params.page())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(page))
}

/// `GET /authors/num/:number` — not paginated; `number` is clamped to `>= 1`.
pub async fn first_n<S>(
  State(store): State<Arc<S>>,
  Path(number): Path<String>,
) -> Result<Json<AuthorSample>, ApiError>
where
  S: CatalogStore,
{
  let sample = store
    .first_authors(parse_count(&number))
    .await
    .map_err(ApiError::store)?;
  Ok(Json(sample))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /authors/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Author>, ApiError>
where
  S: CatalogStore,
{
  let Path(id) = id?;
  let author = store
    .get_author(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("author {id} not found")))?;
  tracing::debug!(author_id = id, "author retrieved");
  Ok(Json(author))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /authors/:id` — replaces name, description and image_url.
pub async fn update<S>(
  State(store): State<Arc<S>>,
  id: Result<Path<i64>, PathRejection>,
  body: Result<Json<AuthorInput>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore,
{
  let Path(id) = id?;
  let Json(input) = body?;
  if !store.update_author(id, input).await.map_err(ApiError::store)? {
    tracing::warn!(author_id = id, "update of missing author");
    return Err(ApiError::NotFound(format!("author {id} not found")));
  }
  tracing::info!(author_id = id, "author updated");
  Ok(Json(json!({ "message": "Author updated" })))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /authors/:id` — the author's poems are deleted with them.
pub async fn delete<S>(
  State(store): State<Arc<S>>,
  id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore,
{
  let Path(id) = id?;
  if !store.delete_author(id).await.map_err(ApiError::store)? {
    tracing::warn!(author_id = id, "delete of missing author");
    return Err(ApiError::NotFound(format!("author {id} not found")));
  }
  tracing::info!(author_id = id, "author deleted");
  Ok(Json(json!({ "message": "Author deleted" })))
}

//! Handlers for `/search` endpoints.
//!
//! Both take a required, non-empty `?name=` and an optional `?page=`.
//! Matching is unranked substring containment; results come back in id
//! order.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State, rejection::QueryRejection},
};
use poet_core::{
  author::AuthorDetail,
  page::{Page, PageRequest},
  poem::Poem,
  store::{AuthorFilter, CatalogStore, PoemFilter},
};

use crate::{error::ApiError, params::SearchParams};

/// `GET /search/authors?name=<term>[&page=<n>]`
///
/// Each matching author carries the first page of their poems and their
/// total poem count.
pub async fn authors<S>(
  State(store): State<Arc<S>>,
  params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Page<AuthorDetail>>, ApiError>
where
  S: CatalogStore,
{
  let Query(params) = params?;
  let term = params.term()?;
  let page = params.page();

  let matches = store
    .list_authors(AuthorFilter::NameContains(term), page)
    .await
    .map_err(ApiError::store)?;

  let mut data = Vec::with_capacity(matches.data.len());
  for author in matches.data {
    let (poems, total_poems) = store
      .poems_for_author(author.author_id, PageRequest::first())
      .await
      .map_err(ApiError::store)?;
    data.push(AuthorDetail { author, poems, total_poems });
  }

  Ok(Json(Page::new(page, matches.total, data)))
}

/// `GET /search/poems?name=<term>[&page=<n>]` — matches title or content.
pub async fn poems<S>(
  State(store): State<Arc<S>>,
  params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Page<Poem>>, ApiError>
where
  S: CatalogStore,
{
  let Query(params) = params?;
  let term = params.term()?;
  let page = store
    .list_poems(PoemFilter::TextContains(term), params.page())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(page))
}

//! JSON REST API for the poetry catalogue.
//!
//! Exposes an axum [`Router`] backed by any [`poet_core::store::CatalogStore`].
//! CORS, tracing layers and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .merge(poet_api::api_router(store.clone()))
//! ```

pub mod authors;
pub mod data;
pub mod error;
pub mod params;
pub mod poems;
pub mod search;

use std::sync::Arc;

use axum::{Router, routing::get};
use poet_core::store::CatalogStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: CatalogStore + Send + Sync + 'static,
{
  Router::new()
    // Authors
    .route("/authors", get(authors::list::<S>).post(authors::create::<S>))
    .route("/authors/num/{number}", get(authors::first_n::<S>))
    .route(
      "/authors/{id}",
      get(authors::get_one::<S>)
        .put(authors::update::<S>)
        .delete(authors::delete::<S>),
    )
    .route("/authors/{id}/poems", get(poems::by_author::<S>))
    // Poems
    .route("/poems", get(poems::list::<S>).post(poems::create::<S>))
    .route(
      "/poems/{id}",
      get(poems::get_one::<S>)
        .put(poems::update::<S>)
        .delete(poems::delete::<S>),
    )
    // Search
    .route("/search/authors", get(search::authors::<S>))
    .route("/search/poems", get(search::poems::<S>))
    // Reports
    .route("/data/stats", get(data::stats::<S>))
    .route("/data/echart/{params}", get(data::echart::<S>))
    .route("/data/table", get(data::table::<S>))
    .with_state(store)
}

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use poet_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  async fn make_app() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    api_router(Arc::new(store))
  }

  async fn send(
    app:    &Router,
    method: &str,
    uri:    &str,
    body:   Option<Value>,
  ) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
      Some(v) => builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(v.to_string()))
        .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let json = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
  }

  async fn create_author(app: &Router, name: &str) -> i64 {
    let (status, body) = send(
      app,
      "POST",
      "/authors",
      Some(json!({ "name": name, "description": format!("{name} bio") })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["author_id"].as_i64().unwrap()
  }

  async fn create_poem(app: &Router, author_id: i64, title: &str, content: &str) -> i64 {
    let (status, body) = send(
      app,
      "POST",
      "/poems",
      Some(json!({ "title": title, "author_id": author_id, "content": content })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["poem_id"].as_i64().unwrap()
  }

  // ── Authors ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn author_lifecycle() {
    let app = make_app().await;

    let (status, body) = send(
      &app,
      "POST",
      "/authors",
      Some(json!({ "name": "Li Bai", "description": "Tang poet" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Author created");
    let id = body["author_id"].as_i64().unwrap();

    let (status, body) = send(&app, "GET", "/authors?page=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["data"][0]["author_id"], id);
    assert_eq!(body["data"][0]["name"], "Li Bai");

    let (status, body) = send(&app, "GET", &format!("/authors/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Li Bai");
    assert_eq!(body["description"], "Tang poet");

    let (status, _) = send(
      &app,
      "PUT",
      &format!("/authors/{id}"),
      Some(json!({
        "name": "Li Bai",
        "description": "Immortal of poetry",
        "image_url": "https://example.com/libai.jpg",
      })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, "GET", &format!("/authors/{id}"), None).await;
    assert_eq!(body["description"], "Immortal of poetry");
    assert_eq!(body["image_url"], "https://example.com/libai.jpg");

    let (status, body) = send(&app, "DELETE", &format!("/authors/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Author deleted");

    let (status, body) = send(&app, "GET", &format!("/authors/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
  }

  #[tokio::test]
  async fn mutating_missing_author_is_404() {
    let app = make_app().await;
    let (status, _) = send(
      &app,
      "PUT",
      "/authors/99",
      Some(json!({ "name": "x", "description": "y" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/authors/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn malformed_bodies_are_400() {
    let app = make_app().await;

    let (status, body) = send(&app, "POST", "/authors", Some(json!({ "name": 3 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    // No content type at all.
    let req = Request::builder()
      .method("POST")
      .uri("/authors")
      .body(Body::from(r#"{"name":"a","description":"b"}"#))
      .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "GET", "/authors/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn partial_bodies_take_empty_defaults() {
    let app = make_app().await;

    let (status, body) = send(&app, "POST", "/authors", Some(json!({ "name": "x" }))).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let author = body["author_id"].as_i64().unwrap();
    let (_, body) = send(&app, "GET", &format!("/authors/{author}"), None).await;
    assert_eq!(body["description"], "");
    assert!(body["image_url"].is_null());

    let (status, body) = send(
      &app,
      "POST",
      "/poems",
      Some(json!({ "title": "t", "author_id": author })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let poem = body["poem_id"].as_i64().unwrap();
    let (_, body) = send(&app, "GET", &format!("/poems/{poem}"), None).await;
    assert_eq!(body["content"], "");

    // A missing author_id is author 0, which never exists.
    let (status, _) = send(&app, "POST", "/poems", Some(json!({ "title": "t" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn bad_page_values_behave_like_page_one() {
    let app = make_app().await;
    for i in 0..8 {
      create_author(&app, &format!("poet {i}")).await;
    }

    let (_, first) = send(&app, "GET", "/authors?page=1", None).await;
    for query in ["", "?page=0", "?page=-3", "?page=abc"] {
      let (status, body) = send(&app, "GET", &format!("/authors{query}"), None).await;
      assert_eq!(status, StatusCode::OK);
      assert_eq!(body, first, "query {query:?}");
    }
    assert_eq!(first["page"], 1);
    assert_eq!(first["page_size"], 6);
    assert_eq!(first["total"], 8);
    assert_eq!(first["data"].as_array().unwrap().len(), 6);

    let (_, second) = send(&app, "GET", "/authors?page=2", None).await;
    assert_eq!(second["data"].as_array().unwrap().len(), 2);

    let (_, beyond) = send(&app, "GET", "/authors?page=9", None).await;
    assert_eq!(beyond["total"], 8);
    assert!(beyond["data"].as_array().unwrap().is_empty());
  }

  #[tokio::test]
  async fn large_page_is_echoed_as_sent() {
    let app = make_app().await;
    create_author(&app, "Li Bai").await;

    let (status, body) = send(&app, "GET", "/authors?page=99999999999", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 99_999_999_999_u64);
    assert_eq!(body["total"], 1);
    assert!(body["data"].as_array().unwrap().is_empty());
  }

  #[tokio::test]
  async fn first_n_authors_is_not_paginated() {
    let app = make_app().await;
    for i in 0..8 {
      create_author(&app, &format!("poet {i}")).await;
    }

    let (status, body) = send(&app, "GET", "/authors/num/7", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["requested_number"], 7);
    assert_eq!(body["total_available"], 8);
    assert_eq!(body["data"].as_array().unwrap().len(), 7);
    assert!(body.get("page").is_none());

    let (_, body) = send(&app, "GET", "/authors/num/zero", None).await;
    assert_eq!(body["requested_number"], 1);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
  }

  // ── Poems ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn poem_crud_and_double_delete() {
    let app = make_app().await;
    let author = create_author(&app, "Meng Haoran").await;
    let id = create_poem(&app, author, "春晓", "春眠不觉晓").await;

    let (status, body) = send(&app, "GET", &format!("/poems/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
      body,
      json!({ "poem_id": id, "title": "春晓", "author_id": author, "content": "春眠不觉晓" })
    );

    let (status, _) = send(
      &app,
      "PUT",
      &format!("/poems/{id}"),
      Some(json!({ "title": "春晓", "author_id": author, "content": "处处闻啼鸟" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = send(&app, "GET", &format!("/poems/{id}"), None).await;
    assert_eq!(body["content"], "处处闻啼鸟");

    let (status, _) = send(&app, "DELETE", &format!("/poems/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "DELETE", &format!("/poems/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "GET", &format!("/poems/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn updating_missing_poem_is_404_even_with_unknown_author() {
    let app = make_app().await;
    let (status, body) = send(
      &app,
      "PUT",
      "/poems/77",
      Some(json!({ "title": "t", "author_id": 99, "content": "c" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "poem 77 not found");
  }

  #[tokio::test]
  async fn updating_poem_to_unknown_author_is_400() {
    let app = make_app().await;
    let author = create_author(&app, "Li Bai").await;
    let poem = create_poem(&app, author, "静夜思", "床前明月光").await;

    let (status, _) = send(
      &app,
      "PUT",
      &format!("/poems/{poem}"),
      Some(json!({ "title": "静夜思", "author_id": 99, "content": "床前明月光" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn poem_for_unknown_author_is_400() {
    let app = make_app().await;
    let (status, body) = send(
      &app,
      "POST",
      "/poems",
      Some(json!({ "title": "t", "author_id": 41, "content": "c" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("41"));
  }

  #[tokio::test]
  async fn deleting_author_removes_their_poems() {
    let app = make_app().await;
    let author = create_author(&app, "Wang Wei").await;
    let poem = create_poem(&app, author, "鹿柴", "空山不见人").await;

    let (status, _) = send(&app, "DELETE", &format!("/authors/{author}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", &format!("/poems/{poem}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, body) = send(&app, "GET", &format!("/authors/{author}/poems"), None).await;
    assert_eq!(body["total"], 0);
  }

  #[tokio::test]
  async fn poems_by_author_paginates() {
    let app = make_app().await;
    let author = create_author(&app, "Bai Juyi").await;
    for i in 0..7 {
      create_poem(&app, author, &format!("poem {i}"), "…").await;
    }

    let (status, body) = send(&app, "GET", &format!("/authors/{author}/poems?page=2"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 2);
    assert_eq!(body["total"], 7);
    assert_eq!(body["data"][0]["title"], "poem 6");

    let (status, body) = send(&app, "GET", "/authors/bai/poems", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid author_id");
  }

  // ── Search ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn empty_search_term_is_400() {
    let app = make_app().await;
    for uri in [
      "/search/authors",
      "/search/authors?name=",
      "/search/poems?page=2",
      "/search/poems?name=",
    ] {
      let (status, body) = send(&app, "GET", uri, None).await;
      assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
      assert!(body["error"].is_string());
    }
  }

  #[tokio::test]
  async fn author_search_nests_first_page_of_poems() {
    let app = make_app().await;
    let li = create_author(&app, "Li Bai").await;
    create_author(&app, "Du Fu").await;
    for i in 0..9 {
      create_poem(&app, li, &format!("poem {i}"), "…").await;
    }

    let (status, body) = send(&app, "GET", "/search/authors?name=Li", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    let hit = &body["data"][0];
    assert_eq!(hit["author_id"], li);
    assert_eq!(hit["total_poems"], 9);
    let nested = hit["poems"].as_array().unwrap();
    assert_eq!(nested.len(), 6);
    assert!(hit["total_poems"].as_u64().unwrap() >= nested.len() as u64);
  }

  #[tokio::test]
  async fn poem_search_matches_title_and_content() {
    let app = make_app().await;
    let author = create_author(&app, "Li Bai").await;
    create_poem(&app, author, "静夜思", "床前明月光").await;
    create_poem(&app, author, "月下独酌", "花间一壶酒").await;
    create_poem(&app, author, "早发白帝城", "朝辞白帝彩云间").await;

    let (status, body) = send(&app, "GET", "/search/poems?name=%E6%9C%88", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
  }

  // ── Reports ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn reporting_endpoints() {
    let app = make_app().await;
    let li = create_author(&app, "Li Bai").await;
    let du = create_author(&app, "Du Fu").await;
    create_poem(&app, li, "a", "一二三").await;
    create_poem(&app, du, "b", "一二").await;
    create_poem(&app, du, "c", "一二三四").await;

    let (status, body) = send(&app, "GET", "/data/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "data": { "poets": 2, "poems": 3, "words": 9 } }));

    let (status, body) = send(&app, "GET", "/data/echart/one", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "data": "one", "total": 100 }));

    let (status, body) = send(&app, "GET", "/data/echart/two", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["authors"][0]["author_id"], du);
    assert_eq!(body["data"]["authors"][0]["poem_count"], 2);
    assert_eq!(body["data"]["total_poems"], 3);
    assert_eq!(body["data"]["total_words"], 9);

    let (status, _) = send(&app, "GET", "/data/echart/three", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "GET", "/data/table", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["list"][0]["author_name"], "Du Fu");
    assert_eq!(body["data"]["list"][0]["dynasty"], "Tang");
    assert_eq!(body["data"]["list"][1]["word_count"], 3);
    assert_eq!(body["data"]["total_poems"], 3);
  }
}

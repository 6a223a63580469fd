//! Handlers for the `/data` reporting endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/data/stats` | `{"data": {"poets", "poems", "words"}}` |
//! | `GET`  | `/data/echart/:params` | `one` is a fixed placeholder, `two` per-author counts; 400 otherwise |
//! | `GET`  | `/data/table` | `{"data": {"list", "total_poems", "total_words"}}` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  response::{IntoResponse, Response},
};
use poet_core::{
  report::{ChartKind, ChartPlaceholder, EchartSummary, Stats, TableSummary},
  store::CatalogStore,
};
use serde::Serialize;

use crate::error::ApiError;

/// `{"data": ...}` envelope shared by the reporting endpoints.
#[derive(Debug, Serialize)]
pub struct Data<T> {
  pub data: T,
}

/// `GET /data/stats`
pub async fn stats<S>(State(store): State<Arc<S>>) -> Result<Json<Data<Stats>>, ApiError>
where
  S: CatalogStore,
{
  let rows = store.stat_rows().await.map_err(ApiError::store)?;
  Ok(Json(Data { data: Stats::from_rows(rows) }))
}

/// `GET /data/echart/:params`
pub async fn echart<S>(
  State(store): State<Arc<S>>,
  Path(params): Path<String>,
) -> Result<Response, ApiError>
where
  S: CatalogStore,
{
  match params.parse::<ChartKind>()? {
    ChartKind::One => Ok(Json(ChartPlaceholder::ONE).into_response()),
    ChartKind::Two => {
      let rows = store.echart_rows().await.map_err(ApiError::store)?;
      Ok(Json(Data { data: EchartSummary::from_rows(rows) }).into_response())
    }
  }
}

/// `GET /data/table`
pub async fn table<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Data<TableSummary>>, ApiError>
where
  S: CatalogStore,
{
  let rows = store.table_rows().await.map_err(ApiError::store)?;
  Ok(Json(Data { data: TableSummary::from_rows(rows) }))
}

//! Read-only reporting rows and the envelopes they are folded into.
//!
//! The rows come straight from precomputed store views. Folding (defaults,
//! ordering, totals) happens here so every backend shapes reports the same
//! way.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

// ─── Rows ─────────────────────────────────────────────────────────────────────

/// One row of `stats_view`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatRow {
  pub name:  String,
  pub value: i64,
}

/// One row of `echart_two`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EchartRow {
  pub author_id:   i64,
  pub author_name: String,
  pub poem_count:  i64,
  pub word_count:  i64,
}

/// One row of `data_table`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
  pub author_id:   i64,
  pub author_name: String,
  pub dynasty:     String,
  pub poem_count:  i64,
  pub word_count:  i64,
}

// ─── Stats ────────────────────────────────────────────────────────────────────

/// Headline counters. Any counter missing from the view is `0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
  pub poets: i64,
  pub poems: i64,
  pub words: i64,
}

impl Stats {
  /// Fold `stats_view` rows into the fixed-key object. Unknown names are
  /// ignored.
  pub fn from_rows(rows: impl IntoIterator<Item = StatRow>) -> Self {
    let mut stats = Self::default();
    for row in rows {
      match row.name.as_str() {
        "poets" => stats.poets = row.value,
        "poems" => stats.poems = row.value,
        "words" => stats.words = row.value,
        _ => {}
      }
    }
    stats
  }
}

// ─── Charts ───────────────────────────────────────────────────────────────────

/// The `:params` segment of `/data/echart/:params`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
  /// Fixed placeholder payload; no computation behind it.
  One,
  /// Per-author poem and word counts from `echart_two`.
  Two,
}

impl FromStr for ChartKind {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "one" => Ok(Self::One),
      "two" => Ok(Self::Two),
      other => Err(Error::UnknownChart(other.to_owned())),
    }
  }
}

/// Body of `/data/echart/one`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartPlaceholder {
  pub data:  &'static str,
  pub total: u32,
}

impl ChartPlaceholder {
  pub const ONE: Self = Self { data: "one", total: 100 };
}

/// Body of `/data/echart/two`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EchartSummary {
  pub authors:     Vec<EchartRow>,
  pub total_poems: i64,
  pub total_words: i64,
}

impl EchartSummary {
  pub fn from_rows(mut rows: Vec<EchartRow>) -> Self {
    rows.sort_by(|a, b| b.poem_count.cmp(&a.poem_count));
    let total_poems = rows.iter().map(|r| r.poem_count).sum();
    let total_words = rows.iter().map(|r| r.word_count).sum();
    Self { authors: rows, total_poems, total_words }
  }
}

// ─── Table ────────────────────────────────────────────────────────────────────

/// Body of `/data/table`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSummary {
  pub list:        Vec<TableRow>,
  pub total_poems: i64,
  pub total_words: i64,
}

impl TableSummary {
  pub fn from_rows(mut rows: Vec<TableRow>) -> Self {
    rows.sort_by(|a, b| b.poem_count.cmp(&a.poem_count));
    let total_poems = rows.iter().map(|r| r.poem_count).sum();
    let total_words = rows.iter().map(|r| r.word_count).sum();
    Self { list: rows, total_poems, total_words }
  }
}

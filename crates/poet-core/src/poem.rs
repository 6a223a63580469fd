//! Poems, each owned by exactly one author.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poem {
  pub poem_id:   i64,
  pub title:     String,
  pub author_id: i64,
  pub content:   String,
}

/// Every writable poem field. Used for both create and full-replace update.
///
/// Absent fields take their zero value. A zero `author_id` never names a
/// stored author, so the API still refuses it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PoemInput {
  pub title:     String,
  pub author_id: i64,
  pub content:   String,
}

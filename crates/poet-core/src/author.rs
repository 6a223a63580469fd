//! Authors — the poets of the catalogue.

use serde::{Deserialize, Serialize};

use crate::poem::Poem;

/// A poet as stored in the `Authors` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
  pub author_id:   i64,
  pub name:        String,
  pub description: String,
  #[serde(alias = "imgUrl")]
  pub image_url:   Option<String>,
}

/// Every writable author field. Used for both create and full-replace update.
///
/// Absent fields take their empty value; only undecodable JSON is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AuthorInput {
  pub name:        String,
  pub description: String,
  #[serde(alias = "imgUrl")]
  pub image_url:   Option<String>,
}

/// An author together with the first page of their poems.
///
/// `poems` is a partial view; `total_poems` is the true count, so
/// `total_poems >= poems.len()` always holds.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorDetail {
  #[serde(flatten)]
  pub author:      Author,
  pub poems:       Vec<Poem>,
  pub total_poems: u64,
}

/// Envelope for `GET /authors/num/:number`: the first N authors plus the
/// grand total. Not a page.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorSample {
  pub requested_number: u64,
  pub total_available:  u64,
  pub data:             Vec<Author>,
}

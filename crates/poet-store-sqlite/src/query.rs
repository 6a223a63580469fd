//! The single paginated-query helper behind every list and search read.
//!
//! A [`Listing`] names a table, its columns and its ordering; a
//! [`Predicate`] is a `WHERE` clause with its bound values. [`paginate`]
//! runs the count and the slice against the same predicate so `total`
//! always describes the rows `data` was drawn from.

use poet_core::{
  page::PageRequest,
  store::{AuthorFilter, PoemFilter},
};
use rusqlite::{Connection, Row, params_from_iter, types::Value};

use crate::encode::{AUTHOR_COLUMNS, POEM_COLUMNS, decode_count, encode_like_pattern};

// ─── Listings ─────────────────────────────────────────────────────────────────

pub struct Listing {
  pub table:    &'static str,
  pub columns:  &'static str,
  pub order_by: &'static str,
}

pub const AUTHORS: Listing = Listing {
  table:    "Authors",
  columns:  AUTHOR_COLUMNS,
  order_by: "author_id",
};

pub const POEMS: Listing = Listing {
  table:    "Poems",
  columns:  POEM_COLUMNS,
  order_by: "poem_id",
};

// ─── Predicates ───────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct Predicate {
  /// Empty, or a clause starting with ` WHERE`.
  pub clause: &'static str,
  pub params: Vec<Value>,
}

impl From<AuthorFilter> for Predicate {
  fn from(filter: AuthorFilter) -> Self {
    match filter {
      AuthorFilter::All => Self::default(),
      AuthorFilter::NameContains(term) => Self {
        clause: " WHERE name LIKE ? ESCAPE '\\'",
        params: vec![Value::Text(encode_like_pattern(&term))],
      },
    }
  }
}

impl From<PoemFilter> for Predicate {
  fn from(filter: PoemFilter) -> Self {
    match filter {
      PoemFilter::All => Self::default(),
      PoemFilter::ByAuthor(author_id) => Self {
        clause: " WHERE author_id = ?",
        params: vec![Value::Integer(author_id)],
      },
      PoemFilter::TextContains(term) => {
        let pattern = encode_like_pattern(&term);
        Self {
          clause: " WHERE title LIKE ? ESCAPE '\\' OR content LIKE ? ESCAPE '\\'",
          params: vec![Value::Text(pattern.clone()), Value::Text(pattern)],
        }
      }
    }
  }
}

// ─── Pagination ───────────────────────────────────────────────────────────────

/// Count all rows of `listing` matching `predicate`, then fetch the slice
/// for `page`. Returns `(total, rows)`.
pub fn paginate<T>(
  conn:      &Connection,
  listing:   &Listing,
  predicate: &Predicate,
  page:      PageRequest,
  decode:    impl FnMut(&Row<'_>) -> rusqlite::Result<T>,
) -> rusqlite::Result<(u64, Vec<T>)> {
  let Listing { table, columns, order_by } = listing;
  let clause = predicate.clause;

  let total: i64 = conn.query_row(
    &format!("SELECT COUNT(*) FROM {table}{clause}"),
    params_from_iter(predicate.params.iter()),
    |r| r.get(0),
  )?;

  let limit = Value::Integer(i64::try_from(page.limit()).unwrap_or(i64::MAX));
  let offset = Value::Integer(i64::try_from(page.offset()).unwrap_or(i64::MAX));

  let mut stmt = conn.prepare(&format!(
    "SELECT {columns} FROM {table}{clause} ORDER BY {order_by} LIMIT ? OFFSET ?"
  ))?;
  let rows = stmt
    .query_map(
      params_from_iter(predicate.params.iter().cloned().chain([limit, offset])),
      decode,
    )?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  Ok((decode_count(total), rows))
}

//! Decoding helpers between SQLite rows and domain types, plus the encoding
//! of search terms into `LIKE` patterns.
//!
//! Every decoder expects the column order of the matching `*_COLUMNS`
//! constant.

use poet_core::{
  author::Author,
  poem::Poem,
  report::{EchartRow, StatRow, TableRow},
};
use rusqlite::Row;

// ─── Authors ──────────────────────────────────────────────────────────────────

pub const AUTHOR_COLUMNS: &str = "author_id, name, description, image_url";

pub fn decode_author(row: &Row<'_>) -> rusqlite::Result<Author> {
  Ok(Author {
    author_id:   row.get(0)?,
    name:        row.get(1)?,
    description: row.get(2)?,
    image_url:   row.get(3)?,
  })
}

// ─── Poems ────────────────────────────────────────────────────────────────────

pub const POEM_COLUMNS: &str = "poem_id, title, author_id, content";

pub fn decode_poem(row: &Row<'_>) -> rusqlite::Result<Poem> {
  Ok(Poem {
    poem_id:   row.get(0)?,
    title:     row.get(1)?,
    author_id: row.get(2)?,
    content:   row.get(3)?,
  })
}

// ─── Reports ──────────────────────────────────────────────────────────────────

pub fn decode_stat(row: &Row<'_>) -> rusqlite::Result<StatRow> {
  Ok(StatRow { name: row.get(0)?, value: row.get(1)? })
}

pub fn decode_echart(row: &Row<'_>) -> rusqlite::Result<EchartRow> {
  Ok(EchartRow {
    author_id:   row.get(0)?,
    author_name: row.get(1)?,
    poem_count:  row.get(2)?,
    word_count:  row.get(3)?,
  })
}

pub fn decode_table(row: &Row<'_>) -> rusqlite::Result<TableRow> {
  Ok(TableRow {
    author_id:   row.get(0)?,
    author_name: row.get(1)?,
    dynasty:     row.get(2)?,
    poem_count:  row.get(3)?,
    word_count:  row.get(4)?,
  })
}

// ─── Search terms ─────────────────────────────────────────────────────────────

/// Escape character used with every `LIKE ... ESCAPE` clause.
pub const LIKE_ESCAPE: char = '\\';

/// Turn a user term into a `%term%` pattern that matches it literally.
pub fn encode_like_pattern(term: &str) -> String {
  let mut pattern = String::with_capacity(term.len() + 2);
  pattern.push('%');
  for c in term.chars() {
    if matches!(c, '%' | '_' | LIKE_ESCAPE) {
      pattern.push(LIKE_ESCAPE);
    }
    pattern.push(c);
  }
  pattern.push('%');
  pattern
}

/// Counts come back from SQLite as `i64`; they are never negative.
pub fn decode_count(n: i64) -> u64 { u64::try_from(n).unwrap_or_default() }

//! [`SqliteStore`] — the SQLite implementation of [`CatalogStore`].

use std::path::Path;

use poet_core::{
  author::{Author, AuthorInput, AuthorSample},
  page::{Page, PageRequest},
  poem::{Poem, PoemInput},
  report::{EchartRow, StatRow, TableRow},
  store::{AuthorFilter, CatalogStore, PoemFilter},
};
use rusqlite::OptionalExtension as _;

use crate::{
  Result,
  encode::{
    AUTHOR_COLUMNS, POEM_COLUMNS, decode_author, decode_count, decode_echart,
    decode_poem, decode_stat, decode_table,
  },
  query::{AUTHORS, POEMS, Predicate, paginate},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A catalogue store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Close the background connection, flushing the WAL.
  pub async fn close(self) -> Result<()> {
    self.conn.close().await?;
    Ok(())
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run a statement that touches at most one row; `true` if it did.
  async fn execute_one(
    &self,
    sql: &'static str,
    params: Vec<rusqlite::types::Value>,
  ) -> Result<bool> {
    let changed = self
      .conn
      .call(move |conn| Ok(conn.execute(sql, rusqlite::params_from_iter(params))?))
      .await?;
    Ok(changed > 0)
  }
}

// ─── CatalogStore impl ───────────────────────────────────────────────────────

impl CatalogStore for SqliteStore {
  type Error = crate::Error;

  // ── Authors ───────────────────────────────────────────────────────────────

  async fn create_author(&self, input: AuthorInput) -> Result<Author> {
    let author = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO Authors (name, description, image_url) VALUES (?1, ?2, ?3)",
          rusqlite::params![input.name, input.description, input.image_url],
        )?;
        Ok(Author {
          author_id:   conn.last_insert_rowid(),
          name:        input.name,
          description: input.description,
          image_url:   input.image_url,
        })
      })
      .await?;
    Ok(author)
  }

  async fn get_author(&self, id: i64) -> Result<Option<Author>> {
    let author = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {AUTHOR_COLUMNS} FROM Authors WHERE author_id = ?1"),
            rusqlite::params![id],
            decode_author,
          )
          .optional()?)
      })
      .await?;
    Ok(author)
  }

  async fn list_authors(
    &self,
    filter: AuthorFilter,
    page:   PageRequest,
  ) -> Result<Page<Author>> {
    let predicate = Predicate::from(filter);
    let (total, rows) = self
      .conn
      .call(move |conn| Ok(paginate(conn, &AUTHORS, &predicate, page, decode_author)?))
      .await?;
    Ok(Page::new(page, total, rows))
  }

  async fn first_authors(&self, count: u64) -> Result<AuthorSample> {
    let (total, rows) = self
      .conn
      .call(move |conn| {
        let total: i64 =
          conn.query_row("SELECT COUNT(*) FROM Authors", [], |r| r.get(0))?;
        let mut stmt = conn.prepare(&format!(
          "SELECT {AUTHOR_COLUMNS} FROM Authors ORDER BY author_id LIMIT ?1"
        ))?;
        let rows = stmt
          .query_map(
            rusqlite::params![i64::try_from(count).unwrap_or(i64::MAX)],
            decode_author,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok((total, rows))
      })
      .await?;

    Ok(AuthorSample {
      requested_number: count,
      total_available:  decode_count(total),
      data:             rows,
    })
  }

  async fn update_author(&self, id: i64, input: AuthorInput) -> Result<bool> {
    use rusqlite::types::Value;

    self
      .execute_one(
        "UPDATE Authors SET name = ?1, description = ?2, image_url = ?3 WHERE author_id = ?4",
        vec![
          Value::Text(input.name),
          Value::Text(input.description),
          input.image_url.map_or(Value::Null, Value::Text),
          Value::Integer(id),
        ],
      )
      .await
  }

  async fn delete_author(&self, id: i64) -> Result<bool> {
    let deleted = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM Poems WHERE author_id = ?1", rusqlite::params![id])?;
        let deleted =
          tx.execute("DELETE FROM Authors WHERE author_id = ?1", rusqlite::params![id])?;
        tx.commit()?;
        Ok(deleted)
      })
      .await?;
    Ok(deleted > 0)
  }

  // ── Poems ─────────────────────────────────────────────────────────────────

  async fn create_poem(&self, input: PoemInput) -> Result<Poem> {
    let poem = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO Poems (title, author_id, content) VALUES (?1, ?2, ?3)",
          rusqlite::params![input.title, input.author_id, input.content],
        )?;
        Ok(Poem {
          poem_id:   conn.last_insert_rowid(),
          title:     input.title,
          author_id: input.author_id,
          content:   input.content,
        })
      })
      .await?;
    Ok(poem)
  }

  async fn get_poem(&self, id: i64) -> Result<Option<Poem>> {
    let poem = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {POEM_COLUMNS} FROM Poems WHERE poem_id = ?1"),
            rusqlite::params![id],
            decode_poem,
          )
          .optional()?)
      })
      .await?;
    Ok(poem)
  }

  async fn list_poems(&self, filter: PoemFilter, page: PageRequest) -> Result<Page<Poem>> {
    let predicate = Predicate::from(filter);
    let (total, rows) = self
      .conn
      .call(move |conn| Ok(paginate(conn, &POEMS, &predicate, page, decode_poem)?))
      .await?;
    Ok(Page::new(page, total, rows))
  }

  async fn update_poem(&self, id: i64, input: PoemInput) -> Result<bool> {
    use rusqlite::types::Value;

    self
      .execute_one(
        "UPDATE Poems SET title = ?1, author_id = ?2, content = ?3 WHERE poem_id = ?4",
        vec![
          Value::Text(input.title),
          Value::Integer(input.author_id),
          Value::Text(input.content),
          Value::Integer(id),
        ],
      )
      .await
  }

  async fn delete_poem(&self, id: i64) -> Result<bool> {
    use rusqlite::types::Value;

    self
      .execute_one("DELETE FROM Poems WHERE poem_id = ?1", vec![Value::Integer(id)])
      .await
  }

  // ── Reporting views ───────────────────────────────────────────────────────

  async fn stat_rows(&self) -> Result<Vec<StatRow>> {
    let rows = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT name, value FROM stats_view ORDER BY id")?;
        let rows = stmt
          .query_map([], decode_stat)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  async fn echart_rows(&self) -> Result<Vec<EchartRow>> {
    let rows = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT author_id, author_name, poem_count, word_count
           FROM echart_two
           ORDER BY poem_count DESC",
        )?;
        let rows = stmt
          .query_map([], decode_echart)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  async fn table_rows(&self) -> Result<Vec<TableRow>> {
    let rows = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT author_id, author_name, dynasty, poem_count, word_count
           FROM data_table
           ORDER BY poem_count DESC",
        )?;
        let rows = stmt
          .query_map([], decode_table)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }
}

//! The `CatalogStore` trait and supporting filter types.
//!
//! The trait is implemented by storage backends (e.g. `poet-store-sqlite`).
//! The HTTP layer (`poet-api`) depends on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use crate::{
  author::{Author, AuthorInput, AuthorSample},
  page::{Page, PageRequest},
  poem::{Poem, PoemInput},
  report::{EchartRow, StatRow, TableRow},
};

// ─── Filters ─────────────────────────────────────────────────────────────────

/// Row predicate for author listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthorFilter {
  #[default]
  All,
  /// Unranked substring match on `name`.
  NameContains(String),
}

/// Row predicate for poem listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PoemFilter {
  #[default]
  All,
  /// Poems owned by one author.
  ByAuthor(i64),
  /// Unranked substring match on `title` or `content`.
  TextContains(String),
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a catalogue backend.
///
/// Every mutation reports whether a row was touched; callers map `false` to
/// "not found". Deleting an author removes the author's poems as well.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait CatalogStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Authors ───────────────────────────────────────────────────────────

  /// Insert an author; the store assigns `author_id`.
  fn create_author(
    &self,
    input: AuthorInput,
  ) -> impl Future<Output = Result<Author, Self::Error>> + Send + '_;

  /// Retrieve an author by id. Returns `None` if not found.
  fn get_author(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Author>, Self::Error>> + Send + '_;

  /// One page of authors matching `filter`, ordered by id.
  fn list_authors(
    &self,
    filter: AuthorFilter,
    page: PageRequest,
  ) -> impl Future<Output = Result<Page<Author>, Self::Error>> + Send + '_;

  /// The first `count` authors by id, plus the total number of authors.
  fn first_authors(
    &self,
    count: u64,
  ) -> impl Future<Output = Result<AuthorSample, Self::Error>> + Send + '_;

  /// Replace every writable field. Returns `false` if no such author.
  fn update_author(
    &self,
    id: i64,
    input: AuthorInput,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Delete an author and all of their poems. Returns `false` if no such
  /// author.
  fn delete_author(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Poems ─────────────────────────────────────────────────────────────

  /// Insert a poem; the store assigns `poem_id`.
  fn create_poem(
    &self,
    input: PoemInput,
  ) -> impl Future<Output = Result<Poem, Self::Error>> + Send + '_;

  fn get_poem(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Poem>, Self::Error>> + Send + '_;

  /// One page of poems matching `filter`, ordered by id.
  fn list_poems(
    &self,
    filter: PoemFilter,
    page: PageRequest,
  ) -> impl Future<Output = Result<Page<Poem>, Self::Error>> + Send + '_;

  /// Replace every writable field. Returns `false` if no such poem.
  fn update_poem(
    &self,
    id: i64,
    input: PoemInput,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Returns `false` if no such poem.
  fn delete_poem(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// One page of an author's poems and the author's total poem count.
  ///
  /// Shared by "list poems by author" and the nested poems of author
  /// search, so both paginate identically.
  fn poems_for_author(
    &self,
    author_id: i64,
    page: PageRequest,
  ) -> impl Future<Output = Result<(Vec<Poem>, u64), Self::Error>> + Send + '_ {
    async move {
      let page = self.list_poems(PoemFilter::ByAuthor(author_id), page).await?;
      Ok((page.data, page.total))
    }
  }

  // ── Reporting views ───────────────────────────────────────────────────

  /// Raw rows of `stats_view`.
  fn stat_rows(&self) -> impl Future<Output = Result<Vec<StatRow>, Self::Error>> + Send + '_;

  /// Raw rows of `echart_two`, by poem count descending.
  fn echart_rows(&self) -> impl Future<Output = Result<Vec<EchartRow>, Self::Error>> + Send + '_;

  /// Raw rows of `data_table`, by poem count descending.
  fn table_rows(&self) -> impl Future<Output = Result<Vec<TableRow>, Self::Error>> + Send + '_;
}

//! Bulk import of the chinese-poetry JSON corpus.
//!
//! A corpus directory holds `authors.tang.json` (`[{"name", "desc"}]`) and
//! any number of `poet.tang.<n>.json` files
//! (`[{"author", "title", "paragraphs": [..]}]`).

use std::{collections::HashMap, path::Path};

use serde::Deserialize;

use crate::{Error, Result, SqliteStore};

pub const AUTHORS_FILE: &str = "authors.tang.json";
const POEMS_PREFIX: &str = "poet.tang.";

// ─── Corpus records ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct CorpusAuthor {
  pub name: String,
  #[serde(default)]
  pub desc: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorpusPoem {
  pub author:     String,
  pub title:      String,
  #[serde(default)]
  pub paragraphs: Vec<String>,
}

/// Everything read from a corpus directory, ready to insert.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
  pub authors: Vec<CorpusAuthor>,
  pub poems:   Vec<CorpusPoem>,
}

impl Corpus {
  /// Read the authors file and every poem file in `dir`.
  pub async fn load(dir: impl AsRef<Path>) -> Result<Self> {
    let dir = dir.as_ref();

    let authors_path = dir.join(AUTHORS_FILE);
    if !tokio::fs::try_exists(&authors_path).await? {
      return Err(Error::MissingAuthors(dir.to_path_buf()));
    }
    let authors: Vec<CorpusAuthor> = read_json(&authors_path).await?;

    let mut poem_files = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
      let name = entry.file_name();
      let name = name.to_string_lossy();
      if name.starts_with(POEMS_PREFIX) && name.ends_with(".json") {
        poem_files.push(entry.path());
      }
    }
    poem_files.sort();

    let mut poems = Vec::new();
    for path in &poem_files {
      let batch: Vec<CorpusPoem> = read_json(path).await?;
      poems.extend(batch);
    }

    tracing::debug!(
      authors = authors.len(),
      poems = poems.len(),
      files = poem_files.len(),
      "corpus loaded"
    );
    Ok(Self { authors, poems })
  }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
  let bytes = tokio::fs::read(path).await?;
  serde_json::from_slice(&bytes).map_err(|source| Error::CorpusFile {
    path: path.to_path_buf(),
    source,
  })
}

// ─── Import ───────────────────────────────────────────────────────────────────

/// What an import changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
  pub authors_inserted: u64,
  pub poems_inserted:   u64,
  /// Poems whose author is neither in the corpus nor already stored.
  pub poems_skipped:    u64,
}

impl SqliteStore {
  /// Insert a corpus in one transaction.
  ///
  /// Authors are matched by name: an existing author is reused rather than
  /// duplicated. Poem paragraphs are joined with `\n`.
  pub async fn import_corpus(&self, corpus: Corpus) -> Result<ImportReport> {
    let report = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let mut report = ImportReport::default();

        let mut ids: HashMap<String, i64> = HashMap::new();
        {
          let mut stmt = tx.prepare("SELECT name, author_id FROM Authors ORDER BY author_id")?;
          let rows = stmt.query_map([], |r| Ok((r.get::<_, String>(0)?, r.get::<_, i64>(1)?)))?;
          for row in rows {
            let (name, id) = row?;
            ids.entry(name).or_insert(id);
          }
        }

        {
          let mut insert =
            tx.prepare("INSERT INTO Authors (name, description) VALUES (?1, ?2)")?;
          for author in corpus.authors {
            if ids.contains_key(&author.name) {
              continue;
            }
            insert.execute(rusqlite::params![author.name, author.desc])?;
            ids.insert(author.name, tx.last_insert_rowid());
            report.authors_inserted += 1;
          }
        }

        {
          let mut insert =
            tx.prepare("INSERT INTO Poems (title, author_id, content) VALUES (?1, ?2, ?3)")?;
          for poem in corpus.poems {
            let Some(author_id) = ids.get(&poem.author) else {
              report.poems_skipped += 1;
              continue;
            };
            insert.execute(rusqlite::params![
              poem.title,
              author_id,
              poem.paragraphs.join("\n")
            ])?;
            report.poems_inserted += 1;
          }
        }

        tx.commit()?;
        Ok(report)
      })
      .await?;

    tracing::info!(
      authors_inserted = report.authors_inserted,
      poems_inserted = report.poems_inserted,
      poems_skipped = report.poems_skipped,
      "corpus imported"
    );
    Ok(report)
  }
}

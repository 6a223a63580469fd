//! SQLite backend for the poetry catalogue.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime.

mod encode;
mod query;
mod schema;
mod store;

pub mod error;
pub mod import;

pub use error::{Error, Result};
pub use import::{Corpus, ImportReport};
pub use store::SqliteStore;

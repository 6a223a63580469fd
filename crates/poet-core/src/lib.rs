//! Core types and trait definitions for the poetry catalogue.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod author;
pub mod error;
pub mod page;
pub mod poem;
pub mod report;
pub mod store;

pub use error::{Error, Result};

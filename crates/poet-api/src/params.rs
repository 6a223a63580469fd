//! Query-string parameters shared across handlers.
//!
//! Every field is taken as a raw string so malformed numbers fall back to
//! defaults instead of rejecting the request.

use poet_core::page::PageRequest;
use serde::Deserialize;

use crate::error::ApiError;

#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
  pub page: Option<String>,
}

impl PageParams {
  pub fn page(&self) -> PageRequest { PageRequest::parse(self.page.as_deref()) }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
  /// Substring to look for. Required and non-empty.
  pub name: Option<String>,
  pub page: Option<String>,
}

impl SearchParams {
  pub fn page(&self) -> PageRequest { PageRequest::parse(self.page.as_deref()) }

  /// The search term, or a 400 if it is missing or empty.
  pub fn term(&self) -> Result<String, ApiError> {
    match self.name.as_deref() {
      Some(name) if !name.is_empty() => Ok(name.to_owned()),
      _ => Err(ApiError::BadRequest("name parameter must not be empty".into())),
    }
  }
}

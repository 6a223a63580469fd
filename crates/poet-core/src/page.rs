//! Pagination contract shared by every list endpoint.
//!
//! Pages are 1-based and always [`PAGE_SIZE`] rows long. Client input is
//! parsed leniently: a missing, non-numeric or sub-1 page is page 1.

use serde::Serialize;

/// Fixed page size for all paginated reads. Not client-configurable.
pub const PAGE_SIZE: u32 = 6;

/// A resolved page position: always `page >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
  pub page:      u64,
  pub page_size: u32,
}

impl PageRequest {
  /// Page 1 at the default size.
  pub const fn first() -> Self {
    Self { page: 1, page_size: PAGE_SIZE }
  }

  /// Page `page` at the default size, clamping `0` to `1`.
  pub fn new(page: u64) -> Self {
    Self { page: page.max(1), page_size: PAGE_SIZE }
  }

  /// Parse a raw `?page=` value. Never fails.
  pub fn parse(raw: Option<&str>) -> Self {
    Self::new(parse_positive(raw))
  }

  /// Row offset of the first row on this page.
  pub fn offset(&self) -> u64 {
    self.page.saturating_sub(1).saturating_mul(u64::from(self.page_size))
  }

  pub fn limit(&self) -> u64 { u64::from(self.page_size) }
}

impl Default for PageRequest {
  fn default() -> Self { Self::first() }
}

/// Parse a count such as the `:number` in `/authors/num/:number`.
///
/// Same leniency as page numbers: anything unparseable or below 1 is 1.
pub fn parse_count(raw: &str) -> u64 { parse_positive(Some(raw)) }

fn parse_positive(raw: Option<&str>) -> u64 {
  raw
    .and_then(|s| s.parse::<u64>().ok())
    .filter(|n| *n >= 1)
    .unwrap_or(1)
}

/// Response envelope for every paginated list.
///
/// `total` counts all rows matching the same predicate as `data`, not just
/// the rows on this page.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
  pub page:      u64,
  pub page_size: u32,
  pub total:     u64,
  pub data:      Vec<T>,
}

impl<T> Page<T> {
  pub fn new(request: PageRequest, total: u64, data: Vec<T>) -> Self {
    Self {
      page: request.page,
      page_size: request.page_size,
      total,
      data,
    }
  }

  /// Swap the row type, keeping the envelope.
  pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
    Page {
      page:      self.page,
      page_size: self.page_size,
      total:     self.total,
      data:      self.data.into_iter().map(f).collect(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_page_is_first() {
    assert_eq!(PageRequest::parse(None), PageRequest::first());
  }

  #[test]
  fn non_numeric_and_small_pages_clamp_to_one() {
    for raw in ["", "abc", "2x", "0", "-4", "1.5"] {
      assert_eq!(PageRequest::parse(Some(raw)).page, 1, "raw = {raw:?}");
    }
  }

  #[test]
  fn numeric_page_is_kept() {
    let req = PageRequest::parse(Some("3"));
    assert_eq!(req.page, 3);
    assert_eq!(req.page_size, PAGE_SIZE);
    assert_eq!(req.offset(), 12);
    assert_eq!(req.limit(), 6);
  }

  #[test]
  fn large_page_is_kept_verbatim() {
    let req = PageRequest::parse(Some("99999999999"));
    assert_eq!(req.page, 99_999_999_999);
    assert_eq!(req.offset(), 99_999_999_998 * 6);
  }

  #[test]
  fn offset_saturates_instead_of_overflowing() {
    let req = PageRequest::new(u64::MAX);
    assert_eq!(req.offset(), u64::MAX);
  }

  #[test]
  fn out_of_range_page_is_first() {
    assert_eq!(PageRequest::parse(Some("99999999999999999999999")).page, 1);
  }

  #[test]
  fn count_parsing_matches_page_parsing() {
    assert_eq!(parse_count("10"), 10);
    assert_eq!(parse_count("0"), 1);
    assert_eq!(parse_count("ten"), 1);
  }

  #[test]
  fn page_envelope_serialises_flat() {
    let page = Page::new(PageRequest::new(2), 8, vec!["a", "b"]);
    let json = serde_json::to_value(&page).unwrap();
    assert_eq!(
      json,
      serde_json::json!({ "page": 2, "page_size": 6, "total": 8, "data": ["a", "b"] })
    );
  }
}

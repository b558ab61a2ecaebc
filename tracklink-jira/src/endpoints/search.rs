//! # Saved Filter Search
//!
//! Lists every issue matched by a saved filter, fetching as many pages as the
//! first page's reported total requires.

use tracing::info;

use crate::client::JiraConnector;
use crate::consts::PAGE_SIZE;
use crate::error::Result;
use crate::models::{Issue, IssuePage, SearchResults};
use crate::response::OperationKind;
use crate::transport::{ApiRequest, Transport};

/// Number of pages needed after the first one to cover `total_available`.
pub const fn additional_pages(total_available: usize) -> usize {
  if total_available <= PAGE_SIZE {
    0
  } else {
    (total_available - PAGE_SIZE).div_ceil(PAGE_SIZE)
  }
}

impl<T: Transport> JiraConnector<T> {
  /// Get all issues matched by a saved filter, in server order.
  ///
  /// The total reported by the first page decides how many pages are fetched.
  /// Any failing page aborts the whole listing.
  pub fn get_issues_by_filter(&self, filter_id: &str) -> Result<Vec<Issue>> {
    let mut page = IssuePage::new(self.search_page(filter_id, 0)?);

    let remaining_pages = additional_pages(page.total_available());
    if remaining_pages > 0 {
      info!(
        filter_id,
        total = page.total_available(),
        pages = remaining_pages + 1,
        "Fetching paged filter results"
      );
    }

    for page_number in 1..=remaining_pages {
      page.append(self.search_page(filter_id, page_number * PAGE_SIZE)?);
    }

    Ok(page.into_issues())
  }

  fn search_page(&self, filter_id: &str, start_at: usize) -> Result<SearchResults> {
    let request = ApiRequest::get("search")
      .query("jql", format!("filter={filter_id}"))
      .query("maxResults", PAGE_SIZE)
      .query("startAt", start_at);

    self.send(&request, OperationKind::Read)?.json()
  }
}

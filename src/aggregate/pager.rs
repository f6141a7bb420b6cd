//! Cursor-driven pagination with a result cap.

use crate::youtube::Params;

/// Page size for `commentThreads.list`.
pub const COMMENT_PAGE_SIZE: usize = 100;

/// Page size for every other list endpoint.
pub const PAGE_SIZE: usize = 50;

/// Parameters for the next page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub max_results: usize,
    pub page_token: Option<String>,
}

impl PageRequest {
    /// Write `maxResults` and `pageToken` into `params`.
    pub fn apply(&self, params: &mut Params) {
        params.insert("maxResults", self.max_results.to_string());
        match &self.page_token {
            Some(token) => {
                params.insert("pageToken", token.clone());
            }
            None => {
                params.remove("pageToken");
            }
        }
    }
}

/// Tracks the cursor and collected count across pages.
///
/// Each request asks for `min(page_size, cap - collected)` items, or always
/// `page_size` when built with [`Paginator::full_pages`]. Iteration stops
/// once `collected >= cap` or a page comes back without a cursor.
#[derive(Debug)]
pub struct Paginator {
    cap: usize,
    page_size: usize,
    collected: usize,
    cursor: Option<String>,
    exhausted: bool,
    pages: usize,
    full_pages: bool,
}

impl Paginator {
    pub fn new(cap: usize, page_size: usize) -> Self {
        Self {
            cap,
            page_size: page_size.max(1),
            collected: 0,
            cursor: None,
            exhausted: false,
            pages: 0,
            full_pages: false,
        }
    }

    /// A paginator whose cap counts something other than page items
    /// (e.g. distinct owners), so every request asks for a full page.
    pub fn full_pages(cap: usize, page_size: usize) -> Self {
        Self {
            full_pages: true,
            ..Self::new(cap, page_size)
        }
    }

    /// The next request to make, or `None` when pagination is finished.
    pub fn next_request(&self) -> Option<PageRequest> {
        if self.exhausted || self.collected >= self.cap {
            return None;
        }

        let max_results = if self.full_pages {
            self.page_size
        } else {
            self.page_size.min(self.cap - self.collected)
        };

        Some(PageRequest {
            max_results,
            page_token: self.cursor.clone(),
        })
    }

    /// Record a fetched page: the running total and the returned cursor.
    pub fn advance(&mut self, collected: usize, next_page_token: Option<String>) {
        self.pages += 1;
        self.collected = collected;
        self.cursor = next_page_token.filter(|t| !t.is_empty());
        self.exhausted = self.cursor.is_none();
    }

    /// Number of pages fetched so far.
    pub fn pages(&self) -> usize {
        self.pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Drive a paginator over an endless source that always fills the request.
    fn requests_for(cap: usize, page_size: usize) -> Vec<usize> {
        let mut pager = Paginator::new(cap, page_size);
        let mut collected = 0;
        let mut sizes = Vec::new();
        while let Some(request) = pager.next_request() {
            sizes.push(request.max_results);
            collected += request.max_results;
            pager.advance(collected, Some(format!("page{}", sizes.len())));
        }
        sizes
    }

    #[test]
    fn test_request_count_is_ceil_of_cap_over_page() {
        for (cap, page) in [(1, 50), (50, 50), (51, 50), (120, 50), (250, 100), (7, 3)] {
            let sizes = requests_for(cap, page);
            assert_eq!(sizes.len(), cap.div_ceil(page), "cap {cap} page {page}");
            assert_eq!(sizes.iter().sum::<usize>(), cap);
            assert!(sizes.iter().all(|&s| s <= page));
        }
    }

    #[test]
    fn test_last_request_asks_only_for_remainder() {
        assert_eq!(requests_for(120, 50), vec![50, 50, 20]);
    }

    #[test]
    fn test_full_pages_ignore_remaining_capacity() {
        let mut pager = Paginator::full_pages(2, 50);
        assert_eq!(pager.next_request().unwrap().max_results, 50);

        pager.advance(1, Some("p2".to_string()));
        assert_eq!(pager.next_request().unwrap().max_results, 50);

        pager.advance(2, Some("p3".to_string()));
        assert!(pager.next_request().is_none());
        assert!(Paginator::full_pages(0, 50).next_request().is_none());
    }

    #[test]
    fn test_zero_cap_makes_no_requests() {
        assert!(requests_for(0, 50).is_empty());
    }

    #[test]
    fn test_stops_when_cursor_missing() {
        let mut pager = Paginator::new(500, 50);
        let first = pager.next_request().unwrap();
        assert_eq!(first.page_token, None);

        pager.advance(50, Some("tok".to_string()));
        assert_eq!(pager.next_request().unwrap().page_token.as_deref(), Some("tok"));

        pager.advance(80, None);
        assert!(pager.next_request().is_none());
        assert_eq!(pager.pages(), 2);
    }

    #[test]
    fn test_empty_token_ends_pagination() {
        let mut pager = Paginator::new(500, 50);
        pager.advance(10, Some(String::new()));
        assert!(pager.next_request().is_none());
    }

    #[test]
    fn test_apply_sets_and_clears_token() {
        let mut params = Params::new();
        params.insert("pageToken", "stale".to_string());

        PageRequest {
            max_results: 20,
            page_token: None,
        }
        .apply(&mut params);
        assert_eq!(params.get("maxResults").map(String::as_str), Some("20"));
        assert!(!params.contains_key("pageToken"));

        PageRequest {
            max_results: 5,
            page_token: Some("next".to_string()),
        }
        .apply(&mut params);
        assert_eq!(params.get("pageToken").map(String::as_str), Some("next"));
    }
}

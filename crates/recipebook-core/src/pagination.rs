// ABOUTME: Offset pagination module for page-numbered listings
// ABOUTME: Provides page requests, fixed page sizes, and page envelopes with has-more flags
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use crate::constants::listing::RECIPES_PER_PAGE;

/// A 1-based page request with a fixed page size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// 1-based page number
    pub page: u32,
    /// Items per page
    pub per_page: u32,
}

impl PageRequest {
    /// Request `page` with the recipe listing page size
    ///
    /// Page numbers below 1 are clamped to the first page.
    #[must_use]
    pub const fn recipes(page: u32) -> Self {
        Self {
            page: if page == 0 { 1 } else { page },
            per_page: RECIPES_PER_PAGE,
        }
    }

    /// Row offset of the first item on this page
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.per_page as u64
    }

    /// Maximum number of rows to fetch for this page
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.per_page as u64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::recipes(1)
    }
}

/// One page of results plus the totals needed to render pagination controls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// The items in this page
    pub items: Vec<T>,
    /// 1-based page number
    pub page: u32,
    /// Page size used for this listing
    pub per_page: u32,
    /// Total number of matching items across all pages
    pub total: u64,
    /// Whether there are more items after this page
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Assemble a page from its items and the total match count
    #[must_use]
    pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        let seen = request.offset() + items.len() as u64;
        Self {
            items,
            page: request.page,
            per_page: request.per_page,
            total,
            has_more: seen < total,
        }
    }

    /// Number of the last page (at least 1)
    #[must_use]
    pub fn last_page(&self) -> u64 {
        if self.total == 0 || self.per_page == 0 {
            return 1;
        }
        self.total.div_ceil(u64::from(self.per_page))
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipes_request_uses_fixed_page_size() {
        let request = PageRequest::recipes(3);
        assert_eq!(request.per_page, 5);
        assert_eq!(request.offset(), 10);
        assert_eq!(request.limit(), 5);
    }

    #[test]
    fn test_page_zero_is_clamped() {
        assert_eq!(PageRequest::recipes(0).page, 1);
        assert_eq!(PageRequest::recipes(0).offset(), 0);
    }

    #[test]
    fn test_has_more_and_last_page() {
        let first = Page::new(vec![1, 2, 3, 4, 5], PageRequest::recipes(1), 12);
        assert!(first.has_more);
        assert_eq!(first.last_page(), 3);

        let last = Page::new(vec![11, 12], PageRequest::recipes(3), 12);
        assert!(!last.has_more);

        let empty: Page<u8> = Page::new(vec![], PageRequest::recipes(1), 0);
        assert!(!empty.has_more);
        assert_eq!(empty.last_page(), 1);
    }
}

//! Shared pagination types for list endpoints.
//!
//! Listings use fixed-size pages of [`PER_PAGE`] items addressed by a 1-based
//! `page` query parameter.

use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr};
use utoipa::{IntoParams, ToSchema};

/// Number of items in a page. Not client-tunable.
pub const PER_PAGE: i64 = 20;

/// 1-based page selector for list endpoints.
///
/// Values below 1 are treated as page 1. A page past the end of the result
/// set is not an error, it simply yields no items.
#[serde_as]
#[derive(Debug, Default, Clone, Deserialize, IntoParams, ToSchema)]
pub struct Page {
    /// Page to fetch (default: 1)
    #[param(default = 1, minimum = 1)]
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub page: Option<i64>,
}

impl Page {
    /// The page actually served, clamped to at least 1.
    #[inline]
    pub fn current_page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Offset into the result set for this page.
    ///
    /// Saturates rather than overflowing so that an absurdly large page
    /// number still resolves to a valid (empty) page.
    #[inline]
    pub fn skip(&self) -> i64 {
        PER_PAGE.saturating_mul(self.current_page().saturating_sub(1))
    }
}

/// Number of pages needed to hold `total_count` items, rounding up.
/// Zero items means zero pages.
#[inline]
pub fn total_pages(total_count: i64) -> i64 {
    (total_count + PER_PAGE - 1) / PER_PAGE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_first_page() {
        let p = Page::default();
        assert_eq!(p.current_page(), 1);
        assert_eq!(p.skip(), 0);
    }

    #[test]
    fn test_page_below_one_is_clamped() {
        let p = Page { page: Some(0) };
        assert_eq!(p.current_page(), 1);
        assert_eq!(p.skip(), 0);

        let p = Page { page: Some(-3) };
        assert_eq!(p.current_page(), 1);
    }

    #[test]
    fn test_skip_scales_with_page() {
        let p = Page { page: Some(3) };
        assert_eq!(p.current_page(), 3);
        assert_eq!(p.skip(), 40);
    }

    #[test]
    fn test_skip_saturates_on_huge_page() {
        let p = Page { page: Some(i64::MAX) };
        assert_eq!(p.current_page(), i64::MAX);
        assert_eq!(p.skip(), i64::MAX);

        let p = Page { page: Some(i64::MAX / PER_PAGE) };
        assert!(p.skip() > 0);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(total_pages(0), 0);
        assert_eq!(total_pages(1), 1);
        assert_eq!(total_pages(20), 1);
        assert_eq!(total_pages(21), 2);
        assert_eq!(total_pages(45), 3);
    }

    #[test]
    fn test_page_parses_from_query_string() {
        let p: Page = serde_urlencoded::from_str("page=4").unwrap();
        assert_eq!(p.current_page(), 4);

        let p: Page = serde_urlencoded::from_str("").unwrap();
        assert_eq!(p.current_page(), 1);
    }
}

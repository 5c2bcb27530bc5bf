use std::num::IntErrorKind;

use serde_derive::Serialize;
use utoipa::ToSchema;

pub const POSTS_PER_PAGE: i64 = 10;

/// Resolved page of a listing. Construction never fails: requests outside
/// `1..=num_pages` are clamped and garbage resolves to the first page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct PageInfo {
    pub number: i64,
    pub num_pages: i64,
    pub per_page: i64,
    pub total_count: i64,
    pub has_previous: bool,
    pub has_next: bool,
}

impl PageInfo {
    pub fn resolve(requested: Option<&str>, total_count: i64, per_page: i64) -> Self {
        let per_page = per_page.max(1);
        let total_count = total_count.max(0);
        // An empty listing still has one (empty) page.
        let num_pages = ((total_count + per_page - 1) / per_page).max(1);

        let number = match requested.map(|raw| raw.trim().parse::<i64>()) {
            Some(Ok(number)) => number,
            // All digits but wider than i64: still "past the end"
            Some(Err(e)) if *e.kind() == IntErrorKind::PosOverflow => num_pages,
            Some(Err(_)) | None => 1,
        }
        .clamp(1, num_pages);

        Self {
            number,
            num_pages,
            per_page,
            total_count,
            has_previous: number > 1,
            has_next: number < num_pages,
        }
    }

    pub fn offset(&self) -> i64 {
        (self.number - 1) * self.per_page
    }

    pub fn limit(&self) -> i64 {
        self.per_page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_garbage_page_is_first() {
        for raw in [None, Some(""), Some("abc"), Some("1.5")] {
            let page = PageInfo::resolve(raw, 35, 10);
            assert_eq!(page.number, 1, "{raw:?}");
            assert_eq!(page.offset(), 0);
        }
    }

    #[test]
    fn page_zero_and_negative_clamp_to_first() {
        assert_eq!(PageInfo::resolve(Some("0"), 35, 10).number, 1);
        assert_eq!(PageInfo::resolve(Some("-4"), 35, 10).number, 1);
    }

    #[test]
    fn page_past_end_clamps_to_last() {
        let page = PageInfo::resolve(Some("99"), 35, 10);
        assert_eq!(page.number, 4);
        assert_eq!(page.num_pages, 4);
        assert_eq!(page.offset(), 30);
        assert!(page.has_previous);
        assert!(!page.has_next);
    }

    #[test]
    fn huge_page_number_does_not_overflow() {
        let page = PageInfo::resolve(Some("9223372036854775807"), 35, 10);
        assert_eq!(page.number, 4);
    }

    #[test]
    fn page_wider_than_i64_clamps_to_last() {
        for raw in ["99999999999999999999", "+99999999999999999999"] {
            let page = PageInfo::resolve(Some(raw), 35, 10);
            assert_eq!(page.number, 4, "{raw}");
            assert_eq!(page.offset(), 30);
        }
        assert_eq!(
            PageInfo::resolve(Some("-99999999999999999999"), 35, 10).number,
            1
        );
    }

    #[test]
    fn empty_listing_has_single_page() {
        let page = PageInfo::resolve(Some("3"), 0, 10);
        assert_eq!(page.number, 1);
        assert_eq!(page.num_pages, 1);
        assert!(!page.has_next);
        assert!(!page.has_previous);
    }

    #[test]
    fn exact_multiple_has_no_trailing_page() {
        let page = PageInfo::resolve(Some("2"), 20, 10);
        assert_eq!(page.num_pages, 2);
        assert_eq!(page.number, 2);
        assert!(!page.has_next);
    }

    #[test]
    fn middle_page_links_both_ways() {
        let page = PageInfo::resolve(Some(" 2 "), 35, POSTS_PER_PAGE);
        assert_eq!(page.number, 2);
        assert!(page.has_previous && page.has_next);
        assert_eq!(page.limit(), POSTS_PER_PAGE);
    }
}

//! # Responsive Pagination
//!
//! Items-per-page is chosen from the caller's viewport width against a fixed
//! breakpoint table. Two tables exist: a four-tier one for the featured
//! carousel and a five-tier one for general listings. Widths at or below
//! zero (a headless client, a bogus report) fall into the lowest tier; there
//! is no upper bound, so very large widths pin the top tier.
//!
//! Page numbers are 1-based. Pages below 1 clamp to the first page rather
//! than turning into negative offsets.

/// Items per page for the featured-property carousel.
pub fn featured_page_size(width: i32) -> usize {
    if width < 768 {
        4
    } else if width < 1024 {
        8
    } else if width < 1280 {
        10
    } else {
        12
    }
}

/// Items per page for general paginated listings. Used by both the page
/// fetch and the page count so the two can never disagree.
pub fn listing_page_size(width: i32) -> usize {
    if width < 640 {
        8
    } else if width < 768 {
        10
    } else if width < 1024 {
        12
    } else if width < 1280 {
        15
    } else {
        18
    }
}

/// Offset of a 1-based page. Non-positive pages clamp to page 1.
pub fn page_offset(page: i64, per_page: usize) -> usize {
    let page = page.max(1) as usize;
    (page - 1) * per_page
}

/// Number of pages needed for `total` documents at the listing tier for
/// `width`. Zero documents is zero pages, not one.
pub fn page_count(total: u64, width: i32) -> u64 {
    total.div_ceil(listing_page_size(width) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_widths_use_the_lowest_tier() {
        for width in [i32::MIN, -1920, -1, 0] {
            assert_eq!(listing_page_size(width), 8, "width {width}");
            assert_eq!(featured_page_size(width), 4, "width {width}");
        }
    }

    #[test]
    fn tiers_change_exactly_at_the_breakpoints() {
        assert_eq!(listing_page_size(639), 8);
        assert_eq!(listing_page_size(640), 10);
        assert_eq!(listing_page_size(767), 10);
        assert_eq!(listing_page_size(768), 12);
        assert_eq!(listing_page_size(1023), 12);
        assert_eq!(listing_page_size(1024), 15);
        assert_eq!(listing_page_size(1279), 15);
        assert_eq!(listing_page_size(1280), 18);

        assert_eq!(featured_page_size(767), 4);
        assert_eq!(featured_page_size(768), 8);
        assert_eq!(featured_page_size(1023), 8);
        assert_eq!(featured_page_size(1024), 10);
        assert_eq!(featured_page_size(1279), 10);
        assert_eq!(featured_page_size(1280), 12);
    }

    #[test]
    fn huge_widths_pin_the_top_tier() {
        assert_eq!(listing_page_size(i32::MAX), 18);
        assert_eq!(featured_page_size(i32::MAX), 12);
    }

    #[test]
    fn page_count_rounds_up() {
        // 15 per page at width 1024.
        assert_eq!(page_count(45, 1024), 3);
        assert_eq!(page_count(46, 1024), 4);
        assert_eq!(page_count(1, 1024), 1);
        assert_eq!(page_count(15, 1024), 1);
        assert_eq!(page_count(16, 1024), 2);
    }

    #[test]
    fn zero_documents_is_zero_pages() {
        for width in [-50, 0, 500, 1024, 5000] {
            assert_eq!(page_count(0, width), 0, "width {width}");
        }
    }

    #[test]
    fn offsets_step_by_the_page_size() {
        assert_eq!(page_offset(1, 8), 0);
        assert_eq!(page_offset(3, 8), 16);
        assert_eq!(page_offset(2, 15), 15);
    }

    #[test]
    fn non_positive_pages_clamp_to_the_first_page() {
        assert_eq!(page_offset(0, 8), 0);
        assert_eq!(page_offset(-7, 8), 0);
    }
}

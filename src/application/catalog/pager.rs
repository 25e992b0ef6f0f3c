//! Pagination arithmetic
//!
//! Pure helpers shared by the catalog controller: page counts, the visible
//! slice of a result list and the sliding window of page-number buttons.

use std::ops::Range;

/// Products per page when nothing else is configured
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Page-number buttons shown at once when nothing else is configured
pub const DEFAULT_MAX_VISIBLE_PAGES: usize = 5;

/// Fixed page geometry for one controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page_size: usize,
    max_visible_pages: usize,
}

impl Pager {
    /// Zero values are raised to 1.
    pub fn new(page_size: usize, max_visible_pages: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            max_visible_pages: max_visible_pages.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn max_visible_pages(&self) -> usize {
        self.max_visible_pages
    }

    /// `ceil(total_items / page_size)`; zero items means zero pages.
    pub fn total_pages(&self, total_items: usize) -> usize {
        total_items.div_ceil(self.page_size)
    }

    /// Index range of `page` (1-based) within a list of `len` items,
    /// clamped so it never reaches past the end of the list.
    pub fn slice_bounds(&self, len: usize, page: usize) -> Range<usize> {
        let start = page
            .saturating_sub(1)
            .saturating_mul(self.page_size)
            .min(len);
        let end = start.saturating_add(self.page_size).min(len);
        start..end
    }

    pub fn page_of<'a, T>(&self, items: &'a [T], page: usize) -> &'a [T] {
        &items[self.slice_bounds(items.len(), page)]
    }

    /// Sliding window of page numbers centred on `current`.
    ///
    /// The window holds `min(max_visible_pages, total_pages)` pages. When the
    /// centred window would run past the last page its start is pulled
    /// forward so the width is kept.
    pub fn window(&self, total_pages: usize, current: usize) -> PageWindow {
        let half = self.max_visible_pages / 2;
        let mut start = current.saturating_sub(half).max(1);
        let end = start
            .saturating_add(self.max_visible_pages - 1)
            .min(total_pages);

        let width = (end + 1).saturating_sub(start);
        if width < self.max_visible_pages {
            start = (end + 1).saturating_sub(self.max_visible_pages).max(1);
        }

        PageWindow { start, end }
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, DEFAULT_MAX_VISIBLE_PAGES)
    }
}

/// Inclusive run of page numbers; empty when `end < start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub start: usize,
    pub end: usize,
}

impl PageWindow {
    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    pub fn len(&self) -> usize {
        (self.end + 1).saturating_sub(self.start)
    }

    pub fn pages(&self) -> impl Iterator<Item = usize> {
        self.start..=self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(w: PageWindow) -> Vec<usize> {
        w.pages().collect()
    }

    #[test]
    fn total_pages_rounds_up() {
        let pager = Pager::new(50, 5);
        assert_eq!(pager.total_pages(0), 0);
        assert_eq!(pager.total_pages(1), 1);
        assert_eq!(pager.total_pages(50), 1);
        assert_eq!(pager.total_pages(51), 2);
        assert_eq!(pager.total_pages(120), 3);
    }

    #[test]
    fn last_page_holds_the_remainder() {
        let pager = Pager::new(50, 5);
        let items: Vec<u32> = (0..51).collect();
        assert_eq!(pager.page_of(&items, 2), &[50]);
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let pager = Pager::new(10, 5);
        let items: Vec<u32> = (0..15).collect();
        assert!(pager.page_of(&items, 3).is_empty());
        assert!(pager.page_of(&items, usize::MAX).is_empty());
    }

    #[test]
    fn window_is_centred_in_the_middle() {
        let pager = Pager::new(10, 5);
        assert_eq!(pages(pager.window(20, 10)), vec![8, 9, 10, 11, 12]);
    }

    #[test]
    fn window_near_the_end_keeps_its_width() {
        let pager = Pager::new(10, 5);
        assert_eq!(pages(pager.window(12, 10)), vec![8, 9, 10, 11, 12]);
        assert_eq!(pages(pager.window(12, 12)), vec![8, 9, 10, 11, 12]);
        assert_eq!(pages(pager.window(12, 11)), vec![8, 9, 10, 11, 12]);
    }

    #[test]
    fn window_near_the_start_keeps_its_width() {
        let pager = Pager::new(10, 5);
        assert_eq!(pages(pager.window(12, 1)), vec![1, 2, 3, 4, 5]);
        assert_eq!(pages(pager.window(12, 2)), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn window_shrinks_to_the_page_count() {
        let pager = Pager::new(10, 5);
        assert_eq!(pages(pager.window(3, 2)), vec![1, 2, 3]);
        assert_eq!(pages(pager.window(1, 1)), vec![1]);
    }

    #[test]
    fn no_pages_means_empty_window() {
        let pager = Pager::new(10, 5);
        let window = pager.window(0, 1);
        assert!(window.is_empty());
        assert_eq!(window.len(), 0);
    }

    #[test]
    fn zero_geometry_is_raised_to_one() {
        let pager = Pager::new(0, 0);
        assert_eq!(pager.page_size(), 1);
        assert_eq!(pages(pager.window(4, 3)), vec![3]);
    }
}

//! Page arithmetic.

use std::ops::Range;

use crate::config::DEFAULT_PAGE_LENGTH;

/// Current page position and size.
///
/// `page_length` comes from configuration; only `page_index` moves at
/// runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    pub page_index: usize,
    pub page_length: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_length: DEFAULT_PAGE_LENGTH,
        }
    }
}

impl PageState {
    pub fn new(page_length: usize) -> Self {
        Self {
            page_index: 0,
            page_length,
        }
    }

    /// Number of pages needed for `len` rows.
    pub fn page_count(&self, len: usize) -> usize {
        page_count(len, self.page_length)
    }

    /// Pulls `page_index` back inside `[0, page_count - 1]`.
    ///
    /// Returns `true` if the index moved.
    pub fn clamp(&mut self, len: usize) -> bool {
        let clamped = clamp_index(self.page_index, len, self.page_length);
        let moved = clamped != self.page_index;
        self.page_index = clamped;
        moved
    }

    /// Row range of the current page within `len` rows.
    pub fn bounds(&self, len: usize) -> Range<usize> {
        page_bounds(len, self.page_index, self.page_length)
    }
}

/// `ceil(len / page_length)`; zero when either is zero.
pub fn page_count(len: usize, page_length: usize) -> usize {
    if page_length == 0 {
        return 0;
    }
    len.div_ceil(page_length)
}

/// Clamps a page index into the valid range for `len` rows.
pub fn clamp_index(index: usize, len: usize, page_length: usize) -> usize {
    match page_count(len, page_length) {
        0 => 0,
        count => index.min(count - 1),
    }
}

/// `index*page_length .. (index+1)*page_length`, cut to `len`.
pub fn page_bounds(len: usize, index: usize, page_length: usize) -> Range<usize> {
    let start = index.saturating_mul(page_length).min(len);
    let end = start.saturating_add(page_length).min(len);
    start..end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 10), 0);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(5, 0), 0);
    }

    #[test]
    fn test_clamp() {
        let mut page = PageState {
            page_index: 4,
            page_length: 10,
        };
        assert!(page.clamp(25));
        assert_eq!(page.page_index, 2);
        assert!(!page.clamp(25));
        page.clamp(0);
        assert_eq!(page.page_index, 0);
    }

    #[test]
    fn test_bounds() {
        assert_eq!(page_bounds(25, 2, 10), 20..25);
        assert_eq!(page_bounds(25, 0, 10), 0..10);
        assert_eq!(page_bounds(3, 5, 10), 3..3);
    }
}

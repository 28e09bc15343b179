//! Paginator — fixed-size, one-indexed pages over a filtered row set.
//!
//! [`paginate`] is deliberately permissive: an out-of-range page yields an
//! empty slice rather than being clamped. Range enforcement belongs to
//! [`Pager`], the state behind the `Previous` / `Next` controls.

/// Rows per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// The `page`-th (one-indexed) slice of `page_size` items.
///
/// Page 0, pages past the end and a zero page size all return an empty slice.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// `ceil(len / page_size)`; zero when there are no items.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Current-page state for a list of `total_items`.
///
/// The current page is always within `1..=max(total_pages, 1)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    current: usize,
    page_size: usize,
    total_items: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pager {
    /// A pager on page 1. A zero `page_size` is treated as 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            current: 1,
            page_size: page_size.max(1),
            total_items: 0,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.total_items, self.page_size)
    }

    /// Whether the `Previous` / `Next` controls are shown at all.
    pub fn is_paginated(&self) -> bool {
        self.total_pages() > 1
    }

    pub fn has_prev(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self) -> bool {
        self.current < self.total_pages()
    }

    /// Record a new item count and go back to page 1.
    pub fn reset(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.current = 1;
    }

    /// Advance one page. Returns `false` (and stays put) on the last page.
    pub fn next(&mut self) -> bool {
        if self.has_next() {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Go back one page. Returns `false` (and stays put) on page 1.
    pub fn prev(&mut self) -> bool {
        if self.has_prev() {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to `page`, clamped into the valid range.
    pub fn goto(&mut self, page: usize) {
        self.current = page.clamp(1, self.total_pages().max(1));
    }

    /// The slice of `items` for the current page.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        paginate(items, self.current, self.page_size)
    }

    /// `Page X of Y`.
    pub fn label(&self) -> String {
        format!("Page {} of {}", self.current, self.total_pages())
    }
}

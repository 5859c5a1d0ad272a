// File: crates/tempchart-core/src/view.rs
// Summary: Pagination state: N snapshot pages followed by one interactive page.

/// Which page is on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    /// Top-K snapshot for the i-th configured year.
    Snapshot(usize),
    /// Full-range time series for a selected entity.
    Interactive,
}

/// Navigation direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Nav {
    Prev,
    Next,
}

/// Current page index over `page_count` snapshots plus the interactive page.
/// Contract: `0 <= current_index <= page_count`; `page_count` selects Interactive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewState {
    current_index: usize,
    page_count: usize,
}

impl ViewState {
    /// Starts on `Snapshot(0)`. `page_count` is clamped to at least 1.
    pub fn new(page_count: usize) -> Self {
        Self { current_index: 0, page_count: page_count.max(1) }
    }

    pub fn index(&self) -> usize { self.current_index }

    pub fn page_count(&self) -> usize { self.page_count }

    pub fn page(&self) -> Page { Self::page_at(self.current_index, self.page_count) }

    fn page_at(index: usize, page_count: usize) -> Page {
        if index < page_count { Page::Snapshot(index) } else { Page::Interactive }
    }

    /// Index a navigation would move to; equal to the current one at a boundary.
    pub fn target(&self, nav: Nav) -> usize {
        match nav {
            Nav::Next => (self.current_index + 1).min(self.page_count),
            Nav::Prev => self.current_index.saturating_sub(1),
        }
    }

    /// Page a navigation would move to, without moving.
    pub fn peek(&self, nav: Nav) -> Page { Self::page_at(self.target(nav), self.page_count) }

    /// Move and return the new page.
    pub fn apply(&mut self, nav: Nav) -> Page {
        self.current_index = self.target(nav);
        self.page()
    }

    pub fn next(&mut self) -> Page { self.apply(Nav::Next) }

    pub fn prev(&mut self) -> Page { self.apply(Nav::Prev) }

    /// Jump to an index, clamped into range.
    pub fn set_index(&mut self, index: usize) { self.current_index = index.min(self.page_count); }

    pub fn has_next(&self) -> bool { self.current_index < self.page_count }

    pub fn has_prev(&self) -> bool { self.current_index > 0 }
}

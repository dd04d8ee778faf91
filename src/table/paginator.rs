//! Zero-based page cursor over an in-memory list

use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    current_page: usize,
    page_size: usize,
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self, total_items: usize) -> usize {
        total_items.div_ceil(self.page_size)
    }

    /// Move to `page` if `0 <= page < total_pages`; returns whether it moved
    pub fn go_to(&mut self, page: usize, total_items: usize) -> bool {
        if page < self.total_pages(total_items) {
            self.current_page = page;
            true
        } else {
            false
        }
    }

    pub fn first(&mut self, total_items: usize) -> bool {
        self.go_to(0, total_items)
    }

    pub fn previous(&mut self, total_items: usize) -> bool {
        match self.current_page.checked_sub(1) {
            Some(page) => self.go_to(page, total_items),
            None => false,
        }
    }

    pub fn next(&mut self, total_items: usize) -> bool {
        self.go_to(self.current_page + 1, total_items)
    }

    pub fn last(&mut self, total_items: usize) -> bool {
        match self.total_pages(total_items).checked_sub(1) {
            Some(page) => self.go_to(page, total_items),
            None => false,
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.current_page > 0
    }

    pub fn can_go_forward(&self, total_items: usize) -> bool {
        self.current_page + 1 < self.total_pages(total_items)
    }

    pub fn reset(&mut self) {
        self.current_page = 0;
    }

    /// Pull the cursor back after the list shrank, e.g. after a delete
    pub fn clamp(&mut self, total_items: usize) {
        let last = self.total_pages(total_items).saturating_sub(1);
        if self.current_page > last {
            self.current_page = last;
        }
    }

    /// Index range of the current page within a list of `total_items`
    pub fn range(&self, total_items: usize) -> Range<usize> {
        let start = (self.current_page * self.page_size).min(total_items);
        let end = (start + self.page_size).min(total_items);
        start..end
    }
}

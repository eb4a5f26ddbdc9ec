use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of listings per page on the browse page
pub const DEFAULT_PAGE_SIZE: usize = 8;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaginationError {
    #[error("Page size must be at least 1")]
    ZeroPageSize,
}

/// Fixed-size, 1-based paginator
///
/// Pages past the end (and page 0) are empty rather than errors, and an empty
/// sequence has zero pages. `has_previous` is set only when the page before
/// the requested one holds items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
}

impl Paginator {
    pub fn new(page_size: usize) -> Result<Self, PaginationError> {
        if page_size == 0 {
            return Err(PaginationError::ZeroPageSize);
        }
        Ok(Self { page_size })
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// `ceil(total_items / page_size)`
    #[inline]
    pub fn total_pages(&self, total_items: usize) -> usize {
        total_items.div_ceil(self.page_size)
    }

    /// The slice `[(page-1)*size, page*size)` clamped to `items`
    pub fn slice<'a, T>(&self, items: &'a [T], page: usize) -> &'a [T] {
        if page == 0 {
            return &[];
        }
        let start = (page - 1).saturating_mul(self.page_size);
        if start >= items.len() {
            return &[];
        }
        let end = start.saturating_add(self.page_size).min(items.len());
        &items[start..end]
    }

    /// Take ownership of one page of `items`
    pub fn paginate<T>(&self, items: Vec<T>, page: usize) -> Page<T> {
        let total_items = items.len();
        let total_pages = self.total_pages(total_items);

        let page_items: Vec<T> = if page == 0 {
            Vec::new()
        } else {
            items
                .into_iter()
                .skip((page - 1).saturating_mul(self.page_size))
                .take(self.page_size)
                .collect()
        };

        Page {
            items: page_items,
            page,
            page_size: self.page_size,
            total_items,
            total_pages,
            has_next: page < total_pages,
            // Only when page - 1 is itself a real page
            has_previous: page > 1 && page <= total_pages + 1,
        }
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    #[serde(rename = "pageSize")]
    pub page_size: usize,
    #[serde(rename = "totalResults")]
    pub total_items: usize,
    #[serde(rename = "totalPages")]
    pub total_pages: usize,
    #[serde(rename = "hasNext")]
    pub has_next: bool,
    #[serde(rename = "hasPrevious")]
    pub has_previous: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_page_size_rejected() {
        assert_eq!(Paginator::new(0), Err(PaginationError::ZeroPageSize));
    }

    #[test]
    fn test_ten_items_page_size_eight() {
        let paginator = Paginator::new(8).unwrap();
        let items: Vec<u32> = (0..10).collect();

        assert_eq!(paginator.slice(&items, 1).len(), 8);
        assert_eq!(paginator.slice(&items, 2), &[8, 9]);
        assert!(paginator.slice(&items, 3).is_empty());
        assert!(paginator.slice(&items, 0).is_empty());
        assert_eq!(paginator.total_pages(items.len()), 2);
    }

    #[test]
    fn test_total_pages() {
        let paginator = Paginator::default();

        assert_eq!(paginator.total_pages(17), 3);
        assert_eq!(paginator.total_pages(16), 2);
        assert_eq!(paginator.total_pages(1), 1);
        assert_eq!(paginator.total_pages(0), 0);
    }

    #[test]
    fn test_paginate_metadata() {
        let paginator = Paginator::default();
        let items: Vec<u32> = (0..17).collect();

        let page = paginator.paginate(items.clone(), 2);
        assert_eq!(page.items, (8..16).collect::<Vec<_>>());
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next);
        assert!(page.has_previous);

        let last = paginator.paginate(items.clone(), 3);
        assert_eq!(last.items, vec![16]);
        assert!(!last.has_next);

        let after_last = paginator.paginate(items.clone(), 4);
        assert!(after_last.items.is_empty());
        assert!(after_last.has_previous);

        let beyond = paginator.paginate(items, 9);
        assert!(beyond.items.is_empty());
        assert!(!beyond.has_next);
        assert!(!beyond.has_previous);
    }

    #[test]
    fn test_paginate_empty() {
        let page = Paginator::default().paginate(Vec::<u32>::new(), 1);

        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next);
        assert!(!page.has_previous);
    }

    #[test]
    fn test_huge_page_number_does_not_overflow() {
        let paginator = Paginator::new(8).unwrap();
        let items = [1, 2, 3];
        assert!(paginator.slice(&items, usize::MAX).is_empty());
    }
}

use std::ops::RangeInclusive;

use serde::Serialize;
use utoipa::ToSchema;

/// Largest OFFSET Postgres accepts.
pub const MAX_OFFSET: u64 = i64::MAX as u64;

/// Rows to skip before one-based `page`. Saturates at [`MAX_OFFSET`], so an absurd
/// page number yields an empty page rather than an error.
pub fn page_offset(page: u64, page_size: u64) -> u64 {
    page.saturating_sub(1)
        .saturating_mul(page_size)
        .min(MAX_OFFSET)
}

/// One-based, inclusive range of items shown on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct DisplayRange {
    pub first: u64,
    pub last: u64,
}

/// Page arithmetic for a filtered result set of `total_items` split into `page_size` pages.
///
/// Navigation clamps into `[1, last_page]`, where `last_page` is 1 for an empty result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    total_items: u64,
    page_size: u64,
}

impl Paginator {
    pub fn new(total_items: u64, page_size: u64) -> Self {
        Self {
            total_items,
            page_size: page_size.max(1),
        }
    }

    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub fn total_pages(&self) -> u64 {
        self.total_items.div_ceil(self.page_size)
    }

    pub fn last_page(&self) -> u64 {
        self.total_pages().max(1)
    }

    /// `None` when there is nothing to show on `page`, including an empty result set.
    pub fn display_range(&self, page: u64) -> Option<DisplayRange> {
        if page == 0 {
            return None;
        }
        let first = (page - 1).checked_mul(self.page_size)?.checked_add(1)?;
        if first > self.total_items {
            return None;
        }
        let last = page
            .saturating_mul(self.page_size)
            .min(self.total_items);
        Some(DisplayRange { first, last })
    }

    pub fn next_page(&self, page: u64) -> u64 {
        page.saturating_add(1).clamp(1, self.last_page())
    }

    pub fn prev_page(&self, page: u64) -> u64 {
        page.saturating_sub(1).clamp(1, self.last_page())
    }

    pub fn clamp_page(&self, page: u64) -> u64 {
        page.clamp(1, self.last_page())
    }

    pub fn contains_page(&self, page: u64) -> bool {
        (1..=self.total_pages()).contains(&page)
    }

    pub fn page_numbers(&self) -> RangeInclusive<u64> {
        1..=self.total_pages()
    }
}

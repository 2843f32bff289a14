use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::catalog::{pagination::page_offset, query::ITEMS_PER_PAGE};

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct Pagination {
    #[serde(rename = "_page")]
    pub page: Option<u64>,
    #[serde(rename = "_limit")]
    pub limit: Option<u64>,
}

impl Pagination {
    pub fn is_requested(&self) -> bool {
        self.page.is_some() || self.limit.is_some()
    }

    /// Returns `(page, limit, offset)` with `page >= 1` and `limit` in `[1, max_limit]`.
    pub fn normalize(&self, max_limit: u64) -> (u64, u64, u64) {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self.limit.unwrap_or(ITEMS_PER_PAGE).clamp(1, max_limit.max(1));
        (page, limit, page_offset(page, limit))
    }
}

/// Sortable product fields, by their wire name in `_sort`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSortBy {
    CreatedAt,
    Price,
    DiscountPrice,
    Rating,
    Title,
}

impl ProductSortBy {
    pub fn from_field(field: &str) -> Option<Self> {
        match field {
            "createdAt" => Some(ProductSortBy::CreatedAt),
            "price" => Some(ProductSortBy::Price),
            "discountPrice" => Some(ProductSortBy::DiscountPrice),
            "rating" => Some(ProductSortBy::Rating),
            "title" => Some(ProductSortBy::Title),
            _ => None,
        }
    }
}

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

pub const TOP_PRODUCTS_LIMIT: usize = 10;
pub const COMPLETED_STATUS: &str = "completed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineItem {
    pub product_id: Uuid,
    pub quantity: i64,
}

/// Read-only view of an order as the aggregations see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub id: Uuid,
    pub status: String,
    pub total_amount: i64,
    pub items: Vec<LineItem>,
}

impl OrderRecord {
    pub fn is_completed(&self) -> bool {
        self.status == COMPLETED_STATUS
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductSales {
    #[serde(rename = "_id")]
    pub product_id: Uuid,
    pub total_sold: i64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AggregationError {
    #[error("{metric} does not fit in a 64-bit integer")]
    Overflow { metric: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationResult {
    pub order_count: u64,
    /// `None` when no order is completed, which is not the same as a zero total.
    pub total_revenue: Option<i64>,
    pub top_products: Vec<ProductSales>,
}

pub fn total_revenue(
    amounts: impl IntoIterator<Item = i64>,
) -> Result<Option<i64>, AggregationError> {
    let mut total: Option<i64> = None;
    for amount in amounts {
        let sum = total
            .unwrap_or(0)
            .checked_add(amount)
            .ok_or(AggregationError::Overflow { metric: "revenue" })?;
        total = Some(sum);
    }
    Ok(total)
}

/// Sums quantities per product and ranks them by units sold, highest first.
/// Equal totals are ordered by ascending product id.
pub fn top_products(
    items: impl IntoIterator<Item = LineItem>,
    limit: usize,
) -> Result<Vec<ProductSales>, AggregationError> {
    let mut sold: HashMap<Uuid, i64> = HashMap::new();
    for item in items {
        let total = sold.entry(item.product_id).or_default();
        *total = total
            .checked_add(item.quantity)
            .ok_or(AggregationError::Overflow { metric: "units sold" })?;
    }

    let mut ranked: Vec<ProductSales> = sold
        .into_iter()
        .map(|(product_id, total_sold)| ProductSales {
            product_id,
            total_sold,
        })
        .collect();
    ranked.sort_unstable_by(|a, b| {
        b.total_sold
            .cmp(&a.total_sold)
            .then_with(|| a.product_id.cmp(&b.product_id))
    });
    ranked.truncate(limit.min(TOP_PRODUCTS_LIMIT));
    Ok(ranked)
}

/// Fails as a whole if any metric overflows.
pub fn aggregate(orders: &[OrderRecord]) -> Result<AggregationResult, AggregationError> {
    Ok(AggregationResult {
        order_count: orders.len() as u64,
        total_revenue: total_revenue(
            orders
                .iter()
                .filter(|order| order.is_completed())
                .map(|order| order.total_amount),
        )?,
        top_products: top_products(
            orders.iter().flat_map(|order| order.items.iter().copied()),
            TOP_PRODUCTS_LIMIT,
        )?,
    })
}

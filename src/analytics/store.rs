use std::future::Future;

use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
    sea_query::{Alias, Expr},
};
use uuid::Uuid;

use crate::{
    analytics::aggregator::{
        OrderRecord, ProductSales, TOP_PRODUCTS_LIMIT, top_products, total_revenue,
    },
    entity::{
        order_items::{Column as OrderItemCol, Entity as OrderItems},
        orders::{Column as OrderCol, Entity as Orders, OrderStatus},
    },
    error::AppResult,
};

/// Order data the analytics endpoints read. Each call is an independent read;
/// consecutive calls may observe different snapshots.
pub trait OrderStore {
    fn count_orders(&self) -> impl Future<Output = AppResult<u64>> + Send;

    /// `None` when no order is completed.
    fn completed_revenue(&self) -> impl Future<Output = AppResult<Option<i64>>> + Send;

    /// At most `min(limit, TOP_PRODUCTS_LIMIT)` entries, highest total first,
    /// ties by ascending product id.
    fn top_products(
        &self,
        limit: usize,
    ) -> impl Future<Output = AppResult<Vec<ProductSales>>> + Send;
}

// Sums run in Postgres. SUM(bigint) yields numeric, so the result is cast back;
// a total beyond BIGINT fails the query instead of wrapping.
impl OrderStore for DatabaseConnection {
    async fn count_orders(&self) -> AppResult<u64> {
        Ok(Orders::find().count(self).await?)
    }

    async fn completed_revenue(&self) -> AppResult<Option<i64>> {
        let total = Orders::find()
            .select_only()
            .column_as(
                Expr::col(OrderCol::TotalAmount)
                    .sum()
                    .cast_as(Alias::new("BIGINT")),
                "total_revenue",
            )
            .filter(OrderCol::Status.eq(OrderStatus::Completed))
            .into_tuple::<Option<i64>>()
            .one(self)
            .await?;
        Ok(total.flatten())
    }

    async fn top_products(&self, limit: usize) -> AppResult<Vec<ProductSales>> {
        let limit = limit.min(TOP_PRODUCTS_LIMIT) as u64;
        let rows = OrderItems::find()
            .select_only()
            .column(OrderItemCol::ProductId)
            .column_as(
                Expr::col(OrderItemCol::Quantity)
                    .sum()
                    .cast_as(Alias::new("BIGINT")),
                "total_sold",
            )
            .group_by(OrderItemCol::ProductId)
            .order_by_desc(Expr::col(OrderItemCol::Quantity).sum())
            .order_by_asc(OrderItemCol::ProductId)
            .limit(limit)
            .into_tuple::<(Uuid, i64)>()
            .all(self)
            .await?;
        Ok(rows
            .into_iter()
            .map(|(product_id, total_sold)| ProductSales {
                product_id,
                total_sold,
            })
            .collect())
    }
}

impl OrderStore for [OrderRecord] {
    async fn count_orders(&self) -> AppResult<u64> {
        Ok(self.len() as u64)
    }

    async fn completed_revenue(&self) -> AppResult<Option<i64>> {
        let totals = self
            .iter()
            .filter(|order| order.is_completed())
            .map(|order| order.total_amount);
        Ok(total_revenue(totals)?)
    }

    async fn top_products(&self, limit: usize) -> AppResult<Vec<ProductSales>> {
        let items = self.iter().flat_map(|order| order.items.iter().copied());
        Ok(top_products(items, limit)?)
    }
}

pub mod aggregator;
pub mod store;

pub use aggregator::{
    AggregationError, AggregationResult, COMPLETED_STATUS, LineItem, OrderRecord, ProductSales,
    TOP_PRODUCTS_LIMIT, aggregate, top_products, total_revenue,
};
pub use store::OrderStore;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::analytics::ProductSales;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrdersCount {
    pub orders_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Revenue {
    pub total_revenue: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct TopProducts {
    #[schema(value_type = Vec<ProductSales>)]
    pub items: Vec<ProductSales>,
}

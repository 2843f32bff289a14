use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{catalog::filter::FilterDimension, models::Product};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct DimensionList {
    #[schema(value_type = Vec<FilterDimension>)]
    pub dimensions: Vec<FilterDimension>,
}

use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    analytics::ProductSales,
    catalog::{
        filter::{FilterDimension, FilterOption},
        pagination::DisplayRange,
        query::{SortOrder, SortSpec},
    },
    dto::{
        analytics::{OrdersCount, Revenue, TopProducts},
        products::{DimensionList, ProductList},
        users::{UpdateUserRequest, UserList},
    },
    models::{Product, User},
    response::{ApiResponse, Meta},
    routes::{analytics, health, params, products, users},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        products::list_products,
        products::list_dimensions,
        analytics::total_orders,
        analytics::revenue,
        analytics::top_products,
        users::get_own,
        users::list_users,
        users::update_user
    ),
    components(
        schemas(
            User,
            Product,
            ProductSales,
            FilterDimension,
            FilterOption,
            SortOrder,
            SortSpec,
            DisplayRange,
            ProductList,
            DimensionList,
            OrdersCount,
            Revenue,
            TopProducts,
            UserList,
            UpdateUserRequest,
            params::Pagination,
            Meta,
            ApiResponse<ProductList>,
            ApiResponse<DimensionList>,
            ApiResponse<OrdersCount>,
            ApiResponse<Revenue>,
            ApiResponse<TopProducts>,
            ApiResponse<User>,
            ApiResponse<UserList>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Catalog query endpoints"),
        (name = "Analytics", description = "Order analytics endpoints"),
        (name = "Users", description = "User record endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}

use crate::{
    analytics::{OrderStore, TOP_PRODUCTS_LIMIT},
    dto::analytics::{OrdersCount, Revenue, TopProducts},
    error::AppResult,
    middleware::auth::{AuthUser, ensure_admin},
    response::{ApiResponse, Meta},
};

// Each metric reads the store on its own and fails on its own.

pub async fn total_orders<S: OrderStore + ?Sized>(
    store: &S,
    user: &AuthUser,
) -> AppResult<ApiResponse<OrdersCount>> {
    ensure_admin(user)?;
    let orders_count = store.count_orders().await?;
    tracing::debug!(orders_count, "counted orders");
    Ok(ApiResponse::success(
        "Total orders",
        OrdersCount { orders_count },
        Some(Meta::empty()),
    ))
}

/// `data` is `null` when no order is completed yet.
pub async fn revenue<S: OrderStore + ?Sized>(
    store: &S,
    user: &AuthUser,
) -> AppResult<ApiResponse<Revenue>> {
    ensure_admin(user)?;
    match store.completed_revenue().await? {
        Some(total_revenue) => {
            tracing::debug!(total_revenue, "computed revenue");
            Ok(ApiResponse::success(
                "Revenue",
                Revenue { total_revenue },
                Some(Meta::empty()),
            ))
        }
        None => Ok(ApiResponse::empty("No completed orders", Some(Meta::empty()))),
    }
}

pub async fn top_selling<S: OrderStore + ?Sized>(
    store: &S,
    user: &AuthUser,
) -> AppResult<ApiResponse<TopProducts>> {
    ensure_admin(user)?;
    let ranked = store.top_products(TOP_PRODUCTS_LIMIT).await?;
    tracing::debug!(products = ranked.len(), "ranked top products");
    Ok(ApiResponse::success(
        "Top products",
        TopProducts { items: ranked },
        Some(Meta::empty()),
    ))
}

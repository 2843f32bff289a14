use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::analytics::{OrdersCount, Revenue, TopProducts},
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::analytics_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/total-orders", get(total_orders))
        .route("/revenue", get(revenue))
        .route("/top-products", get(top_products))
}

#[utoipa::path(
    get,
    path = "/api/analytics/total-orders",
    responses(
        (status = 200, description = "Number of orders, any status", body = ApiResponse<OrdersCount>),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal Server Error"),
    ),
    security(("bearer_auth" = [])),
    tag = "Analytics"
)]
pub async fn total_orders(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<OrdersCount>>> {
    let resp = analytics_service::total_orders(&state.orm, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/analytics/revenue",
    responses(
        (status = 200, description = "Revenue of completed orders; data is null when none are completed", body = ApiResponse<Revenue>),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal Server Error"),
    ),
    security(("bearer_auth" = [])),
    tag = "Analytics"
)]
pub async fn revenue(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<Revenue>>> {
    let resp = analytics_service::revenue(&state.orm, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/analytics/top-products",
    responses(
        (status = 200, description = "Up to ten best selling products by units sold", body = ApiResponse<TopProducts>),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal Server Error"),
    ),
    security(("bearer_auth" = [])),
    tag = "Analytics"
)]
pub async fn top_products(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<TopProducts>>> {
    let resp = analytics_service::top_selling(&state.orm, &user).await?;
    Ok(Json(resp))
}

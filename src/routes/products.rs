use axum::{
    Json, Router,
    extract::{RawQuery, State},
    response::IntoResponse,
    routing::get,
};

use crate::{
    catalog::{client::TOTAL_COUNT_HEADER, query::QueryRequest},
    dto::products::{DimensionList, ProductList},
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products))
        .route("/dimensions", get(list_dimensions))
}

#[utoipa::path(
    get,
    path = "/api/products",
    params(
        ("category" = Option<Vec<String>>, Query, description = "Category filter, repeatable"),
        ("brand" = Option<Vec<String>>, Query, description = "Brand filter, repeatable"),
        ("_sort" = Option<String>, Query, description = "createdAt, price, discountPrice, rating or title"),
        ("_order" = Option<String>, Query, description = "asc or desc, default desc"),
        ("_page" = Option<u64>, Query, description = "Page number, default 1"),
        ("_limit" = Option<u64>, Query, description = "Items per page, default 10"),
        ("admin" = Option<bool>, Query, description = "Include deleted products (admin only)")
    ),
    responses(
        (status = 200, description = "One page of the filtered catalog; X-Total-Count carries the unpaginated count", body = ApiResponse<ProductList>),
        (status = 400, description = "Malformed query"),
        (status = 403, description = "Admin scope without admin rights"),
        (status = 500, description = "Internal Server Error"),
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    RawQuery(query): RawQuery,
) -> AppResult<impl IntoResponse> {
    let request = QueryRequest::parse(query.as_deref().unwrap_or_default())?;
    let resp = product_service::list_products(&state, user.as_ref(), request).await?;
    let total = resp.meta.as_ref().and_then(|meta| meta.total).unwrap_or(0);
    Ok(([(TOTAL_COUNT_HEADER, total.to_string())], Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/products/dimensions",
    responses(
        (status = 200, description = "Filter dimensions and their options", body = ApiResponse<DimensionList>),
        (status = 500, description = "Internal Server Error"),
    ),
    tag = "Products"
)]
pub async fn list_dimensions(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<DimensionList>>> {
    let resp = product_service::list_dimensions(&state).await?;
    Ok(Json(resp))
}

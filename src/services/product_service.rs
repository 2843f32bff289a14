use sea_orm::{
    ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::{
    catalog::{
        filter::FilterDimension,
        pagination::page_offset,
        query::{QueryRequest, SortOrder},
    },
    dto::products::{DimensionList, ProductList},
    entity::products::{Column, Entity as Products},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Product,
    response::{ApiResponse, Meta},
    routes::params::ProductSortBy,
    state::AppState,
};

pub const FILTER_DIMENSIONS: [&str; 2] = ["category", "brand"];

fn dimension_column(dimension: &str) -> Option<Column> {
    match dimension {
        "category" => Some(Column::Category),
        "brand" => Some(Column::Brand),
        _ => None,
    }
}

fn sort_column(sort_by: ProductSortBy) -> Column {
    match sort_by {
        ProductSortBy::CreatedAt => Column::CreatedAt,
        ProductSortBy::Price => Column::Price,
        ProductSortBy::DiscountPrice => Column::DiscountPrice,
        ProductSortBy::Rating => Column::Rating,
        ProductSortBy::Title => Column::Title,
    }
}

/// Answers a catalog query: one page of matching products plus the unpaginated count
/// in `meta.total`. Admin scope includes soft-deleted products.
pub async fn list_products(
    state: &AppState,
    user: Option<&AuthUser>,
    request: QueryRequest,
) -> AppResult<ApiResponse<ProductList>> {
    let mut condition = Condition::all();

    for (dimension, values) in request.filters.iter() {
        let column = dimension_column(dimension).ok_or_else(|| {
            AppError::BadRequest(format!("Unknown filter dimension: {dimension}"))
        })?;
        condition = condition.add(column.is_in(values.iter().cloned()));
    }

    if request.admin {
        match user {
            Some(user) => ensure_admin(user)?,
            None => return Err(AppError::Forbidden),
        }
    } else {
        condition = condition.add(Column::Deleted.eq(false));
    }

    let (sort_by, sort_order) = match &request.sort {
        Some(sort) => {
            let sort_by = ProductSortBy::from_field(&sort.field).ok_or_else(|| {
                AppError::BadRequest(format!("Unsupported sort field: {}", sort.field))
            })?;
            (sort_by, sort.direction)
        }
        None => (ProductSortBy::CreatedAt, SortOrder::Desc),
    };
    let sort_col = sort_column(sort_by);

    let mut finder = Products::find().filter(condition);
    finder = match sort_order {
        SortOrder::Asc => finder.order_by_asc(sort_col),
        SortOrder::Desc => finder.order_by_desc(sort_col),
    };
    // keeps page boundaries stable when the sort key ties
    finder = finder.order_by_asc(Column::Id);

    let total = finder.clone().count(&state.orm).await?;

    let page = request.page.max(1);
    let limit = request.limit.clamp(1, state.max_page_size.max(1));
    let offset = page_offset(page, limit);

    let items = finder
        .limit(limit)
        .offset(offset)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Product::from)
        .collect();

    tracing::debug!(query = %request, total, "catalog query answered");

    let meta = Meta::new(page, limit, total);
    let data = ProductList { items };
    Ok(ApiResponse::success("Products", data, Some(meta)))
}

/// Distinct option values per filter dimension across visible products.
pub async fn list_dimensions(state: &AppState) -> AppResult<ApiResponse<DimensionList>> {
    let mut dimensions = Vec::with_capacity(FILTER_DIMENSIONS.len());
    for id in FILTER_DIMENSIONS {
        let Some(column) = dimension_column(id) else {
            continue;
        };
        let values = Products::find()
            .select_only()
            .column(column)
            .distinct()
            .filter(Column::Deleted.eq(false))
            .order_by_asc(column)
            .into_tuple::<String>()
            .all(&state.orm)
            .await?;
        dimensions.push(FilterDimension::from_values(id, values));
    }

    Ok(ApiResponse::success(
        "Filter dimensions",
        DimensionList { dimensions },
        Some(Meta::empty()),
    ))
}

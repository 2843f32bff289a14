use storefront_catalog::{
    analytics::{
        AggregationError, LineItem, OrderRecord, OrderStore, ProductSales, TOP_PRODUCTS_LIMIT,
        aggregate, top_products, total_revenue,
    },
    error::{AppError, AppResult},
    middleware::auth::{ADMIN_ROLE, AuthUser, USER_ROLE},
    services::analytics_service,
};
use uuid::Uuid;

fn product(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

fn order(status: &str, total_amount: i64, items: &[(Uuid, i64)]) -> OrderRecord {
    OrderRecord {
        id: Uuid::new_v4(),
        status: status.to_string(),
        total_amount,
        items: items
            .iter()
            .map(|&(product_id, quantity)| LineItem {
                product_id,
                quantity,
            })
            .collect(),
    }
}

fn admin() -> AuthUser {
    AuthUser {
        user_id: Uuid::new_v4(),
        role: ADMIN_ROLE.into(),
    }
}

#[test]
fn top_products_sums_across_orders_and_breaks_ties_by_id() {
    let (a, b, c) = (product(1), product(2), product(3));
    let orders = vec![
        order("completed", 100, &[(a, 3), (b, 5)]),
        order("pending", 50, &[(a, 2), (c, 1)]),
    ];

    let result = aggregate(&orders).unwrap();
    assert_eq!(
        result.top_products,
        vec![
            ProductSales {
                product_id: a,
                total_sold: 5
            },
            ProductSales {
                product_id: b,
                total_sold: 5
            },
            ProductSales {
                product_id: c,
                total_sold: 1
            },
        ]
    );
    assert_eq!(result.order_count, 2);
    assert_eq!(result.total_revenue, Some(100));
}

#[test]
fn top_products_is_capped_at_ten() {
    let items = (1..=15u128).map(|n| LineItem {
        product_id: product(n),
        quantity: n as i64,
    });
    let ranked = top_products(items, 50).unwrap();
    assert_eq!(ranked.len(), TOP_PRODUCTS_LIMIT);
    assert_eq!(ranked[0].total_sold, 15);
    assert_eq!(ranked[9].total_sold, 6);

    assert!(top_products(Vec::new(), TOP_PRODUCTS_LIMIT).unwrap().is_empty());
}

#[test]
fn revenue_is_absent_without_completed_orders() {
    let orders = vec![order("pending", 200, &[]), order("cancelled", 75, &[])];
    assert_eq!(aggregate(&orders).unwrap().total_revenue, None);

    let orders = vec![
        order("completed", 200, &[]),
        order("completed", 150, &[]),
        order("pending", 999, &[]),
    ];
    assert_eq!(aggregate(&orders).unwrap().total_revenue, Some(350));

    assert_eq!(total_revenue([0]), Ok(Some(0)));
    assert_eq!(total_revenue(Vec::new()), Ok(None));
}

#[test]
fn sums_that_overflow_fail_instead_of_wrapping() {
    assert_eq!(
        total_revenue([i64::MAX, 1]),
        Err(AggregationError::Overflow { metric: "revenue" })
    );

    let items = [
        LineItem {
            product_id: product(1),
            quantity: i64::MAX,
        },
        LineItem {
            product_id: product(1),
            quantity: 1,
        },
    ];
    assert!(matches!(
        top_products(items, TOP_PRODUCTS_LIMIT),
        Err(AggregationError::Overflow { .. })
    ));

    let orders = vec![
        order("completed", i64::MAX, &[(product(1), 1)]),
        order("completed", 1, &[(product(2), 1)]),
    ];
    assert!(aggregate(&orders).is_err());
}

#[tokio::test]
async fn revenue_overflow_fails_the_metric() {
    let orders = vec![order("completed", i64::MAX, &[]), order("completed", 1, &[])];
    let resp = analytics_service::revenue(orders.as_slice(), &admin()).await;
    assert!(matches!(resp, Err(AppError::Internal(_))));

    let count = analytics_service::total_orders(orders.as_slice(), &admin()).await;
    assert_eq!(count.unwrap().data.unwrap().orders_count, 2);
}

#[test]
fn top_products_serializes_with_wire_names() {
    let sales = ProductSales {
        product_id: product(7),
        total_sold: 4,
    };
    let json = serde_json::to_value(sales).unwrap();
    assert_eq!(json["_id"], product(7).to_string());
    assert_eq!(json["totalSold"], 4);
}

#[tokio::test]
async fn endpoints_read_from_any_order_store() -> anyhow::Result<()> {
    let (a, b) = (product(1), product(2));
    let orders = vec![
        order("completed", 300, &[(a, 1), (b, 4)]),
        order("shipped", 120, &[(a, 2)]),
    ];
    let admin = admin();

    let count = analytics_service::total_orders(orders.as_slice(), &admin).await?;
    assert_eq!(count.data.unwrap().orders_count, 2);

    let revenue = analytics_service::revenue(orders.as_slice(), &admin).await?;
    assert_eq!(revenue.data.unwrap().total_revenue, 300);

    let top = analytics_service::top_selling(orders.as_slice(), &admin).await?;
    let ids: Vec<Uuid> = top.data.unwrap().items.iter().map(|p| p.product_id).collect();
    assert_eq!(ids, vec![b, a]);
    Ok(())
}

#[tokio::test]
async fn revenue_endpoint_returns_null_data_when_nothing_completed() -> anyhow::Result<()> {
    let orders = vec![order("pending", 300, &[])];
    let resp = analytics_service::revenue(orders.as_slice(), &admin()).await?;
    assert!(resp.data.is_none());
    assert_eq!(resp.message, "No completed orders");

    let json = serde_json::to_value(&resp)?;
    assert!(json["data"].is_null());
    Ok(())
}

#[tokio::test]
async fn analytics_require_admin() {
    let orders: Vec<OrderRecord> = Vec::new();
    let user = AuthUser {
        user_id: Uuid::new_v4(),
        role: USER_ROLE.into(),
    };

    let result = analytics_service::total_orders(orders.as_slice(), &user).await;
    assert!(matches!(result, Err(AppError::Forbidden)));
    let result = analytics_service::revenue(orders.as_slice(), &user).await;
    assert!(matches!(result, Err(AppError::Forbidden)));
    let result = analytics_service::top_selling(orders.as_slice(), &user).await;
    assert!(matches!(result, Err(AppError::Forbidden)));
}

/// Counts work, line items are unavailable.
struct PartialStore;

impl OrderStore for PartialStore {
    async fn count_orders(&self) -> AppResult<u64> {
        Ok(7)
    }

    async fn completed_revenue(&self) -> AppResult<Option<i64>> {
        Ok(Some(30))
    }

    async fn top_products(&self, _limit: usize) -> AppResult<Vec<ProductSales>> {
        Err(AppError::Internal(anyhow::anyhow!("order_items unavailable")))
    }
}

#[tokio::test]
async fn one_failing_metric_does_not_affect_the_others() -> anyhow::Result<()> {
    let admin = admin();

    let top = analytics_service::top_selling(&PartialStore, &admin).await;
    assert!(matches!(top, Err(AppError::Internal(_))));

    let count = analytics_service::total_orders(&PartialStore, &admin).await?;
    assert_eq!(count.data.unwrap().orders_count, 7);
    let revenue = analytics_service::revenue(&PartialStore, &admin).await?;
    assert_eq!(revenue.data.unwrap().total_revenue, 30);
    Ok(())
}

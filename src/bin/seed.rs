use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
use chrono::Duration;
use password_hash::rand_core::OsRng;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};
use storefront_catalog::{
    config::AppConfig,
    db::{OrmConn, create_orm_conn, run_migrations},
    entity::{
        order_items::ActiveModel as OrderItemActive,
        orders::{ActiveModel as OrderActive, OrderStatus},
        products::{ActiveModel as ProductActive, Column as ProductCol, Entity as Products},
        users::{ActiveModel as UserActive, Column as UserCol, Entity as Users},
        Orders,
    },
    middleware::auth::{ADMIN_ROLE, USER_ROLE, issue_token},
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;

    let admin_id = ensure_user(&orm, "admin@example.com", "admin123", ADMIN_ROLE).await?;
    let user_id = ensure_user(&orm, "user@example.com", "user123", USER_ROLE).await?;
    let products = seed_products(&orm).await?;
    seed_orders(&orm, user_id, &products).await?;

    println!("Seed completed. Admin ID: {admin_id}, User ID: {user_id}");

    if let Ok(secret) = std::env::var("JWT_SECRET") {
        let ttl = Duration::days(7);
        println!("Admin token: {}", issue_token(admin_id, ADMIN_ROLE, &secret, ttl)?);
        println!("User token: {}", issue_token(user_id, USER_ROLE, &secret, ttl)?);
    }
    Ok(())
}

async fn ensure_user(orm: &OrmConn, email: &str, password: &str, role: &str) -> anyhow::Result<Uuid> {
    if let Some(existing) = Users::find()
        .filter(UserCol::Email.eq(email))
        .one(orm)
        .await?
    {
        return Ok(existing.id);
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();

    let user = UserActive {
        id: Set(Uuid::new_v4()),
        email: Set(email.to_string()),
        name: Set(None),
        password_hash: Set(password_hash),
        role: Set(role.to_string()),
        created_at: NotSet,
    }
    .insert(orm)
    .await?;

    println!("Ensured user {email} (role={role})");
    Ok(user.id)
}

/// Returns `(product id, discount price)` for every seeded product.
async fn seed_products(orm: &OrmConn) -> anyhow::Result<Vec<(Uuid, i64)>> {
    let catalog = [
        ("Tomato Seeds", "seeds", "Green Leaf", 45, 40, 4.6, false),
        ("Chili Seeds", "seeds", "Green Leaf", 38, 38, 4.1, false),
        ("Organic Fertilizer 5kg", "fertilizer", "Agrimax", 220, 199, 4.8, false),
        ("NPK Fertilizer 2kg", "fertilizer", "Agrimax", 150, 135, 4.3, false),
        ("Neem Oil Spray", "pesticide", "BioGuard", 120, 108, 3.9, false),
        ("Copper Fungicide", "pesticide", "BioGuard", 175, 175, 4.0, false),
        ("Pruning Shears", "tools", "FarmPro", 310, 279, 4.7, false),
        ("Garden Trowel", "tools", "FarmPro", 90, 81, 4.2, false),
        ("Discontinued Sprayer", "tools", "FarmPro", 400, 360, 2.5, true),
    ];

    let mut seeded = Vec::with_capacity(catalog.len());
    for (title, category, brand, price, discount_price, rating, deleted) in catalog {
        if let Some(existing) = Products::find()
            .filter(ProductCol::Title.eq(title))
            .one(orm)
            .await?
        {
            seeded.push((existing.id, existing.discount_price));
            continue;
        }

        let product = ProductActive {
            id: Set(Uuid::new_v4()),
            title: Set(title.to_string()),
            description: Set(None),
            category: Set(category.to_string()),
            brand: Set(brand.to_string()),
            price: Set(price),
            discount_price: Set(discount_price),
            rating: Set(rating),
            stock: Set(100),
            deleted: Set(deleted),
            created_at: NotSet,
        }
        .insert(orm)
        .await?;
        seeded.push((product.id, product.discount_price));
    }

    println!("Seeded {} products", seeded.len());
    Ok(seeded)
}

async fn seed_orders(orm: &OrmConn, user_id: Uuid, products: &[(Uuid, i64)]) -> anyhow::Result<()> {
    if Orders::find().count(orm).await? > 0 {
        println!("Orders already present, skipping");
        return Ok(());
    }

    // (status, [(product index, quantity)])
    let orders: [(OrderStatus, &[(usize, i32)]); 5] = [
        (OrderStatus::Completed, &[(0, 3), (2, 1)]),
        (OrderStatus::Completed, &[(0, 2), (4, 1), (6, 1)]),
        (OrderStatus::Pending, &[(1, 5)]),
        (OrderStatus::Shipped, &[(2, 2), (3, 1)]),
        (OrderStatus::Cancelled, &[(7, 4)]),
    ];

    for (status, lines) in orders {
        let total_amount: i64 = lines
            .iter()
            .map(|(index, quantity)| products[*index].1 * i64::from(*quantity))
            .sum();

        let order = OrderActive {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            total_amount: Set(total_amount),
            status: Set(status),
            created_at: NotSet,
            updated_at: NotSet,
        }
        .insert(orm)
        .await?;

        for (index, quantity) in lines {
            let (product_id, price) = products[*index];
            OrderItemActive {
                id: Set(Uuid::new_v4()),
                order_id: Set(order.id),
                product_id: Set(product_id),
                quantity: Set(*quantity),
                unit_price: Set(price),
            }
            .insert(orm)
            .await?;
        }
    }

    println!("Seeded {} orders", orders.len());
    Ok(())
}

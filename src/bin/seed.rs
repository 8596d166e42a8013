use rust_decimal::Decimal;
use storefront_api::{
    config::AppConfig,
    db::{DbPool, create_pool, run_migrations},
    services::auth_service::hash_password,
    slug::{CATEGORY_SUFFIX_LEN, candidate_sku, candidate_slug, slugify},
};
use uuid::Uuid;

const CATEGORIES: [&str; 5] = ["Electronics", "Fashion", "Home", "Sports", "Toys"];

/// (category, name, price in cents, stock)
const PRODUCTS: [(&str, &str, i64, i32); 10] = [
    ("Electronics", "Smartphone X", 19999, 25),
    ("Electronics", "Wireless Earbuds", 4999, 80),
    ("Fashion", "Denim Jacket", 5950, 40),
    ("Fashion", "Canvas Sneakers", 3900, 60),
    ("Home", "Ceramic Mug Set", 2400, 120),
    ("Home", "Linen Throw", 3450, 35),
    ("Sports", "Yoga Mat", 2999, 75),
    ("Sports", "Trail Bottle", 1299, 150),
    ("Toys", "Wooden Blocks", 1999, 90),
    ("Toys", "Puzzle 1000", 1599, 50),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url, 2).await?;
    run_migrations(&pool).await?;

    let admin_id = ensure_user(&pool, "Admin", "admin@example.com", "admin123", true).await?;
    let user_id = ensure_user(&pool, "Customer", "user@example.com", "user123", false).await?;
    let created = seed_catalog(&pool).await?;

    println!("Seed completed. Admin ID: {admin_id}, User ID: {user_id}, products created: {created}");
    Ok(())
}

async fn ensure_user(
    pool: &DbPool,
    name: &str,
    email: &str,
    password: &str,
    is_admin: bool,
) -> anyhow::Result<Uuid> {
    let password_hash = hash_password(password)?;

    let (id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO users (id, name, email, password_hash, is_admin, email_verified_at)
        VALUES ($1, $2, $3, $4, $5, NOW())
        ON CONFLICT (email) DO UPDATE SET is_admin = EXCLUDED.is_admin
        RETURNING id
        "#,
    )
    .bind(Uuid::now_v7())
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(is_admin)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

async fn seed_catalog(pool: &DbPool) -> anyhow::Result<u64> {
    let mut category_ids = Vec::with_capacity(CATEGORIES.len());
    for name in CATEGORIES {
        let existing: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM categories WHERE name = $1")
            .bind(name)
            .fetch_optional(pool)
            .await?;
        let id = match existing {
            Some((id,)) => id,
            None => {
                let id = Uuid::now_v7();
                sqlx::query("INSERT INTO categories (id, name, slug) VALUES ($1, $2, $3)")
                    .bind(id)
                    .bind(name)
                    .bind(candidate_slug(name, CATEGORY_SUFFIX_LEN))
                    .execute(pool)
                    .await?;
                id
            }
        };
        category_ids.push((name, id));
    }

    let mut created = 0;
    for (category, name, cents, stock) in PRODUCTS {
        let category_id = category_ids
            .iter()
            .find(|(n, _)| *n == category)
            .map(|(_, id)| *id);
        let result = sqlx::query(
            r#"
            INSERT INTO products (id, category_id, name, slug, sku, description, price, stock, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, TRUE)
            ON CONFLICT (slug) DO NOTHING
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(category_id)
        .bind(name)
        .bind(slugify(name))
        .bind(candidate_sku())
        .bind(format!("<p>{name} from the {category} range.</p>"))
        .bind(Decimal::new(cents, 2))
        .bind(stock)
        .execute(pool)
        .await?;
        created += result.rows_affected();
    }

    Ok(created)
}

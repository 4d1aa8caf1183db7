use cafe_directory::{
    config::AppConfig,
    db::create_pool,
    maps,
    models::VenueKind,
    passwords,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    let cities = [
        ("sf", "San Francisco", "CA"),
        ("berk", "Berkeley", "CA"),
        ("oak", "Oakland", "CA"),
        ("la", "Los Angeles", "CA"),
        ("chinohills", "Chino Hills", "CA"),
    ];
    for (code, name, state) in cities {
        sqlx::query(
            "INSERT INTO cities (code, name, state) VALUES ($1, $2, $3) ON CONFLICT (code) DO NOTHING",
        )
        .bind(code)
        .bind(name)
        .bind(state)
        .execute(&pool)
        .await?;
    }
    println!("Seeded cities");

    let cafes = [
        (
            "Bernie's Cafe",
            "Serving locals in Noe Valley. A great place to sit and write high quality code.",
            "3966 24th St",
            "sf",
            "https://www.yelp.com/biz/bernies-san-francisco",
        ),
        (
            "Perch Coffee",
            "Hip and sleek place to get cardamom lattes when biking around Oakland.",
            "440 Grand Ave",
            "oak",
            "https://perchoffee.com",
        ),
        (
            "Tastea",
            "Boba shop that also sells fairly decent food items",
            "4711 Chino Hills Pkwy STE D",
            "chinohills",
            "https://www.yelp.com/biz/tastea-chino-hills-9",
        ),
    ];
    let mut cafe_ids = Vec::new();
    for (name, description, address, city_code, url) in cafes {
        cafe_ids.push(ensure_venue(&pool, VenueKind::Cafe, name, description, address, city_code, url).await?);
    }
    println!("Seeded cafes");

    let restaurants = [
        (
            "San Tung",
            "Famed dry fried chicken wings, handmade noodles and other Chinese eats in a no-frills setting.",
            "1031 Irving St",
            "sf",
            "https://www.yelp.com/biz/san-tung-san-francisco-2",
        ),
        (
            "Base Camp",
            "Nepali cuisine combining unique spices with California produce.",
            "2400 Folsom St",
            "sf",
            "https://www.yelp.com/biz/base-camp-san-francisco",
        ),
        (
            "Tsujita LA",
            "Buzzing, modern Japanese outpost serving ramen at lunch, plus sushi and a la carte dinners.",
            "2057 Sawtelle Blvd",
            "la",
            "https://www.yelp.com/biz/tsujita-la-artisan-noodle-los-angeles-2",
        ),
    ];
    let mut restaurant_ids = Vec::new();
    for (name, description, address, city_code, url) in restaurants {
        restaurant_ids.push(
            ensure_venue(&pool, VenueKind::Restaurant, name, description, address, city_code, url)
                .await?,
        );
    }
    println!("Seeded restaurants");

    let admin_id = ensure_user(
        &pool,
        "admin",
        "Addie",
        "MacAdmin",
        "I am the very model of the modern model administrator.",
        "admin@test.com",
        "secret",
        true,
    )
    .await?;
    let user_id = ensure_user(
        &pool,
        "test",
        "Testy",
        "MacTest",
        "I am the ultimate representative user.",
        "test@test.com",
        "secret",
        false,
    )
    .await?;
    println!("Seeded users");

    for cafe_id in cafe_ids.iter().take(2) {
        ensure_like(&pool, VenueKind::Cafe, user_id, *cafe_id).await?;
    }
    ensure_like(&pool, VenueKind::Cafe, admin_id, cafe_ids[0]).await?;
    for restaurant_id in restaurant_ids.iter().take(2) {
        ensure_like(&pool, VenueKind::Restaurant, user_id, *restaurant_id).await?;
    }
    ensure_like(&pool, VenueKind::Restaurant, admin_id, restaurant_ids[0]).await?;
    println!("Seeded likes");

    for (kind, ids) in [
        (VenueKind::Cafe, &cafe_ids),
        (VenueKind::Restaurant, &restaurant_ids),
    ] {
        for id in ids {
            save_venue_map(&pool, &config, kind, *id).await?;
        }
    }
    println!("Seed completed. Admin ID: {admin_id}, User ID: {user_id}");
    Ok(())
}

async fn ensure_venue(
    pool: &sqlx::PgPool,
    kind: VenueKind,
    name: &str,
    description: &str,
    address: &str,
    city_code: &str,
    url: &str,
) -> anyhow::Result<i32> {
    let sql = format!("SELECT id FROM {} WHERE name = $1", kind.table());
    let existing: Option<(i32,)> = sqlx::query_as(&sql).bind(name).fetch_optional(pool).await?;
    if let Some((id,)) = existing {
        return Ok(id);
    }

    let sql = format!(
        r#"
        INSERT INTO {} (name, description, url, address, city_code)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
        kind.table()
    );
    let (id,): (i32,) = sqlx::query_as(&sql)
        .bind(name)
        .bind(description)
        .bind(url)
        .bind(address)
        .bind(city_code)
        .fetch_one(pool)
        .await?;
    Ok(id)
}

#[allow(clippy::too_many_arguments)]
async fn ensure_user(
    pool: &sqlx::PgPool,
    username: &str,
    first_name: &str,
    last_name: &str,
    description: &str,
    email: &str,
    password: &str,
    admin: bool,
) -> anyhow::Result<i32> {
    let password_hash =
        passwords::hash_password(password).map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let row: Option<(i32,)> = sqlx::query_as(
        r#"
        INSERT INTO users (username, first_name, last_name, description, email, password_hash, admin)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (username) DO NOTHING
        RETURNING id
        "#,
    )
    .bind(username)
    .bind(first_name)
    .bind(last_name)
    .bind(description)
    .bind(email)
    .bind(password_hash)
    .bind(admin)
    .fetch_optional(pool)
    .await?;

    // If the user already exists, fetch its id.
    let user_id = match row {
        Some((id,)) => id,
        None => {
            let existing: (i32,) = sqlx::query_as("SELECT id FROM users WHERE username = $1")
                .bind(username)
                .fetch_one(pool)
                .await?;
            existing.0
        }
    };

    println!("Ensured user {username} (admin={admin})");
    Ok(user_id)
}

async fn ensure_like(
    pool: &sqlx::PgPool,
    kind: VenueKind,
    user_id: i32,
    venue_id: i32,
) -> anyhow::Result<()> {
    let sql = format!(
        "INSERT INTO {} (user_id, {}) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        kind.like_table(),
        kind.like_column()
    );
    sqlx::query(&sql)
        .bind(user_id)
        .bind(venue_id)
        .execute(pool)
        .await?;
    Ok(())
}

async fn save_venue_map(
    pool: &sqlx::PgPool,
    config: &AppConfig,
    kind: VenueKind,
    id: i32,
) -> anyhow::Result<()> {
    let sql = format!(
        r#"
        SELECT v.address, c.name, c.state
        FROM {} v
        JOIN cities c ON c.code = v.city_code
        WHERE v.id = $1
        "#,
        kind.table()
    );
    let (address, city, state): (String, String, String) =
        sqlx::query_as(&sql).bind(id).fetch_one(pool).await?;
    maps::save_map(config, kind, id, &address, &city, &state).await;
    Ok(())
}

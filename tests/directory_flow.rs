use cafe_directory::{
    db::{DbPool, create_pool},
    error::AppError,
    forms::{auth::SignupForm, city::CityForm, profile::ProfileEditForm, venue::VenueForm},
    models::{DEFAULT_CAFE_IMAGE, VenueKind},
    services::{
        auth_service::{self, Registration},
        city_service::{self, CityInsert},
        like_service::{self, ToggleOutcome},
        user_service::{self, ProfileUpdate},
        venue_service,
    },
};

fn signup_form(username: &str, email: &str) -> SignupForm {
    SignupForm {
        username: username.to_string(),
        first_name: "Testy".to_string(),
        last_name: "MacTest".to_string(),
        description: "Test Description.".to_string(),
        email: email.to_string(),
        password: "secret".to_string(),
        image_url: String::new(),
    }
}

fn cafe_form(name: &str, city_code: &str) -> VenueForm {
    VenueForm {
        name: name.to_string(),
        description: "Test description".to_string(),
        url: "http://testcafe.com/".to_string(),
        address: "500 Sansome St".to_string(),
        city_code: city_code.to_string(),
        image_url: "http://testcafeimg.com/".to_string(),
    }
}

async fn user_count(pool: &DbPool) -> anyhow::Result<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

// Integration flow: signup -> login checks -> admin curates a city and cafes
// -> likes toggle round trip -> profile edit -> delete cascades likes.
#[tokio::test]
async fn signup_curate_like_and_delete_flow() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(());
        }
    };

    let pool = create_pool(&database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    // Clean tables between runs
    sqlx::query(
        "TRUNCATE TABLE cafe_likes, restaurant_likes, cafes, restaurants, cities, users RESTART IDENTITY CASCADE",
    )
    .execute(&pool)
    .await?;

    // Signup stores a hash, never the plaintext password.
    let user = match auth_service::register_user(&pool, &signup_form("test", "test@test.com")).await? {
        Registration::Created(user) => user,
        Registration::Taken => panic!("fresh username should register"),
    };
    assert!(user.password_hash.starts_with("$argon2"));
    assert_ne!(user.password_hash, "secret");
    assert!(!user.admin);
    assert_eq!(user.image_url, cafe_directory::models::DEFAULT_PROFILE_IMAGE);

    // A second signup with the same username leaves the table untouched.
    let before = user_count(&pool).await?;
    assert!(matches!(
        auth_service::register_user(&pool, &signup_form("test", "other@test.com")).await?,
        Registration::Taken
    ));
    assert!(matches!(
        auth_service::register_user(&pool, &signup_form("other", "test@test.com")).await?,
        Registration::Taken
    ));
    assert_eq!(user_count(&pool).await?, before);

    // Authenticate returns the user iff the password matches.
    let authed = auth_service::authenticate(&pool, "test", "secret").await?;
    assert_eq!(authed.map(|u| u.id), Some(user.id));
    assert!(auth_service::authenticate(&pool, "test", "WRONG").await?.is_none());
    assert!(
        auth_service::authenticate(&pool, "no-such-user", "secret")
            .await?
            .is_none()
    );

    // Cities: create, then a duplicate code is rejected without a write.
    let sf = CityForm {
        code: "sf".to_string(),
        name: "San Francisco".to_string(),
        state: "CA".to_string(),
    };
    assert!(matches!(
        city_service::create(&pool, &sf).await?,
        CityInsert::Created(_)
    ));
    assert!(matches!(
        city_service::create(&pool, &sf).await?,
        CityInsert::CodeTaken
    ));
    let cities = city_service::list(&pool).await?;
    assert_eq!(cities.len(), 1);

    // Listing is name-ordered regardless of insertion order.
    let zeta = venue_service::create(&pool, VenueKind::Cafe, &cafe_form("Zeitgeist", "sf")).await?;
    let test_cafe =
        venue_service::create(&pool, VenueKind::Cafe, &cafe_form("Test Cafe", "sf")).await?;
    let names: Vec<String> = venue_service::list(&pool, VenueKind::Cafe)
        .await?
        .into_iter()
        .map(|v| v.name)
        .collect();
    assert_eq!(names, vec!["Test Cafe".to_string(), "Zeitgeist".to_string()]);

    // Detail join carries "City, ST".
    let detail = venue_service::get_with_city(&pool, VenueKind::Cafe, test_cafe.id).await?;
    assert_eq!(detail.venue.name, "Test Cafe");
    assert_eq!(detail.city_state(), "San Francisco, CA");

    // Unknown ids surface as NotFound.
    assert!(matches!(
        venue_service::get_with_city(&pool, VenueKind::Cafe, 999_999).await,
        Err(AppError::NotFound)
    ));

    // A blank image URL falls back to the per-kind placeholder.
    let mut blank_image = cafe_form("Blank Image Cafe", "sf");
    blank_image.image_url = String::new();
    let placeholder = venue_service::create(&pool, VenueKind::Cafe, &blank_image).await?;
    assert_eq!(placeholder.image_url, DEFAULT_CAFE_IMAGE);

    // Editing back to a blank image restores the placeholder as well.
    let edited = venue_service::update(&pool, VenueKind::Cafe, zeta.id, &blank_image).await?;
    assert_eq!(edited.image_url, DEFAULT_CAFE_IMAGE);
    assert_eq!(edited.name, "Blank Image Cafe");

    // Like toggle round trip: first toggle likes, second unlikes.
    assert!(!like_service::likes(&pool, VenueKind::Cafe, user.id, test_cafe.id).await?);
    assert_eq!(
        like_service::toggle(&pool, VenueKind::Cafe, user.id, test_cafe.id).await?,
        ToggleOutcome::Liked(test_cafe.id)
    );
    assert!(like_service::likes(&pool, VenueKind::Cafe, user.id, test_cafe.id).await?);
    assert_eq!(
        like_service::toggle(&pool, VenueKind::Cafe, user.id, test_cafe.id).await?,
        ToggleOutcome::Unliked(test_cafe.id)
    );
    assert!(!like_service::likes(&pool, VenueKind::Cafe, user.id, test_cafe.id).await?);

    // Toggling a like on a nonexistent cafe is an error, not an insert.
    assert!(matches!(
        like_service::toggle(&pool, VenueKind::Cafe, user.id, 999_999).await,
        Err(AppError::NotFound)
    ));

    // Restaurants run through the same machinery with their own tables.
    let restaurant =
        venue_service::create(&pool, VenueKind::Restaurant, &cafe_form("San Tung", "sf")).await?;
    assert_eq!(
        like_service::toggle(&pool, VenueKind::Restaurant, user.id, restaurant.id).await?,
        ToggleOutcome::Liked(restaurant.id)
    );
    let liked = like_service::liked_venues(&pool, VenueKind::Restaurant, user.id).await?;
    assert_eq!(liked.len(), 1);
    assert_eq!(liked[0].name, "San Tung");
    assert!(like_service::liked_venues(&pool, VenueKind::Cafe, user.id)
        .await?
        .is_empty());

    // Profile edit updates fields; a colliding email is caught, not raised.
    let edit = ProfileEditForm {
        first_name: "new-fn".to_string(),
        last_name: "new-ln".to_string(),
        description: "new-description".to_string(),
        email: "new-email@test.com".to_string(),
        image_url: String::new(),
    };
    let updated = match user_service::update_profile(&pool, user.id, &edit).await? {
        ProfileUpdate::Updated(user) => user,
        ProfileUpdate::EmailTaken => panic!("fresh email should update"),
    };
    assert_eq!(updated.full_name(), "new-fn new-ln");
    assert_eq!(updated.image_url, cafe_directory::models::DEFAULT_PROFILE_IMAGE);

    let second = match auth_service::register_user(&pool, &signup_form("second", "second@test.com"))
        .await?
    {
        Registration::Created(user) => user,
        Registration::Taken => panic!("fresh username should register"),
    };
    let steal_email = ProfileEditForm {
        email: "new-email@test.com".to_string(),
        ..edit.clone()
    };
    assert!(matches!(
        user_service::update_profile(&pool, second.id, &steal_email).await?,
        ProfileUpdate::EmailTaken
    ));

    // Deleting a venue cascades its like rows.
    like_service::toggle(&pool, VenueKind::Cafe, user.id, test_cafe.id).await?;
    venue_service::delete(&pool, VenueKind::Cafe, test_cafe.id).await?;
    let (like_rows,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM cafe_likes")
        .fetch_one(&pool)
        .await?;
    assert_eq!(like_rows, 0);
    assert!(matches!(
        venue_service::delete(&pool, VenueKind::Cafe, test_cafe.id).await,
        Err(AppError::NotFound)
    ));

    Ok(())
}

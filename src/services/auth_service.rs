use crate::{
    db::DbPool,
    error::{AppResult, is_unique_violation},
    forms::auth::SignupForm,
    models::{DEFAULT_PROFILE_IMAGE, User},
    passwords,
};

#[derive(Debug)]
pub enum Registration {
    Created(User),
    /// Username or email collided with an existing row; nothing was written.
    Taken,
}

pub async fn register_user(pool: &DbPool, form: &SignupForm) -> AppResult<Registration> {
    let password_hash = passwords::hash_password(&form.password)?;
    let image_url = if form.image_url.trim().is_empty() {
        DEFAULT_PROFILE_IMAGE
    } else {
        form.image_url.trim()
    };

    let result: Result<User, sqlx::Error> = sqlx::query_as(
        r#"
        INSERT INTO users (username, email, first_name, last_name, description, image_url, password_hash)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(form.username.trim())
    .bind(form.email.trim())
    .bind(form.first_name.trim())
    .bind(form.last_name.trim())
    .bind(form.description.trim())
    .bind(image_url)
    .bind(password_hash)
    .fetch_one(pool)
    .await;

    match result {
        Ok(user) => Ok(Registration::Created(user)),
        Err(err) if is_unique_violation(&err) => Ok(Registration::Taken),
        Err(err) => Err(err.into()),
    }
}

/// Find the user with this username whose stored hash matches `password`.
/// Unknown username and wrong password both come back as `None`.
pub async fn authenticate(pool: &DbPool, username: &str, password: &str) -> AppResult<Option<User>> {
    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await?;

    Ok(user.filter(|u| passwords::verify_password(password, &u.password_hash)))
}

use crate::{
    db::DbPool,
    error::{AppResult, is_unique_violation},
    forms::profile::ProfileEditForm,
    models::{DEFAULT_PROFILE_IMAGE, User},
};

#[derive(Debug)]
pub enum ProfileUpdate {
    Updated(User),
    /// The new email collided with another account; nothing was written.
    EmailTaken,
}

pub async fn update_profile(
    pool: &DbPool,
    user_id: i32,
    form: &ProfileEditForm,
) -> AppResult<ProfileUpdate> {
    let image_url = if form.image_url.trim().is_empty() {
        DEFAULT_PROFILE_IMAGE
    } else {
        form.image_url.trim()
    };

    let result: Result<User, sqlx::Error> = sqlx::query_as(
        r#"
        UPDATE users
        SET first_name = $2, last_name = $3, description = $4, email = $5, image_url = $6
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(form.first_name.trim())
    .bind(form.last_name.trim())
    .bind(form.description.trim())
    .bind(form.email.trim())
    .bind(image_url)
    .fetch_one(pool)
    .await;

    match result {
        Ok(user) => Ok(ProfileUpdate::Updated(user)),
        Err(err) if is_unique_violation(&err) => Ok(ProfileUpdate::EmailTaken),
        Err(err) => Err(err.into()),
    }
}

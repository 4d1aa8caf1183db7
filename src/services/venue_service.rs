use crate::{
    db::DbPool,
    error::{AppError, AppResult},
    forms::venue::VenueForm,
    models::{Venue, VenueKind, VenueWithCity},
};

pub async fn list(pool: &DbPool, kind: VenueKind) -> AppResult<Vec<Venue>> {
    let sql = format!("SELECT * FROM {} ORDER BY name", kind.table());
    let venues = sqlx::query_as::<_, Venue>(&sql).fetch_all(pool).await?;
    Ok(venues)
}

pub async fn get_with_city(pool: &DbPool, kind: VenueKind, id: i32) -> AppResult<VenueWithCity> {
    let sql = format!(
        r#"
        SELECT v.*, c.name AS city_name, c.state
        FROM {} v
        JOIN cities c ON c.code = v.city_code
        WHERE v.id = $1
        "#,
        kind.table()
    );
    let detail = sqlx::query_as::<_, VenueWithCity>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    detail.ok_or(AppError::NotFound)
}

fn image_or_default(kind: VenueKind, image_url: &str) -> &str {
    let trimmed = image_url.trim();
    if trimmed.is_empty() {
        kind.default_image()
    } else {
        trimmed
    }
}

pub async fn create(pool: &DbPool, kind: VenueKind, form: &VenueForm) -> AppResult<Venue> {
    let sql = format!(
        r#"
        INSERT INTO {} (name, description, url, address, city_code, image_url)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
        kind.table()
    );
    let venue = sqlx::query_as::<_, Venue>(&sql)
        .bind(form.name.trim())
        .bind(form.description.trim())
        .bind(form.url.trim())
        .bind(form.address.trim())
        .bind(form.city_code.trim())
        .bind(image_or_default(kind, &form.image_url))
        .fetch_one(pool)
        .await?;
    Ok(venue)
}

pub async fn update(pool: &DbPool, kind: VenueKind, id: i32, form: &VenueForm) -> AppResult<Venue> {
    let sql = format!(
        r#"
        UPDATE {}
        SET name = $2, description = $3, url = $4, address = $5, city_code = $6, image_url = $7
        WHERE id = $1
        RETURNING *
        "#,
        kind.table()
    );
    let venue = sqlx::query_as::<_, Venue>(&sql)
        .bind(id)
        .bind(form.name.trim())
        .bind(form.description.trim())
        .bind(form.url.trim())
        .bind(form.address.trim())
        .bind(form.city_code.trim())
        .bind(image_or_default(kind, &form.image_url))
        .fetch_optional(pool)
        .await?;
    venue.ok_or(AppError::NotFound)
}

/// Delete the row; like rows go with it via ON DELETE CASCADE. Returns the
/// deleted venue so callers can flash its name.
pub async fn delete(pool: &DbPool, kind: VenueKind, id: i32) -> AppResult<Venue> {
    let sql = format!("DELETE FROM {} WHERE id = $1 RETURNING *", kind.table());
    let venue = sqlx::query_as::<_, Venue>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    venue.ok_or(AppError::NotFound)
}

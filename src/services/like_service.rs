use crate::{
    db::DbPool,
    error::{AppError, AppResult},
    models::{Venue, VenueKind},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Liked(i32),
    Unliked(i32),
}

pub async fn likes(pool: &DbPool, kind: VenueKind, user_id: i32, venue_id: i32) -> AppResult<bool> {
    let sql = format!(
        "SELECT EXISTS(SELECT 1 FROM {} WHERE user_id = $1 AND {} = $2)",
        kind.like_table(),
        kind.like_column()
    );
    let (exists,): (bool,) = sqlx::query_as(&sql)
        .bind(user_id)
        .bind(venue_id)
        .fetch_one(pool)
        .await?;
    Ok(exists)
}

/// Idempotent toggle: remove the like row if present, insert it otherwise.
pub async fn toggle(
    pool: &DbPool,
    kind: VenueKind,
    user_id: i32,
    venue_id: i32,
) -> AppResult<ToggleOutcome> {
    let sql = format!("SELECT id FROM {} WHERE id = $1", kind.table());
    let venue: Option<(i32,)> = sqlx::query_as(&sql)
        .bind(venue_id)
        .fetch_optional(pool)
        .await?;
    if venue.is_none() {
        return Err(AppError::NotFound);
    }

    let sql = format!(
        "DELETE FROM {} WHERE user_id = $1 AND {} = $2",
        kind.like_table(),
        kind.like_column()
    );
    let deleted = sqlx::query(&sql)
        .bind(user_id)
        .bind(venue_id)
        .execute(pool)
        .await?;

    if deleted.rows_affected() > 0 {
        return Ok(ToggleOutcome::Unliked(venue_id));
    }

    // Concurrent double-toggle can race the insert; the conflict clause keeps
    // the (user, venue) pair unique either way.
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

    Ok(ToggleOutcome::Liked(venue_id))
}

pub async fn liked_venues(pool: &DbPool, kind: VenueKind, user_id: i32) -> AppResult<Vec<Venue>> {
    let sql = format!(
        r#"
        SELECT v.*
        FROM {} l
        JOIN {} v ON v.id = l.{}
        WHERE l.user_id = $1
        ORDER BY v.name
        "#,
        kind.like_table(),
        kind.table(),
        kind.like_column()
    );
    let venues = sqlx::query_as::<_, Venue>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await?;
    Ok(venues)
}

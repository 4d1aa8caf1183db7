use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::{AppError, AppResult},
    middleware::auth::ApiSession,
    models::VenueKind,
    services::like_service::{self, ToggleOutcome},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/likes", get(cafe_likes))
        .route("/likes-toggle", post(cafe_likes_toggle))
        .route("/restaurant-likes", get(restaurant_likes))
        .route("/restaurant-likes-toggle", post(restaurant_likes_toggle))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct LikeQuery {
    /// Id of the venue to check.
    pub q: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LikeStatus {
    pub likes: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CafeLikeToggle {
    pub cafe_id: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RestaurantLikeToggle {
    pub restaurant_id: i32,
}

async fn like_status(
    state: &AppState,
    session: &ApiSession,
    kind: VenueKind,
    venue_id: i32,
) -> AppResult<Json<LikeStatus>> {
    let liked = like_service::likes(&state.pool, kind, session.user.id, venue_id).await?;
    Ok(Json(LikeStatus {
        likes: liked.to_string(),
    }))
}

async fn like_toggle(
    state: &AppState,
    session: &ApiSession,
    kind: VenueKind,
    venue_id: i32,
) -> AppResult<Json<serde_json::Value>> {
    let outcome = like_service::toggle(&state.pool, kind, session.user.id, venue_id)
        .await
        .map_err(|err| match err {
            AppError::NotFound => AppError::ApiNotFound,
            other => other,
        })?;

    let body = match outcome {
        ToggleOutcome::Liked(id) => serde_json::json!({ "liked": id }),
        ToggleOutcome::Unliked(id) => serde_json::json!({ "unliked": id }),
    };
    Ok(Json(body))
}

#[utoipa::path(
    get,
    path = "/api/likes",
    params(LikeQuery),
    responses(
        (status = 200, description = "Whether the current user likes this cafe", body = LikeStatus),
        (status = 401, description = "Not logged in"),
    ),
    tag = "Likes"
)]
pub async fn cafe_likes(
    State(state): State<AppState>,
    session: ApiSession,
    Query(query): Query<LikeQuery>,
) -> AppResult<Json<LikeStatus>> {
    like_status(&state, &session, VenueKind::Cafe, query.q).await
}

#[utoipa::path(
    post,
    path = "/api/likes-toggle",
    request_body = CafeLikeToggle,
    responses(
        (status = 200, description = "Toggled; body is {\"liked\": id} or {\"unliked\": id}"),
        (status = 401, description = "Not logged in"),
        (status = 404, description = "No such cafe"),
    ),
    tag = "Likes"
)]
pub async fn cafe_likes_toggle(
    State(state): State<AppState>,
    session: ApiSession,
    Json(payload): Json<CafeLikeToggle>,
) -> AppResult<Json<serde_json::Value>> {
    like_toggle(&state, &session, VenueKind::Cafe, payload.cafe_id).await
}

#[utoipa::path(
    get,
    path = "/api/restaurant-likes",
    params(LikeQuery),
    responses(
        (status = 200, description = "Whether the current user likes this restaurant", body = LikeStatus),
        (status = 401, description = "Not logged in"),
    ),
    tag = "Likes"
)]
pub async fn restaurant_likes(
    State(state): State<AppState>,
    session: ApiSession,
    Query(query): Query<LikeQuery>,
) -> AppResult<Json<LikeStatus>> {
    like_status(&state, &session, VenueKind::Restaurant, query.q).await
}

#[utoipa::path(
    post,
    path = "/api/restaurant-likes-toggle",
    request_body = RestaurantLikeToggle,
    responses(
        (status = 200, description = "Toggled; body is {\"liked\": id} or {\"unliked\": id}"),
        (status = 401, description = "Not logged in"),
        (status = 404, description = "No such restaurant"),
    ),
    tag = "Likes"
)]
pub async fn restaurant_likes_toggle(
    State(state): State<AppState>,
    session: ApiSession,
    Json(payload): Json<RestaurantLikeToggle>,
) -> AppResult<Json<serde_json::Value>> {
    like_toggle(&state, &session, VenueKind::Restaurant, payload.restaurant_id).await
}

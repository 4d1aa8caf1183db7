use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::routes::{
    health,
    likes::{self, CafeLikeToggle, LikeStatus, RestaurantLikeToggle},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        likes::cafe_likes,
        likes::cafe_likes_toggle,
        likes::restaurant_likes,
        likes::restaurant_likes_toggle,
    ),
    components(schemas(health::HealthData, LikeStatus, CafeLikeToggle, RestaurantLikeToggle)),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Likes", description = "Like check/toggle endpoints (session cookie auth)"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<utoipa::openapi::OpenApi> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}

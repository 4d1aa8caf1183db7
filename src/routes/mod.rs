use axum::{Router, routing::get};

use crate::models::VenueKind;
use crate::state::AppState;

pub mod auth;
pub mod cities;
pub mod doc;
pub mod health;
pub mod home;
pub mod likes;
pub mod profile;
pub mod venues;

// Build the application router without binding state; it is provided at the
// top level.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(home::homepage))
        .merge(auth::router())
        .merge(cities::router())
        .merge(profile::router())
        .nest("/cafes", venues::router(VenueKind::Cafe))
        .nest("/restaurants", venues::router(VenueKind::Restaurant))
        .nest("/api", likes::router())
}

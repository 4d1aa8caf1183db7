use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::prelude::FromRow;

pub const DEFAULT_CAFE_IMAGE: &str = "/static/images/default-cafe.png";
pub const DEFAULT_RESTAURANT_IMAGE: &str = "/static/images/default-restaurant.png";
pub const DEFAULT_PROFILE_IMAGE: &str = "/static/images/default-prof-pic.png";

/// Cafes and restaurants share one shape; the kind picks table names, the
/// placeholder image, and the maps subdirectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VenueKind {
    Cafe,
    Restaurant,
}

impl VenueKind {
    pub fn table(self) -> &'static str {
        match self {
            VenueKind::Cafe => "cafes",
            VenueKind::Restaurant => "restaurants",
        }
    }

    pub fn like_table(self) -> &'static str {
        match self {
            VenueKind::Cafe => "cafe_likes",
            VenueKind::Restaurant => "restaurant_likes",
        }
    }

    pub fn like_column(self) -> &'static str {
        match self {
            VenueKind::Cafe => "cafe_id",
            VenueKind::Restaurant => "restaurant_id",
        }
    }

    pub fn default_image(self) -> &'static str {
        match self {
            VenueKind::Cafe => DEFAULT_CAFE_IMAGE,
            VenueKind::Restaurant => DEFAULT_RESTAURANT_IMAGE,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VenueKind::Cafe => "Cafe",
            VenueKind::Restaurant => "Restaurant",
        }
    }

    /// Lowercase plural, doubling as the URL prefix and maps subdirectory.
    pub fn plural(self) -> &'static str {
        self.table()
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct City {
    pub code: String,
    pub name: String,
    pub state: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Venue {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub url: String,
    pub address: String,
    pub city_code: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

/// A venue joined with its city row.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct VenueWithCity {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub venue: Venue,
    pub city_name: String,
    pub state: String,
}

impl VenueWithCity {
    pub fn city_state(&self) -> String {
        format!("{}, {}", self.city_name, self.state)
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub description: String,
    pub image_url: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub admin: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_venue() -> VenueWithCity {
        VenueWithCity {
            venue: Venue {
                id: 1,
                name: "Test Cafe".to_string(),
                description: "Test description".to_string(),
                url: "http://testcafe.com/".to_string(),
                address: "500 Sansome St".to_string(),
                city_code: "sf".to_string(),
                image_url: DEFAULT_CAFE_IMAGE.to_string(),
                created_at: Utc::now(),
            },
            city_name: "San Francisco".to_string(),
            state: "CA".to_string(),
        }
    }

    #[test]
    fn city_state_joins_name_and_state() {
        assert_eq!(sample_venue().city_state(), "San Francisco, CA");
    }

    #[test]
    fn full_name_joins_first_and_last() {
        let user = User {
            id: 1,
            username: "test".to_string(),
            email: "test@test.com".to_string(),
            first_name: "Testy".to_string(),
            last_name: "MacTest".to_string(),
            description: String::new(),
            image_url: DEFAULT_PROFILE_IMAGE.to_string(),
            password_hash: "hash".to_string(),
            admin: false,
            created_at: Utc::now(),
        };
        assert_eq!(user.full_name(), "Testy MacTest");
    }

    #[test]
    fn kind_selects_tables() {
        assert_eq!(VenueKind::Cafe.table(), "cafes");
        assert_eq!(VenueKind::Cafe.like_table(), "cafe_likes");
        assert_eq!(VenueKind::Restaurant.like_column(), "restaurant_id");
        assert_eq!(VenueKind::Restaurant.default_image(), DEFAULT_RESTAURANT_IMAGE);
    }
}

use serde::Deserialize;

use crate::models::VenueWithCity;
use crate::validators::FormErrors;

/// Shared add/edit form for cafes and restaurants.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct VenueForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city_code: String,
    #[serde(default)]
    pub image_url: String,
}

impl VenueForm {
    /// `city_codes` is the dynamic choice list loaded from the cities table.
    pub fn validate(&self, city_codes: &[String]) -> FormErrors {
        let mut errors = FormErrors::new();
        errors.require("name", &self.name);
        errors.max_len("name", &self.name, 50);
        errors.url("url", &self.url);
        errors.require("address", &self.address);
        errors.one_of("city_code", &self.city_code, city_codes);
        errors.url("image_url", &self.image_url);
        errors
    }

    pub fn from_venue(detail: &VenueWithCity) -> Self {
        Self {
            name: detail.venue.name.clone(),
            description: detail.venue.description.clone(),
            url: detail.venue.url.clone(),
            address: detail.venue.address.clone(),
            city_code: detail.venue.city_code.clone(),
            image_url: detail.venue.image_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes() -> Vec<String> {
        vec!["sf".to_string(), "oak".to_string()]
    }

    fn valid_form() -> VenueForm {
        VenueForm {
            name: "Test Cafe".to_string(),
            description: "Test description".to_string(),
            url: "http://testcafe.com/".to_string(),
            address: "500 Sansome St".to_string(),
            city_code: "sf".to_string(),
            image_url: "http://testcafeimg.com/".to_string(),
        }
    }

    #[test]
    fn valid_form_passes() {
        assert!(valid_form().validate(&codes()).is_empty());
    }

    #[test]
    fn name_is_required_and_capped() {
        let form = VenueForm {
            name: String::new(),
            ..valid_form()
        };
        assert!(!form.validate(&codes()).for_field("name").is_empty());

        let form = VenueForm {
            name: "x".repeat(51),
            ..valid_form()
        };
        assert!(!form.validate(&codes()).for_field("name").is_empty());
    }

    #[test]
    fn unknown_city_code_is_rejected() {
        let form = VenueForm {
            city_code: "nowhere".to_string(),
            ..valid_form()
        };
        assert!(!form.validate(&codes()).for_field("city_code").is_empty());
    }

    #[test]
    fn blank_urls_are_allowed() {
        let form = VenueForm {
            url: String::new(),
            image_url: String::new(),
            ..valid_form()
        };
        assert!(form.validate(&codes()).is_empty());
    }
}

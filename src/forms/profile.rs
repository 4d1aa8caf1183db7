use serde::Deserialize;

use crate::models::User;
use crate::validators::FormErrors;

#[derive(Debug, Default, Clone, Deserialize)]
pub struct ProfileEditForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub image_url: String,
}

impl ProfileEditForm {
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        errors.require("first_name", &self.first_name);
        errors.max_len("first_name", &self.first_name, 30);
        errors.require("last_name", &self.last_name);
        errors.max_len("last_name", &self.last_name, 30);
        errors.require("email", &self.email);
        errors.email("email", &self.email);
        errors.max_len("email", &self.email, 50);
        errors.url("image_url", &self.image_url);
        errors.max_len("image_url", &self.image_url, 255);
        errors
    }

    pub fn from_user(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            description: user.description.clone(),
            email: user.email.clone(),
            image_url: user.image_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> ProfileEditForm {
        ProfileEditForm {
            first_name: "new-fn".to_string(),
            last_name: "new-ln".to_string(),
            description: "new-description".to_string(),
            email: "new-email@test.com".to_string(),
            image_url: "http://new-image.com".to_string(),
        }
    }

    #[test]
    fn valid_edit_passes() {
        assert!(valid_form().validate().is_empty());
    }

    #[test]
    fn names_are_required() {
        let form = ProfileEditForm {
            first_name: String::new(),
            ..valid_form()
        };
        assert!(!form.validate().for_field("first_name").is_empty());
    }

    #[test]
    fn overlong_email_is_rejected() {
        let form = ProfileEditForm {
            email: format!("{}@test.com", "x".repeat(50)),
            ..valid_form()
        };
        assert!(!form.validate().for_field("email").is_empty());
    }
}

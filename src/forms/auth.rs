use serde::Deserialize;

use crate::validators::FormErrors;

#[derive(Debug, Default, Clone, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub image_url: String,
}

impl SignupForm {
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        errors.require("username", &self.username);
        errors.max_len("username", &self.username, 30);
        errors.require("first_name", &self.first_name);
        errors.max_len("first_name", &self.first_name, 30);
        errors.require("last_name", &self.last_name);
        errors.max_len("last_name", &self.last_name, 30);
        errors.require("email", &self.email);
        errors.email("email", &self.email);
        errors.max_len("email", &self.email, 50);
        errors.length_between("password", &self.password, 6, 50);
        errors.url("image_url", &self.image_url);
        errors.max_len("image_url", &self.image_url, 255);
        errors
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        errors.require("username", &self.username);
        errors.require("password", &self.password);
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_signup() -> SignupForm {
        SignupForm {
            username: "test".to_string(),
            first_name: "Testy".to_string(),
            last_name: "MacTest".to_string(),
            description: "Test Description.".to_string(),
            email: "test@test.com".to_string(),
            password: "secret".to_string(),
            image_url: String::new(),
        }
    }

    #[test]
    fn valid_signup_passes() {
        assert!(valid_signup().validate().is_empty());
    }

    #[test]
    fn short_password_is_rejected() {
        let form = SignupForm {
            password: "abc".to_string(),
            ..valid_signup()
        };
        assert_eq!(form.validate().for_field("password").len(), 1);
    }

    #[test]
    fn long_username_is_rejected() {
        let form = SignupForm {
            username: "x".repeat(31),
            ..valid_signup()
        };
        assert!(!form.validate().for_field("username").is_empty());
    }

    #[test]
    fn malformed_email_is_rejected() {
        let form = SignupForm {
            email: "not-an-email".to_string(),
            ..valid_signup()
        };
        assert!(!form.validate().for_field("email").is_empty());
    }

    #[test]
    fn optional_image_url_must_still_be_well_formed() {
        let mut form = valid_signup();
        form.image_url = "http://new-image.com".to_string();
        assert!(form.validate().is_empty());

        form.image_url = "new-image".to_string();
        assert!(!form.validate().for_field("image_url").is_empty());
    }

    #[test]
    fn login_requires_both_fields() {
        let form = LoginForm::default();
        let errors = form.validate();
        assert!(!errors.for_field("username").is_empty());
        assert!(!errors.for_field("password").is_empty());
    }
}

use serde::Deserialize;

use crate::validators::FormErrors;

#[derive(Debug, Default, Clone, Deserialize)]
pub struct CityForm {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub state: String,
}

impl CityForm {
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        errors.require("code", &self.code);
        errors.max_len("code", &self.code, 20);
        if !self.code.trim().is_empty()
            && !self
                .code
                .trim()
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            errors.push("code", "Use lowercase letters, digits, and dashes only.");
        }
        errors.require("name", &self.name);
        errors.us_state("state", &self.state);
        errors
    }
}

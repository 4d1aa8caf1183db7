//! Field-level validation shared by every form.

pub const US_STATES: [&str; 51] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DC", "DE", "FL", "GA", "HI", "IA", "ID", "IL",
    "IN", "KS", "KY", "LA", "MA", "MD", "ME", "MI", "MN", "MO", "MS", "MT", "NC", "ND", "NE",
    "NH", "NJ", "NM", "NV", "NY", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VA", "VT", "WA", "WI", "WV", "WY",
];

pub fn is_us_state(code: &str) -> bool {
    US_STATES.contains(&code)
}

pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(|c| c.is_whitespace() || !c.is_ascii()) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.len() < 3 {
        return false;
    }
    if domain.contains('@') || !domain.contains('.') {
        return false;
    }
    !domain.starts_with('.') && !domain.ends_with('.')
}

pub fn is_valid_url(value: &str) -> bool {
    let rest = match value.strip_prefix("https://") {
        Some(rest) => rest,
        None => match value.strip_prefix("http://") {
            Some(rest) => rest,
            None => return false,
        },
    };
    let host = rest.split('/').next().unwrap_or_default();
    !host.is_empty() && !host.chars().any(|c| c.is_whitespace())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct FormErrors {
    errors: Vec<FieldError>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn require(&mut self, field: &'static str, value: &str) {
        if value.trim().is_empty() {
            self.push(field, "This field is required.");
        }
    }

    pub fn max_len(&mut self, field: &'static str, value: &str, max: usize) {
        if value.chars().count() > max {
            self.push(field, format!("Must be at most {max} characters."));
        }
    }

    pub fn length_between(&mut self, field: &'static str, value: &str, min: usize, max: usize) {
        let len = value.chars().count();
        if len < min || len > max {
            self.push(field, format!("Must be between {min} and {max} characters."));
        }
    }

    pub fn email(&mut self, field: &'static str, value: &str) {
        if !value.trim().is_empty() && !is_valid_email(value.trim()) {
            self.push(field, "Not a valid email address.");
        }
    }

    /// URLs are optional fields everywhere; an empty value passes.
    pub fn url(&mut self, field: &'static str, value: &str) {
        if !value.trim().is_empty() && !is_valid_url(value.trim()) {
            self.push(field, "Not a valid URL.");
        }
    }

    pub fn us_state(&mut self, field: &'static str, value: &str) {
        if !is_us_state(value.trim()) {
            self.push(field, "Not a valid US state abbreviation.");
        }
    }

    pub fn one_of(&mut self, field: &'static str, value: &str, allowed: &[String]) {
        if !allowed.iter().any(|a| a == value) {
            self.push(field, "Not a valid choice.");
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    pub fn for_field(&self, field: &str) -> Vec<&str> {
        self.errors
            .iter()
            .filter(|e| e.field == field)
            .map(|e| e.message.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("test@example.com"));
        assert!(is_valid_email("first.last+tag@example.co.uk"));
        assert!(!is_valid_email("testexample.com"));
        assert!(!is_valid_email("te st@example.com"));
        assert!(!is_valid_email("test@.com"));
        assert!(!is_valid_email("test@example"));
        assert!(!is_valid_email("test@example.com."));
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn url_shapes() {
        assert!(is_valid_url("http://testcafe.com/"));
        assert!(is_valid_url("https://www.yelp.com/biz/bernies-san-francisco"));
        assert!(!is_valid_url("testcafe.com"));
        assert!(!is_valid_url("ftp://testcafe.com"));
        assert!(!is_valid_url("http://"));
        assert!(!is_valid_url("http://bad host.com"));
    }

    #[test]
    fn state_membership() {
        assert!(is_us_state("CA"));
        assert!(is_us_state("NY"));
        assert!(!is_us_state("XX"));
        assert!(!is_us_state("ca"));
    }

    #[test]
    fn required_and_length_checks_collect_per_field() {
        let mut errors = FormErrors::new();
        errors.require("name", "   ");
        errors.max_len("name", "x".repeat(51).as_str(), 50);
        errors.length_between("password", "abc", 6, 50);
        assert!(!errors.is_empty());
        assert_eq!(errors.for_field("name").len(), 2);
        assert_eq!(errors.for_field("password").len(), 1);
        assert!(errors.for_field("email").is_empty());
    }

    #[test]
    fn optional_url_passes_when_blank() {
        let mut errors = FormErrors::new();
        errors.url("image_url", "");
        errors.url("image_url", "   ");
        assert!(errors.is_empty());
    }
}

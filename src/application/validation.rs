//! Form validation - declarative rule tables
//!
//! Every field is checked against one uniform rule shape
//! (required / min / max / pattern / custom predicate) instead of ad hoc
//! per-field branching, so the product form and the login form share the
//! same machinery.

use crate::application::errors::ValidationError;
use once_cell::sync::Lazy;
use regex_lite::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// A value extracted from a form field
#[derive(Debug, Clone, Copy)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
}

/// One row of a validation table. `min`/`max` bound the numeric value for
/// numbers and the character count for text.
pub struct FieldRule {
    pub field: &'static str,
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub pattern: Option<&'static Lazy<Regex>>,
    pub custom: Option<fn(&FieldValue) -> Option<String>>,
}

impl FieldRule {
    fn check(&self, value: &FieldValue) -> Option<ValidationError> {
        let fail = |message: String| {
            Some(ValidationError {
                field: self.field,
                message,
            })
        };

        match value {
            FieldValue::Text(text) => {
                if text.trim().is_empty() {
                    if self.required {
                        return fail(format!("{} is required", self.field));
                    }
                    return None;
                }
                let len = text.chars().count() as f64;
                if let Some(min) = self.min {
                    if len < min {
                        return fail(format!("{} must be at least {} characters", self.field, min));
                    }
                }
                if let Some(max) = self.max {
                    if len > max {
                        return fail(format!("{} must be at most {} characters", self.field, max));
                    }
                }
                if let Some(pattern) = self.pattern {
                    if !pattern.is_match(text) {
                        return fail(format!("{} has an invalid format", self.field));
                    }
                }
            }
            FieldValue::Number(n) => {
                if let Some(min) = self.min {
                    if *n < min {
                        return fail(format!("{} must be at least {}", self.field, min));
                    }
                }
                if let Some(max) = self.max {
                    if *n > max {
                        return fail(format!("{} must be at most {}", self.field, max));
                    }
                }
            }
        }

        if let Some(custom) = self.custom {
            if let Some(message) = custom(value) {
                return fail(message);
            }
        }
        None
    }
}

/// Product form input, prior to id assignment
#[derive(Debug, Clone, Default)]
pub struct ProductDraft {
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    pub image: String,
    pub rate: f64,
    pub count: u64,
}

fn rate_step(value: &FieldValue) -> Option<String> {
    if let FieldValue::Number(rate) = value {
        let tenths = rate * 10.0;
        if (tenths - tenths.round()).abs() > 1e-6 {
            return Some("rate must be in steps of 0.1".to_string());
        }
    }
    None
}

fn password_classes(value: &FieldValue) -> Option<String> {
    if let FieldValue::Text(password) = value {
        if !password.chars().any(|c| c.is_ascii_uppercase()) {
            return Some("password needs an uppercase letter".to_string());
        }
        if !password.chars().any(|c| c.is_ascii_lowercase()) {
            return Some("password needs a lowercase letter".to_string());
        }
        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Some("password needs a digit".to_string());
        }
        if !password.chars().any(|c| !c.is_alphanumeric()) {
            return Some("password needs a special character".to_string());
        }
    }
    None
}

static PRODUCT_RULES: Lazy<Vec<FieldRule>> = Lazy::new(|| {
    vec![
        FieldRule {
            field: "title",
            required: true,
            min: None,
            max: None,
            pattern: None,
            custom: None,
        },
        FieldRule {
            field: "price",
            required: true,
            min: Some(0.0),
            max: None,
            pattern: None,
            custom: None,
        },
        FieldRule {
            field: "description",
            required: true,
            min: None,
            max: None,
            pattern: None,
            custom: None,
        },
        FieldRule {
            field: "category",
            required: true,
            min: None,
            max: None,
            pattern: None,
            custom: None,
        },
        FieldRule {
            field: "rate",
            required: false,
            min: Some(0.0),
            max: Some(5.0),
            pattern: None,
            custom: Some(rate_step),
        },
    ]
});

static CREDENTIAL_RULES: Lazy<Vec<FieldRule>> = Lazy::new(|| {
    vec![
        FieldRule {
            field: "email",
            required: true,
            min: None,
            max: None,
            pattern: Some(&EMAIL_RE),
            custom: None,
        },
        FieldRule {
            field: "password",
            required: true,
            min: Some(6.0),
            max: Some(12.0),
            pattern: None,
            custom: Some(password_classes),
        },
    ]
});

fn draft_value<'a>(draft: &'a ProductDraft, field: &str) -> FieldValue<'a> {
    match field {
        "title" => FieldValue::Text(&draft.title),
        "price" => FieldValue::Number(draft.price),
        "description" => FieldValue::Text(&draft.description),
        "category" => FieldValue::Text(&draft.category),
        "rate" => FieldValue::Number(draft.rate),
        _ => FieldValue::Text(""),
    }
}

/// Validate a product form; an empty result means the draft may be submitted
pub fn validate_product(draft: &ProductDraft) -> Vec<ValidationError> {
    PRODUCT_RULES
        .iter()
        .filter_map(|rule| rule.check(&draft_value(draft, rule.field)))
        .collect()
}

/// Validate login credentials, including the confirmation cross-check
pub fn validate_credentials(
    email: &str,
    password: &str,
    confirm: &str,
) -> Vec<ValidationError> {
    let values = [FieldValue::Text(email), FieldValue::Text(password)];
    let mut errors: Vec<ValidationError> = CREDENTIAL_RULES
        .iter()
        .zip(values.iter())
        .filter_map(|(rule, value)| rule.check(value))
        .collect();

    if password != confirm {
        errors.push(ValidationError {
            field: "confirm-password",
            message: "passwords do not match".to_string(),
        });
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> ProductDraft {
        ProductDraft {
            title: "Widget".to_string(),
            price: 9.99,
            description: "A fine widget".to_string(),
            category: "tools".to_string(),
            image: String::new(),
            rate: 4.5,
            count: 10,
        }
    }

    #[test]
    fn test_valid_draft_passes() {
        assert!(validate_product(&valid_draft()).is_empty());
    }

    #[test]
    fn test_missing_title_is_reported() {
        let mut draft = valid_draft();
        draft.title = "  ".to_string();
        let errors = validate_product(&draft);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "title");
    }

    #[test]
    fn test_negative_price_is_rejected() {
        let mut draft = valid_draft();
        draft.price = -1.0;
        assert!(validate_product(&draft).iter().any(|e| e.field == "price"));
    }

    #[test]
    fn test_rate_bounds_and_step() {
        let mut draft = valid_draft();
        draft.rate = 5.1;
        assert!(validate_product(&draft).iter().any(|e| e.field == "rate"));

        draft.rate = 4.55;
        assert!(validate_product(&draft).iter().any(|e| e.field == "rate"));

        draft.rate = 4.6;
        assert!(validate_product(&draft).is_empty());
    }

    #[test]
    fn test_email_format() {
        assert!(validate_credentials("user@example.com", "Abc123!x", "Abc123!x").is_empty());
        let errors = validate_credentials("not-an-email", "Abc123!x", "Abc123!x");
        assert!(errors.iter().any(|e| e.field == "email"));
    }

    #[test]
    fn test_password_rules() {
        // too short
        assert!(!validate_credentials("a@b.co", "Ab1!", "Ab1!").is_empty());
        // too long
        assert!(!validate_credentials("a@b.co", "Abcdefg123!!!", "Abcdefg123!!!").is_empty());
        // missing digit
        assert!(!validate_credentials("a@b.co", "Abcdef!x", "Abcdef!x").is_empty());
        // missing special character
        assert!(!validate_credentials("a@b.co", "Abcdef12", "Abcdef12").is_empty());
    }

    #[test]
    fn test_confirmation_must_match() {
        let errors = validate_credentials("a@b.co", "Abc123!x", "Abc123!y");
        assert!(errors.iter().any(|e| e.field == "confirm-password"));
    }
}

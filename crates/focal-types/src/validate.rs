use once_cell::sync::Lazy;
use regex::Regex;
use validator::{Validate, ValidationError};

static RE_EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("valid regex"));
static RE_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").expect("valid regex"));

/// Registration form. Field rules and messages match what the server enforces;
/// validation failures block submission before any request is made.
#[derive(Debug, Clone, Validate)]
pub struct RegisterInput {
    #[validate(length(min = 6, max = 24, message = "Name must be 6 to 24 characters long"))]
    pub name: String,

    #[validate(length(min = 6, max = 24, message = "Username must be 6 to 24 characters long"))]
    pub username: String,

    #[validate(regex(path = *RE_EMAIL, message = "Invalid email address"))]
    pub email: String,

    #[validate(
        regex(path = *RE_DIGITS, message = "Phone must contain only numbers"),
        length(min = 10, max = 15, message = "Phone must be 10 to 15 digits")
    )]
    pub phone: String,

    #[validate(custom(function = password_strength))]
    pub password: String,
}

/// Edit-profile form. Same name/username/phone rules as registration; the bio
/// is free-form.
#[derive(Debug, Clone, Validate)]
pub struct ProfileInput {
    #[validate(length(min = 6, max = 24, message = "Name must be 6 to 24 characters long"))]
    pub name: String,

    #[validate(length(min = 6, max = 24, message = "Username must be 6 to 24 characters long"))]
    pub username: String,

    #[validate(
        regex(path = *RE_DIGITS, message = "Phone must contain only numbers"),
        length(min = 10, max = 15, message = "Phone must be 10 to 15 digits")
    )]
    pub phone: String,

    pub bio: String,
}

#[derive(Debug, Clone, Validate)]
pub struct LoginInput {
    #[validate(regex(path = *RE_EMAIL, message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

fn password_strength(password: &str) -> Result<(), ValidationError> {
    if password.len() < 6 {
        return Err(ValidationError::new("password_length")
            .with_message("Password must be at least 6 characters long".into()));
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(ValidationError::new("password_lowercase")
            .with_message("Password must contain at least one lowercase letter".into()));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(ValidationError::new("password_uppercase")
            .with_message("Password must contain at least one uppercase letter".into()));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new("password_digit")
            .with_message("Password must contain at least one number".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_register() -> RegisterInput {
        RegisterInput {
            name: "Alice Doe".into(),
            username: "alice_doe".into(),
            email: "alice@example.com".into(),
            phone: "5551234567".into(),
            password: "Passw0rd".into(),
        }
    }

    #[test]
    fn test_valid_registration_passes() {
        assert!(valid_register().validate().is_ok());
    }

    #[test]
    fn test_short_username_rejected() {
        let mut input = valid_register();
        input.username = "abc".into();
        let errs = input.validate().unwrap_err();
        assert!(errs.field_errors().contains_key("username"));
    }

    #[test]
    fn test_bad_email_rejected() {
        let mut input = valid_register();
        input.email = "not-an-email".into();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_phone_must_be_digits() {
        let mut input = valid_register();
        input.phone = "555-123-4567".into();
        let errs = input.validate().unwrap_err();
        assert!(errs.field_errors().contains_key("phone"));
    }

    #[test]
    fn test_password_needs_uppercase_and_digit() {
        let mut input = valid_register();
        input.password = "password".into();
        assert!(input.validate().is_err());

        input.password = "Password".into();
        assert!(input.validate().is_err());

        input.password = "Passw0rd".into();
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_login_requires_password() {
        let input = LoginInput {
            email: "alice@example.com".into(),
            password: String::new(),
        };
        assert!(input.validate().is_err());
    }
}

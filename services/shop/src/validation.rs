//! Input validation utilities
//!
//! Guards that run before any store access. Each returns the message sent
//! back to the caller in the error envelope.

use regex::Regex;
use std::sync::OnceLock;

/// Validate a signup payload: presence first, then email syntax, then password policy
pub fn validate_signup(name: &str, email: &str, password: &str) -> Result<(), String> {
    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Err("Name, Email, and Password can't be empty.".to_string());
    }

    validate_email(email)?;
    validate_password(password)
}

/// Validate a profile update payload
pub fn validate_profile_update(name: &str, password: &str) -> Result<(), String> {
    if name.is_empty() || password.is_empty() {
        return Err("New Name and Password can't be empty.".to_string());
    }

    Ok(())
}

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.len() > 254 {
        return Err("Email must be at most 254 characters long".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Validate password
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters long".to_string());
    }

    if password.len() > 128 {
        return Err("Password must be at most 128 characters long".to_string());
    }

    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if !has_upper {
        return Err("Password must contain at least one uppercase letter".to_string());
    }

    if !has_lower {
        return Err("Password must contain at least one lowercase letter".to_string());
    }

    if !has_digit {
        return Err("Password must contain at least one digit".to_string());
    }

    Ok(())
}

/// Validate an order status flag, stored as 0 or 1
pub fn validate_status_flags(is_paid: i64, is_delivered: i64) -> Result<(), String> {
    let valid = |flag: i64| flag == 0 || flag == 1;
    if !valid(is_paid) || !valid(is_delivered) {
        return Err("isPaid and isDelivered must be 0 or 1.".to_string());
    }

    Ok(())
}

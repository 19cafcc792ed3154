//! # Validation Utilities
//!
//! Input validation helpers.

/// Validate that a string is not empty.
pub fn validate_not_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} is required", field_name))
    } else {
        Ok(())
    }
}

/// Validate email format.
///
/// Requires a single `@`, a non-empty local part, and a dotted domain whose
/// labels are non-empty. Whitespace anywhere is rejected.
pub fn validate_email(email: &str) -> Result<(), String> {
    let invalid = || Err("Invalid email format".to_string());

    if email.chars().any(char::is_whitespace) {
        return invalid();
    }

    let Some((local, domain)) = email.split_once('@') else {
        return invalid();
    };

    if local.is_empty() || domain.contains('@') {
        return invalid();
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return invalid();
    }

    Ok(())
}

/// Validate that a value's length in characters lies within `min..=max`.
pub fn validate_length(value: &str, min: usize, max: usize, field_name: &str) -> Result<(), String> {
    let len = value.chars().count();
    if len < min || len > max {
        Err(format!(
            "{} must be between {} and {} characters",
            field_name, min, max
        ))
    } else {
        Ok(())
    }
}

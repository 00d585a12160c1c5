//! Field checks applied before a record is stored

use super::StoreError;

pub fn required(field: &str, value: &str, max_chars: usize) -> Result<(), StoreError> {
    if value.trim().is_empty() {
        return Err(StoreError::Validation(format!("{field} is required")));
    }
    max_len(field, value, max_chars)
}

pub fn max_len(field: &str, value: &str, max_chars: usize) -> Result<(), StoreError> {
    if value.chars().count() > max_chars {
        return Err(StoreError::Validation(format!(
            "{field} must be at most {max_chars} characters"
        )));
    }
    Ok(())
}

/// Letters, digits, hyphens and underscores only
pub fn slug(value: &str) -> Result<(), StoreError> {
    let valid = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::Validation(format!("'{value}' is not a valid slug")))
    }
}

/// Loose `local@domain.tld` shape check
pub fn email(value: &str) -> Result<(), StoreError> {
    let valid = value.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty()
            && !domain.contains('@')
            && domain.contains('.')
            && !domain.starts_with('.')
            && !domain.ends_with('.')
    }) && !value.chars().any(char::is_whitespace);

    if valid {
        Ok(())
    } else {
        Err(StoreError::Validation(format!("'{value}' is not a valid email address")))
    }
}

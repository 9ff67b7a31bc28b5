use app_error::{AppError, AppResult};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Record identifier validation regex
    // Generated identifiers are UUIDs; anything outside this charset never
    // names a record and would need escaping at the store layer.
    static ref IDENTIFIER_REGEX: Regex = Regex::new(
        r"^[a-zA-Z0-9_-]{1,64}$"
    ).unwrap();
}

/// Validates a record identifier supplied by the caller
pub fn validate_identifier(id: &str) -> AppResult<()> {
    if id.trim().is_empty() {
        return Err(AppError::ValidationError(
            "Identifier cannot be empty".to_string(),
        ));
    }

    if !IDENTIFIER_REGEX.is_match(id) {
        return Err(AppError::ValidationError(
            "Identifier may only contain letters, numbers, underscores, and hyphens (max 64 characters)".to_string()
        ));
    }

    Ok(())
}

/// Validates a person name (first or last)
pub fn validate_name(field: &str, name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::ValidationError(format!(
            "{} cannot be empty",
            field
        )));
    }

    if name.trim().len() > 100 {
        return Err(AppError::ValidationError(format!(
            "{} cannot exceed 100 characters",
            field
        )));
    }

    Ok(())
}

/// Validates a blog title
pub fn validate_title(title: &str) -> AppResult<()> {
    if title.trim().is_empty() {
        return Err(AppError::ValidationError(
            "Title cannot be empty".to_string(),
        ));
    }

    if title.trim().len() > 200 {
        return Err(AppError::ValidationError(
            "Title cannot exceed 200 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validates blog content
pub fn validate_content(content: &str) -> AppResult<()> {
    if content.trim().is_empty() {
        return Err(AppError::ValidationError(
            "Content cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates a caller-supplied discriminator against the expected literal.
/// The stored value is stamped by the server either way; a mismatch here is
/// a caller error, not data.
pub fn validate_record_type(supplied: &str, expected: &str) -> AppResult<()> {
    if supplied != expected {
        return Err(AppError::ValidationError(format!(
            "Record type must be '{}', got '{}'",
            expected, supplied
        )));
    }

    Ok(())
}

/// Sanitizes a string input by trimming whitespace
pub fn sanitize_string(input: &str) -> String {
    input.trim().to_string()
}

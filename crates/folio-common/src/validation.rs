//! Input validation utilities.
//!
//! Centralized validation helpers used across API routes.

use validator::Validate;

use crate::error::FolioError;

/// Validate a request body, returning a FolioError::Validation on failure.
pub fn validate_request<T: Validate>(body: &T) -> Result<(), FolioError> {
    body.validate().map_err(|e| FolioError::Validation {
        message: format_validation_errors(e),
    })
}

/// Format validation errors into a human-readable string.
fn format_validation_errors(errors: validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for '{field}'"))
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validate a collection or category name — non-empty, no control characters.
pub fn validate_name(name: &str) -> Result<(), FolioError> {
    if name.trim().is_empty() {
        return Err(FolioError::Validation {
            message: "Name cannot be empty or whitespace only".into(),
        });
    }

    if name.chars().any(|c| c.is_control()) {
        return Err(FolioError::Validation {
            message: "Name cannot contain control characters".into(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_is_rejected() {
        assert!(validate_name("   ").is_err());
        assert!(validate_name("").is_err());
    }

    #[test]
    fn plain_names_are_accepted() {
        assert!(validate_name("3D Renders").is_ok());
        assert!(validate_name("포트폴리오").is_ok());
    }

    #[test]
    fn control_characters_are_rejected() {
        assert!(validate_name("bad\u{0000}name").is_err());
    }
}

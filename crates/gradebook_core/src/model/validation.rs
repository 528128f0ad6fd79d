//! Field validation shared by model records.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation error for model records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelValidationError {
    /// `name` is shorter or longer than the entity allows.
    NameLength {
        entity: &'static str,
        actual: usize,
        min: usize,
        max: usize,
    },
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NameLength {
                entity,
                actual,
                min,
                max,
            } => write!(
                f,
                "{entity} name must be between {min} and {max} characters, got {actual}"
            ),
        }
    }
}

impl Error for ModelValidationError {}

/// Checks `name` length in characters, not bytes.
pub(crate) fn check_name_length(
    entity: &'static str,
    name: &str,
    min: usize,
    max: usize,
) -> Result<(), ModelValidationError> {
    let actual = name.chars().count();
    if actual < min || actual > max {
        return Err(ModelValidationError::NameLength {
            entity,
            actual,
            min,
            max,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{check_name_length, ModelValidationError};

    #[test]
    fn counts_characters_instead_of_bytes() {
        // Two characters, four bytes.
        assert!(check_name_length("student", "éé", 2, 3).is_ok());
    }

    #[test]
    fn reports_bounds_on_failure() {
        let err = check_name_length("test", "x", 2, 100).unwrap_err();
        assert_eq!(
            err,
            ModelValidationError::NameLength {
                entity: "test",
                actual: 1,
                min: 2,
                max: 100,
            }
        );
        assert_eq!(
            err.to_string(),
            "test name must be between 2 and 100 characters, got 1"
        );
    }
}

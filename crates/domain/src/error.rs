use std::fmt::Display;

/// A single raw row could not be turned into a typed row.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("expected {expected} fields, found {found}")]
    Arity { expected: &'static str, found: usize },
    #[error("invalid {field}: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

impl FieldError {
    pub(crate) fn invalid(field: &'static str, err: impl Display) -> Self {
        FieldError::Invalid {
            field,
            message: err.to_string(),
        }
    }

    #[must_use]
    pub fn field(&self) -> Option<&'static str> {
        match self {
            FieldError::Arity { .. } => None,
            FieldError::Invalid { field, .. } => Some(field),
        }
    }
}

/// A malformed row inside a batch, identified by its zero-based position.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("row {index}: {source}")]
pub struct RowError {
    pub index: usize,
    #[source]
    pub source: FieldError,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Parse(#[from] serde_json::Error),
    #[error("Bodyweight fraction must be in the range 0.0 (exclusive) to 1.0 ({0})")]
    InvalidBodyweightFraction(f64),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_field_error_display() {
        assert_eq!(
            FieldError::Arity {
                expected: "3",
                found: 2
            }
            .to_string(),
            "expected 3 fields, found 2"
        );
        assert_eq!(
            FieldError::invalid("sets_chosen", "Sets must be at least 1").to_string(),
            "invalid sets_chosen: Sets must be at least 1"
        );
    }

    #[test]
    fn test_field_error_field() {
        assert_eq!(
            FieldError::invalid("weight_used", "foo").field(),
            Some("weight_used")
        );
        assert_eq!(
            FieldError::Arity {
                expected: "3",
                found: 4
            }
            .field(),
            None
        );
    }

    #[test]
    fn test_row_error_display() {
        assert_eq!(
            RowError {
                index: 4,
                source: FieldError::invalid("reps_chosen", "Reps must be an integer"),
            }
            .to_string(),
            "row 4: invalid reps_chosen: Reps must be an integer"
        );
    }

    #[test]
    fn test_config_error_from_serde_json_error() {
        let err = serde_json::from_str::<u32>("x").unwrap_err();
        assert!(matches!(ConfigError::from(err), ConfigError::Parse(_)));
    }
}

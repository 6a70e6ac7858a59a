//! Error taxonomy for store operations.
//!
//! Every failure is a deterministic function of the input and the current
//! table contents, so none of them are worth retrying. Adapters match on
//! [`StoreError::kind`] to pick a status code and render the `Display`
//! text for user-facing messages.

use thiserror::Error;

use crate::name::{MAX_NAME_LEN, MIN_NAME_LEN};

/// Convenience alias used by every store operation.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors returned by [`IngredientStore`](crate::store::IngredientStore).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The name was empty once whitespace was stripped.
    #[error("ingredient name cannot be empty")]
    NameEmpty,

    #[error("ingredient name must be at least {} characters long", MIN_NAME_LEN)]
    NameTooShort,

    #[error("ingredient name cannot exceed {} characters long", MAX_NAME_LEN)]
    NameTooLong,

    #[error("ingredient name contains one or more invalid characters")]
    NameInvalidChars,

    /// Another live record already holds the normalized name.
    #[error("ingredient name already exists")]
    NameConflict,

    #[error("ingredient not found")]
    NotFound,

    /// Unexpected failure inside the store (e.g. a poisoned lock).
    #[error("internal store error: {0}")]
    Internal(String),
}

/// Coarse category of a [`StoreError`], used by adapters for status mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Caller input failed a name rule.
    Validation,
    /// Uniqueness violation.
    Conflict,
    /// No live record matched.
    NotFound,
    /// Anything else.
    Internal,
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::NameEmpty
            | StoreError::NameTooShort
            | StoreError::NameTooLong
            | StoreError::NameInvalidChars => ErrorKind::Validation,
            StoreError::NameConflict => ErrorKind::Conflict,
            StoreError::NotFound => ErrorKind::NotFound,
            StoreError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Stable machine-readable code for wire error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::NameEmpty => "name_empty",
            StoreError::NameTooShort => "name_too_short",
            StoreError::NameTooLong => "name_too_long",
            StoreError::NameInvalidChars => "name_invalid_chars",
            StoreError::NameConflict => "name_conflict",
            StoreError::NotFound => "not_found",
            StoreError::Internal(_) => "internal",
        }
    }

    /// Whether the error message is safe to show to an end user verbatim.
    pub fn is_user_facing(&self) -> bool {
        self.kind() != ErrorKind::Internal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(StoreError::NameEmpty.kind(), ErrorKind::Validation);
        assert_eq!(StoreError::NameInvalidChars.kind(), ErrorKind::Validation);
        assert_eq!(StoreError::NameConflict.kind(), ErrorKind::Conflict);
        assert_eq!(StoreError::NotFound.kind(), ErrorKind::NotFound);
        assert_eq!(
            StoreError::Internal("boom".into()).kind(),
            ErrorKind::Internal
        );
    }

    #[test]
    fn test_messages_include_limits() {
        assert_eq!(
            StoreError::NameTooShort.to_string(),
            "ingredient name must be at least 3 characters long"
        );
        assert_eq!(
            StoreError::NameTooLong.to_string(),
            "ingredient name cannot exceed 48 characters long"
        );
    }

    #[test]
    fn test_internal_not_user_facing() {
        assert!(StoreError::NotFound.is_user_facing());
        assert!(!StoreError::Internal("lock".into()).is_user_facing());
    }
}

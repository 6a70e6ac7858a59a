//! Ingredient name normalization and validation.
//!
//! Normalization strips surrounding whitespace, collapses interior runs of
//! whitespace to a single space, and lower-cases the result. Validation is
//! applied to the normalized form, first failure wins:
//!
//! 1. empty → [`StoreError::NameEmpty`]
//! 2. fewer than [`MIN_NAME_LEN`] characters → [`StoreError::NameTooShort`]
//! 3. more than [`MAX_NAME_LEN`] characters → [`StoreError::NameTooLong`]
//! 4. any character outside ASCII letters/digits, space, `'`, `-` and the
//!    Latin-1 range `À..=ÿ` → [`StoreError::NameInvalidChars`]
//!
//! Lengths count characters, not bytes, so `"pimentón"` is 8 long.

use crate::error::{Result, StoreError};

pub const MIN_NAME_LEN: usize = 3;
pub const MAX_NAME_LEN: usize = 48;

/// Normalize a raw name. Idempotent.
pub fn normalize(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Normalize a search query: trim and lower-case only.
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Normalize `raw` and check it against the name rules.
///
/// Returns the normalized name on success.
pub fn validate(raw: &str) -> Result<String> {
    let name = normalize(raw);

    if name.is_empty() {
        return Err(StoreError::NameEmpty);
    }

    let len = name.chars().count();
    if len < MIN_NAME_LEN {
        return Err(StoreError::NameTooShort);
    }
    if len > MAX_NAME_LEN {
        return Err(StoreError::NameTooLong);
    }

    if !name.chars().all(is_allowed_char) {
        return Err(StoreError::NameInvalidChars);
    }

    Ok(name)
}

fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, ' ' | '\'' | '-' | 'À'..='ÿ')
}

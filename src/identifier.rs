//! Optional identifier pre-check.
//!
//! The platform documents identifiers as at most 32 bytes of ASCII letters, digits,
//! underscores and hyphens. Issuing does not enforce this; callers that want the
//! check run it first.

use thiserror::Error;

/// Longest identifier the platform documents.
pub const MAX_IDENTIFIER_LEN: usize = 32;

/// Ways an identifier can break the documented rules.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentifierError {
    /// No characters at all.
    #[error("identifier must not be empty")]
    Empty,

    /// Longer than [`MAX_IDENTIFIER_LEN`] bytes.
    #[error("identifier is {0} bytes long, the limit is {max}", max = MAX_IDENTIFIER_LEN)]
    TooLong(usize),

    /// A character outside letters, digits, `_` and `-`.
    #[error("identifier contains {0:?}; only letters, digits, '_' and '-' are allowed")]
    InvalidCharacter(char),
}

/// Check `identifier` against the documented identifier rules.
///
/// # Errors
///
/// Returns the first rule the identifier breaks.
pub fn validate_identifier(identifier: &str) -> Result<(), IdentifierError> {
    if identifier.is_empty() {
        return Err(IdentifierError::Empty);
    }

    if identifier.len() > MAX_IDENTIFIER_LEN {
        return Err(IdentifierError::TooLong(identifier.len()));
    }

    match identifier
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
    {
        Some(c) => Err(IdentifierError::InvalidCharacter(c)),
        None => Ok(()),
    }
}

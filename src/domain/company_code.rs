//! CompanyCode value object.

use super::errors::ValidationError;
use std::fmt;

/// A human-entered organization code, trimmed of surrounding whitespace.
///
/// Codes are opaque. Comparison is exact first and case-insensitive as a
/// fallback; this type only carries the normalized input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompanyCode(String);

impl CompanyCode {
    /// Create a CompanyCode from raw user input.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyCode` if the input is empty or whitespace only.
    pub fn new(code: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = code.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyCode);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Byte-for-byte comparison against a stored code.
    pub fn matches_exact(&self, other: &str) -> bool {
        self.0 == other
    }

    /// Lower-cased comparison against a stored code.
    pub fn matches_ignore_case(&self, other: &str) -> bool {
        self.0.to_lowercase() == other.to_lowercase()
    }
}

impl fmt::Display for CompanyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

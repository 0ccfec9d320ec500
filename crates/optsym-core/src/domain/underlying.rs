use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Longest option root accepted by any symbol format.
pub const MAX_UNDERLYING_LEN: usize = 6;

/// Uppercase ticker of the contract's underlying, 1-6 ASCII alphanumerics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Underlying(String);

impl Underlying {
    /// Parse and normalize a ticker to uppercase.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let normalized = input.trim().to_ascii_uppercase();
        Self::parse_canonical(&normalized)
    }

    /// Parse a ticker that must already be in canonical form (no surrounding
    /// whitespace, uppercase).
    pub fn parse_canonical(input: &str) -> Result<Self, ValidationError> {
        if input.is_empty() {
            return Err(ValidationError::EmptyUnderlying);
        }

        let len = input.chars().count();
        if len > MAX_UNDERLYING_LEN {
            return Err(ValidationError::UnderlyingTooLong {
                len,
                max: MAX_UNDERLYING_LEN,
            });
        }

        for (index, ch) in input.chars().enumerate() {
            let valid = ch.is_ascii_uppercase() || ch.is_ascii_digit();
            if !valid {
                return Err(ValidationError::UnderlyingInvalidChar { ch, index });
            }
        }

        Ok(Self(input.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for Underlying {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Underlying {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Underlying {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Underlying> for String {
    fn from(value: Underlying) -> Self {
        value.0
    }
}

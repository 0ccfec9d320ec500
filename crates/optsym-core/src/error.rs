use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Named field of an option contract or of its symbol text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolField {
    /// The symbol text as a whole (length, encoding).
    Symbol,
    Underlying,
    Separator,
    Expiration,
    Year,
    Month,
    Day,
    Right,
    Strike,
}

impl SymbolField {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Symbol => "symbol",
            Self::Underlying => "underlying",
            Self::Separator => "separator",
            Self::Expiration => "expiration",
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Right => "right",
            Self::Strike => "strike",
        }
    }
}

impl Display for SymbolField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-level validation errors exposed by `optsym-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("underlying cannot be empty")]
    EmptyUnderlying,
    #[error("underlying length {len} exceeds max {max}")]
    UnderlyingTooLong { len: usize, max: usize },
    #[error("underlying contains invalid character '{ch}' at index {index}")]
    UnderlyingInvalidChar { ch: char, index: usize },

    #[error("expiration must be an ISO YYYY-MM-DD date: '{value}'")]
    InvalidDate { value: String },
    #[error("year {year} is outside the supported range {min}..={max}")]
    YearOutOfRange { year: i32, min: i32, max: i32 },
    #[error("month {month} must be within 1..=12")]
    MonthOutOfRange { month: u8 },
    #[error("day {day} is not valid for {year:04}-{month:02} (max {max})")]
    DayOutOfRange {
        day: u8,
        month: u8,
        year: i32,
        max: u8,
    },

    #[error("invalid option right '{value}', expected call or put")]
    InvalidOptionRight { value: String },

    #[error("strike must be finite")]
    NonFiniteStrike,
    #[error("strike {value} is outside the representable decimal range")]
    StrikeOutOfRange { value: String },
    #[error("strike must be non-negative")]
    NegativeStrike,
    #[error("strike '{value}' is not a decimal number")]
    InvalidStrike { value: String },
    #[error("strike has {scale} fractional digits, format carries at most {max}")]
    StrikeTooPrecise { scale: u32, max: u32 },
    #[error("strike {value} does not fit in {digits} integer digits")]
    StrikeTooLarge { value: String, digits: u32 },
}

impl ValidationError {
    /// The contract field this violation belongs to.
    pub const fn field(&self) -> SymbolField {
        match self {
            Self::EmptyUnderlying
            | Self::UnderlyingTooLong { .. }
            | Self::UnderlyingInvalidChar { .. } => SymbolField::Underlying,
            Self::InvalidDate { .. } => SymbolField::Expiration,
            Self::YearOutOfRange { .. } => SymbolField::Year,
            Self::MonthOutOfRange { .. } => SymbolField::Month,
            Self::DayOutOfRange { .. } => SymbolField::Day,
            Self::InvalidOptionRight { .. } => SymbolField::Right,
            Self::NonFiniteStrike
            | Self::NegativeStrike
            | Self::StrikeOutOfRange { .. }
            | Self::InvalidStrike { .. }
            | Self::StrikeTooPrecise { .. }
            | Self::StrikeTooLarge { .. } => SymbolField::Strike,
        }
    }
}

/// Codec error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodecErrorKind {
    /// Encode-time: the descriptor violates a contract invariant.
    InvalidDescriptor,
    /// Decode/validate-time: the text does not conform to the grammar.
    InvalidSymbol,
}

/// Structured codec error.
///
/// `details` maps the offending field name to a description of the violated
/// constraint; `position` is the byte offset of that field in the symbol text
/// when the error came from parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecError {
    kind: CodecErrorKind,
    field: SymbolField,
    message: String,
    details: BTreeMap<String, String>,
    position: Option<usize>,
}

impl CodecError {
    pub fn invalid_descriptor(error: &ValidationError) -> Self {
        let field = error.field();
        let description = error.to_string();
        Self {
            kind: CodecErrorKind::InvalidDescriptor,
            field,
            message: format!("invalid {field}: {description}"),
            details: BTreeMap::from([(field.as_str().to_owned(), description)]),
            position: None,
        }
    }

    pub fn invalid_symbol(
        field: SymbolField,
        position: usize,
        description: impl Into<String>,
    ) -> Self {
        let description = description.into();
        Self {
            kind: CodecErrorKind::InvalidSymbol,
            field,
            message: format!("invalid {field} at position {position}: {description}"),
            details: BTreeMap::from([(field.as_str().to_owned(), description)]),
            position: Some(position),
        }
    }

    /// Reclassifies a field violation found while parsing symbol text.
    pub fn from_validation_at(error: &ValidationError, position: usize) -> Self {
        Self::invalid_symbol(error.field(), position, error.to_string())
    }

    pub const fn kind(&self) -> CodecErrorKind {
        self.kind
    }

    pub const fn field(&self) -> SymbolField {
        self.field
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> &BTreeMap<String, String> {
        &self.details
    }

    pub const fn position(&self) -> Option<usize> {
        self.position
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            CodecErrorKind::InvalidDescriptor => "codec.invalid_descriptor",
            CodecErrorKind::InvalidSymbol => "codec.invalid_symbol",
        }
    }
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for CodecError {}

impl From<ValidationError> for CodecError {
    fn from(value: ValidationError) -> Self {
        Self::invalid_descriptor(&value)
    }
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read '{path}'")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),

    #[error("invalid symbol format: {reason}")]
    InvalidFormat { reason: String },
}

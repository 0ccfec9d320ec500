use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;

use crate::CodecError;

pub const SCHEMA_VERSION: &str = "v1.0.0";

/// Standard response envelope for all `optsym` machine-readable outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub meta: EnvelopeMeta,
    pub data: T,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<EnvelopeError>,
}

impl<T> Envelope<T> {
    pub fn success(meta: EnvelopeMeta, data: T) -> Self {
        Self {
            meta,
            data,
            errors: Vec::new(),
        }
    }

    pub fn with_errors(
        meta: EnvelopeMeta,
        data: T,
        errors: Vec<EnvelopeError>,
    ) -> Result<Self, EnvelopeValidationError> {
        meta.validate_schema_compliance()?;
        for error in &errors {
            error.validate()?;
        }

        Ok(Self { meta, data, errors })
    }

    pub fn push_error(&mut self, error: EnvelopeError) -> Result<(), EnvelopeValidationError> {
        error.validate()?;
        self.errors.push(error);
        Ok(())
    }
}

/// Metadata attached to every envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeMeta {
    pub request_id: String,
    pub schema_version: String,
    #[serde(with = "time::serde::rfc3339")]
    pub generated_at: OffsetDateTime,
    /// Name of the symbol format the command ran with.
    pub symbol_format: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl EnvelopeMeta {
    pub fn new(
        request_id: impl Into<String>,
        schema_version: impl Into<String>,
        symbol_format: impl Into<String>,
    ) -> Result<Self, EnvelopeValidationError> {
        let meta = Self {
            request_id: request_id.into(),
            schema_version: schema_version.into(),
            generated_at: OffsetDateTime::now_utc(),
            symbol_format: symbol_format.into(),
            warnings: Vec::new(),
        };
        meta.validate_schema_compliance()?;
        Ok(meta)
    }

    pub fn push_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    pub fn validate_schema_compliance(&self) -> Result<(), EnvelopeValidationError> {
        if self.request_id.trim().len() < 8 {
            return Err(EnvelopeValidationError::InvalidRequestId);
        }

        if !is_valid_schema_version(&self.schema_version) {
            return Err(EnvelopeValidationError::InvalidSchemaVersion {
                value: self.schema_version.clone(),
            });
        }

        if self.symbol_format.trim().is_empty() {
            return Err(EnvelopeValidationError::EmptySymbolFormat);
        }

        Ok(())
    }
}

/// Structured error payload for partial or failed responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeError {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub details: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
    /// The input the error refers to, e.g. the rejected symbol text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
}

impl EnvelopeError {
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<Self, EnvelopeValidationError> {
        let error = Self {
            code: code.into(),
            message: message.into(),
            details: BTreeMap::new(),
            position: None,
            input: None,
        };
        error.validate()?;
        Ok(error)
    }

    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self
    }

    pub fn validate(&self) -> Result<(), EnvelopeValidationError> {
        if self.code.trim().is_empty() {
            return Err(EnvelopeValidationError::EmptyErrorCode);
        }

        if self.message.trim().is_empty() {
            return Err(EnvelopeValidationError::EmptyErrorMessage);
        }

        Ok(())
    }
}

impl From<&CodecError> for EnvelopeError {
    fn from(value: &CodecError) -> Self {
        Self {
            code: value.code().to_owned(),
            message: value.message().to_owned(),
            details: value.details().clone(),
            position: value.position(),
            input: None,
        }
    }
}

/// Envelope contract violations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnvelopeValidationError {
    #[error("request_id must be at least 8 characters")]
    InvalidRequestId,
    #[error("schema_version must match vMAJOR.MINOR.PATCH: '{value}'")]
    InvalidSchemaVersion { value: String },
    #[error("symbol_format cannot be empty")]
    EmptySymbolFormat,
    #[error("error code cannot be empty")]
    EmptyErrorCode,
    #[error("error message cannot be empty")]
    EmptyErrorMessage,
}

fn is_valid_schema_version(value: &str) -> bool {
    let Some(version) = value.strip_prefix('v') else {
        return false;
    };

    let mut parts = version.split('.');
    let major = parts.next();
    let minor = parts.next();
    let patch = parts.next();

    if parts.next().is_some() {
        return false;
    }

    [major, minor, patch].iter().all(|part| {
        part.is_some_and(|segment| {
            !segment.is_empty() && segment.chars().all(|ch| ch.is_ascii_digit())
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SymbolField;

    #[test]
    fn validates_meta() {
        let meta = EnvelopeMeta::new("request-12345", SCHEMA_VERSION, "occ-compact")
            .expect("meta should be valid");

        assert_eq!(meta.schema_version, "v1.0.0");
    }

    #[test]
    fn rejects_bad_schema_version() {
        let err = EnvelopeMeta::new("request-12345", "1.0.0", "occ-compact").expect_err("must fail");
        assert!(matches!(
            err,
            EnvelopeValidationError::InvalidSchemaVersion { .. }
        ));
    }

    #[test]
    fn rejects_short_request_id() {
        let err = EnvelopeMeta::new("abc", SCHEMA_VERSION, "occ-compact").expect_err("must fail");
        assert_eq!(err, EnvelopeValidationError::InvalidRequestId);
    }

    #[test]
    fn rejects_empty_error_code() {
        let err = EnvelopeError::new("", "message").expect_err("must fail");
        assert_eq!(err, EnvelopeValidationError::EmptyErrorCode);
    }

    #[test]
    fn carries_codec_error_details() {
        let codec_error = CodecError::invalid_symbol(SymbolField::Day, 7, "day 30 is not valid");
        let error = EnvelopeError::from(&codec_error).with_input("XYZ220230C00050000");

        assert_eq!(error.code, "codec.invalid_symbol");
        assert_eq!(error.position, Some(7));
        assert_eq!(error.details["day"], "day 30 is not valid");
        assert_eq!(error.input.as_deref(), Some("XYZ220230C00050000"));
    }
}

//! Option symbol encoding, decoding and validation.
//!
//! All operations are pure functions of the configured [`SymbolFormat`] and
//! their input; an [`OptionSymbolCodec`] holds no other state and can be
//! shared freely across threads.
//!
//! ```rust
//! use std::str::FromStr;
//!
//! use optsym_core::{OptionContractDescriptor, OptionSymbolCodec, Strike};
//!
//! let codec = OptionSymbolCodec::default();
//! let strike = Strike::from_str("50.00").unwrap();
//! let descriptor = OptionContractDescriptor::from_parts("XYZ", 1, 21, 2022, true, strike).unwrap();
//!
//! let symbol = codec.encode(&descriptor).unwrap();
//! assert_eq!(symbol.as_str(), "XYZ220121C00050000");
//! assert_eq!(codec.decode(symbol.as_str()).unwrap(), descriptor);
//! ```

use std::fmt::{Display, Formatter};

use serde::{Serialize, Serializer};
use tracing::debug;

use crate::format::DateComponent;
use crate::{
    CodecError, ConfigError, Expiration, OptionContractDescriptor, Strike, SymbolField,
    SymbolFormat, Underlying, ValidationError,
};

/// Canonical text of an option contract under some [`SymbolFormat`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OptionSymbol(String);

impl OptionSymbol {
    /// Validates foreign symbol text with `codec` and wraps it.
    pub fn parse(text: &str, codec: &OptionSymbolCodec) -> Result<Self, CodecError> {
        codec.validate(text)?;
        Ok(Self(text.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for OptionSymbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for OptionSymbol {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Serialize for OptionSymbol {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl From<OptionSymbol> for String {
    fn from(value: OptionSymbol) -> Self {
        value.0
    }
}

/// Encoder/decoder for one pinned [`SymbolFormat`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSymbolCodec {
    format: SymbolFormat,
}

impl Default for OptionSymbolCodec {
    fn default() -> Self {
        Self {
            format: SymbolFormat::occ_compact(),
        }
    }
}

impl OptionSymbolCodec {
    pub fn new(format: SymbolFormat) -> Result<Self, ConfigError> {
        format.validate()?;
        Ok(Self { format })
    }

    pub fn format(&self) -> &SymbolFormat {
        &self.format
    }

    /// Formats `descriptor` into its canonical symbol.
    ///
    /// Fails with [`crate::CodecErrorKind::InvalidDescriptor`] when the
    /// descriptor does not fit this format: an underlying longer than the
    /// format allows, a year outside its century window, or a strike with too
    /// many fractional or integer digits.
    pub fn encode(
        &self,
        descriptor: &OptionContractDescriptor,
    ) -> Result<OptionSymbol, CodecError> {
        let result = self.encode_fields(descriptor);
        match &result {
            Ok(symbol) => debug!(symbol = %symbol, "encoded option symbol"),
            Err(error) => debug!(
                code = error.code(),
                field = error.field().as_str(),
                "rejected option descriptor"
            ),
        }
        result
    }

    fn encode_fields(
        &self,
        descriptor: &OptionContractDescriptor,
    ) -> Result<OptionSymbol, CodecError> {
        let format = &self.format;
        let underlying = descriptor.underlying.as_str();

        if underlying.len() > format.underlying_max_len {
            return Err(CodecError::invalid_descriptor(
                &ValidationError::UnderlyingTooLong {
                    len: underlying.len(),
                    max: format.underlying_max_len,
                },
            ));
        }

        let (min_year, max_year) = format.year_range();
        let year = descriptor.expiration.year();
        if !(min_year..=max_year).contains(&year) {
            return Err(CodecError::invalid_descriptor(
                &ValidationError::YearOutOfRange {
                    year,
                    min: min_year,
                    max: max_year,
                },
            ));
        }

        let strike = self.strike_units(descriptor.strike)?;

        let mut text = String::with_capacity(format.max_len());
        text.push_str(underlying);
        if let Some(pad) = format.underlying_pad {
            for _ in underlying.len()..format.underlying_max_len {
                text.push(pad);
            }
        }
        if let Some(separator) = format.separator {
            text.push(separator);
        }

        for component in format.date_order.components() {
            let value = match component {
                DateComponent::Year => year - min_year,
                DateComponent::Month => i32::from(descriptor.expiration.month()),
                DateComponent::Day => i32::from(descriptor.expiration.day()),
            };
            text.push_str(&format!("{value:02}"));
        }

        text.push(format.marker_for(descriptor.right));
        text.push_str(&format!("{strike:0width$}", width = format.strike_width()));

        Ok(OptionSymbol(text))
    }

    fn strike_units(&self, strike: Strike) -> Result<u64, CodecError> {
        let format = &self.format;
        let scale = format.strike_fraction_digits;

        if strike.scale() > scale {
            return Err(CodecError::invalid_descriptor(
                &ValidationError::StrikeTooPrecise {
                    scale: strike.scale(),
                    max: scale,
                },
            ));
        }

        let too_large = || {
            CodecError::invalid_descriptor(&ValidationError::StrikeTooLarge {
                value: strike.to_string(),
                digits: format.strike_integer_digits,
            })
        };
        let units = strike.to_scaled(scale).ok_or_else(too_large)?;
        if units > format.max_strike_units() {
            return Err(too_large());
        }

        Ok(units)
    }

    /// Checks that `text` is a well-formed symbol under this format.
    pub fn validate(&self, text: &str) -> Result<(), CodecError> {
        self.decode(text).map(|_| ())
    }

    /// Parses `text` back into the descriptor it encodes.
    ///
    /// The whole string must conform; the first violation found, scanning
    /// from the left, is reported together with its byte offset.
    pub fn decode(&self, text: &str) -> Result<OptionContractDescriptor, CodecError> {
        let result = self.decode_fields(text);
        if let Err(error) = &result {
            debug!(
                code = error.code(),
                field = error.field().as_str(),
                position = error.position(),
                "rejected option symbol"
            );
        }
        result
    }

    fn decode_fields(&self, text: &str) -> Result<OptionContractDescriptor, CodecError> {
        let format = &self.format;

        if let Some((index, ch)) = text.char_indices().find(|(_, ch)| !ch.is_ascii()) {
            return Err(CodecError::invalid_symbol(
                SymbolField::Symbol,
                index,
                format!("expected ASCII text, found '{ch}'"),
            ));
        }

        let len = text.len();
        if len < format.min_len() || len > format.max_len() {
            let expected = if format.min_len() == format.max_len() {
                format.min_len().to_string()
            } else {
                format!("{}..={}", format.min_len(), format.max_len())
            };
            return Err(CodecError::invalid_symbol(
                SymbolField::Symbol,
                0,
                format!("expected length {expected}, found {len}"),
            ));
        }

        let root_end = len - format.suffix_width();
        let underlying = self.decode_underlying(&text[..root_end])?;

        let mut cursor = root_end;
        if let Some(separator) = format.separator {
            let found = char::from(text.as_bytes()[cursor]);
            if found != separator {
                return Err(CodecError::invalid_symbol(
                    SymbolField::Separator,
                    cursor,
                    format!("expected '{separator}', found '{found}'"),
                ));
            }
            cursor += 1;
        }

        let date_start = cursor;
        let width = format.date_field_width();
        let mut year = 0;
        let mut month = 0;
        let mut day = 0;
        for component in format.date_order.components() {
            let field = component.field();
            let value = parse_digits(&text[cursor..cursor + width], field, cursor)?;
            let value = u8::try_from(value).map_err(|_| {
                CodecError::invalid_symbol(field, cursor, format!("{value} is out of range"))
            })?;
            match component {
                DateComponent::Year => year = value,
                DateComponent::Month => month = value,
                DateComponent::Day => day = value,
            }
            cursor += width;
        }

        let expiration =
            Expiration::new(format.century + i32::from(year), month, day).map_err(|error| {
                let offset = format
                    .date_order
                    .components()
                    .iter()
                    .position(|component| component.field() == error.field())
                    .unwrap_or(0);
                CodecError::from_validation_at(&error, date_start + offset * width)
            })?;

        let marker = char::from(text.as_bytes()[cursor]);
        let right = format.right_for(marker).ok_or_else(|| {
            CodecError::invalid_symbol(
                SymbolField::Right,
                cursor,
                format!(
                    "expected '{}' or '{}', found '{marker}'",
                    format.call_marker, format.put_marker
                ),
            )
        })?;
        cursor += 1;

        let units = parse_digits(&text[cursor..], SymbolField::Strike, cursor)?;
        let strike = Strike::from_scaled(units, format.strike_fraction_digits)
            .map_err(|error| CodecError::from_validation_at(&error, cursor))?;

        Ok(OptionContractDescriptor::new(
            underlying, expiration, right, strike,
        ))
    }

    fn decode_underlying(&self, root: &str) -> Result<Underlying, CodecError> {
        let format = &self.format;
        let ticker = match format.underlying_pad {
            Some(pad) => root.trim_end_matches(pad),
            None => root,
        };

        if ticker.is_empty() {
            return Err(CodecError::from_validation_at(
                &ValidationError::EmptyUnderlying,
                0,
            ));
        }

        if ticker.len() > format.underlying_max_len {
            return Err(CodecError::from_validation_at(
                &ValidationError::UnderlyingTooLong {
                    len: ticker.len(),
                    max: format.underlying_max_len,
                },
                0,
            ));
        }

        Underlying::parse_canonical(ticker).map_err(|error| {
            let position = match &error {
                ValidationError::UnderlyingInvalidChar { index, .. } => *index,
                _ => 0,
            };
            CodecError::from_validation_at(&error, position)
        })
    }
}

/// Parses an all-digit field; signs, spaces and other characters are rejected.
fn parse_digits(slice: &str, field: SymbolField, position: usize) -> Result<u64, CodecError> {
    if let Some(index) = slice.bytes().position(|byte| !byte.is_ascii_digit()) {
        return Err(CodecError::invalid_symbol(
            field,
            position + index,
            format!("expected {} digits, found '{slice}'", slice.len()),
        ));
    }

    slice.parse::<u64>().map_err(|_| {
        CodecError::invalid_symbol(
            field,
            position,
            format!("'{slice}' does not fit in an unsigned integer"),
        )
    })
}

/// Builds a symbol in the default format from the raw fields of a brokerage
/// call, converting a binary-float strike to an exact decimal.
pub fn build_option_symbol(
    underlying: &str,
    month: u8,
    day: u8,
    year: i32,
    is_call: bool,
    strike: f64,
) -> Result<OptionSymbol, CodecError> {
    let strike = Strike::from_f64(strike)?;
    let descriptor =
        OptionContractDescriptor::from_parts(underlying, month, day, year, is_call, strike)?;
    OptionSymbolCodec::default().encode(&descriptor)
}

/// Validates `symbol` against the default format.
pub fn check_option_symbol(symbol: &str) -> Result<(), CodecError> {
    OptionSymbolCodec::default().validate(symbol)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::{CodecErrorKind, DateOrder, OptionRight};

    fn descriptor(
        underlying: &str,
        year: i32,
        month: u8,
        day: u8,
        call: bool,
        strike: &str,
    ) -> OptionContractDescriptor {
        OptionContractDescriptor::from_parts(
            underlying,
            month,
            day,
            year,
            call,
            Strike::from_str(strike).expect("valid strike"),
        )
        .expect("valid descriptor")
    }

    #[test]
    fn encodes_reference_contract() {
        let codec = OptionSymbolCodec::default();
        let symbol = codec
            .encode(&descriptor("XYZ", 2022, 1, 21, true, "50.00"))
            .expect("must encode");
        assert_eq!(symbol.as_str(), "XYZ220121C00050000");
    }

    #[test]
    fn encodes_fractional_put() {
        let codec = OptionSymbolCodec::default();
        let symbol = codec
            .encode(&descriptor("SPY", 2024, 3, 15, false, "412.125"))
            .expect("must encode");
        assert_eq!(symbol.as_str(), "SPY240315P00412125");
    }

    #[test]
    fn decodes_reference_contract() {
        let codec = OptionSymbolCodec::default();
        let decoded = codec.decode("XYZ220121C00050000").expect("must decode");
        assert_eq!(decoded, descriptor("XYZ", 2022, 1, 21, true, "50"));
        assert_eq!(decoded.right, OptionRight::Call);
    }

    #[test]
    fn padded_format_pads_root() {
        let codec = OptionSymbolCodec::new(SymbolFormat::occ_padded()).expect("valid format");
        let contract = descriptor("XYZ", 2022, 1, 21, true, "50");
        let symbol = codec.encode(&contract).expect("must encode");
        assert_eq!(symbol.as_str(), "XYZ   220121C00050000");
        assert_eq!(codec.decode(symbol.as_str()).expect("must decode"), contract);
    }

    #[test]
    fn custom_format_with_separator_and_month_first() {
        let format = SymbolFormat {
            name: String::from("underscore-mdy"),
            separator: Some('_'),
            date_order: DateOrder::Mmddyy,
            strike_integer_digits: 4,
            strike_fraction_digits: 2,
            ..SymbolFormat::occ_compact()
        };
        let codec = OptionSymbolCodec::new(format).expect("valid format");
        let contract = descriptor("XYZ", 2022, 1, 21, false, "50.5");
        let symbol = codec.encode(&contract).expect("must encode");
        assert_eq!(symbol.as_str(), "XYZ_012122P005050");
        assert_eq!(codec.decode(symbol.as_str()).expect("must decode"), contract);

        let err = codec.decode("XYZ-012122P005050").expect_err("must fail");
        assert_eq!(err.field(), SymbolField::Separator);
        assert_eq!(err.position(), Some(3));
    }

    #[test]
    fn rejects_year_outside_century() {
        let codec = OptionSymbolCodec::default();
        let err = codec
            .encode(&descriptor("XYZ", 2100, 1, 21, true, "50"))
            .expect_err("must fail");
        assert_eq!(err.kind(), CodecErrorKind::InvalidDescriptor);
        assert_eq!(err.field(), SymbolField::Year);
    }

    #[test]
    fn rejects_overly_precise_strike() {
        let codec = OptionSymbolCodec::default();
        let err = codec
            .encode(&descriptor("XYZ", 2022, 1, 21, true, "50.0001"))
            .expect_err("must fail");
        assert_eq!(err.field(), SymbolField::Strike);
        assert!(err.details()["strike"].contains("fractional digits"));
    }

    #[test]
    fn rejects_oversized_strike() {
        let codec = OptionSymbolCodec::default();
        let err = codec
            .encode(&descriptor("XYZ", 2022, 1, 21, true, "100000"))
            .expect_err("must fail");
        assert_eq!(err.field(), SymbolField::Strike);
    }

    #[test]
    fn rejects_root_too_long_for_format() {
        let format = SymbolFormat {
            name: String::from("short-root"),
            underlying_max_len: 4,
            ..SymbolFormat::occ_compact()
        };
        let codec = OptionSymbolCodec::new(format).expect("valid format");
        let err = codec
            .encode(&descriptor("GOOGL", 2022, 1, 21, true, "50"))
            .expect_err("must fail");
        assert_eq!(err.field(), SymbolField::Underlying);
    }

    #[test]
    fn reports_day_position_for_february_thirtieth() {
        let err = OptionSymbolCodec::default()
            .validate("XYZ220230C00050000")
            .expect_err("must fail");
        assert_eq!(err.kind(), CodecErrorKind::InvalidSymbol);
        assert_eq!(err.field(), SymbolField::Day);
        assert_eq!(err.position(), Some(7));
    }

    #[test]
    fn reports_marker_position() {
        let err = OptionSymbolCodec::default()
            .validate("XYZ220121X00050000")
            .expect_err("must fail");
        assert_eq!(err.field(), SymbolField::Right);
        assert_eq!(err.position(), Some(9));
    }

    #[test]
    fn rejects_non_ascii() {
        let err = OptionSymbolCodec::default()
            .validate("XYZ22012€C00050000")
            .expect_err("must fail");
        assert_eq!(err.field(), SymbolField::Symbol);
    }

    #[test]
    fn padded_rejects_interior_padding() {
        let codec = OptionSymbolCodec::new(SymbolFormat::occ_padded()).expect("valid format");
        let err = codec.validate("X YZ  220121C00050000").expect_err("must fail");
        assert_eq!(err.field(), SymbolField::Underlying);
        assert_eq!(err.position(), Some(1));
    }

    #[test]
    fn builds_from_brokerage_arguments() {
        let symbol = build_option_symbol("xyz", 1, 21, 2022, true, 50.0).expect("must build");
        assert_eq!(symbol.as_str(), "XYZ220121C00050000");
        check_option_symbol(symbol.as_str()).expect("must validate");
    }

    #[test]
    fn build_rejects_nan_strike() {
        let err = build_option_symbol("XYZ", 1, 21, 2022, true, f64::NAN).expect_err("must fail");
        assert_eq!(err.field(), SymbolField::Strike);
    }

    #[test]
    fn option_symbol_parse_validates() {
        let codec = OptionSymbolCodec::default();
        let symbol = OptionSymbol::parse("XYZ220121P00050000", &codec).expect("must parse");
        assert_eq!(String::from(symbol), "XYZ220121P00050000");
        assert!(OptionSymbol::parse("XYZ", &codec).is_err());
    }

    #[test]
    fn codec_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<OptionSymbolCodec>();
    }
}

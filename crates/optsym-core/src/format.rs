//! Symbol format specification.
//!
//! The authoritative grammar belongs to the brokerage system that consumes the
//! symbols, so every width, marker and padding rule lives in a
//! [`SymbolFormat`] value rather than in the codec. Two presets cover the OCC
//! conventions:
//!
//! | Preset | Example |
//! |--------|---------|
//! | `occ-compact` | `XYZ220121C00050000` |
//! | `occ-padded` | `XYZ   220121C00050000` |

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, OptionRight, SymbolField, MAX_UNDERLYING_LEN};

const DATE_FIELD_WIDTH: usize = 2;
const MAX_STRIKE_DIGITS: u32 = 18;

/// Ordering of the three 2-digit date fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateOrder {
    #[default]
    Yymmdd,
    Mmddyy,
}

impl DateOrder {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yymmdd => "yymmdd",
            Self::Mmddyy => "mmddyy",
        }
    }

    pub const fn components(self) -> [DateComponent; 3] {
        match self {
            Self::Yymmdd => [DateComponent::Year, DateComponent::Month, DateComponent::Day],
            Self::Mmddyy => [DateComponent::Month, DateComponent::Day, DateComponent::Year],
        }
    }
}

/// One of the three date components, as laid out in the symbol text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateComponent {
    Year,
    Month,
    Day,
}

impl DateComponent {
    pub const fn field(self) -> SymbolField {
        match self {
            Self::Year => SymbolField::Year,
            Self::Month => SymbolField::Month,
            Self::Day => SymbolField::Day,
        }
    }
}

/// Named built-in formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormatPreset {
    #[default]
    OccCompact,
    OccPadded,
}

impl FormatPreset {
    pub const ALL: [Self; 2] = [Self::OccCompact, Self::OccPadded];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OccCompact => "occ-compact",
            Self::OccPadded => "occ-padded",
        }
    }

    pub fn format(self) -> SymbolFormat {
        match self {
            Self::OccCompact => SymbolFormat::occ_compact(),
            Self::OccPadded => SymbolFormat::occ_padded(),
        }
    }
}

impl Display for FormatPreset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatPreset {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "occ-compact" | "occ" => Ok(Self::OccCompact),
            "occ-padded" => Ok(Self::OccPadded),
            other => Err(ConfigError::InvalidFormat {
                reason: format!(
                    "unknown preset '{other}', expected one of occ-compact, occ-padded"
                ),
            }),
        }
    }
}

/// Fixed-width grammar of a canonical option symbol:
///
/// `<underlying>[padding][separator]<date><call|put marker><strike>`
///
/// The date is three 2-digit fields in [`DateOrder`]; the 2-digit year is
/// offset from `century`. The strike is a zero-padded integer count of
/// `10^-strike_fraction_digits` units, `strike_integer_digits +
/// strike_fraction_digits` characters wide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SymbolFormat {
    pub name: String,
    pub underlying_max_len: usize,
    pub underlying_pad: Option<char>,
    pub separator: Option<char>,
    pub date_order: DateOrder,
    pub century: i32,
    pub call_marker: char,
    pub put_marker: char,
    pub strike_integer_digits: u32,
    pub strike_fraction_digits: u32,
}

impl Default for SymbolFormat {
    fn default() -> Self {
        Self::occ_compact()
    }
}

impl SymbolFormat {
    /// OCC layout with the root written unpadded, e.g. `XYZ220121C00050000`.
    pub fn occ_compact() -> Self {
        Self {
            name: FormatPreset::OccCompact.as_str().to_owned(),
            underlying_max_len: MAX_UNDERLYING_LEN,
            underlying_pad: None,
            separator: None,
            date_order: DateOrder::Yymmdd,
            century: 2000,
            call_marker: 'C',
            put_marker: 'P',
            strike_integer_digits: 5,
            strike_fraction_digits: 3,
        }
    }

    /// OCC layout with the root space-padded to six characters.
    pub fn occ_padded() -> Self {
        Self {
            name: FormatPreset::OccPadded.as_str().to_owned(),
            underlying_pad: Some(' '),
            ..Self::occ_compact()
        }
    }

    /// Checks that the format describes an unambiguous grammar.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: String| Err(ConfigError::InvalidFormat { reason });

        if self.name.trim().is_empty() {
            return invalid(String::from("format name cannot be empty"));
        }

        if !(1..=MAX_UNDERLYING_LEN).contains(&self.underlying_max_len) {
            return invalid(format!(
                "underlying_max_len {} must be within 1..={MAX_UNDERLYING_LEN}",
                self.underlying_max_len
            ));
        }

        if let Some(pad) = self.underlying_pad {
            if !pad.is_ascii() || pad.is_ascii_alphanumeric() {
                return invalid(format!(
                    "underlying_pad '{pad}' must be a non-alphanumeric ASCII character"
                ));
            }
        }

        if let Some(separator) = self.separator {
            if !separator.is_ascii() || separator.is_ascii_alphanumeric() {
                return invalid(format!(
                    "separator '{separator}' must be a non-alphanumeric ASCII character"
                ));
            }
            if self.underlying_pad == Some(separator) {
                return invalid(format!(
                    "separator '{separator}' cannot equal the underlying padding"
                ));
            }
        }

        for marker in [self.call_marker, self.put_marker] {
            if !marker.is_ascii_uppercase() {
                return invalid(format!(
                    "marker '{marker}' must be an uppercase ASCII letter"
                ));
            }
        }
        if self.call_marker == self.put_marker {
            return invalid(format!(
                "call and put markers must differ, both are '{}'",
                self.call_marker
            ));
        }

        if !(1000..=9900).contains(&self.century) || self.century % 100 != 0 {
            return invalid(format!(
                "century {} must be a multiple of 100 within 1000..=9900",
                self.century
            ));
        }

        if self.strike_integer_digits == 0 {
            return invalid(String::from("strike_integer_digits must be at least 1"));
        }
        let strike_digits = self.strike_integer_digits + self.strike_fraction_digits;
        if strike_digits > MAX_STRIKE_DIGITS {
            return invalid(format!(
                "strike field of {strike_digits} digits exceeds max {MAX_STRIKE_DIGITS}"
            ));
        }

        Ok(())
    }

    pub const fn date_field_width(&self) -> usize {
        DATE_FIELD_WIDTH
    }

    pub const fn date_width(&self) -> usize {
        DATE_FIELD_WIDTH * 3
    }

    pub const fn strike_width(&self) -> usize {
        (self.strike_integer_digits + self.strike_fraction_digits) as usize
    }

    const fn separator_width(&self) -> usize {
        match self.separator {
            Some(_) => 1,
            None => 0,
        }
    }

    /// Width of everything after the underlying (and its padding).
    pub const fn suffix_width(&self) -> usize {
        self.separator_width() + self.date_width() + 1 + self.strike_width()
    }

    /// Shortest valid symbol length.
    pub const fn min_len(&self) -> usize {
        match self.underlying_pad {
            Some(_) => self.underlying_max_len + self.suffix_width(),
            None => 1 + self.suffix_width(),
        }
    }

    /// Longest valid symbol length.
    pub const fn max_len(&self) -> usize {
        self.underlying_max_len + self.suffix_width()
    }

    /// Inclusive range of 4-digit years the 2-digit year field can express.
    pub const fn year_range(&self) -> (i32, i32) {
        (self.century, self.century + 99)
    }

    /// Largest strike, in `10^-strike_fraction_digits` units, the field holds.
    pub fn max_strike_units(&self) -> u64 {
        10_u64.pow(self.strike_integer_digits + self.strike_fraction_digits) - 1
    }

    pub const fn marker_for(&self, right: OptionRight) -> char {
        match right {
            OptionRight::Call => self.call_marker,
            OptionRight::Put => self.put_marker,
        }
    }

    pub fn right_for(&self, marker: char) -> Option<OptionRight> {
        if marker == self.call_marker {
            Some(OptionRight::Call)
        } else if marker == self.put_marker {
            Some(OptionRight::Put)
        } else {
            None
        }
    }

    /// Human-readable grammar, e.g. `<root:1-6><yymmdd><C|P><strike:5.3>`.
    pub fn layout(&self) -> String {
        let mut layout = match self.underlying_pad {
            Some(pad) => format!("<root:{}, pad '{pad}'>", self.underlying_max_len),
            None => format!("<root:1-{}>", self.underlying_max_len),
        };
        if let Some(separator) = self.separator {
            layout.push(separator);
        }
        layout.push_str(&format!(
            "<{}><{}|{}><strike:{}.{}>",
            self.date_order.as_str(),
            self.call_marker,
            self.put_marker,
            self.strike_integer_digits,
            self.strike_fraction_digits
        ));
        layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        for preset in FormatPreset::ALL {
            preset.format().validate().expect("preset must validate");
        }
    }

    #[test]
    fn compact_lengths() {
        let format = SymbolFormat::occ_compact();
        assert_eq!(format.suffix_width(), 15);
        assert_eq!(format.min_len(), 16);
        assert_eq!(format.max_len(), 21);
        assert_eq!(format.max_strike_units(), 99_999_999);
    }

    #[test]
    fn padded_has_fixed_length() {
        let format = SymbolFormat::occ_padded();
        assert_eq!(format.min_len(), 21);
        assert_eq!(format.max_len(), 21);
    }

    #[test]
    fn rejects_equal_markers() {
        let format = SymbolFormat {
            put_marker: 'C',
            ..SymbolFormat::occ_compact()
        };
        let err = format.validate().expect_err("must fail");
        assert!(matches!(err, ConfigError::InvalidFormat { .. }));
    }

    #[test]
    fn rejects_alphanumeric_padding() {
        let format = SymbolFormat {
            underlying_pad: Some('X'),
            ..SymbolFormat::occ_compact()
        };
        assert!(format.validate().is_err());
    }

    #[test]
    fn rejects_oversized_strike_field() {
        let format = SymbolFormat {
            strike_integer_digits: 15,
            strike_fraction_digits: 4,
            ..SymbolFormat::occ_compact()
        };
        assert!(format.validate().is_err());
    }

    #[test]
    fn rejects_unaligned_century() {
        let format = SymbolFormat {
            century: 2010,
            ..SymbolFormat::occ_compact()
        };
        assert!(format.validate().is_err());
    }

    #[test]
    fn parses_preset_names() {
        assert_eq!(
            FormatPreset::from_str("OCC-Padded").expect("must parse"),
            FormatPreset::OccPadded
        );
        assert!(FormatPreset::from_str("tda").is_err());
    }

    #[test]
    fn describes_layout() {
        assert_eq!(
            SymbolFormat::occ_compact().layout(),
            "<root:1-6><yymmdd><C|P><strike:5.3>"
        );
    }

    #[test]
    fn maps_markers() {
        let format = SymbolFormat::occ_compact();
        assert_eq!(format.right_for('P'), Some(OptionRight::Put));
        assert_eq!(format.right_for('X'), None);
        assert_eq!(format.marker_for(OptionRight::Call), 'C');
    }
}

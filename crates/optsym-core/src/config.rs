//! TOML configuration.
//!
//! ```toml
//! [format]
//! preset = "occ-padded"
//! strike_fraction_digits = 3
//!
//! [logging]
//! level = "debug"
//! format = "json"
//! ```
//!
//! Every key is optional. Format keys override the chosen preset field by
//! field, and the resolved format is validated before it is handed out.
//! `underlying_pad` and `separator` take a single character, or `"none"` to
//! switch the preset's value off.

use std::path::Path;

use serde::{Deserialize, Deserializer};
use tracing::info;

use crate::logging::LogConfig;
use crate::{ConfigError, DateOrder, FormatPreset, OptionSymbolCodec, SymbolFormat};

/// Root of the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptsymConfig {
    pub format: FormatSection,
    pub logging: LogConfig,
}

/// `[format]` section: a preset plus optional per-field overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatSection {
    pub preset: FormatPreset,
    pub name: Option<String>,
    pub underlying_max_len: Option<usize>,
    #[serde(deserialize_with = "optional_char")]
    pub underlying_pad: Option<Option<char>>,
    #[serde(deserialize_with = "optional_char")]
    pub separator: Option<Option<char>>,
    pub date_order: Option<DateOrder>,
    pub century: Option<i32>,
    pub call_marker: Option<char>,
    pub put_marker: Option<char>,
    pub strike_integer_digits: Option<u32>,
    pub strike_fraction_digits: Option<u32>,
}

impl FormatSection {
    /// Applies the overrides to the preset and validates the result.
    pub fn resolve(&self) -> Result<SymbolFormat, ConfigError> {
        let base = self.preset.format();
        let overridden = self.has_overrides();

        let format = SymbolFormat {
            name: match (&self.name, overridden) {
                (Some(name), _) => name.clone(),
                (None, true) => format!("{}-custom", base.name),
                (None, false) => base.name.clone(),
            },
            underlying_max_len: self.underlying_max_len.unwrap_or(base.underlying_max_len),
            underlying_pad: self.underlying_pad.unwrap_or(base.underlying_pad),
            separator: self.separator.unwrap_or(base.separator),
            date_order: self.date_order.unwrap_or(base.date_order),
            century: self.century.unwrap_or(base.century),
            call_marker: self.call_marker.unwrap_or(base.call_marker),
            put_marker: self.put_marker.unwrap_or(base.put_marker),
            strike_integer_digits: self
                .strike_integer_digits
                .unwrap_or(base.strike_integer_digits),
            strike_fraction_digits: self
                .strike_fraction_digits
                .unwrap_or(base.strike_fraction_digits),
        };

        format.validate()?;
        Ok(format)
    }

    fn has_overrides(&self) -> bool {
        self.underlying_max_len.is_some()
            || self.underlying_pad.is_some()
            || self.separator.is_some()
            || self.date_order.is_some()
            || self.century.is_some()
            || self.call_marker.is_some()
            || self.put_marker.is_some()
            || self.strike_integer_digits.is_some()
            || self.strike_fraction_digits.is_some()
    }
}

/// A present key is `Some`: `"none"` clears the value, anything else must be
/// exactly one character.
fn optional_char<'de, D>(deserializer: D) -> Result<Option<Option<char>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if raw.eq_ignore_ascii_case("none") {
        return Ok(Some(None));
    }

    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(Some(Some(ch))),
        _ => Err(serde::de::Error::custom(format!(
            "expected a single character or \"none\", found '{raw}'"
        ))),
    }
}

impl OptsymConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml(&raw)?;
        info!(
            path = %path.display(),
            preset = config.format.preset.as_str(),
            "loaded configuration"
        );
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.format.resolve()?;
        Ok(config)
    }

    /// Codec for the configured format.
    pub fn codec(&self) -> Result<OptionSymbolCodec, ConfigError> {
        OptionSymbolCodec::new(self.format.resolve()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = OptsymConfig::from_toml("").expect("empty config is valid");
        assert_eq!(config, OptsymConfig::default());
        assert_eq!(
            config.format.resolve().expect("must resolve"),
            SymbolFormat::occ_compact()
        );
    }

    #[test]
    fn preset_without_overrides_keeps_name() {
        let config =
            OptsymConfig::from_toml("[format]\npreset = \"occ-padded\"\n").expect("must parse");
        let format = config.format.resolve().expect("must resolve");
        assert_eq!(format, SymbolFormat::occ_padded());
    }

    #[test]
    fn overrides_apply_field_by_field() {
        let raw = r#"
            [format]
            separator = "_"
            date_order = "mmddyy"
            strike_integer_digits = 4
            strike_fraction_digits = 2
        "#;
        let format = OptsymConfig::from_toml(raw)
            .expect("must parse")
            .format
            .resolve()
            .expect("must resolve");

        assert_eq!(format.name, "occ-compact-custom");
        assert_eq!(format.separator, Some('_'));
        assert_eq!(format.underlying_pad, None);
        assert_eq!(format.date_order, DateOrder::Mmddyy);
        assert_eq!(format.strike_width(), 6);
        assert_eq!(format.call_marker, 'C');
    }

    #[test]
    fn none_switches_off_preset_padding() {
        let raw = "[format]\npreset = \"occ-padded\"\nunderlying_pad = \"none\"\n";
        let format = OptsymConfig::from_toml(raw)
            .expect("must parse")
            .format
            .resolve()
            .expect("must resolve");

        assert_eq!(format.underlying_pad, None);
        assert_eq!(format.name, "occ-padded-custom");
    }

    #[test]
    fn rejects_multi_character_separator() {
        let err =
            OptsymConfig::from_toml("[format]\nseparator = \"--\"\n").expect_err("must fail");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn rejects_invalid_resolved_format() {
        let err = OptsymConfig::from_toml("[format]\nput_marker = \"C\"\n").expect_err("must fail");
        assert!(matches!(err, ConfigError::InvalidFormat { .. }));
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = OptsymConfig::from_toml("[format]\nstrike_digits = 8\n").expect_err("must fail");
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}

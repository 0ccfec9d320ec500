mod decode;
mod encode;
mod format;
mod validate;

use std::path::Path;

use optsym_core::{
    Envelope, EnvelopeError, EnvelopeMeta, FormatPreset, OptionSymbolCodec, OptsymConfig,
    SCHEMA_VERSION,
};
use serde_json::Value;
use uuid::Uuid;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[derive(Debug)]
pub struct CommandResult {
    pub data: Value,
    pub warnings: Vec<String>,
    pub errors: Vec<EnvelopeError>,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn with_errors(mut self, errors: Vec<EnvelopeError>) -> Self {
        self.errors.extend(errors);
        self
    }
}

/// Loads the configuration file when one is given, defaults otherwise.
pub fn load_config(path: Option<&Path>) -> Result<OptsymConfig, CliError> {
    match path {
        Some(path) => OptsymConfig::load(path).map_err(CliError::from),
        None => Ok(OptsymConfig::default()),
    }
}

/// `--preset` replaces the configured `[format]` section entirely.
pub fn resolve_codec(cli: &Cli, config: &OptsymConfig) -> Result<OptionSymbolCodec, CliError> {
    let codec = match cli.preset {
        Some(selector) => OptionSymbolCodec::new(FormatPreset::from(selector).format())?,
        None => config.codec()?,
    };
    Ok(codec)
}

pub fn run(cli: &Cli, codec: &OptionSymbolCodec) -> Result<Envelope<Value>, CliError> {
    let command_result = match &cli.command {
        Command::Encode(args) => encode::run(args, codec)?,
        Command::Validate(args) => validate::run(args, codec)?,
        Command::Decode(args) => decode::run(args, codec)?,
        Command::Format => format::run(codec)?,
    };

    let CommandResult {
        data,
        warnings,
        errors,
    } = command_result;

    let mut meta = EnvelopeMeta::new(
        Uuid::new_v4().to_string(),
        SCHEMA_VERSION,
        codec.format().name.as_str(),
    )?;

    for warning in warnings {
        meta.push_warning(warning);
    }

    Envelope::with_errors(meta, data, errors).map_err(CliError::from)
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use optsym_core::SymbolFormat;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("arguments must parse")
    }

    #[test]
    fn wraps_results_in_a_valid_envelope() {
        let cli = parse(&["optsym", "validate", "XYZ220121C00050000"]);
        let envelope = run(&cli, &OptionSymbolCodec::default()).expect("must run");

        assert_eq!(envelope.meta.schema_version, SCHEMA_VERSION);
        assert_eq!(envelope.meta.symbol_format, "occ-compact");
        assert!(Uuid::parse_str(&envelope.meta.request_id).is_ok());
        assert!(envelope.errors.is_empty());
    }

    #[test]
    fn preset_flag_overrides_configured_format() {
        let cli = parse(&["optsym", "--preset", "occ-padded", "format"]);
        let config = OptsymConfig::default();

        let codec = resolve_codec(&cli, &config).expect("must resolve");
        assert_eq!(codec.format(), &SymbolFormat::occ_padded());
    }

    #[test]
    fn configured_format_is_used_without_preset_flag() {
        let cli = parse(&["optsym", "format"]);
        let config =
            OptsymConfig::from_toml("[format]\npreset = \"occ-padded\"\n").expect("must parse");

        let codec = resolve_codec(&cli, &config).expect("must resolve");
        assert_eq!(codec.format().name, "occ-padded");
    }

    #[test]
    fn missing_config_file_is_a_config_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_config(Some(&dir.path().join("absent.toml"))).expect_err("must fail");
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn loads_config_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("optsym.toml");
        std::fs::write(&path, "[format]\nstrike_fraction_digits = 2\n").expect("write config");

        let config = load_config(Some(&path)).expect("must load");
        assert_eq!(config.format.strike_fraction_digits, Some(2));
    }
}

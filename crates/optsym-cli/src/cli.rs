//! CLI argument definitions for optsym.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `encode` | Build a symbol from contract fields |
//! | `validate` | Check one or more symbols |
//! | `decode` | Parse one or more symbols into contract fields |
//! | `format` | Show the active symbol format |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--output` | `json` | Output format (json, ndjson, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--strict` | `false` | Treat warnings and errors as failures |
//! | `--config` | `$OPTSYM_CONFIG` | TOML configuration file |
//! | `--preset` | from config | Symbol format preset |
//! | `--log-level` | from config | Log verbosity on stderr |
//!
//! # Examples
//!
//! ```bash
//! optsym encode --underlying XYZ --month 1 --day 21 --year 2022 --call --strike 50
//! optsym validate XYZ220121C00050000 XYZ220230C00050000 --strict
//! optsym decode "XYZ   220121C00050000" --preset occ-padded --pretty
//! ```

use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use optsym_core::{FormatPreset, LogLevel};
use rust_decimal::Decimal;

/// Option contract symbol codec.
#[derive(Debug, Parser)]
#[command(
    name = "optsym",
    author,
    version,
    about = "Build, validate, and decode option contract symbols"
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat warnings and errors as failures (exit code 5).
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    /// Path to a TOML configuration file.
    #[arg(long, global = true, env = "OPTSYM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Symbol format preset; replaces the configured `[format]` section.
    #[arg(long, global = true, value_enum)]
    pub preset: Option<PresetSelector>,

    /// Log verbosity; overrides the configured level.
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text for terminal display.
    Table,
    /// Single JSON object output.
    Json,
    /// Newline-delimited JSON (one object per line).
    Ndjson,
}

/// Symbol format presets selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PresetSelector {
    /// Unpadded root, e.g. XYZ220121C00050000.
    OccCompact,
    /// Root space-padded to six characters.
    OccPadded,
}

impl From<PresetSelector> for FormatPreset {
    fn from(value: PresetSelector) -> Self {
        match value {
            PresetSelector::OccCompact => Self::OccCompact,
            PresetSelector::OccPadded => Self::OccPadded,
        }
    }
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build a canonical symbol from contract fields.
    ///
    /// # Examples
    ///
    ///   optsym encode --underlying XYZ --month 1 --day 21 --year 2022 --call --strike 50
    ///   optsym encode -u SPY -m 3 -d 15 -y 2024 --put --strike 412.125
    Encode(EncodeArgs),

    /// Check that one or more symbols are well formed.
    Validate(SymbolsArgs),

    /// Parse one or more symbols back into contract fields.
    Decode(SymbolsArgs),

    /// Show the active symbol format specification.
    Format,
}

/// Arguments for the `encode` command.
#[derive(Debug, Args)]
#[command(group(ArgGroup::new("right").required(true).args(["call", "put"])))]
pub struct EncodeArgs {
    /// Underlying ticker (1-6 alphanumerics, case-insensitive).
    #[arg(short, long)]
    pub underlying: String,

    /// Expiration month (1-12).
    #[arg(short, long)]
    pub month: u8,

    /// Expiration day of month.
    #[arg(short, long)]
    pub day: u8,

    /// Expiration year (4 digits).
    #[arg(short, long)]
    pub year: i32,

    /// Call contract.
    #[arg(long)]
    pub call: bool,

    /// Put contract.
    #[arg(long)]
    pub put: bool,

    /// Strike price as a decimal, e.g. 50 or 22.125.
    #[arg(short, long)]
    pub strike: Decimal,
}

/// Arguments for commands that take symbol text.
#[derive(Debug, Args)]
pub struct SymbolsArgs {
    /// One or more symbols.
    #[arg(required = true, num_args = 1..)]
    pub symbols: Vec<String>,
}

//! # optsym core
//!
//! Encoding, decoding and validation of canonical option contract symbols.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`codec`] | [`OptionSymbolCodec`]: encode, decode, validate |
//! | [`config`] | TOML configuration (`[format]`, `[logging]`) |
//! | [`domain`] | Contract value types ([`OptionContractDescriptor`] and its fields) |
//! | [`envelope`] | Response envelope for machine-readable output |
//! | [`error`] | Field violations and the structured [`CodecError`] |
//! | [`format`] | [`SymbolFormat`] grammar specification and presets |
//! | [`logging`] | `tracing` subscriber setup |
//!
//! ## Quick Start
//!
//! ```rust
//! use optsym_core::{build_option_symbol, check_option_symbol, CodecErrorKind, SymbolField};
//!
//! let symbol = build_option_symbol("XYZ", 1, 21, 2022, true, 50.0).unwrap();
//! assert_eq!(symbol.as_str(), "XYZ220121C00050000");
//!
//! let err = check_option_symbol("XYZ220230C00050000").unwrap_err();
//! assert_eq!(err.kind(), CodecErrorKind::InvalidSymbol);
//! assert_eq!(err.field(), SymbolField::Day);
//! ```
//!
//! ## Error Handling
//!
//! Encoding fails with [`CodecErrorKind::InvalidDescriptor`], parsing with
//! [`CodecErrorKind::InvalidSymbol`]. Both carry a `details` map from field
//! name to the violated constraint:
//!
//! ```rust
//! use optsym_core::{CodecError, CodecErrorKind};
//!
//! fn report(error: &CodecError) -> String {
//!     match error.kind() {
//!         CodecErrorKind::InvalidDescriptor => format!("bad contract: {}", error.message()),
//!         CodecErrorKind::InvalidSymbol => format!(
//!             "bad symbol at {}: {:?}",
//!             error.position().unwrap_or(0),
//!             error.details()
//!         ),
//!     }
//! }
//! ```

pub mod codec;
pub mod config;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod format;
pub mod logging;

pub use codec::{build_option_symbol, check_option_symbol, OptionSymbol, OptionSymbolCodec};
pub use config::{FormatSection, OptsymConfig};
pub use domain::{
    Expiration, OptionContractDescriptor, OptionRight, Strike, Underlying, MAX_UNDERLYING_LEN,
};
pub use envelope::{
    Envelope, EnvelopeError, EnvelopeMeta, EnvelopeValidationError, SCHEMA_VERSION,
};
pub use error::{CodecError, CodecErrorKind, ConfigError, SymbolField, ValidationError};
pub use format::{DateOrder, FormatPreset, SymbolFormat};
pub use logging::{try_init_logging, LogConfig, LogFormat, LogLevel};

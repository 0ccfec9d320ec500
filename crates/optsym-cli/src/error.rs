use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Codec(#[from] optsym_core::CodecError),

    #[error(transparent)]
    Config(#[from] optsym_core::ConfigError),

    #[error(transparent)]
    Envelope(#[from] optsym_core::EnvelopeValidationError),

    #[error("strict mode failed: warnings={warning_count}, errors={error_count}")]
    StrictModeViolation {
        warning_count: usize,
        error_count: usize,
    },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Codec(_) => 2,
            Self::Config(_) => 3,
            Self::Envelope(_) | Self::Serialization(_) => 4,
            Self::StrictModeViolation { .. } => 5,
            Self::Io(_) => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use optsym_core::{CodecError, ConfigError, SymbolField};

    use super::*;

    #[test]
    fn maps_exit_codes() {
        let codec = CliError::from(CodecError::invalid_symbol(SymbolField::Symbol, 0, "too short"));
        assert_eq!(codec.exit_code(), 2);

        let config = CliError::from(ConfigError::InvalidFormat {
            reason: String::from("markers must differ"),
        });
        assert_eq!(config.exit_code(), 3);

        let strict = CliError::StrictModeViolation {
            warning_count: 0,
            error_count: 1,
        };
        assert_eq!(strict.exit_code(), 5);
    }
}

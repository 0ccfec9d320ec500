use optsym_core::{EnvelopeError, OptionSymbolCodec};
use serde::Serialize;

use crate::cli::SymbolsArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct ValidationOutcome {
    symbol: String,
    valid: bool,
}

#[derive(Debug, Serialize)]
struct ValidateResponseData {
    results: Vec<ValidationOutcome>,
    valid_count: usize,
    invalid_count: usize,
}

pub fn run(args: &SymbolsArgs, codec: &OptionSymbolCodec) -> Result<CommandResult, CliError> {
    let mut results = Vec::with_capacity(args.symbols.len());
    let mut errors = Vec::new();

    for symbol in &args.symbols {
        let outcome = codec.validate(symbol);
        if let Err(error) = &outcome {
            errors.push(EnvelopeError::from(error).with_input(symbol.as_str()));
        }
        results.push(ValidationOutcome {
            symbol: symbol.clone(),
            valid: outcome.is_ok(),
        });
    }

    let invalid_count = errors.len();
    let data = serde_json::to_value(ValidateResponseData {
        valid_count: results.len() - invalid_count,
        invalid_count,
        results,
    })?;

    Ok(CommandResult::ok(data).with_errors(errors))
}

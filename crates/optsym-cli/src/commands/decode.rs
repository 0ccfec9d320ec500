use optsym_core::{EnvelopeError, OptionContractDescriptor, OptionSymbolCodec};
use serde::Serialize;

use crate::cli::SymbolsArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct DecodedSymbol {
    symbol: String,
    contract: OptionContractDescriptor,
}

#[derive(Debug, Serialize)]
struct DecodeResponseData {
    contracts: Vec<DecodedSymbol>,
}

pub fn run(args: &SymbolsArgs, codec: &OptionSymbolCodec) -> Result<CommandResult, CliError> {
    let mut contracts = Vec::with_capacity(args.symbols.len());
    let mut errors = Vec::new();

    for symbol in &args.symbols {
        match codec.decode(symbol) {
            Ok(contract) => contracts.push(DecodedSymbol {
                symbol: symbol.clone(),
                contract,
            }),
            Err(error) => errors.push(EnvelopeError::from(&error).with_input(symbol.as_str())),
        }
    }

    let data = serde_json::to_value(DecodeResponseData { contracts })?;
    Ok(CommandResult::ok(data).with_errors(errors))
}

#[cfg(test)]
mod tests {
    use optsym_core::SymbolFormat;

    use super::*;

    #[test]
    fn decodes_padded_symbols() {
        let codec = OptionSymbolCodec::new(SymbolFormat::occ_padded()).expect("valid format");
        let args = SymbolsArgs {
            symbols: vec![String::from("XYZ   220121C00050000")],
        };

        let result = run(&args, &codec).expect("must run");
        let contract = &result.data["contracts"][0]["contract"];
        assert_eq!(contract["underlying"], "XYZ");
        assert_eq!(contract["expiration"], "2022-01-21");
        assert_eq!(contract["right"], "call");
        assert_eq!(contract["strike"], "50");
        assert!(result.errors.is_empty());
    }

    #[test]
    fn collects_errors_without_failing() {
        let args = SymbolsArgs {
            symbols: vec![String::from("XYZ220121X00050000")],
        };

        let result = run(&args, &OptionSymbolCodec::default()).expect("must run");
        assert_eq!(result.data["contracts"].as_array().map(Vec::len), Some(0));
        assert_eq!(result.errors[0].position, Some(9));
        assert!(result.errors[0].details.contains_key("right"));
    }
}

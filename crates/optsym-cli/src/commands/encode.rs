use optsym_core::{CodecError, OptionContractDescriptor, OptionSymbolCodec, Strike};
use serde::Serialize;

use crate::cli::EncodeArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct EncodeResponseData {
    symbol: String,
    contract: OptionContractDescriptor,
}

pub fn run(args: &EncodeArgs, codec: &OptionSymbolCodec) -> Result<CommandResult, CliError> {
    let strike = Strike::new(args.strike).map_err(CodecError::from)?;
    let contract = OptionContractDescriptor::from_parts(
        &args.underlying,
        args.month,
        args.day,
        args.year,
        args.call,
        strike,
    )
    .map_err(CodecError::from)?;

    let symbol = codec.encode(&contract)?;
    let normalized = contract.underlying.as_str() != args.underlying;

    let data = serde_json::to_value(EncodeResponseData {
        symbol: symbol.into_inner(),
        contract,
    })?;

    let mut result = CommandResult::ok(data);
    if normalized {
        result = result.with_warning(format!(
            "underlying '{}' was normalized to uppercase without surrounding whitespace",
            args.underlying
        ));
    }
    Ok(result)
}

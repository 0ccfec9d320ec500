use optsym_core::{OptionSymbolCodec, SymbolFormat};
use serde::Serialize;

use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct FormatResponseData<'a> {
    format: &'a SymbolFormat,
    layout: String,
    min_len: usize,
    max_len: usize,
    year_range: (i32, i32),
}

pub fn run(codec: &OptionSymbolCodec) -> Result<CommandResult, CliError> {
    let format = codec.format();
    let data = serde_json::to_value(FormatResponseData {
        format,
        layout: format.layout(),
        min_len: format.min_len(),
        max_len: format.max_len(),
        year_range: format.year_range(),
    })?;

    Ok(CommandResult::ok(data))
}

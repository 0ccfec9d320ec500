use serde::{Deserialize, Serialize};

use crate::{Expiration, OptionRight, Strike, Underlying, ValidationError};

/// Structured description of a single listed option contract.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OptionContractDescriptor {
    pub underlying: Underlying,
    pub expiration: Expiration,
    pub right: OptionRight,
    pub strike: Strike,
}

impl OptionContractDescriptor {
    pub fn new(
        underlying: Underlying,
        expiration: Expiration,
        right: OptionRight,
        strike: Strike,
    ) -> Self {
        Self {
            underlying,
            expiration,
            right,
            strike,
        }
    }

    /// Builds a descriptor from the raw fields the brokerage call takes.
    ///
    /// Fields are checked in order underlying, expiration, strike; the first
    /// violation is returned.
    pub fn from_parts(
        underlying: &str,
        month: u8,
        day: u8,
        year: i32,
        is_call: bool,
        strike: Strike,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            underlying: Underlying::parse(underlying)?,
            expiration: Expiration::new(year, month, day)?,
            right: OptionRight::from_is_call(is_call),
            strike,
        })
    }

    pub const fn is_call(&self) -> bool {
        self.right.is_call()
    }
}

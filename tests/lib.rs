// Shared fixtures for optsym behavior tests
use std::str::FromStr;

pub use optsym_core::{Expiration, OptionContractDescriptor, OptionRight, Strike, Underlying};

/// Builds a descriptor from known-good literals.
pub fn descriptor(
    underlying: &str,
    (year, month, day): (i32, u8, u8),
    right: OptionRight,
    strike: &str,
) -> OptionContractDescriptor {
    OptionContractDescriptor::new(
        Underlying::parse(underlying).expect("valid underlying"),
        Expiration::new(year, month, day).expect("valid expiration"),
        right,
        Strike::from_str(strike).expect("valid strike"),
    )
}

/// Call on XYZ expiring 2022-01-21 struck at 50.
pub fn reference_contract() -> OptionContractDescriptor {
    descriptor("XYZ", (2022, 1, 21), OptionRight::Call, "50")
}

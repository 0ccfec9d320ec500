//! # Domain Models
//!
//! Value types describing a single option contract.
//!
//! Every type validates its invariants at construction, so a value that exists
//! is always encodable by a format wide enough to hold it.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Underlying`] | Uppercase ticker, 1-6 ASCII alphanumerics |
//! | [`Expiration`] | Gregorian calendar date with a 4-digit year |
//! | [`OptionRight`] | Call or put |
//! | [`Strike`] | Non-negative exact decimal price |
//! | [`OptionContractDescriptor`] | All of the above for one contract |

mod contract;
mod expiration;
mod option_right;
mod strike;
mod underlying;

pub use contract::OptionContractDescriptor;
pub use expiration::Expiration;
pub use option_right::OptionRight;
pub use strike::Strike;
pub use underlying::{Underlying, MAX_UNDERLYING_LEN};

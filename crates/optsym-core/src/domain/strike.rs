use std::fmt::{Display, Formatter};
use std::str::FromStr;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ValidationError;

const MAX_DECIMAL_SCALE: u32 = 28;

/// Non-negative exercise price, held as an exact decimal.
///
/// The value is kept normalized (no trailing fractional zeros) so that two
/// strikes that compare equal also render identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Strike(Decimal);

impl Strike {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Result<Self, ValidationError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(ValidationError::NegativeStrike);
        }

        // -0 normalizes to 0
        Ok(Self(value.abs().normalize()))
    }

    /// Converts a binary float, rejecting NaN, infinities, and magnitudes a
    /// decimal cannot hold.
    pub fn from_f64(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NonFiniteStrike);
        }

        let decimal = Decimal::from_f64(value).ok_or_else(|| ValidationError::StrikeOutOfRange {
            value: value.to_string(),
        })?;
        Self::new(decimal)
    }

    /// Builds a strike from an integer count of `10^-scale` units.
    pub fn from_scaled(units: u64, scale: u32) -> Result<Self, ValidationError> {
        let value = Decimal::try_from_i128_with_scale(i128::from(units), scale).map_err(|_| {
            ValidationError::StrikeTooPrecise {
                scale,
                max: MAX_DECIMAL_SCALE,
            }
        })?;
        Ok(Self(value.normalize()))
    }

    /// Expresses the strike as an integer count of `10^-scale` units, or
    /// `None` when that would lose precision.
    pub fn to_scaled(self, scale: u32) -> Option<u64> {
        if self.scale() > scale {
            return None;
        }

        let factor = Decimal::try_from_i128_with_scale(10_i128.checked_pow(scale)?, 0).ok()?;
        let scaled = self.0.checked_mul(factor)?.normalize();
        if scaled.scale() != 0 {
            return None;
        }
        u64::try_from(scaled.mantissa()).ok()
    }

    /// Number of significant fractional digits.
    pub fn scale(self) -> u32 {
        self.0.scale()
    }
}

impl Display for Strike {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl FromStr for Strike {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let decimal =
            Decimal::from_str(value.trim()).map_err(|_| ValidationError::InvalidStrike {
                value: value.to_owned(),
            })?;
        Self::new(decimal)
    }
}

impl TryFrom<Decimal> for Strike {
    type Error = ValidationError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Strike> for Decimal {
    fn from(value: Strike) -> Self {
        value.0
    }
}

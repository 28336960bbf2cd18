use num_bigint::BigInt;

use super::Fraction;
use crate::constants::Rounding;
use crate::error::Result;

/// A ratio displayed as a percentage, e.g. a slippage tolerance or a price impact.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Percent(Fraction);

impl Percent {
    pub fn new(numerator: impl Into<BigInt>, denominator: impl Into<BigInt>) -> Result<Self> {
        Ok(Self(Fraction::new(numerator, denominator)?))
    }

    /// `bps` basis points (1 bp = 0.01%).
    pub fn from_bps(bps: u32) -> Self {
        Self(Fraction::from_positive_parts(bps, 10_000u32))
    }

    pub fn zero() -> Self {
        Self(Fraction::zero())
    }

    pub fn as_fraction(&self) -> &Fraction {
        &self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    pub fn add(&self, other: &Percent) -> Percent {
        Percent(self.0.add(&other.0))
    }

    pub fn subtract(&self, other: &Percent) -> Percent {
        Percent(self.0.subtract(&other.0))
    }

    pub fn multiply(&self, other: &Percent) -> Percent {
        Percent(self.0.multiply(&other.0))
    }

    pub fn divide(&self, other: &Percent) -> Result<Percent> {
        Ok(Percent(self.0.divide(&other.0)?))
    }

    pub fn to_significant(&self, significant_digits: u32, rounding: Rounding) -> Result<String> {
        self.scaled().to_significant(significant_digits, rounding)
    }

    pub fn to_fixed(&self, decimal_places: u32, rounding: Rounding) -> String {
        self.scaled().to_fixed(decimal_places, rounding)
    }

    fn scaled(&self) -> Fraction {
        self.0.multiply(&Fraction::from_integer(100))
    }
}

impl From<Fraction> for Percent {
    fn from(fraction: Fraction) -> Self {
        Percent(fraction)
    }
}

impl std::fmt::Display for Percent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.to_fixed(2, Rounding::HalfUp))
    }
}

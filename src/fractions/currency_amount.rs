use ethers::types::U256;
use num_bigint::{BigInt, BigUint};
use num_traits::{Signed, Zero};
use rust_decimal::Decimal;
use std::str::FromStr;

use super::fraction::{pow10, trim_fraction_zeros};
use super::Fraction;
use crate::constants::Rounding;
use crate::currency::{ChainId, Currency, NativeCurrency};
use crate::error::{Result, SdkError};
use crate::types::conversions::{biguint_to_u256, raw_to_decimal};

/// A non-negative quantity of a currency, held in its smallest unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CurrencyAmount {
    currency: Currency,
    raw: BigUint,
}

impl CurrencyAmount {
    /// Fails with `AmountOverflow` when `raw` does not fit a `uint256`.
    pub fn from_raw(currency: impl Into<Currency>, raw: impl Into<BigUint>) -> Result<Self> {
        let raw = raw.into();
        // uint256
        if raw.bits() > 256 {
            return Err(SdkError::AmountOverflow);
        }
        Ok(Self {
            currency: currency.into(),
            raw,
        })
    }

    /// Amount of the Harmony native currency.
    pub fn native(raw: impl Into<BigUint>) -> Result<Self> {
        Self::from_raw(NativeCurrency::harmony(), raw)
    }

    /// Parses a human-readable fixed-point string such as `"12.5"`.
    pub fn parse(currency: impl Into<Currency>, text: &str) -> Result<Self> {
        let currency = currency.into();
        let decimals = currency.decimals() as usize;
        let trimmed = text.trim();
        let (int_part, frac_part) = match trimmed.split_once('.') {
            Some((i, f)) => (i, f),
            None => (trimmed, ""),
        };

        let digits_only = |s: &str| s.chars().all(|c| c.is_ascii_digit());
        if (int_part.is_empty() && frac_part.is_empty()) || !digits_only(int_part) || !digits_only(frac_part) {
            return Err(SdkError::InvalidAmount(text.to_string()));
        }
        if frac_part.len() > decimals {
            return Err(SdkError::InvalidAmount(format!(
                "{} has more than {} fractional digits",
                text, decimals
            )));
        }

        let scaled = format!("{}{:0<width$}", int_part, frac_part, width = decimals);
        let raw = BigUint::from_str(&scaled).map_err(|e| SdkError::InvalidAmount(e.to_string()))?;
        Self::from_raw(currency, raw)
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn raw(&self) -> &BigUint {
        &self.raw
    }

    pub fn is_zero(&self) -> bool {
        self.raw.is_zero()
    }

    /// The raw amount as a contract-facing `U256`.
    pub fn to_u256(&self) -> Result<U256> {
        Ok(biguint_to_u256(&self.raw)?)
    }

    /// `raw / 10^decimals`.
    pub fn to_exact(&self) -> Fraction {
        Fraction::from_positive_parts(
            BigInt::from(self.raw.clone()),
            pow10(self.currency.decimals() as u32),
        )
    }

    /// Full-precision decimal rendering without trailing zeros.
    pub fn to_exact_string(&self) -> String {
        let fixed = self
            .to_exact()
            .to_fixed(self.currency.decimals() as u32, Rounding::Down);
        trim_fraction_zeros(&fixed)
    }

    pub fn add(&self, other: &CurrencyAmount) -> Result<CurrencyAmount> {
        self.ensure_same_currency(other)?;
        Self::from_raw(self.currency.clone(), &self.raw + &other.raw)
    }

    pub fn subtract(&self, other: &CurrencyAmount) -> Result<CurrencyAmount> {
        self.ensure_same_currency(other)?;
        if other.raw > self.raw {
            return Err(SdkError::InsufficientInputAmount);
        }
        Ok(Self {
            currency: self.currency.clone(),
            raw: &self.raw - &other.raw,
        })
    }

    /// Scales the raw amount by `fraction` and collapses it back to an integer.
    pub fn multiply_fraction(&self, fraction: &Fraction, rounding: Rounding) -> Result<CurrencyAmount> {
        let scaled = Fraction::from_integer(BigInt::from(self.raw.clone())).multiply(fraction);
        let raw = scaled.round(rounding);
        if raw.is_negative() {
            return Err(SdkError::InvalidAmount(format!("{} scaled below zero", self.raw)));
        }
        let raw = raw
            .to_biguint()
            .ok_or_else(|| SdkError::InvalidAmount(scaled.to_string()))?;
        Self::from_raw(self.currency.clone(), raw)
    }

    pub fn to_significant(&self, significant_digits: u32, rounding: Rounding) -> Result<String> {
        self.to_exact().to_significant(significant_digits, rounding)
    }

    /// Fails with `InvalidPrecision` when asked for more places than the currency has.
    pub fn to_fixed(&self, decimal_places: u32, rounding: Rounding) -> Result<String> {
        if decimal_places > self.currency.decimals() as u32 {
            return Err(SdkError::InvalidPrecision(format!(
                "{} decimal places requested, {} has {}",
                decimal_places,
                self.currency,
                self.currency.decimals()
            )));
        }
        Ok(self.to_exact().to_fixed(decimal_places, rounding))
    }

    /// Display-only `Decimal`; fails for values beyond its 96-bit mantissa.
    pub fn to_decimal(&self) -> Result<Decimal> {
        Ok(raw_to_decimal(&self.raw, self.currency.decimals())?)
    }

    /// The same raw amount expressed in the token that stands in for this currency.
    pub fn wrapped(&self, chain_id: ChainId) -> Result<CurrencyAmount> {
        let token = self.currency.wrapped(chain_id)?;
        Ok(Self {
            currency: Currency::Token(token),
            raw: self.raw.clone(),
        })
    }

    fn ensure_same_currency(&self, other: &CurrencyAmount) -> Result<()> {
        if self.currency != other.currency {
            return Err(SdkError::CurrencyMismatch {
                expected: self.currency.to_string(),
                actual: other.currency.to_string(),
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for CurrencyAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.to_exact_string(), self.currency)
    }
}

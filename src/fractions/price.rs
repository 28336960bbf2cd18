use num_bigint::{BigInt, BigUint};

use super::fraction::pow10;
use super::{CurrencyAmount, Fraction};
use crate::constants::Rounding;
use crate::currency::Currency;
use crate::error::{Result, SdkError};

/// Units of `quote` paid per unit of `base`.
///
/// `raw` relates smallest units; `adjusted()` applies the decimal difference between
/// the two currencies and is what gets displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Price {
    base: Currency,
    quote: Currency,
    raw: Fraction,
    scalar: Fraction,
}

impl Price {
    /// `numerator` quote units for `denominator` base units.
    pub fn new(
        base: Currency,
        quote: Currency,
        denominator: impl Into<BigInt>,
        numerator: impl Into<BigInt>,
    ) -> Result<Self> {
        let raw = Fraction::new(numerator, denominator)?;
        Ok(Self::from_raw(base, quote, raw))
    }

    /// Price of `base` in `quote` implied by two amounts, `quote_amount / base_amount`.
    pub fn from_amounts(base_amount: &CurrencyAmount, quote_amount: &CurrencyAmount) -> Result<Self> {
        Self::new(
            base_amount.currency().clone(),
            quote_amount.currency().clone(),
            BigInt::from(base_amount.raw().clone()),
            BigInt::from(quote_amount.raw().clone()),
        )
    }

    pub(crate) fn from_raw(base: Currency, quote: Currency, raw: Fraction) -> Self {
        let scalar = Fraction::from_positive_parts(
            pow10(base.decimals() as u32),
            pow10(quote.decimals() as u32),
        );
        Self {
            base,
            quote,
            raw,
            scalar,
        }
    }

    pub fn base_currency(&self) -> &Currency {
        &self.base
    }

    pub fn quote_currency(&self) -> &Currency {
        &self.quote
    }

    pub fn raw(&self) -> &Fraction {
        &self.raw
    }

    /// `raw` scaled to whole units of both currencies.
    pub fn adjusted(&self) -> Fraction {
        self.raw.multiply(&self.scalar)
    }

    pub fn invert(&self) -> Result<Price> {
        Ok(Self::from_raw(
            self.quote.clone(),
            self.base.clone(),
            self.raw.invert()?,
        ))
    }

    /// Chains `self` (A in B) with `other` (B in C) into A in C.
    pub fn multiply(&self, other: &Price) -> Result<Price> {
        if self.quote != other.base {
            return Err(SdkError::CurrencyMismatch {
                expected: self.quote.to_string(),
                actual: other.base.to_string(),
            });
        }
        Ok(Self::from_raw(
            self.base.clone(),
            other.quote.clone(),
            self.raw.multiply(&other.raw),
        ))
    }

    /// Converts an amount of the base currency into the quote currency, rounding down.
    pub fn quote(&self, amount: &CurrencyAmount) -> Result<CurrencyAmount> {
        if amount.currency() != &self.base {
            return Err(SdkError::CurrencyMismatch {
                expected: self.base.to_string(),
                actual: amount.currency().to_string(),
            });
        }
        let quoted = self
            .raw
            .multiply(&Fraction::from_integer(BigInt::from(amount.raw().clone())))
            .quotient();
        let raw: BigUint = quoted
            .to_biguint()
            .ok_or_else(|| SdkError::InvalidAmount(quoted.to_string()))?;
        CurrencyAmount::from_raw(self.quote.clone(), raw)
    }

    pub fn to_significant(&self, significant_digits: u32, rounding: Rounding) -> Result<String> {
        self.adjusted().to_significant(significant_digits, rounding)
    }

    pub fn to_fixed(&self, decimal_places: u32, rounding: Rounding) -> String {
        self.adjusted().to_fixed(decimal_places, rounding)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = self
            .to_significant(6, Rounding::HalfUp)
            .unwrap_or_else(|_| self.adjusted().to_string());
        write!(f, "{} {}/{}", value, self.quote, self.base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::{ChainId, Token};

    fn token(last: u8, decimals: u8, symbol: &str) -> Currency {
        let addr = format!("0x{:040x}", last);
        Token::new(ChainId::MAINNET, &addr, decimals, Some(symbol), None)
            .unwrap()
            .into()
    }

    #[test]
    fn test_adjusted_applies_decimal_scalar() {
        // 1 base (18 decimals) = 2000 quote (6 decimals)
        let price = Price::new(
            token(1, 18, "ETH"),
            token(2, 6, "USDC"),
            BigInt::from(10u64.pow(18)),
            BigInt::from(2_000_000_000u64),
        )
        .unwrap();
        assert_eq!(price.to_significant(5, Rounding::HalfUp).unwrap(), "2000");
        assert_eq!(price.invert().unwrap().to_fixed(4, Rounding::HalfUp), "0.0005");
    }

    #[test]
    fn test_multiply_chains_currencies() {
        let a = token(1, 18, "A");
        let b = token(2, 18, "B");
        let c = token(3, 18, "C");
        let ab = Price::new(a.clone(), b.clone(), 1, 2).unwrap();
        let bc = Price::new(b.clone(), c.clone(), 1, 3).unwrap();
        let ac = ab.multiply(&bc).unwrap();
        assert_eq!(ac.base_currency(), &a);
        assert_eq!(ac.quote_currency(), &c);
        assert_eq!(ac.raw(), &Fraction::from_integer(6));

        assert!(matches!(bc.multiply(&ab), Err(SdkError::CurrencyMismatch { .. })));
    }

    #[test]
    fn test_quote_rounds_down() {
        let a = token(1, 18, "A");
        let b = token(2, 18, "B");
        let price = Price::new(a.clone(), b.clone(), 3, 1).unwrap();
        let amount = CurrencyAmount::from_raw(a, 10u32).unwrap();
        let quoted = price.quote(&amount).unwrap();
        assert_eq!(quoted.raw(), &BigUint::from(3u32));
        assert_eq!(quoted.currency(), &b);

        assert!(matches!(price.quote(&quoted), Err(SdkError::CurrencyMismatch { .. })));
    }

    #[test]
    fn test_zero_denominator_rejected() {
        let err = Price::new(token(1, 18, "A"), token(2, 18, "B"), 0, 1).unwrap_err();
        assert_eq!(err, SdkError::DivisionByZero);
    }
}

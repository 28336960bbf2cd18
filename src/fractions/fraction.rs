//! Exact rational arithmetic over arbitrary-precision integers.
//!
//! Nothing is rounded until [`Fraction::to_fixed`], [`Fraction::to_significant`] or an
//! explicit integer collapse asks for it.

use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use std::cmp::Ordering;
use std::ops::{Add, Mul, Sub};

use crate::constants::Rounding;
use crate::error::{Result, SdkError};

/// `numerator / denominator` with a strictly positive denominator.
///
/// The value is not kept in lowest terms; equality and ordering compare values.
#[derive(Debug, Clone)]
pub struct Fraction {
    numerator: BigInt,
    denominator: BigInt,
}

impl Fraction {
    pub fn new(numerator: impl Into<BigInt>, denominator: impl Into<BigInt>) -> Result<Self> {
        let numerator = numerator.into();
        let denominator = denominator.into();
        if denominator.is_zero() {
            return Err(SdkError::DivisionByZero);
        }
        if denominator.is_negative() {
            return Ok(Self {
                numerator: -numerator,
                denominator: -denominator,
            });
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// For denominators that are positive by construction (powers of ten, fee bases).
    pub(crate) fn from_positive_parts(numerator: impl Into<BigInt>, denominator: impl Into<BigInt>) -> Self {
        let denominator = denominator.into();
        debug_assert!(denominator.is_positive());
        Self {
            numerator: numerator.into(),
            denominator,
        }
    }

    pub fn from_integer(value: impl Into<BigInt>) -> Self {
        Self {
            numerator: value.into(),
            denominator: BigInt::one(),
        }
    }

    pub fn zero() -> Self {
        Self::from_integer(0)
    }

    pub fn one() -> Self {
        Self::from_integer(1)
    }

    pub fn numerator(&self) -> &BigInt {
        &self.numerator
    }

    pub fn denominator(&self) -> &BigInt {
        &self.denominator
    }

    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.numerator.is_negative()
    }

    /// Integer part, truncated toward zero.
    pub fn quotient(&self) -> BigInt {
        &self.numerator / &self.denominator
    }

    /// What is left after [`Fraction::quotient`], as a fraction of the same denominator.
    pub fn remainder(&self) -> Fraction {
        Self {
            numerator: &self.numerator % &self.denominator,
            denominator: self.denominator.clone(),
        }
    }

    pub fn invert(&self) -> Result<Fraction> {
        Fraction::new(self.denominator.clone(), self.numerator.clone())
    }

    pub fn add(&self, other: &Fraction) -> Fraction {
        if self.denominator == other.denominator {
            return Self {
                numerator: &self.numerator + &other.numerator,
                denominator: self.denominator.clone(),
            };
        }
        Self {
            numerator: &self.numerator * &other.denominator + &other.numerator * &self.denominator,
            denominator: &self.denominator * &other.denominator,
        }
    }

    pub fn subtract(&self, other: &Fraction) -> Fraction {
        if self.denominator == other.denominator {
            return Self {
                numerator: &self.numerator - &other.numerator,
                denominator: self.denominator.clone(),
            };
        }
        Self {
            numerator: &self.numerator * &other.denominator - &other.numerator * &self.denominator,
            denominator: &self.denominator * &other.denominator,
        }
    }

    pub fn multiply(&self, other: &Fraction) -> Fraction {
        Self {
            numerator: &self.numerator * &other.numerator,
            denominator: &self.denominator * &other.denominator,
        }
    }

    pub fn divide(&self, other: &Fraction) -> Result<Fraction> {
        Fraction::new(
            &self.numerator * &other.denominator,
            &self.denominator * &other.numerator,
        )
    }

    pub fn less_than(&self, other: &Fraction) -> bool {
        self < other
    }

    pub fn equal_to(&self, other: &Fraction) -> bool {
        self == other
    }

    pub fn greater_than(&self, other: &Fraction) -> bool {
        self > other
    }

    /// Collapses the value to an integer with the given rounding.
    pub fn round(&self, rounding: Rounding) -> BigInt {
        div_round(&self.numerator, &self.denominator, rounding)
    }

    /// Renders exactly `decimal_places` fractional digits.
    pub fn to_fixed(&self, decimal_places: u32, rounding: Rounding) -> String {
        let scaled = &self.numerator * pow10(decimal_places);
        let rounded = div_round(&scaled, &self.denominator, rounding);
        format_scaled(&rounded, decimal_places)
    }

    /// Renders `significant_digits` significant digits, dropping trailing fractional zeros.
    pub fn to_significant(&self, significant_digits: u32, rounding: Rounding) -> Result<String> {
        if significant_digits == 0 {
            return Err(SdkError::InvalidPrecision(
                "significant digits must be at least 1".to_string(),
            ));
        }
        if self.numerator.is_zero() {
            return Ok("0".to_string());
        }

        let exponent = self.decimal_exponent();
        let places = significant_digits as i64 - 1 - exponent;
        if places >= 0 {
            let fixed = self.to_fixed(places as u32, rounding);
            return Ok(trim_fraction_zeros(&fixed));
        }

        // more integer digits than requested: round to a multiple of 10^-places
        let scale = pow10((-places) as u32);
        let rounded = div_round(&self.numerator, &(&self.denominator * &scale), rounding);
        Ok((rounded * scale).to_string())
    }

    /// `e` such that `10^e <= |self| < 10^(e+1)`. Must not be called on zero.
    fn decimal_exponent(&self) -> i64 {
        let abs = self.numerator.abs();
        let mut e = abs.to_string().len() as i64 - self.denominator.to_string().len() as i64;
        while compare_to_power(&abs, &self.denominator, e) == Ordering::Less {
            e -= 1;
        }
        while compare_to_power(&abs, &self.denominator, e + 1) != Ordering::Less {
            e += 1;
        }
        e
    }
}

// |n| / d compared against 10^e
fn compare_to_power(abs_numerator: &BigInt, denominator: &BigInt, e: i64) -> Ordering {
    if e >= 0 {
        abs_numerator.cmp(&(denominator * pow10(e as u32)))
    } else {
        (abs_numerator * pow10((-e) as u32)).cmp(denominator)
    }
}

pub(crate) fn pow10(exp: u32) -> BigInt {
    num_traits::pow(BigInt::from(10u8), exp as usize)
}

/// Integer division of `n` by a positive `d` with explicit rounding.
pub(crate) fn div_round(n: &BigInt, d: &BigInt, rounding: Rounding) -> BigInt {
    let (q, r) = n.div_rem(d);
    if r.is_zero() {
        return q;
    }
    let away = match n.sign() {
        Sign::Minus => &q - 1,
        _ => &q + 1,
    };
    match rounding {
        Rounding::Down => q,
        Rounding::Up => away,
        Rounding::HalfUp => {
            if r.abs() * 2 >= *d {
                away
            } else {
                q
            }
        }
    }
}

fn format_scaled(value: &BigInt, decimal_places: u32) -> String {
    let negative = value.is_negative();
    let digits = value.abs().to_string();
    let body = if decimal_places == 0 {
        digits
    } else {
        let places = decimal_places as usize;
        let padded = format!("{:0>width$}", digits, width = places + 1);
        let (int_part, frac_part) = padded.split_at(padded.len() - places);
        format!("{}.{}", int_part, frac_part)
    };
    if negative {
        format!("-{}", body)
    } else {
        body
    }
}

pub(crate) fn trim_fraction_zeros(s: &str) -> String {
    if !s.contains('.') {
        return s.to_string();
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

impl PartialEq for Fraction {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Fraction {}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        (&self.numerator * &other.denominator).cmp(&(&other.numerator * &self.denominator))
    }
}

impl<'a> Add<&'a Fraction> for &'a Fraction {
    type Output = Fraction;

    fn add(self, rhs: &'a Fraction) -> Fraction {
        Fraction::add(self, rhs)
    }
}

impl<'a> Sub<&'a Fraction> for &'a Fraction {
    type Output = Fraction;

    fn sub(self, rhs: &'a Fraction) -> Fraction {
        self.subtract(rhs)
    }
}

impl<'a> Mul<&'a Fraction> for &'a Fraction {
    type Output = Fraction;

    fn mul(self, rhs: &'a Fraction) -> Fraction {
        self.multiply(rhs)
    }
}

impl std::fmt::Display for Fraction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

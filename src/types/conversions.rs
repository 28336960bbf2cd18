use ethers::types::{Address, U256};
use ethers::utils::to_checksum;
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::SdkError;

// Amounts travel as BigUint internally and as U256 at the contract boundary
pub fn biguint_to_u256(value: &BigUint) -> Result<U256, ConversionError> {
    let bytes = value.to_bytes_be();
    if bytes.len() > 32 {
        return Err(ConversionError::Overflow);
    }
    Ok(U256::from_big_endian(&bytes))
}

pub fn u256_to_biguint(value: U256) -> BigUint {
    let mut bytes = [0u8; 32];
    value.to_big_endian(&mut bytes);
    BigUint::from_bytes_be(&bytes)
}

/// Display-only conversion of a raw amount into a `Decimal` with `decimals` places.
///
/// Fails when the value does not fit the 96-bit mantissa or the scale exceeds 28.
pub fn raw_to_decimal(value: &BigUint, decimals: u8) -> Result<Decimal, ConversionError> {
    let mantissa = value.to_i128().ok_or(ConversionError::Overflow)?;
    Decimal::try_from_i128_with_scale(mantissa, decimals as u32)
        .map_err(|e| ConversionError::InvalidDecimal(e.to_string()))
}

// Addresses are rendered EIP-55 checksummed
pub fn address_to_string(addr: Address) -> String {
    to_checksum(&addr, None)
}

/// Parses a `0x`-prefixed 20-byte hex address.
///
/// All-lowercase and all-uppercase input is accepted as is; mixed-case input must match
/// its EIP-55 checksum.
pub fn string_to_address(s: &str) -> Result<Address, ConversionError> {
    let trimmed = s.trim();
    let hex = trimmed
        .strip_prefix("0x")
        .ok_or_else(|| ConversionError::InvalidAddress(format!("{} is missing the 0x prefix", s)))?;
    if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ConversionError::InvalidAddress(s.to_string()));
    }
    let addr = Address::from_str(hex).map_err(|e| ConversionError::InvalidAddress(e.to_string()))?;

    let has_lower = hex.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = hex.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper && address_to_string(addr) != trimmed {
        return Err(ConversionError::InvalidAddress(format!("{} has a bad checksum", s)));
    }
    Ok(addr)
}

/// Validates `s` and returns the parsed address with its checksummed rendering.
pub fn validate_and_parse_address(s: &str) -> Result<(Address, String), ConversionError> {
    let addr = string_to_address(s)?;
    Ok((addr, address_to_string(addr)))
}

#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("Invalid decimal: {0}")]
    InvalidDecimal(String),
    #[error("Overflow in conversion")]
    Overflow,
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
}

impl From<ConversionError> for SdkError {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::InvalidDecimal(msg) => SdkError::InvalidAmount(msg),
            ConversionError::Overflow => SdkError::AmountOverflow,
            ConversionError::InvalidAddress(msg) => SdkError::InvalidAddress(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u256_roundtrip_preserves_max() {
        let max = U256::MAX;
        let big = u256_to_biguint(max);
        assert_eq!(big.bits(), 256);
        assert_eq!(biguint_to_u256(&big).unwrap(), max);
    }

    #[test]
    fn test_biguint_over_256_bits_overflows() {
        let too_big = u256_to_biguint(U256::MAX) + 1u32;
        assert!(matches!(biguint_to_u256(&too_big), Err(ConversionError::Overflow)));
    }

    #[test]
    fn test_raw_to_decimal_applies_scale() {
        let raw = BigUint::from(1_500_000u64);
        assert_eq!(raw_to_decimal(&raw, 6).unwrap(), Decimal::from_str("1.5").unwrap());
    }

    #[test]
    fn test_lowercase_address_is_checksummed() {
        let (_, checksummed) =
            validate_and_parse_address("0x511efe91a118abe86cbd040d72dd957b0b5512f4").unwrap();
        assert_eq!(checksummed, "0x511EFE91a118ABE86cbd040d72DD957B0b5512F4");
    }

    #[test]
    fn test_bad_checksum_rejected() {
        let err = string_to_address("0x511efe91a118ABE86cbd040d72DD957B0b5512F4").unwrap_err();
        assert!(matches!(err, ConversionError::InvalidAddress(_)));
    }

    #[test]
    fn test_malformed_addresses_rejected() {
        for input in ["", "0x", "0x1234", "511efe91a118abe86cbd040d72dd957b0b5512f4", "0xzz1efe91a118abe86cbd040d72dd957b0b5512f4"] {
            assert!(string_to_address(input).is_err(), "{input} should be rejected");
        }
    }
}

/// Address, `U256` and `Decimal` conversions used at the SDK boundary
pub mod conversions;

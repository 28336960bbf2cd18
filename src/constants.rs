// Protocol constants shared by the pair math, routing and settings defaults.

use serde::{Deserialize, Serialize};

/// Swoop factory on Harmony mainnet (deployed 2020-10-22).
pub const FACTORY_ADDRESS: &str = "0x511EFE91a118ABE86cbd040d72DD957B0b5512F4";

/// keccak256 of the pair creation bytecode, used for CREATE2 pair addresses.
pub const INIT_CODE_HASH: &str =
    "0x87356c32b1d11f0ecc268fbd499639821bf3bcbd0547a703a3437ff4673abb84";

/// Liquidity permanently locked by the first mint of every pair.
pub const MINIMUM_LIQUIDITY: u64 = 1000;

/// Input multiplier after the 0.3% swap fee (997 / 1000).
pub const FEE_NUMERATOR: u64 = 997;
pub const FEE_DENOMINATOR: u64 = 1000;

/// Decimals of every pair liquidity token.
pub const LIQUIDITY_TOKEN_DECIMALS: u8 = 18;
pub const LIQUIDITY_TOKEN_SYMBOL: &str = "SWOOP-LP";
pub const LIQUIDITY_TOKEN_NAME: &str = "Swoop LP Token";

/// Which side of a trade is fixed by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeType {
    ExactInput,
    ExactOutput,
}

impl std::fmt::Display for TradeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeType::ExactInput => write!(f, "exact_input"),
            TradeType::ExactOutput => write!(f, "exact_output"),
        }
    }
}

/// Rounding applied when a [`Fraction`](crate::fractions::Fraction) is rendered
/// or collapsed to an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rounding {
    /// Truncate toward zero.
    Down,
    /// Nearest, ties away from zero.
    #[default]
    HalfUp,
    /// Away from zero on any non-zero remainder.
    Up,
}

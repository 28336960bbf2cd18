//! # Errors
//!
//! Every fallible operation in the SDK returns [`SdkError`]. Failures are raised at the
//! point where a precondition is violated and are never retried or defaulted internally.

use crate::currency::ChainId;

/// Unified error type for amount math, routing and call building.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SdkError {
    #[error("currency mismatch: expected {expected}, got {actual}")]
    CurrencyMismatch { expected: String, actual: String },
    #[error("chain id mismatch: {0} vs {1}")]
    ChainIdMismatch(ChainId, ChainId),
    #[error("token addresses are identical: {0}")]
    IdenticalAddresses(String),
    #[error("currency {0} is not part of this pair or route")]
    UnrelatedCurrency(String),
    #[error("insufficient reserves")]
    InsufficientReserves,
    #[error("insufficient input amount")]
    InsufficientInputAmount,
    #[error("insufficient output amount")]
    InsufficientOutputAmount,
    #[error("division by zero")]
    DivisionByZero,
    #[error("invalid address: {0}")]
    InvalidAddress(String),
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("amount exceeds uint256")]
    AmountOverflow,
    #[error("invalid precision: {0}")]
    InvalidPrecision(String),
    #[error("invalid route: {0}")]
    InvalidRoute(&'static str),
    #[error("slippage tolerance must not be negative")]
    InvalidSlippage,
    #[error("invalid search options: {0}")]
    InvalidSearchOptions(&'static str),
    #[error("invalid deadline: {0}")]
    InvalidDeadline(&'static str),
    #[error("trade cannot have native currency on both sides")]
    NativeInAndOut,
    #[error("exact output trades are not supported for fee-on-transfer tokens")]
    ExactOutputNotSupportedWithFeeOnTransfer,
    #[error("no wrapped native token configured for chain {0}")]
    UnsupportedChain(ChainId),
    #[error("no route found")]
    NoRouteFound,
}

pub type Result<T> = std::result::Result<T, SdkError>;

impl SdkError {
    /// Errors that mean "this hop cannot be formed with the given reserves".
    ///
    /// The best-trade search prunes on these instead of failing the whole search.
    pub fn is_insufficient_liquidity(&self) -> bool {
        matches!(
            self,
            SdkError::InsufficientReserves | SdkError::InsufficientOutputAmount
        )
    }
}

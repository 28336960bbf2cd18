//! # Router Module
//!
//! Turns a [`Trade`] into the method name, arguments and native value of a router
//! contract swap call. ABI encoding and submission are left to the caller.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::TradeType;
use crate::error::{Result, SdkError};
use crate::fractions::{CurrencyAmount, Percent};
use crate::trade::Trade;
use crate::types::conversions::validate_and_parse_address;
use crate::utils::current_unix_seconds;

/// When the swap stops being valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Deadline {
    /// Seconds from now.
    Ttl(u64),
    /// Absolute unix timestamp in seconds.
    At(u64),
}

impl Deadline {
    fn resolve(&self) -> Result<u64> {
        match *self {
            Deadline::Ttl(0) => Err(SdkError::InvalidDeadline("ttl must be positive")),
            Deadline::Ttl(ttl) => current_unix_seconds()
                .checked_add(ttl)
                .ok_or(SdkError::InvalidDeadline("ttl overflows the clock")),
            Deadline::At(0) => Err(SdkError::InvalidDeadline("deadline must be positive")),
            Deadline::At(at) => Ok(at),
        }
    }
}

/// Caller choices that shape the swap call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeOptions {
    /// How far the price may move against the trade before it reverts.
    pub allowed_slippage: Percent,
    /// Receiver of the output.
    pub recipient: String,
    pub deadline: Deadline,
    /// Use the fee-on-transfer variants. Only exact-input trades support them.
    pub fee_on_transfer: bool,
}

impl TradeOptions {
    pub fn new(allowed_slippage: Percent, recipient: impl Into<String>, deadline: Deadline) -> Self {
        Self {
            allowed_slippage,
            recipient: recipient.into(),
            deadline,
            fee_on_transfer: false,
        }
    }

    pub fn with_fee_on_transfer(mut self, fee_on_transfer: bool) -> Self {
        self.fee_on_transfer = fee_on_transfer;
        self
    }
}

/// One positional argument of the call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CallArg {
    Value(String),
    Path(Vec<String>),
}

/// Everything needed to encode a router swap call. Numbers are decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapParameters {
    pub method_name: String,
    pub args: Vec<CallArg>,
    /// Native currency sent along with the call.
    pub value: String,
}

pub struct Router;

impl Router {
    /// Builds the swap call for `trade`.
    ///
    /// | trade        | native in                  | native out                 | neither                       |
    /// |--------------|----------------------------|----------------------------|-------------------------------|
    /// | exact input  | `swapExactETHForTokens`    | `swapExactTokensForETH`    | `swapExactTokensForTokens`    |
    /// | exact output | `swapETHForExactTokens`    | `swapTokensForExactETH`    | `swapTokensForExactTokens`    |
    ///
    /// Exact-input methods take the `SupportingFeeOnTransferTokens` suffix when
    /// `fee_on_transfer` is set.
    pub fn swap_call_parameters(trade: &Trade, options: &TradeOptions) -> Result<SwapParameters> {
        let native_in = trade.input_amount().currency().is_native();
        let native_out = trade.output_amount().currency().is_native();
        if native_in && native_out {
            return Err(SdkError::NativeInAndOut);
        }
        if options.fee_on_transfer && trade.trade_type() == TradeType::ExactOutput {
            return Err(SdkError::ExactOutputNotSupportedWithFeeOnTransfer);
        }

        let (_, to) = validate_and_parse_address(&options.recipient)?;
        let deadline = options.deadline.resolve()?.to_string();
        let path: Vec<String> = trade
            .route()
            .path()
            .iter()
            .map(|token| token.address_string())
            .collect();

        let (method_name, args, value) = match trade.trade_type() {
            TradeType::ExactInput => {
                let amount_in = to_decimal_string(&trade.maximum_amount_in(&options.allowed_slippage)?)?;
                let amount_out = to_decimal_string(&trade.minimum_amount_out(&options.allowed_slippage)?)?;
                let method = if native_in {
                    "swapExactETHForTokens"
                } else if native_out {
                    "swapExactTokensForETH"
                } else {
                    "swapExactTokensForTokens"
                };
                let method_name = if options.fee_on_transfer {
                    format!("{}SupportingFeeOnTransferTokens", method)
                } else {
                    method.to_string()
                };
                if native_in {
                    let args = vec![
                        CallArg::Value(amount_out),
                        CallArg::Path(path),
                        CallArg::Value(to),
                        CallArg::Value(deadline),
                    ];
                    (method_name, args, amount_in)
                } else {
                    let args = vec![
                        CallArg::Value(amount_in),
                        CallArg::Value(amount_out),
                        CallArg::Path(path),
                        CallArg::Value(to),
                        CallArg::Value(deadline),
                    ];
                    (method_name, args, "0".to_string())
                }
            }
            TradeType::ExactOutput => {
                let amount_in = to_decimal_string(&trade.maximum_amount_in(&options.allowed_slippage)?)?;
                let amount_out = to_decimal_string(&trade.minimum_amount_out(&options.allowed_slippage)?)?;
                if native_in {
                    let args = vec![
                        CallArg::Value(amount_out),
                        CallArg::Path(path),
                        CallArg::Value(to),
                        CallArg::Value(deadline),
                    ];
                    ("swapETHForExactTokens".to_string(), args, amount_in)
                } else {
                    let method = if native_out {
                        "swapTokensForExactETH"
                    } else {
                        "swapTokensForExactTokens"
                    };
                    let args = vec![
                        CallArg::Value(amount_out),
                        CallArg::Value(amount_in),
                        CallArg::Path(path),
                        CallArg::Value(to),
                        CallArg::Value(deadline),
                    ];
                    (method.to_string(), args, "0".to_string())
                }
            }
        };

        debug!("swap call {} for {}", method_name, trade);
        crate::metrics::increment_swap_parameters_built(&method_name);
        Ok(SwapParameters {
            method_name,
            args,
            value,
        })
    }
}

// calldata amounts must fit a uint256
fn to_decimal_string(amount: &CurrencyAmount) -> Result<String> {
    Ok(amount.to_u256()?.to_string())
}

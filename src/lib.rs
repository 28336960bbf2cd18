//! # Swoop SDK
//!
//! Quoting and routing for a constant-product AMM on Harmony. The SDK prices swaps
//! against caller-supplied pair reserves, finds the best multi-hop trades between two
//! currencies, and builds the router call parameters for executing them. It performs
//! no network I/O.
//!
//! ## Overview
//!
//! - **Math**: exact rationals, currency amounts and prices over big integers
//! - **Pairs**: constant-product quoting with the 0.3% fee, liquidity mint/burn math
//! - **Routing**: validated routes and a bounded best-trade search
//! - **Execution**: slippage-bounded router call parameters
//!
//! ## Architecture
//!
//! ### Value Layer
//! [`Fraction`], [`Percent`], [`CurrencyAmount`] and [`Price`] never round until asked to,
//! and every rounding call names its direction.
//!
//! ### Pair Layer
//! A [`Pair`] is an immutable reserve snapshot. Simulated swaps return the next state as
//! a new pair. Pair addresses are derived locally with CREATE2.
//!
//! ### Routing Layer
//! [`Route`] chains pairs; [`Trade`] simulates an amount through a route and hosts the
//! best-trade search.
//!
//! ### Call Layer
//! [`Router`] maps a trade and [`TradeOptions`] to [`SwapParameters`].

// Core Types
/// Protocol constants and shared enums
pub mod constants;
/// SDK error type
pub mod error;
/// Native currency, tokens and the wrapped-native table
pub mod currency;
/// Exact arithmetic value types
pub mod fractions;
/// Address, `U256` and `Decimal` conversions
pub mod types;

// Pairs & Routing
/// CREATE2 pair address derivation
pub mod pair_address;
/// Constant-product pair math
pub mod pools;
/// Validated chains of pairs
pub mod route;
/// Trade simulation and best-trade search
pub mod trade;
/// Router swap call parameters
pub mod router;

// Infrastructure
/// Metrics and observability
pub mod metrics;
/// General utilities
pub mod utils;

// Settings & Configuration
/// Configuration management
pub mod settings;

// Re-exports for convenience
pub use constants::{Rounding, TradeType};
pub use currency::{ChainId, Currency, NativeCurrency, Token};
pub use error::{Result, SdkError};
pub use fractions::{CurrencyAmount, Fraction, Percent, Price};
pub use pair_address::PairFactory;
pub use pools::Pair;
pub use route::Route;
pub use router::{CallArg, Deadline, Router, SwapParameters, TradeOptions};
pub use settings::Settings;
pub use trade::{BestTradeOptions, Trade};

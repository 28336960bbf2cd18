//! # Quote Route Example
//!
//! Finds the best exact-input trades for 1 ONE into a stablecoin over a handful of
//! pairs, then builds the router call for the best one.
//!
//! ## Overview
//!
//! The example:
//! 1. Loads settings (`Config.toml` if present, plus `SDK_*` overrides)
//! 2. Builds pair snapshots from hard-coded reserves
//! 3. Runs the best-trade search
//! 4. Prints each candidate and the swap parameters as JSON
//!
//! ## Usage
//!
//! ```bash
//! cargo run --example quote_route --features observability -- 0xYourRecipient
//! ```

use anyhow::{Context, Result};
use std::env;
use swoop_sdk::currency::wrapped_native;
use swoop_sdk::{
    metrics, ChainId, Currency, CurrencyAmount, NativeCurrency, Pair, Rounding, Router, Settings, Token, Trade,
};

const DEFAULT_RECIPIENT: &str = "0x0000000000000000000000000000000000000004";

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_target(false).init();
    metrics::describe_metrics();

    let recipient = env::args().nth(1).unwrap_or_else(|| DEFAULT_RECIPIENT.to_string());
    let settings = Settings::new().context("failed to load settings")?;
    let factory = settings.pair_factory().context("invalid factory settings")?;

    let wone = wrapped_native(ChainId::MAINNET)?.clone();
    let busd = Token::new(ChainId::MAINNET, "0xe176ebe47d621b984a73036b9da5d834411ef734", 18, Some("BUSD"), Some("Binance USD"))?;
    let eth = Token::new(ChainId::MAINNET, "0x6983d1e6def3690c4d616b13597a09e6193ea013", 18, Some("1ETH"), Some("Ethereum"))?;

    let pairs = vec![
        Pair::with_factory(
            CurrencyAmount::parse(wone.clone(), "2500000")?,
            CurrencyAmount::parse(busd.clone(), "50000")?,
            &factory,
        )?,
        Pair::with_factory(
            CurrencyAmount::parse(wone.clone(), "900000")?,
            CurrencyAmount::parse(eth.clone(), "12")?,
            &factory,
        )?,
        Pair::with_factory(
            CurrencyAmount::parse(eth.clone(), "40")?,
            CurrencyAmount::parse(busd.clone(), "60000")?,
            &factory,
        )?,
    ];

    let amount_in = CurrencyAmount::parse(NativeCurrency::harmony(), "1000")?;
    let output: Currency = busd.into();
    let trades = Trade::best_trade_exact_in(&pairs, &amount_in, &output, settings.best_trade_options())?;
    if trades.is_empty() {
        println!("No route from {} to {}", amount_in.currency(), output);
        return Ok(());
    }

    for (rank, trade) in trades.iter().enumerate() {
        println!(
            "#{} {} -> {} via {} (impact {}%)",
            rank + 1,
            amount_in,
            trade.output_amount().to_significant(6, Rounding::Down)?,
            trade.route(),
            trade.price_impact().to_significant(3, Rounding::HalfUp)?,
        );
    }

    let best = &trades[0];
    let options = settings.trade_options(&recipient);
    let parameters = Router::swap_call_parameters(best, &options)?;
    println!("{}", serde_json::to_string_pretty(&parameters)?);

    Ok(())
}

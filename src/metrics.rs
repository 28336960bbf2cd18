// src/metrics.rs
#![cfg_attr(not(feature = "observability"), allow(unused_variables, dead_code))]

#[cfg(feature = "observability")]
pub use metrics::{counter, describe_counter, describe_histogram, histogram, increment_counter, Unit};

// NOTE: When observability feature is disabled, provide stub implementations
#[cfg(not(feature = "observability"))]
pub enum Unit {
    Count,
    Seconds,
}

// Macros for metrics when observability is disabled
#[cfg(not(feature = "observability"))]
#[macro_export]
macro_rules! counter {
    ($name:expr, $value:expr $(, $label:expr => $label_value:expr)* $(,)?) => {};
    ($name:expr $(, $label:expr => $label_value:expr)* $(,)?) => {};
}

#[cfg(not(feature = "observability"))]
#[macro_export]
macro_rules! histogram {
    ($name:expr, $value:expr $(, $label:expr => $label_value:expr)* $(,)?) => {};
}

#[cfg(not(feature = "observability"))]
#[macro_export]
macro_rules! increment_counter {
    ($name:expr $(, $label:expr => $label_value:expr)* $(,)?) => {};
}

#[cfg(not(feature = "observability"))]
#[macro_export]
macro_rules! describe_counter {
    ($name:expr, $unit:expr, $desc:expr) => {};
    ($name:expr, $desc:expr) => {};
}

#[cfg(not(feature = "observability"))]
#[macro_export]
macro_rules! describe_histogram {
    ($name:expr, $unit:expr, $desc:expr) => {};
    ($name:expr, $desc:expr) => {};
}

#[cfg(not(feature = "observability"))]
use crate::{counter, describe_counter, describe_histogram, histogram, increment_counter};

use crate::constants::TradeType;

/// Registers descriptions for every metric the SDK emits.
/// Call once at startup, after installing a recorder.
pub fn describe_metrics() {
    describe_counter!(
        "sdk_best_trade_searches_total",
        Unit::Count,
        "Best-trade searches run, labeled by trade type."
    );
    describe_counter!(
        "sdk_best_trade_candidates_total",
        Unit::Count,
        "Pair hops evaluated by best-trade searches."
    );
    describe_counter!(
        "sdk_best_trade_pruned_total",
        Unit::Count,
        "Branches dropped for insufficient reserves or zero output."
    );
    describe_counter!(
        "sdk_best_trade_no_route_total",
        Unit::Count,
        "Searches that returned no trade."
    );
    describe_histogram!(
        "sdk_best_trade_search_duration_seconds",
        Unit::Seconds,
        "Wall time of a best-trade search."
    );
    describe_counter!(
        "sdk_swap_parameters_built_total",
        Unit::Count,
        "Router call parameter sets built, labeled by method name."
    );
}

// --- Best-trade search ---
pub fn record_best_trade_search(
    trade_type: TradeType,
    duration: std::time::Duration,
    evaluated: usize,
    pruned: usize,
    results: usize,
) {
    let trade_type = trade_type.to_string();
    increment_counter!("sdk_best_trade_searches_total", "trade_type" => trade_type.clone());
    counter!("sdk_best_trade_candidates_total", evaluated as u64, "trade_type" => trade_type.clone());
    counter!("sdk_best_trade_pruned_total", pruned as u64, "trade_type" => trade_type.clone());
    if results == 0 {
        increment_counter!("sdk_best_trade_no_route_total", "trade_type" => trade_type.clone());
    }
    histogram!(
        "sdk_best_trade_search_duration_seconds",
        duration.as_secs_f64(),
        "trade_type" => trade_type
    );
}

// --- Router ---
pub fn increment_swap_parameters_built(method_name: &str) {
    increment_counter!("sdk_swap_parameters_built_total", "method" => method_name.to_string());
}

use config::{Config, ConfigError, File};
use serde::Deserialize;
use std::env;
use std::path::Path;
use std::str::FromStr;
use tracing::{info, warn};

use crate::constants::{FACTORY_ADDRESS, INIT_CODE_HASH};
use crate::error::SdkError;
use crate::fractions::Percent;
use crate::pair_address::PairFactory;
use crate::router::{Deadline, TradeOptions};
use crate::trade::BestTradeOptions;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct FactorySettings {
    #[serde(default = "default_factory_address")]
    pub address: String,
    #[serde(default = "default_init_code_hash")]
    pub init_code_hash: String,
}

fn default_factory_address() -> String {
    FACTORY_ADDRESS.to_string()
}
fn default_init_code_hash() -> String {
    INIT_CODE_HASH.to_string()
}

impl Default for FactorySettings {
    fn default() -> Self {
        Self {
            address: default_factory_address(),
            init_code_hash: default_init_code_hash(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct RoutingSettings {
    #[serde(default = "default_max_hops")]
    pub max_hops: usize,
    #[serde(default = "default_max_num_results")]
    pub max_num_results: usize,
}

fn default_max_hops() -> usize {
    3
}
fn default_max_num_results() -> usize {
    3
}

impl Default for RoutingSettings {
    fn default() -> Self {
        Self {
            max_hops: default_max_hops(),
            max_num_results: default_max_num_results(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct RouterSettings {
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,
    #[serde(default = "default_allowed_slippage_bps")]
    pub allowed_slippage_bps: u32,
    #[serde(default)]
    pub fee_on_transfer: bool,
}

fn default_ttl_seconds() -> u64 {
    1200 // 20 minutes
}
fn default_allowed_slippage_bps() -> u32 {
    50 // 0.5%
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            ttl_seconds: default_ttl_seconds(),
            allowed_slippage_bps: default_allowed_slippage_bps(),
            fee_on_transfer: false,
        }
    }
}

/// SDK configuration: which factory to derive pairs from, search bounds, and router
/// call defaults. Every field has a default, so an empty file is valid.
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    #[serde(default)]
    pub factory: FactorySettings,
    #[serde(default)]
    pub routing: RoutingSettings,
    #[serde(default)]
    pub router: RouterSettings,
}

impl Settings {
    /// Loads `Config.toml` from the working directory if present, then applies
    /// `SDK_*` environment overrides.
    pub fn new() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name("Config.toml").required(false))
            .build()?;

        let mut settings: Self = s.try_deserialize()?;
        settings.apply_overrides(|key| env::var(key).ok());
        info!(
            "settings loaded (factory {}, max_hops {}, max_num_results {})",
            settings.factory.address, settings.routing.max_hops, settings.routing.max_num_results
        );
        Ok(settings)
    }

    /// Loads a specific TOML file, then applies `SDK_*` environment overrides.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let s = Config::builder()
            .add_source(File::from(path))
            .build()?;

        let mut settings: Self = s.try_deserialize()?;
        settings.apply_overrides(|key| env::var(key).ok());
        info!("settings loaded from {}", path.display());
        Ok(settings)
    }

    /// Applies overrides from `lookup` (the process environment in production).
    /// Unparseable values are logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(address) = non_empty("SDK_FACTORY_ADDRESS") {
            self.factory.address = address;
        }
        if let Some(hash) = non_empty("SDK_INIT_CODE_HASH") {
            self.factory.init_code_hash = hash;
        }
        if let Some(v) = non_empty("SDK_ROUTING_MAX_HOPS") {
            override_number("SDK_ROUTING_MAX_HOPS", &v, &mut self.routing.max_hops);
        }
        if let Some(v) = non_empty("SDK_ROUTING_MAX_NUM_RESULTS") {
            override_number("SDK_ROUTING_MAX_NUM_RESULTS", &v, &mut self.routing.max_num_results);
        }
        if let Some(v) = non_empty("SDK_ROUTER_TTL_SECONDS") {
            override_number("SDK_ROUTER_TTL_SECONDS", &v, &mut self.router.ttl_seconds);
        }
        if let Some(v) = non_empty("SDK_ROUTER_ALLOWED_SLIPPAGE_BPS") {
            override_number("SDK_ROUTER_ALLOWED_SLIPPAGE_BPS", &v, &mut self.router.allowed_slippage_bps);
        }
    }

    /// Factory described by `[factory]`; fails on a malformed address or hash.
    pub fn pair_factory(&self) -> Result<PairFactory, SdkError> {
        PairFactory::new(&self.factory.address, &self.factory.init_code_hash)
    }

    pub fn best_trade_options(&self) -> BestTradeOptions {
        BestTradeOptions {
            max_num_results: self.routing.max_num_results,
            max_hops: self.routing.max_hops,
        }
    }

    /// Router defaults for a swap paying out to `recipient`.
    pub fn trade_options(&self, recipient: &str) -> TradeOptions {
        TradeOptions::new(
            Percent::from_bps(self.router.allowed_slippage_bps),
            recipient,
            Deadline::Ttl(self.router.ttl_seconds),
        )
        .with_fee_on_transfer(self.router.fee_on_transfer)
    }
}

fn override_number<T: FromStr>(key: &str, raw: &str, target: &mut T) {
    match raw.parse::<T>() {
        Ok(value) => *target = value,
        Err(_) => warn!("ignoring {}={:?}: not a non-negative integer", key, raw),
    }
}

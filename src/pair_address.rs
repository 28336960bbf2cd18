//! CREATE2 derivation of pair contract addresses.
//!
//! A pair's address is a pure function of the factory, the factory's pair init code
//! hash and the sorted token addresses, so it is computed locally and memoised for the
//! lifetime of the process.

use dashmap::DashMap;
use ethers::types::{Address, H160, H256};
use ethers::utils::{get_create2_address_from_hash, keccak256};
use once_cell::sync::Lazy;
use std::str::FromStr;
use tracing::trace;

use crate::currency::Token;
use crate::error::{Result, SdkError};
use crate::types::conversions::string_to_address;

// FACTORY_ADDRESS and INIT_CODE_HASH in byte form
const DEFAULT_FACTORY: Address = H160([
    0x51, 0x1e, 0xfe, 0x91, 0xa1, 0x18, 0xab, 0xe8, 0x6c, 0xbd, 0x04, 0x0d, 0x72, 0xdd, 0x95, 0x7b,
    0x0b, 0x55, 0x12, 0xf4,
]);
const DEFAULT_INIT_CODE_HASH: H256 = H256([
    0x87, 0x35, 0x6c, 0x32, 0xb1, 0xd1, 0x1f, 0x0e, 0xcc, 0x26, 0x8f, 0xbd, 0x49, 0x96, 0x39, 0x82,
    0x1b, 0xf3, 0xbc, 0xbd, 0x05, 0x47, 0xa7, 0x03, 0xa3, 0x43, 0x7f, 0xf4, 0x67, 0x3a, 0xbb, 0x84,
]);

type CacheKey = (Address, H256, Address, Address);

static PAIR_ADDRESS_CACHE: Lazy<DashMap<CacheKey, Address>> = Lazy::new(DashMap::new);

/// The factory that deploys pairs, identified by its address and pair init code hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PairFactory {
    pub address: Address,
    pub init_code_hash: H256,
}

impl Default for PairFactory {
    fn default() -> Self {
        Self {
            address: DEFAULT_FACTORY,
            init_code_hash: DEFAULT_INIT_CODE_HASH,
        }
    }
}

impl PairFactory {
    pub fn new(address: &str, init_code_hash: &str) -> Result<Self> {
        let address = string_to_address(address)?;
        let hex = init_code_hash.trim();
        let hex = hex.strip_prefix("0x").unwrap_or(hex);
        if hex.len() != 64 {
            return Err(SdkError::InvalidAddress(format!(
                "init code hash {} is not 32 bytes",
                init_code_hash
            )));
        }
        let init_code_hash =
            H256::from_str(hex).map_err(|e| SdkError::InvalidAddress(e.to_string()))?;
        Ok(Self {
            address,
            init_code_hash,
        })
    }

    /// Address of the pair for two distinct tokens on one chain, in either order.
    pub fn pair_address(&self, token_a: &Token, token_b: &Token) -> Result<Address> {
        let (token0, token1) = if token_a.sorts_before(token_b)? {
            (token_a, token_b)
        } else {
            (token_b, token_a)
        };

        let key = (self.address, self.init_code_hash, token0.address, token1.address);
        if let Some(cached) = PAIR_ADDRESS_CACHE.get(&key) {
            return Ok(*cached);
        }

        let address = compute_pair_address(self, token0.address, token1.address);
        trace!(
            "pair address {:?} for {:?}/{:?} (factory {:?})",
            address,
            token0.address,
            token1.address,
            self.address
        );
        PAIR_ADDRESS_CACHE.insert(key, address);
        Ok(address)
    }
}

/// Uncached CREATE2 address; `token0` must already sort before `token1`.
pub fn compute_pair_address(factory: &PairFactory, token0: Address, token1: Address) -> Address {
    let mut packed = [0u8; 40];
    packed[..20].copy_from_slice(token0.as_bytes());
    packed[20..].copy_from_slice(token1.as_bytes());
    let salt = keccak256(packed);
    get_create2_address_from_hash(factory.address, salt, factory.init_code_hash)
}

/// Pair address under the default factory.
pub fn pair_address(token_a: &Token, token_b: &Token) -> Result<Address> {
    PairFactory::default().pair_address(token_a, token_b)
}

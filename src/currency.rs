//! # Currencies
//!
//! A [`Currency`] is either the chain's native currency (ONE on Harmony, no contract
//! address) or an ERC20 [`Token`]. Pairs only ever hold tokens; the native currency is
//! accepted at route and trade endpoints and resolved to its wrapped token through
//! [`WRAPPED_NATIVE`].

use ethers::types::Address;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{Result, SdkError};
use crate::types::conversions::{address_to_string, string_to_address};

/// Network identifier (Harmony: 1 = mainnet, 2 = testnet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChainId(pub u64);

impl ChainId {
    pub const MAINNET: ChainId = ChainId(1);
    pub const TESTNET: ChainId = ChainId(2);
}

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The chain's native currency. There is exactly one per network, so two natives are
/// equal when they describe the same currency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NativeCurrency {
    pub decimals: u8,
    pub symbol: Option<String>,
    pub name: Option<String>,
}

impl NativeCurrency {
    /// ONE, the native currency of Harmony.
    pub fn harmony() -> Self {
        Self {
            decimals: 18,
            symbol: Some("ONE".to_string()),
            name: Some("Harmony".to_string()),
        }
    }
}

/// An ERC20 token with a canonical address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub chain_id: ChainId,
    pub address: Address,
    pub decimals: u8,
    pub symbol: Option<String>,
    pub name: Option<String>,
}

impl Token {
    /// Builds a token from a hex address string, failing with `InvalidAddress` if the
    /// string is malformed or carries a bad checksum.
    pub fn new(
        chain_id: ChainId,
        address: &str,
        decimals: u8,
        symbol: Option<&str>,
        name: Option<&str>,
    ) -> Result<Self> {
        let address = string_to_address(address)?;
        Ok(Self::from_address(chain_id, address, decimals, symbol, name))
    }

    pub fn from_address(
        chain_id: ChainId,
        address: Address,
        decimals: u8,
        symbol: Option<&str>,
        name: Option<&str>,
    ) -> Self {
        Self {
            chain_id,
            address,
            decimals,
            symbol: symbol.map(str::to_string),
            name: name.map(str::to_string),
        }
    }

    /// Checksummed address string.
    pub fn address_string(&self) -> String {
        address_to_string(self.address)
    }

    /// Returns true if this token's address sorts before `other`'s.
    ///
    /// Only defined for distinct tokens on the same chain.
    pub fn sorts_before(&self, other: &Token) -> Result<bool> {
        if self.chain_id != other.chain_id {
            return Err(SdkError::ChainIdMismatch(self.chain_id, other.chain_id));
        }
        if self.address == other.address {
            return Err(SdkError::IdenticalAddresses(self.address_string()));
        }
        // byte order is the case-insensitive hex order
        Ok(self.address < other.address)
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.chain_id == other.chain_id && self.address == other.address
    }
}

impl Eq for Token {}

impl std::hash::Hash for Token {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.chain_id.hash(state);
        self.address.hash(state);
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.symbol {
            Some(symbol) => write!(f, "{}", symbol),
            None => write!(f, "{}", self.address_string()),
        }
    }
}

/// Either the native currency or a token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    Native(NativeCurrency),
    Token(Token),
}

impl Currency {
    pub fn decimals(&self) -> u8 {
        match self {
            Currency::Native(n) => n.decimals,
            Currency::Token(t) => t.decimals,
        }
    }

    pub fn symbol(&self) -> Option<&str> {
        match self {
            Currency::Native(n) => n.symbol.as_deref(),
            Currency::Token(t) => t.symbol.as_deref(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Currency::Native(n) => n.name.as_deref(),
            Currency::Token(t) => t.name.as_deref(),
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Currency::Native(_))
    }

    pub fn as_token(&self) -> Option<&Token> {
        match self {
            Currency::Token(t) => Some(t),
            Currency::Native(_) => None,
        }
    }

    /// The token that stands in for this currency inside pairs on `chain_id`.
    pub fn wrapped(&self, chain_id: ChainId) -> Result<Token> {
        match self {
            Currency::Token(t) => Ok(t.clone()),
            Currency::Native(_) => wrapped_native(chain_id).cloned(),
        }
    }
}

impl From<Token> for Currency {
    fn from(token: Token) -> Self {
        Currency::Token(token)
    }
}

impl From<NativeCurrency> for Currency {
    fn from(native: NativeCurrency) -> Self {
        Currency::Native(native)
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Currency::Native(n) => write!(f, "{}", n.symbol.as_deref().unwrap_or("NATIVE")),
            Currency::Token(t) => write!(f, "{}", t),
        }
    }
}

fn wone(chain_id: ChainId, address: &str) -> Option<(ChainId, Token)> {
    string_to_address(address).ok().map(|addr| {
        (
            chain_id,
            Token::from_address(chain_id, addr, 18, Some("WONE"), Some("Wrapped ONE")),
        )
    })
}

/// Wrapped native token per chain.
pub static WRAPPED_NATIVE: Lazy<HashMap<ChainId, Token>> = Lazy::new(|| {
    [
        // deployed 2020-10-28 08:25 UTC
        wone(ChainId::MAINNET, "0xF0e3E0218fD1C9C99f260E589935361fa07d7957"),
        // deployed 2020-10-28 08:57 UTC
        wone(ChainId::TESTNET, "0xF561b31d0c6f9c8b96a0Ee5DFADDaC9787Eaa70c"),
    ]
    .into_iter()
    .flatten()
    .collect()
});

pub fn wrapped_native(chain_id: ChainId) -> Result<&'static Token> {
    WRAPPED_NATIVE
        .get(&chain_id)
        .ok_or(SdkError::UnsupportedChain(chain_id))
}

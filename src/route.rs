//! # Routes
//!
//! A [`Route`] is an ordered chain of pairs where each pair shares a token with the
//! next. The token path is derived once at construction; the endpoints may be the
//! native currency, in which case the path carries its wrapped token.

use crate::currency::{ChainId, Currency, Token};
use crate::error::{Result, SdkError};
use crate::fractions::Price;
use crate::pools::Pair;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pairs: Vec<Pair>,
    path: Vec<Token>,
    input: Currency,
    output: Currency,
}

impl Route {
    /// Validates `pairs` as a chain starting at `input`.
    ///
    /// When `output` is `None` the last token of the path becomes the output.
    pub fn new(pairs: Vec<Pair>, input: Currency, output: Option<Currency>) -> Result<Self> {
        let first = pairs
            .first()
            .ok_or(SdkError::InvalidRoute("a route needs at least one pair"))?;
        let chain_id = first.chain_id();
        if let Some(other) = pairs.iter().find(|p| p.chain_id() != chain_id) {
            return Err(SdkError::ChainIdMismatch(chain_id, other.chain_id()));
        }

        let wrapped_input = input.wrapped(chain_id)?;
        if !first.involves_token(&wrapped_input) {
            return Err(SdkError::UnrelatedCurrency(input.to_string()));
        }
        let wrapped_output = match &output {
            Some(currency) => {
                let wrapped = currency.wrapped(chain_id)?;
                let involved = pairs.last().map_or(false, |p| p.involves_token(&wrapped));
                if !involved {
                    return Err(SdkError::UnrelatedCurrency(currency.to_string()));
                }
                Some(wrapped)
            }
            None => None,
        };

        let mut path = Vec::with_capacity(pairs.len() + 1);
        path.push(wrapped_input);
        for pair in &pairs {
            let current = &path[path.len() - 1];
            if !pair.involves_token(current) {
                return Err(SdkError::InvalidRoute("consecutive pairs do not share a token"));
            }
            let next = pair.other_token(current)?.clone();
            path.push(next);
        }

        let terminus = &path[path.len() - 1];
        if let Some(wrapped) = &wrapped_output {
            if wrapped != terminus {
                return Err(SdkError::InvalidRoute("path does not end at the output currency"));
            }
        }
        let output = output.unwrap_or_else(|| Currency::Token(terminus.clone()));

        Ok(Self {
            pairs,
            path,
            input,
            output,
        })
    }

    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    /// Tokens visited, `pairs().len() + 1` long.
    pub fn path(&self) -> &[Token] {
        &self.path
    }

    pub fn input(&self) -> &Currency {
        &self.input
    }

    pub fn output(&self) -> &Currency {
        &self.output
    }

    pub fn chain_id(&self) -> ChainId {
        self.path[0].chain_id
    }

    /// Product of every hop's pair price, quoted as output per input.
    pub fn mid_price(&self) -> Result<Price> {
        let mut hops = self.pairs.iter().zip(self.path.iter());
        let (first_pair, first_token) = hops
            .next()
            .ok_or(SdkError::InvalidRoute("a route needs at least one pair"))?;
        let mut price = first_pair.price_of(first_token)?;
        for (pair, token) in hops {
            price = price.multiply(&pair.price_of(token)?)?;
        }
        Ok(Price::from_raw(
            self.input.clone(),
            self.output.clone(),
            price.raw().clone(),
        ))
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let hops: Vec<String> = self.path.iter().map(|t| t.to_string()).collect();
        write!(f, "{}", hops.join(" -> "))
    }
}

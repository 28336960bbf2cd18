//! # Trades
//!
//! A [`Trade`] is a route plus one fixed amount, simulated hop by hop against the pairs'
//! reserve snapshots. It carries the derived amounts, execution price and price impact,
//! and the slippage bounds the router call builder turns into call arguments.
//!
//! The best-trade search lives here as well: a depth-first walk over caller-supplied
//! candidate pairs that keeps the best `max_num_results` trades in a bounded sorted list.

use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::time::Instant;
use tracing::{debug, trace};

use crate::constants::{Rounding, TradeType};
use crate::currency::{Currency, Token};
use crate::error::{Result, SdkError};
use crate::fractions::{CurrencyAmount, Fraction, Percent, Price};
use crate::metrics;
use crate::pools::Pair;
use crate::route::Route;
use crate::utils::sorted_insert;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trade {
    route: Route,
    trade_type: TradeType,
    input_amount: CurrencyAmount,
    output_amount: CurrencyAmount,
    execution_price: Price,
    next_mid_price: Price,
    price_impact: Percent,
}

impl Trade {
    /// Simulates `amount` through `route`.
    ///
    /// For `ExactInput` the amount must be in the route's input currency, for
    /// `ExactOutput` in its output currency.
    pub fn new(route: Route, amount: CurrencyAmount, trade_type: TradeType) -> Result<Self> {
        let chain_id = route.chain_id();
        let hops = route.pairs().len();
        let mut next_pairs: Vec<Pair> = Vec::with_capacity(hops);

        let (input_amount, output_amount) = match trade_type {
            TradeType::ExactInput => {
                ensure_currency(route.input(), &amount)?;
                let mut current = amount.wrapped(chain_id)?;
                for pair in route.pairs() {
                    let (output, next) = pair.get_output_amount(&current)?;
                    next_pairs.push(next);
                    current = output;
                }
                let output = CurrencyAmount::from_raw(route.output().clone(), current.raw().clone())?;
                (amount, output)
            }
            TradeType::ExactOutput => {
                ensure_currency(route.output(), &amount)?;
                let mut current = amount.wrapped(chain_id)?;
                for pair in route.pairs().iter().rev() {
                    let (input, next) = pair.get_input_amount(&current)?;
                    next_pairs.push(next);
                    current = input;
                }
                next_pairs.reverse();
                let input = CurrencyAmount::from_raw(route.input().clone(), current.raw().clone())?;
                (input, amount)
            }
        };

        let execution_price = Price::from_amounts(&input_amount, &output_amount)?;
        let next_mid_price = Route::new(
            next_pairs,
            route.input().clone(),
            Some(route.output().clone()),
        )?
        .mid_price()?;
        let price_impact = compute_price_impact(&route.mid_price()?, &input_amount, &output_amount)?;

        Ok(Self {
            route,
            trade_type,
            input_amount,
            output_amount,
            execution_price,
            next_mid_price,
            price_impact,
        })
    }

    pub fn exact_in(route: Route, amount_in: CurrencyAmount) -> Result<Self> {
        Self::new(route, amount_in, TradeType::ExactInput)
    }

    pub fn exact_out(route: Route, amount_out: CurrencyAmount) -> Result<Self> {
        Self::new(route, amount_out, TradeType::ExactOutput)
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn trade_type(&self) -> TradeType {
        self.trade_type
    }

    pub fn input_amount(&self) -> &CurrencyAmount {
        &self.input_amount
    }

    pub fn output_amount(&self) -> &CurrencyAmount {
        &self.output_amount
    }

    /// Output per input actually realised by the trade.
    pub fn execution_price(&self) -> &Price {
        &self.execution_price
    }

    /// Route mid price after the trade has moved the reserves.
    pub fn next_mid_price(&self) -> &Price {
        &self.next_mid_price
    }

    /// Relative shortfall of the execution price against the mid price. Not clamped,
    /// so it can come out negative.
    pub fn price_impact(&self) -> &Percent {
        &self.price_impact
    }

    /// Least output accepted under `slippage_tolerance`, `floor(out / (1 + tolerance))`.
    /// The fixed output for exact-output trades.
    pub fn minimum_amount_out(&self, slippage_tolerance: &Percent) -> Result<CurrencyAmount> {
        let factor = slippage_factor(slippage_tolerance)?;
        match self.trade_type {
            TradeType::ExactOutput => Ok(self.output_amount.clone()),
            TradeType::ExactInput => self
                .output_amount
                .multiply_fraction(&factor.invert()?, Rounding::Down),
        }
    }

    /// Most input spent under `slippage_tolerance`, `floor(in * (1 + tolerance))`.
    /// The fixed input for exact-input trades.
    pub fn maximum_amount_in(&self, slippage_tolerance: &Percent) -> Result<CurrencyAmount> {
        let factor = slippage_factor(slippage_tolerance)?;
        match self.trade_type {
            TradeType::ExactInput => Ok(self.input_amount.clone()),
            TradeType::ExactOutput => self.input_amount.multiply_fraction(&factor, Rounding::Down),
        }
    }

    /// Price at the slippage bounds: minimum output over maximum input.
    pub fn worst_execution_price(&self, slippage_tolerance: &Percent) -> Result<Price> {
        Price::from_amounts(
            &self.maximum_amount_in(slippage_tolerance)?,
            &self.minimum_amount_out(slippage_tolerance)?,
        )
    }

    /// Up to `max_num_results` exact-input trades from `amount_in` to `currency_out`,
    /// best first.
    pub fn best_trade_exact_in(
        pairs: &[Pair],
        amount_in: &CurrencyAmount,
        currency_out: &Currency,
        options: BestTradeOptions,
    ) -> Result<Vec<Trade>> {
        Self::best_trade_exact_in_until(pairs, amount_in, currency_out, options, || true)
    }

    /// Same as [`Trade::best_trade_exact_in`], stopping early once `keep_going`
    /// returns false. Trades found so far are returned.
    pub fn best_trade_exact_in_until<F>(
        pairs: &[Pair],
        amount_in: &CurrencyAmount,
        currency_out: &Currency,
        options: BestTradeOptions,
        keep_going: F,
    ) -> Result<Vec<Trade>>
    where
        F: FnMut() -> bool,
    {
        let search = Search::new(pairs, TradeType::ExactInput, options)?;
        search.run(amount_in, currency_out, keep_going, |used| {
            let route_pairs = used.iter().map(|&i| pairs[i].clone()).collect();
            let route = Route::new(route_pairs, amount_in.currency().clone(), Some(currency_out.clone()))?;
            Trade::exact_in(route, amount_in.clone())
        })
    }

    /// Up to `max_num_results` exact-output trades from `currency_in` to `amount_out`,
    /// best first.
    pub fn best_trade_exact_out(
        pairs: &[Pair],
        currency_in: &Currency,
        amount_out: &CurrencyAmount,
        options: BestTradeOptions,
    ) -> Result<Vec<Trade>> {
        Self::best_trade_exact_out_until(pairs, currency_in, amount_out, options, || true)
    }

    /// Same as [`Trade::best_trade_exact_out`], stopping early once `keep_going`
    /// returns false.
    pub fn best_trade_exact_out_until<F>(
        pairs: &[Pair],
        currency_in: &Currency,
        amount_out: &CurrencyAmount,
        options: BestTradeOptions,
        keep_going: F,
    ) -> Result<Vec<Trade>>
    where
        F: FnMut() -> bool,
    {
        let search = Search::new(pairs, TradeType::ExactOutput, options)?;
        search.run(amount_out, currency_in, keep_going, |used| {
            // used indices run from the output side back to the input side
            let route_pairs = used.iter().rev().map(|&i| pairs[i].clone()).collect();
            let route = Route::new(route_pairs, currency_in.clone(), Some(amount_out.currency().clone()))?;
            Trade::exact_out(route, amount_out.clone())
        })
    }

    /// Best exact-input trade, or `NoRouteFound`.
    pub fn best_exact_in(
        pairs: &[Pair],
        amount_in: &CurrencyAmount,
        currency_out: &Currency,
        options: BestTradeOptions,
    ) -> Result<Trade> {
        Self::best_trade_exact_in(pairs, amount_in, currency_out, options)?
            .into_iter()
            .next()
            .ok_or(SdkError::NoRouteFound)
    }

    /// Best exact-output trade, or `NoRouteFound`.
    pub fn best_exact_out(
        pairs: &[Pair],
        currency_in: &Currency,
        amount_out: &CurrencyAmount,
        options: BestTradeOptions,
    ) -> Result<Trade> {
        Self::best_trade_exact_out(pairs, currency_in, amount_out, options)?
            .into_iter()
            .next()
            .ok_or(SdkError::NoRouteFound)
    }
}

impl std::fmt::Display for Trade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} -> {} via {} (impact {})",
            self.trade_type, self.input_amount, self.output_amount, self.route, self.price_impact
        )
    }
}

/// Bounds for the best-trade search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestTradeOptions {
    /// Size of the returned list.
    pub max_num_results: usize,
    /// Longest route considered, in pairs.
    pub max_hops: usize,
}

impl Default for BestTradeOptions {
    fn default() -> Self {
        Self {
            max_num_results: 3,
            max_hops: 3,
        }
    }
}

impl BestTradeOptions {
    pub fn validate(&self) -> Result<()> {
        if self.max_hops == 0 {
            return Err(SdkError::InvalidSearchOptions("max_hops must be at least 1"));
        }
        if self.max_num_results == 0 {
            return Err(SdkError::InvalidSearchOptions("max_num_results must be at least 1"));
        }
        Ok(())
    }
}

/// Orders trades by what the caller gets: more output first, then less input.
///
/// Both trades must share input and output currencies.
pub fn input_output_comparator(a: &Trade, b: &Trade) -> Ordering {
    if a.output_amount.raw() == b.output_amount.raw() {
        a.input_amount.raw().cmp(b.input_amount.raw())
    } else {
        b.output_amount.raw().cmp(a.output_amount.raw())
    }
}

/// Ranking used by the best-trade search: amounts, then fewer hops, then lower
/// price impact.
pub fn trade_comparator(a: &Trade, b: &Trade) -> Ordering {
    input_output_comparator(a, b)
        .then_with(|| a.route.pairs().len().cmp(&b.route.pairs().len()))
        .then_with(|| a.price_impact.cmp(&b.price_impact))
}

fn ensure_currency(expected: &Currency, amount: &CurrencyAmount) -> Result<()> {
    if amount.currency() != expected {
        return Err(SdkError::CurrencyMismatch {
            expected: expected.to_string(),
            actual: amount.currency().to_string(),
        });
    }
    Ok(())
}

// 1 + tolerance
fn slippage_factor(slippage_tolerance: &Percent) -> Result<Fraction> {
    if slippage_tolerance.is_negative() {
        return Err(SdkError::InvalidSlippage);
    }
    Ok(Fraction::one().add(slippage_tolerance.as_fraction()))
}

// (mid * in - out) / (mid * in), all in raw units
fn compute_price_impact(
    mid_price: &Price,
    input_amount: &CurrencyAmount,
    output_amount: &CurrencyAmount,
) -> Result<Percent> {
    let exact_quote = mid_price
        .raw()
        .multiply(&Fraction::from_integer(BigInt::from(input_amount.raw().clone())));
    let shortfall = exact_quote.subtract(&Fraction::from_integer(BigInt::from(
        output_amount.raw().clone(),
    )));
    Ok(Percent::from(shortfall.divide(&exact_quote)?))
}

// One level of the depth-first walk: the pairs used so far (in walk order), the
// amount at the frontier, and the next candidate index to try from here.
struct Frame {
    used: Vec<usize>,
    amount: CurrencyAmount,
    next_index: usize,
}

struct Search<'a> {
    pairs: &'a [Pair],
    trade_type: TradeType,
    options: BestTradeOptions,
}

impl<'a> Search<'a> {
    fn new(pairs: &'a [Pair], trade_type: TradeType, options: BestTradeOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            pairs,
            trade_type,
            options,
        })
    }

    /// Walks from `start` toward `target`. `build` turns a completed index path into
    /// a trade.
    fn run<K, B>(
        &self,
        start: &CurrencyAmount,
        target: &Currency,
        mut keep_going: K,
        mut build: B,
    ) -> Result<Vec<Trade>>
    where
        K: FnMut() -> bool,
        B: FnMut(&[usize]) -> Result<Trade>,
    {
        let started = Instant::now();
        let mut best: Vec<Trade> = Vec::with_capacity(self.options.max_num_results);
        let first = match self.pairs.first() {
            Some(pair) => pair,
            None => return Ok(best),
        };
        let chain_id = first.chain_id();
        let target_token = target.wrapped(chain_id)?;

        debug!(
            "best trade search ({}) from {} to {} over {} pairs, max_hops={}, max_num_results={}",
            self.trade_type,
            start,
            target,
            self.pairs.len(),
            self.options.max_hops,
            self.options.max_num_results
        );

        let mut evaluated = 0usize;
        let mut pruned = 0usize;
        let mut stack = vec![Frame {
            used: Vec::new(),
            amount: start.wrapped(chain_id)?,
            next_index: 0,
        }];

        'search: while let Some(frame) = stack.last_mut() {
            if frame.next_index >= self.pairs.len() {
                stack.pop();
                continue;
            }
            let index = frame.next_index;
            frame.next_index += 1;

            if frame.used.contains(&index) {
                continue;
            }
            let pair = &self.pairs[index];
            let frontier = match frame.amount.currency().as_token() {
                Some(token) => token,
                None => continue,
            };
            if !pair.involves_token(frontier) {
                continue;
            }

            if !keep_going() {
                debug!("best trade search cancelled after {} hops evaluated", evaluated);
                break 'search;
            }
            evaluated += 1;

            let step = match self.trade_type {
                TradeType::ExactInput => pair.get_output_amount(&frame.amount),
                TradeType::ExactOutput => pair.get_input_amount(&frame.amount),
            };
            let next_amount = match step {
                Ok((amount, _)) => amount,
                Err(e) if e.is_insufficient_liquidity() => {
                    trace!("pruned {} at pair {}: {}", frontier, pair.liquidity_token().address_string(), e);
                    pruned += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };

            let mut used = frame.used.clone();
            used.push(index);

            if reaches(&next_amount, &target_token) {
                let trade = build(used.as_slice())?;
                sorted_insert(&mut best, trade, self.options.max_num_results, trade_comparator);
            } else if used.len() < self.options.max_hops && self.pairs.len() > 1 {
                stack.push(Frame {
                    used,
                    amount: next_amount,
                    next_index: 0,
                });
            }
        }

        let elapsed = started.elapsed();
        debug!(
            "best trade search ({}) found {} trades in {:?} ({} hops evaluated, {} pruned)",
            self.trade_type,
            best.len(),
            elapsed,
            evaluated,
            pruned
        );
        metrics::record_best_trade_search(self.trade_type, elapsed, evaluated, pruned, best.len());
        Ok(best)
    }
}

fn reaches(amount: &CurrencyAmount, target: &Token) -> bool {
    amount.currency().as_token() == Some(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::{wrapped_native, ChainId, NativeCurrency};
    use num_bigint::BigUint;

    fn token(last: u8) -> Token {
        let symbol = format!("t{}", last);
        Token::new(ChainId::MAINNET, &format!("0x{:040x}", last), 18, Some(symbol.as_str()), None).unwrap()
    }

    fn amount(token: &Token, raw: u64) -> CurrencyAmount {
        CurrencyAmount::from_raw(token.clone(), raw).unwrap()
    }

    fn pair(a: &Token, ra: u64, b: &Token, rb: u64) -> Pair {
        Pair::new(amount(a, ra), amount(b, rb)).unwrap()
    }

    fn raw(value: u64) -> BigUint {
        BigUint::from(value)
    }

    #[test]
    fn test_exact_in_single_hop() {
        let (t0, t1) = (token(1), token(2));
        let route = Route::new(vec![pair(&t0, 1000, &t1, 1000)], t0.clone().into(), None).unwrap();
        let trade = Trade::exact_in(route, amount(&t0, 100)).unwrap();
        assert_eq!(trade.output_amount().raw(), &raw(90));
        assert_eq!(trade.execution_price().raw(), &Fraction::new(90, 100).unwrap());
        // mid 1, exec 0.9
        assert_eq!(trade.price_impact(), &Percent::new(10, 100).unwrap());
        assert_eq!(
            trade.next_mid_price().raw(),
            &Fraction::new(910, 1100).unwrap()
        );
    }

    #[test]
    fn test_exact_in_equals_hop_by_hop() {
        let (t0, t1, t2) = (token(1), token(2), token(3));
        let p01 = pair(&t0, 1000, &t1, 2000);
        let p12 = pair(&t1, 1500, &t2, 700);
        let route = Route::new(vec![p01.clone(), p12.clone()], t0.clone().into(), None).unwrap();
        let trade = Trade::exact_in(route, amount(&t0, 250)).unwrap();

        let (mid, _) = p01.get_output_amount(&amount(&t0, 250)).unwrap();
        let (out, _) = p12.get_output_amount(&mid).unwrap();
        assert_eq!(trade.output_amount(), &out);
    }

    #[test]
    fn test_amount_currency_must_match_route_side() {
        let (t0, t1) = (token(1), token(2));
        let route = Route::new(vec![pair(&t0, 1000, &t1, 1000)], t0.clone().into(), None).unwrap();
        assert!(matches!(
            Trade::exact_in(route.clone(), amount(&t1, 100)),
            Err(SdkError::CurrencyMismatch { .. })
        ));
        assert!(matches!(
            Trade::exact_out(route, amount(&t0, 100)),
            Err(SdkError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_slippage_bounds() {
        let (t0, t1) = (token(1), token(2));
        let p = pair(&t0, 1000, &t1, 1000);
        let one_percent = Percent::new(1, 100).unwrap();

        let route = Route::new(vec![p.clone()], t0.clone().into(), None).unwrap();
        let exact_in = Trade::exact_in(route.clone(), amount(&t0, 100)).unwrap();
        assert_eq!(exact_in.minimum_amount_out(&one_percent).unwrap().raw(), &raw(89));
        assert_eq!(exact_in.minimum_amount_out(&Percent::zero()).unwrap().raw(), &raw(90));
        assert_eq!(exact_in.maximum_amount_in(&one_percent).unwrap().raw(), &raw(100));

        let exact_out = Trade::exact_out(route, amount(&t1, 100)).unwrap();
        assert_eq!(exact_out.input_amount().raw(), &raw(112));
        assert_eq!(exact_out.maximum_amount_in(&one_percent).unwrap().raw(), &raw(113));
        assert_eq!(exact_out.maximum_amount_in(&Percent::zero()).unwrap().raw(), &raw(112));
        assert_eq!(exact_out.minimum_amount_out(&one_percent).unwrap().raw(), &raw(100));

        let negative = Percent::new(-1, 100).unwrap();
        assert_eq!(exact_in.minimum_amount_out(&negative).unwrap_err(), SdkError::InvalidSlippage);
        assert_eq!(exact_out.maximum_amount_in(&negative).unwrap_err(), SdkError::InvalidSlippage);
    }

    #[test]
    fn test_maximum_amount_in_truncates_but_covers_input() {
        let (t0, t1) = (token(1), token(2));
        let route = Route::new(vec![pair(&t0, 1000, &t1, 1000)], t0.clone().into(), None).unwrap();
        for output in [1u64, 50, 100, 500, 900] {
            let trade = Trade::exact_out(route.clone(), amount(&t1, output)).unwrap();
            for bps in [0u32, 1, 50, 100, 10_000] {
                let max_in = trade.maximum_amount_in(&Percent::from_bps(bps)).unwrap();
                assert!(max_in.raw() >= trade.input_amount().raw(), "output {output} bps {bps}");
            }
        }

        // 100 * 1.01 is exact, 112 * 1.01 = 113.12 truncates
        let trade = Trade::exact_out(route, amount(&t1, 100)).unwrap();
        let input = trade.input_amount().raw().clone();
        assert_eq!(input, raw(112));
        let max_in = trade.maximum_amount_in(&Percent::new(1, 100).unwrap()).unwrap();
        assert_eq!(max_in.raw(), &raw(113));
    }

    #[test]
    fn test_worst_execution_price() {
        let (t0, t1) = (token(1), token(2));
        let route = Route::new(vec![pair(&t0, 1000, &t1, 1000)], t0.clone().into(), None).unwrap();
        let trade = Trade::exact_in(route, amount(&t0, 100)).unwrap();
        let worst = trade.worst_execution_price(&Percent::new(1, 100).unwrap()).unwrap();
        assert_eq!(worst.raw(), &Fraction::new(89, 100).unwrap());
    }

    #[test]
    fn test_native_endpoints_keep_native_currency() {
        let wone = wrapped_native(ChainId::MAINNET).unwrap().clone();
        let t0 = token(1);
        let native: Currency = NativeCurrency::harmony().into();
        let route = Route::new(vec![pair(&wone, 1000, &t0, 1000)], native.clone(), None).unwrap();
        let trade = Trade::exact_in(route, CurrencyAmount::native(100u32).unwrap()).unwrap();
        assert_eq!(trade.input_amount().currency(), &native);
        assert_eq!(trade.output_amount().raw(), &raw(90));

        let route = Route::new(vec![pair(&wone, 1000, &t0, 1000)], t0.clone().into(), Some(native.clone())).unwrap();
        let trade = Trade::exact_in(route, amount(&t0, 100)).unwrap();
        assert_eq!(trade.output_amount().currency(), &native);
    }

    #[test]
    fn test_comparator_prefers_output_then_hops() {
        let (t0, t1, t2) = (token(1), token(2), token(3));
        let direct = Route::new(vec![pair(&t0, 1000, &t2, 1000)], t0.clone().into(), None).unwrap();
        let via = Route::new(
            vec![pair(&t0, 1000, &t1, 1000), pair(&t1, 1000, &t2, 1000)],
            t0.clone().into(),
            None,
        )
        .unwrap();
        let a = Trade::exact_in(direct, amount(&t0, 100)).unwrap();
        let b = Trade::exact_in(via, amount(&t0, 100)).unwrap();
        assert_eq!(trade_comparator(&a, &b), Ordering::Less);
        assert_eq!(trade_comparator(&b, &a), Ordering::Greater);
        assert_eq!(trade_comparator(&a, &a), Ordering::Equal);
    }

    #[test]
    fn test_search_options_validated() {
        let (t0, t1) = (token(1), token(2));
        let pairs = vec![pair(&t0, 1000, &t1, 1000)];
        for options in [
            BestTradeOptions { max_hops: 0, max_num_results: 3 },
            BestTradeOptions { max_hops: 3, max_num_results: 0 },
        ] {
            let err = Trade::best_trade_exact_in(&pairs, &amount(&t0, 10), &t1.clone().into(), options).unwrap_err();
            assert!(matches!(err, SdkError::InvalidSearchOptions(_)));
        }
    }

    // direct t0/t2 pair first, so it completes before the t0 -> t1 -> t2 detour
    fn triangle() -> (Token, Token, Vec<Pair>) {
        let (t0, t1, t2) = (token(1), token(2), token(3));
        let pairs = vec![
            pair(&t0, 1000, &t2, 1100),
            pair(&t0, 1000, &t1, 1000),
            pair(&t1, 1200, &t2, 1000),
        ];
        (t0, t2, pairs)
    }

    #[test]
    fn test_cancel_before_first_hop_returns_nothing() {
        let (t0, t2, pairs) = triangle();
        let trades = Trade::best_trade_exact_in_until(
            &pairs,
            &amount(&t0, 100),
            &t2.clone().into(),
            BestTradeOptions::default(),
            || false,
        )
        .unwrap();
        assert!(trades.is_empty());
    }

    #[test]
    fn test_cancelled_exact_in_search_keeps_found_trades() {
        let (t0, t2, pairs) = triangle();

        let mut calls = 0;
        let trades = Trade::best_trade_exact_in_until(
            &pairs,
            &amount(&t0, 100),
            &t2.clone().into(),
            BestTradeOptions::default(),
            || {
                calls += 1;
                calls <= 2
            },
        )
        .unwrap();
        assert_eq!(calls, 3);
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].route().path(), &[t0.clone(), t2.clone()]);
        assert_eq!(trades[0].output_amount().raw(), &raw(99));

        let all = Trade::best_trade_exact_in(&pairs, &amount(&t0, 100), &t2.clone().into(), BestTradeOptions::default())
            .unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].route().pairs().len(), 2);
    }

    #[test]
    fn test_cancelled_exact_out_search_keeps_found_trades() {
        let (t0, t2, pairs) = triangle();

        let mut calls = 0;
        let trades = Trade::best_trade_exact_out_until(
            &pairs,
            &t0.clone().into(),
            &amount(&t2, 100),
            BestTradeOptions::default(),
            || {
                calls += 1;
                calls <= 2
            },
        )
        .unwrap();
        assert_eq!(calls, 3);
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].route().path(), &[t0.clone(), t2.clone()]);
        assert_eq!(trades[0].input_amount().raw(), &raw(101));

        let all = Trade::best_trade_exact_out(&pairs, &t0.clone().into(), &amount(&t2, 100), BestTradeOptions::default())
            .unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].input_amount().raw(), &raw(156));
    }
}

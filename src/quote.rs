use alloy::primitives::{Address, U256};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::address::is_native;
use crate::config::Config;
use crate::error::{QuoteError, Result};
use crate::math::get_amount_out;
use crate::pair::{self, PairState};
use crate::reader::ChainReader;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    Direct,
    ViaWrappedNative,
    NoLiquidity,
    // nothing to swap, no pool was consulted
    ZeroInput,
}

/// Expected output of an exact-input swap and the path it would take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub amount_out: U256,
    pub path: Vec<Address>,
    pub route: Route,
}

impl Quote {
    pub fn no_liquidity() -> Self {
        Self {
            amount_out: U256::ZERO,
            path: Vec::new(),
            route: Route::NoLiquidity,
        }
    }

    pub fn zero_input() -> Self {
        Self {
            amount_out: U256::ZERO,
            path: Vec::new(),
            route: Route::ZeroInput,
        }
    }

    pub fn has_route(&self) -> bool {
        matches!(self.route, Route::Direct | Route::ViaWrappedNative)
    }
}

// Quote engine for PancakeSwap v2 style pools.
// Holds no state besides addresses; every call reads reserves fresh.
pub struct QuoteEngine<R> {
    reader: R,
    factory: Address,
    wrapped_native: Address,
    native_sentinel: Address,
    fee_bps: u32,
    chain_id: u64,
}

impl<R: ChainReader> QuoteEngine<R> {
    pub fn new(reader: R, config: &Config) -> Self {
        Self {
            reader,
            factory: config.factory,
            wrapped_native: config.wrapped_native,
            native_sentinel: config.native_sentinel,
            fee_bps: config.fee_bps,
            chain_id: config.chain_id,
        }
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    pub fn native_sentinel(&self) -> Address {
        self.native_sentinel
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    // the native coin has no pool of its own, it trades as its wrapped form
    pub fn routing_address(&self, token: Address) -> Address {
        if is_native(token, self.native_sentinel) {
            self.wrapped_native
        } else {
            token
        }
    }

    pub async fn resolve_pair_address(&self, token_a: Address, token_b: Address) -> Result<Option<Address>> {
        pair::resolve_pair_address(&self.reader, self.factory, token_a, token_b).await
    }

    pub async fn get_reserves(&self, pair: Address) -> Result<PairState> {
        pair::get_reserves(&self.reader, pair).await
    }

    // Quote a single pool hop. None when the pair is missing or empty.
    async fn quote_hop(&self, token_in: Address, token_out: Address, amount_in: U256) -> Result<Option<U256>> {
        let Some(pair) = self.resolve_pair_address(token_in, token_out).await? else {
            return Ok(None);
        };
        let state = self.get_reserves(pair).await?;
        if !state.has_liquidity() {
            debug!("Pair {pair:#x} has an empty side");
            return Ok(None);
        }
        let (reserve_in, reserve_out) = state.reserves_for(token_in).ok_or_else(|| {
            QuoteError::Network(format!("pair {pair:#x} does not hold token {token_in:#x}"))
        })?;
        Ok(Some(get_amount_out(amount_in, reserve_in, reserve_out, self.fee_bps)))
    }

    /// Expected output for swapping exactly `amount_in` (smallest units).
    ///
    /// Tries the direct pool first, then `token_in -> wrapped native -> token_out`.
    /// A zero `amount_in` is `Quote::zero_input()` and touches no pool. A
    /// missing route is `Quote::no_liquidity()`, never an error; read failures
    /// are returned as `QuoteError::Network`.
    pub async fn quote_exact_input(&self, token_in: Address, token_out: Address, amount_in: U256) -> Result<Quote> {
        if amount_in.is_zero() {
            return Ok(Quote::zero_input());
        }
        let route_in = self.routing_address(token_in);
        let route_out = self.routing_address(token_out);
        if route_in == route_out {
            return Err(QuoteError::invalid(format!(
                "cannot swap {token_in:#x} into itself"
            )));
        }

        if let Some(amount_out) = self.quote_hop(route_in, route_out, amount_in).await? {
            info!("Direct quote {token_in:#x} -> {token_out:#x}: {amount_in} -> {amount_out}");
            return Ok(Quote {
                amount_out,
                path: vec![token_in, token_out],
                route: Route::Direct,
            });
        }

        // a hop through the wrapped native only makes sense if neither side already is it
        let wrapped = self.wrapped_native;
        if route_in != wrapped && route_out != wrapped {
            if let Some(mid) = self.quote_hop(route_in, wrapped, amount_in).await? {
                if let Some(amount_out) = self.quote_hop(wrapped, route_out, mid).await? {
                    info!(
                        "Two-hop quote {token_in:#x} -> {wrapped:#x} -> {token_out:#x}: {amount_in} -> {amount_out}"
                    );
                    return Ok(Quote {
                        amount_out,
                        path: vec![token_in, wrapped, token_out],
                        route: Route::ViaWrappedNative,
                    });
                }
            }
        }

        info!("No liquidity for {token_in:#x} -> {token_out:#x}");
        Ok(Quote::no_liquidity())
    }
}

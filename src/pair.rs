use alloy::primitives::{Address, U256};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::address::sort_tokens;
use crate::error::Result;
use crate::reader::ChainReader;

/// Snapshot of a pair contract, read fresh for every quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairState {
    pub address: Address,
    pub token0: Address,
    pub token1: Address,
    pub reserve0: U256,
    pub reserve1: U256,
    pub block_timestamp_last: u32,
}

impl PairState {
    // Orient reserves for a swap starting at token_in.
    // The pair's own token0/token1 decide the order, not the caller.
    pub fn reserves_for(&self, token_in: Address) -> Option<(U256, U256)> {
        if token_in == self.token0 {
            Some((self.reserve0, self.reserve1))
        } else if token_in == self.token1 {
            Some((self.reserve1, self.reserve0))
        } else {
            None
        }
    }

    pub fn has_liquidity(&self) -> bool {
        !self.reserve0.is_zero() && !self.reserve1.is_zero()
    }
}

/// Look up the deployed pair for two tokens. `None` when the factory
/// reports the zero address; read failures are returned as errors.
pub async fn resolve_pair_address<R: ChainReader>(
    reader: &R,
    factory: Address,
    token_a: Address,
    token_b: Address,
) -> Result<Option<Address>> {
    let (t0, t1) = sort_tokens(token_a, token_b);
    let pair = reader.get_pair(factory, t0, t1).await?;
    if pair.is_zero() {
        debug!("No pair for {t0:#x} / {t1:#x}");
        return Ok(None);
    }
    Ok(Some(pair))
}

pub async fn get_reserves<R: ChainReader>(reader: &R, pair: Address) -> Result<PairState> {
    let (token0, token1) = reader.pair_tokens(pair).await?;
    let reserves = reader.get_reserves(pair).await?;
    Ok(PairState {
        address: pair,
        token0,
        token1,
        reserve0: reserves.reserve0,
        reserve1: reserves.reserve1,
        block_timestamp_last: reserves.block_timestamp_last,
    })
}

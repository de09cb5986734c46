use alloy::primitives::{address, Address};
use log::{info, warn};
use std::env;

use crate::address::{is_set, sanitize_env_address, NATIVE_SENTINEL};

// BSC mainnet defaults
pub const DEFAULT_RPC_URL: &str = "https://bsc-dataseed.binance.org";
pub const DEFAULT_CHAIN_ID: u64 = 56;
pub const PCS_V2_FACTORY: Address = address!("cA143Ce32Fe78f1f7019d7d551a6402fC5350c73");
pub const PCS_V2_ROUTER: Address = address!("10ED43C718714eb63d5aA57B78B54704E256024E");
pub const WBNB: Address = address!("bb4CdB9CBd36B01bD1cBaEBF2De08d9173bc095c");
pub const USDT: Address = address!("55d398326f99059fF775485246999027B3197955");
pub const GAD: Address = address!("858bab88A5b8D7F29a40380C5F2D8d0b8812FE62");

/// PancakeSwap v2 charges 0.25% per hop.
pub const DEFAULT_FEE_BPS: u32 = 25;

/// Network and contract settings shared by every component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub rpc_url: String,
    pub chain_id: u64,
    pub factory: Address,
    pub router: Address,
    pub wrapped_native: Address,
    pub native_sentinel: Address,
    pub gad: Address,
    pub usdt: Address,
    pub fee_bps: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            chain_id: DEFAULT_CHAIN_ID,
            factory: PCS_V2_FACTORY,
            router: PCS_V2_ROUTER,
            wrapped_native: WBNB,
            native_sentinel: NATIVE_SENTINEL,
            gad: GAD,
            usdt: USDT,
            fee_bps: DEFAULT_FEE_BPS,
        }
    }
}

impl Config {
    // Load from the process environment (and .env if present).
    // Every address goes through sanitization exactly once, here.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let addr = |key: &str, fallback: Address| {
            sanitize_env_address(lookup(key).as_deref(), fallback)
        };

        let config = Self {
            rpc_url: lookup("BSC_RPC_URL")
                .filter(|v| is_set(v))
                .map(|v| v.trim().to_string())
                .unwrap_or(defaults.rpc_url),
            chain_id: parse_or("CHAIN_ID", lookup("CHAIN_ID"), defaults.chain_id),
            factory: addr("PCS_V2_FACTORY", defaults.factory),
            router: addr("PCS_V2_ROUTER", defaults.router),
            wrapped_native: addr("WBNB", defaults.wrapped_native),
            native_sentinel: addr("NATIVE_SENTINEL", defaults.native_sentinel),
            gad: addr("GAD_TOKEN", defaults.gad),
            usdt: addr("USDT", defaults.usdt),
            fee_bps: parse_or("SWAP_FEE_BPS", lookup("SWAP_FEE_BPS"), defaults.fee_bps),
        };
        info!(
            "Config loaded: chain {} factory {:#x} wrapped native {:#x}",
            config.chain_id, config.factory, config.wrapped_native
        );
        config
    }
}

fn parse_or<T: std::str::FromStr + Copy>(key: &str, value: Option<String>, fallback: T) -> T {
    match value.filter(|v| is_set(v)) {
        Some(v) => v.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring unparsable {key}={v:?}");
            fallback
        }),
        None => fallback,
    }
}

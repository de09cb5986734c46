//! Swap quoting and token plumbing for the GAD wallet on BNB Smart Chain.
//!
//! Quotes come from PancakeSwap v2 style pools read over JSON-RPC: the
//! direct pair first, then a two-hop route through WBNB.

pub mod abi;
pub mod address;
pub mod config;
pub mod discovery;
pub mod error;
pub mod math;
pub mod pair;
pub mod quote;
pub mod reader;
pub mod swap;
pub mod token;
pub mod units;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use error::{QuoteError, Result};
pub use quote::{Quote, QuoteEngine, Route};
pub use reader::{ChainReader, RpcReader};

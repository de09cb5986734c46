use alloy::primitives::{Address, U256};
use log::{debug, warn};
use serde::Serialize;

use crate::address::is_native;
use crate::error::{QuoteError, Result};
use crate::reader::ChainReader;
use crate::token::{Token, TokenRegistry, MAX_DECIMALS};
use crate::units::format_units;

// Read symbol, name and decimals of an ERC-20 so it can be added to the registry
pub async fn fetch_token_metadata<R: ChainReader>(reader: &R, address: Address) -> Result<Token> {
    let meta = reader.erc20_metadata(address).await?;
    if meta.decimals > MAX_DECIMALS {
        return Err(QuoteError::invalid(format!(
            "{address:#x} reports {} decimals",
            meta.decimals
        )));
    }
    let symbol = meta.symbol.trim().to_string();
    if symbol.is_empty() {
        return Err(QuoteError::invalid(format!("{address:#x} has no symbol")));
    }
    debug!("Discovered {symbol} ({}) at {address:#x}", meta.name);
    Ok(Token::new(address, symbol, meta.name.trim(), meta.decimals))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Balance {
    pub token: Token,
    pub raw: U256,
}

impl Balance {
    pub fn formatted(&self, dp: usize) -> Result<String> {
        format_units(self.raw, self.token.decimals, dp)
    }
}

/// Balances of every registry token for `owner`.
///
/// The native balance must succeed. A token whose `balanceOf` fails is
/// logged and left out so one broken contract does not hide the rest.
pub async fn known_balances<R: ChainReader>(
    reader: &R,
    registry: &TokenRegistry,
    owner: Address,
) -> Result<Vec<Balance>> {
    let mut balances = Vec::new();
    for token in registry.tokens() {
        let raw = if is_native(token.address, registry.native_sentinel()) {
            reader.native_balance(owner).await?
        } else {
            match reader.erc20_balance(token.address, owner).await {
                Ok(raw) => raw,
                Err(e) => {
                    warn!("Balance of {} unavailable: {e}", token.symbol);
                    continue;
                }
            }
        };
        balances.push(Balance { token, raw });
    }
    Ok(balances)
}

use alloy::primitives::Address;
use log::{debug, info, warn};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::address::clean_address;
use crate::config::Config;
use crate::error::{QuoteError, Result};

pub const MAX_DECIMALS: u8 = 36;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Native,
    Wrapped,
    Main,
    #[default]
    Standard,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub address: Address,
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
    #[serde(default)]
    pub kind: TokenKind,
    #[serde(default)]
    pub listed: bool,
}

impl Token {
    pub fn new(address: Address, symbol: impl Into<String>, name: impl Into<String>, decimals: u8) -> Self {
        Self {
            address,
            symbol: symbol.into(),
            name: name.into(),
            decimals,
            kind: TokenKind::Standard,
            listed: false,
        }
    }
}

// Core tokens pinned in this order, everything else sorts by symbol
pub fn core_tokens(config: &Config) -> Vec<Token> {
    let core = |address, symbol: &str, name: &str, kind| Token {
        address,
        symbol: symbol.to_string(),
        name: name.to_string(),
        decimals: 18,
        kind,
        listed: true,
    };
    vec![
        core(config.gad, "GAD", "GAD Token", TokenKind::Main),
        core(config.native_sentinel, "BNB", "BNB (Native)", TokenKind::Native),
        core(config.wrapped_native, "WBNB", "Wrapped BNB", TokenKind::Wrapped),
        core(config.usdt, "USDT", "Tether USD (BSC)", TokenKind::Standard),
    ]
}

/// Wallet token list: the pinned core tokens plus user-added ones.
///
/// This is an explicit context object; callers own it and pass it to
/// whatever needs the token list.
#[derive(Debug, Clone)]
pub struct TokenRegistry {
    core: Vec<Token>,
    custom: Vec<Token>,
    pin_order: FxHashMap<Address, usize>,
    native_sentinel: Address,
}

impl TokenRegistry {
    pub fn new(config: &Config) -> Self {
        let core = core_tokens(config);
        let pin_order = core
            .iter()
            .enumerate()
            .map(|(i, token)| (token.address, i))
            .collect();
        Self {
            core,
            custom: Vec::new(),
            pin_order,
            native_sentinel: config.native_sentinel,
        }
    }

    pub fn native_sentinel(&self) -> Address {
        self.native_sentinel
    }

    /// Every known token, deduplicated by address and sorted: pinned core
    /// tokens first, then by symbol.
    pub fn tokens(&self) -> Vec<Token> {
        let mut seen: FxHashSet<Address> = FxHashSet::default();
        let mut tokens: Vec<Token> = self
            .core
            .iter()
            .chain(self.custom.iter())
            .filter(|t| t.decimals <= MAX_DECIMALS)
            .filter(|t| seen.insert(t.address))
            .cloned()
            .collect();
        tokens.sort_by(|a, b| self.compare(a, b));
        tokens
    }

    fn compare(&self, a: &Token, b: &Token) -> Ordering {
        match (self.pin_order.get(&a.address), self.pin_order.get(&b.address)) {
            (Some(x), Some(y)) => x.cmp(y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.symbol.to_lowercase().cmp(&b.symbol.to_lowercase()),
        }
    }

    pub fn custom(&self) -> &[Token] {
        &self.custom
    }

    // Add or replace a user token. Core tokens cannot be overridden and a
    // custom token is always a plain, unlisted ERC-20 whatever it claims.
    pub fn upsert(&mut self, mut token: Token) -> Result<()> {
        if token.decimals > MAX_DECIMALS {
            return Err(QuoteError::invalid(format!(
                "{} has {} decimals, at most {MAX_DECIMALS} supported",
                token.symbol, token.decimals
            )));
        }
        if token.symbol.trim().is_empty() {
            return Err(QuoteError::invalid("token symbol is empty"));
        }
        if self.pin_order.contains_key(&token.address) {
            return Err(QuoteError::invalid(format!(
                "{:#x} is a core token",
                token.address
            )));
        }
        token.kind = TokenKind::Standard;
        token.listed = false;
        match self.custom.iter_mut().find(|t| t.address == token.address) {
            Some(existing) => {
                debug!("Updating custom token {}", token.symbol);
                *existing = token;
            }
            None => {
                info!("Adding custom token {} at {:#x}", token.symbol, token.address);
                self.custom.push(token);
            }
        }
        Ok(())
    }

    pub fn remove_by_symbol(&mut self, symbol: &str) -> Option<Token> {
        let symbol = symbol.trim();
        let idx = self
            .custom
            .iter()
            .position(|t| t.symbol.eq_ignore_ascii_case(symbol))?;
        Some(self.custom.remove(idx))
    }

    pub fn reset(&mut self) {
        self.custom.clear();
    }

    pub fn find_by_address(&self, address: Address) -> Option<&Token> {
        self.core
            .iter()
            .chain(self.custom.iter())
            .find(|t| t.address == address)
    }

    pub fn find_by_symbol(&self, symbol: &str) -> Option<&Token> {
        let symbol = symbol.trim();
        self.core
            .iter()
            .chain(self.custom.iter())
            .find(|t| t.symbol.eq_ignore_ascii_case(symbol))
    }

    // Resolve user input that is either a known symbol or an address.
    // Unknown addresses must be added first so decimals are known.
    pub fn lookup(&self, symbol_or_address: &str) -> Result<&Token> {
        if let Some(token) = self.find_by_symbol(symbol_or_address) {
            return Ok(token);
        }
        let address = clean_address(symbol_or_address)?;
        self.find_by_address(address).ok_or_else(|| {
            QuoteError::invalid(format!("unknown token {address:#x}, add it first"))
        })
    }

    // read custom tokens from file, a missing file is an empty list
    pub fn load_custom(&mut self, path: &Path) -> Result<usize> {
        if !path.exists() {
            return Ok(0);
        }
        let reader = BufReader::new(File::open(path)?);
        let tokens: Vec<Token> = serde_json::from_reader(reader)?;
        let mut loaded = 0;
        for token in tokens {
            match self.upsert(token) {
                Ok(()) => loaded += 1,
                Err(e) => warn!("Skipping stored token: {e}"),
            }
        }
        Ok(loaded)
    }

    // write custom tokens to file
    pub fn save_custom(&self, path: &Path) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, &self.custom)?;
        Ok(())
    }
}

use alloy::primitives::{address, Address};
use log::warn;

use crate::error::{QuoteError, Result};

/// Placeholder used in token lists for the chain's native coin (BNB).
/// It has no contract and must never reach a pair lookup.
pub const NATIVE_SENTINEL: Address = address!("eeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee");

// Normalize an externally sourced address string.
// Everything outside [0-9a-fA-Fx] is dropped (quotes, whitespace, dashes),
// then the remaining 40 hex digits are parsed. Mixed-case input must carry a
// valid EIP-55 checksum.
pub fn clean_address(raw: &str) -> Result<Address> {
    let filtered: String = raw
        .trim()
        .chars()
        .filter(|c| c.is_ascii_hexdigit() || *c == 'x' || *c == 'X')
        .collect();
    let body = filtered
        .strip_prefix("0x")
        .or_else(|| filtered.strip_prefix("0X"))
        .unwrap_or(&filtered);

    if body.len() != 40 || !body.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(QuoteError::invalid(format!("not an address: {raw:?}")));
    }

    let prefixed = format!("0x{body}");
    let has_lower = body.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = body.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper {
        Address::parse_checksummed(&prefixed, None)
            .map_err(|_| QuoteError::invalid(format!("bad checksum: {prefixed}")))
    } else {
        prefixed
            .parse::<Address>()
            .map_err(|e| QuoteError::invalid(format!("{prefixed}: {e}")))
    }
}

// Configuration flavor of `clean_address`: never fails, falls back instead.
pub fn sanitize_env_address(value: Option<&str>, fallback: Address) -> Address {
    let Some(raw) = value.filter(|v| is_set(v)) else {
        return fallback;
    };
    match clean_address(raw) {
        Ok(addr) => addr,
        Err(e) => {
            warn!("Ignoring configured address ({e}), using {fallback:#x}");
            fallback
        }
    }
}

// Unset-like values some env loaders produce
pub(crate) fn is_set(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && value != "undefined" && value != "null"
}

pub fn is_native(addr: Address, sentinel: Address) -> bool {
    addr == sentinel
}

/// Canonical pair ordering: smaller address first.
pub fn sort_tokens(a: Address, b: Address) -> (Address, Address) {
    if a < b { (a, b) } else { (b, a) }
}

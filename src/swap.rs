use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolCall;
use log::info;
use serde::{Deserialize, Serialize};

use crate::abi::{IERC20, IPancakeRouter};
use crate::address::is_native;
use crate::error::{QuoteError, Result};
use crate::math::BPS_SCALAR;
use crate::quote::{Quote, QuoteEngine};
use crate::reader::ChainReader;

pub const DEFAULT_SLIPPAGE_BPS: u32 = 100;
pub const DEFAULT_DEADLINE_SECS: u64 = 60;

// Lowest acceptable output after slippage, slippage capped at 100%
pub fn min_out_with_slippage(amount_out: U256, slippage_bps: u32) -> U256 {
    let bps = slippage_bps.min(BPS_SCALAR);
    amount_out * U256::from(BPS_SCALAR - bps) / U256::from(BPS_SCALAR)
}

// Which router entry point a swap needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapKind {
    ExactNativeForTokens,
    ExactTokensForNative,
    ExactTokensForTokens,
}

impl SwapKind {
    pub fn select(token_in: Address, token_out: Address, native_sentinel: Address) -> Self {
        if is_native(token_in, native_sentinel) {
            Self::ExactNativeForTokens
        } else if is_native(token_out, native_sentinel) {
            Self::ExactTokensForNative
        } else {
            Self::ExactTokensForTokens
        }
    }

    pub fn method(&self) -> &'static str {
        match self {
            Self::ExactNativeForTokens => "swapExactETHForTokensSupportingFeeOnTransferTokens",
            Self::ExactTokensForNative => "swapExactTokensForETHSupportingFeeOnTransferTokens",
            Self::ExactTokensForTokens => "swapExactTokensForTokensSupportingFeeOnTransferTokens",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapParams {
    pub token_in: Address,
    pub token_out: Address,
    pub amount_in: U256,
    pub recipient: Address,
    pub slippage_bps: u32,
    pub deadline_secs: u64,
}

impl SwapParams {
    pub fn new(token_in: Address, token_out: Address, amount_in: U256, recipient: Address) -> Self {
        Self {
            token_in,
            token_out,
            amount_in,
            recipient,
            slippage_bps: DEFAULT_SLIPPAGE_BPS,
            deadline_secs: DEFAULT_DEADLINE_SECS,
        }
    }
}

/// Everything a signer needs to submit the swap. Nothing here is signed
/// or sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwapPlan {
    pub chain_id: u64,
    pub kind: SwapKind,
    pub router: Address,
    pub quote: Quote,
    pub min_out: U256,
    // path as the router expects it, native sentinel replaced
    pub path: Vec<Address>,
    pub deadline: u64,
    pub value: U256,
    pub calldata: Bytes,
}

pub async fn plan_exact_input<R: ChainReader>(
    engine: &QuoteEngine<R>,
    router: Address,
    params: &SwapParams,
) -> Result<SwapPlan> {
    let now = u64::try_from(chrono::Utc::now().timestamp()).unwrap_or_default();
    plan_exact_input_at(engine, router, params, now).await
}

// Same as plan_exact_input with an explicit clock (unix seconds)
pub async fn plan_exact_input_at<R: ChainReader>(
    engine: &QuoteEngine<R>,
    router: Address,
    params: &SwapParams,
    now: u64,
) -> Result<SwapPlan> {
    if params.amount_in.is_zero() {
        return Err(QuoteError::invalid("swap amount must be positive"));
    }
    let quote = engine
        .quote_exact_input(params.token_in, params.token_out, params.amount_in)
        .await?;
    if quote.amount_out.is_zero() {
        return Err(QuoteError::NoLiquidityRoute);
    }

    let kind = SwapKind::select(params.token_in, params.token_out, engine.native_sentinel());
    let min_out = min_out_with_slippage(quote.amount_out, params.slippage_bps);
    let path: Vec<Address> = quote
        .path
        .iter()
        .map(|token| engine.routing_address(*token))
        .collect();
    let deadline = now.saturating_add(params.deadline_secs);
    let deadline_word = U256::from(deadline);
    let to = params.recipient;

    let calldata = match kind {
        SwapKind::ExactNativeForTokens => {
            IPancakeRouter::swapExactETHForTokensSupportingFeeOnTransferTokensCall {
                amountOutMin: min_out,
                path: path.clone(),
                to,
                deadline: deadline_word,
            }
            .abi_encode()
        }
        SwapKind::ExactTokensForNative => {
            IPancakeRouter::swapExactTokensForETHSupportingFeeOnTransferTokensCall {
                amountIn: params.amount_in,
                amountOutMin: min_out,
                path: path.clone(),
                to,
                deadline: deadline_word,
            }
            .abi_encode()
        }
        SwapKind::ExactTokensForTokens => {
            IPancakeRouter::swapExactTokensForTokensSupportingFeeOnTransferTokensCall {
                amountIn: params.amount_in,
                amountOutMin: min_out,
                path: path.clone(),
                to,
                deadline: deadline_word,
            }
            .abi_encode()
        }
    };
    let value = if kind == SwapKind::ExactNativeForTokens {
        params.amount_in
    } else {
        U256::ZERO
    };

    info!(
        "Planned {} for {} in, quote {} min {}",
        kind.method(),
        params.amount_in,
        quote.amount_out,
        min_out
    );
    Ok(SwapPlan {
        chain_id: engine.chain_id(),
        kind,
        router,
        quote,
        min_out,
        path,
        deadline,
        value,
        calldata: Bytes::from(calldata),
    })
}

/// Whether the router must be approved before spending `amount_in` of
/// `token_in`. The native coin never needs approval.
pub async fn approval_needed<R: ChainReader>(
    reader: &R,
    native_sentinel: Address,
    token_in: Address,
    owner: Address,
    router: Address,
    amount_in: U256,
) -> Result<bool> {
    if is_native(token_in, native_sentinel) {
        return Ok(false);
    }
    let allowance = reader.erc20_allowance(token_in, owner, router).await?;
    Ok(allowance < amount_in)
}

// exact-amount approval, matching what the swap will spend
pub fn approve_calldata(router: Address, amount: U256) -> Bytes {
    Bytes::from(
        IERC20::approveCall {
            spender: router,
            amount,
        }
        .abi_encode(),
    )
}

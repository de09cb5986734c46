use alloy::primitives::{Address, U256};
use alloy::providers::Provider;
use log::debug;
use std::future::Future;

use crate::abi::{IERC20, IPancakeFactory, IPancakePair};
use crate::error::{QuoteError, Result};

/// Reserves exactly as the pair contract reports them (token0/token1 order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawReserves {
    pub reserve0: U256,
    pub reserve1: U256,
    pub block_timestamp_last: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMetadata {
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
}

/// Read-only view of the chain. The quote engine and planners only ever
/// need these calls; signing and broadcasting live elsewhere.
pub trait ChainReader {
    /// Raw factory answer, the zero address when no pair is deployed.
    fn get_pair(
        &self,
        factory: Address,
        token_a: Address,
        token_b: Address,
    ) -> impl Future<Output = Result<Address>> + Send;

    fn pair_tokens(&self, pair: Address) -> impl Future<Output = Result<(Address, Address)>> + Send;

    fn get_reserves(&self, pair: Address) -> impl Future<Output = Result<RawReserves>> + Send;

    fn block_number(&self) -> impl Future<Output = Result<u64>> + Send;

    fn native_balance(&self, owner: Address) -> impl Future<Output = Result<U256>> + Send;

    fn erc20_balance(
        &self,
        token: Address,
        owner: Address,
    ) -> impl Future<Output = Result<U256>> + Send;

    fn erc20_allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> impl Future<Output = Result<U256>> + Send;

    fn erc20_metadata(&self, token: Address) -> impl Future<Output = Result<TokenMetadata>> + Send;
}

// JSON-RPC backed reader over any alloy provider
pub struct RpcReader<P> {
    provider: P,
}

impl<P: Provider> RpcReader<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }
}

impl<P: Provider> ChainReader for RpcReader<P> {
    async fn get_pair(&self, factory: Address, token_a: Address, token_b: Address) -> Result<Address> {
        debug!("getPair({token_a:#x}, {token_b:#x}) on factory {factory:#x}");
        IPancakeFactory::new(factory, &self.provider)
            .getPair(token_a, token_b)
            .call()
            .await
            .map_err(|e| QuoteError::network("getPair", e))
    }

    async fn pair_tokens(&self, pair: Address) -> Result<(Address, Address)> {
        let contract = IPancakePair::new(pair, &self.provider);
        let token0 = contract
            .token0()
            .call()
            .await
            .map_err(|e| QuoteError::network("token0", e))?;
        let token1 = contract
            .token1()
            .call()
            .await
            .map_err(|e| QuoteError::network("token1", e))?;
        Ok((token0, token1))
    }

    async fn get_reserves(&self, pair: Address) -> Result<RawReserves> {
        let IPancakePair::getReservesReturn {
            reserve0,
            reserve1,
            blockTimestampLast,
        } = IPancakePair::new(pair, &self.provider)
            .getReserves()
            .call()
            .await
            .map_err(|e| QuoteError::network("getReserves", e))?;
        debug!("Reserves for {pair:#x}: {reserve0} / {reserve1}");
        Ok(RawReserves {
            reserve0: U256::from(reserve0),
            reserve1: U256::from(reserve1),
            block_timestamp_last: blockTimestampLast,
        })
    }

    async fn block_number(&self) -> Result<u64> {
        self.provider
            .get_block_number()
            .await
            .map_err(|e| QuoteError::network("eth_blockNumber", e))
    }

    async fn native_balance(&self, owner: Address) -> Result<U256> {
        self.provider
            .get_balance(owner)
            .await
            .map_err(|e| QuoteError::network("eth_getBalance", e))
    }

    async fn erc20_balance(&self, token: Address, owner: Address) -> Result<U256> {
        IERC20::new(token, &self.provider)
            .balanceOf(owner)
            .call()
            .await
            .map_err(|e| QuoteError::network("balanceOf", e))
    }

    async fn erc20_allowance(&self, token: Address, owner: Address, spender: Address) -> Result<U256> {
        IERC20::new(token, &self.provider)
            .allowance(owner, spender)
            .call()
            .await
            .map_err(|e| QuoteError::network("allowance", e))
    }

    async fn erc20_metadata(&self, token: Address) -> Result<TokenMetadata> {
        let contract = IERC20::new(token, &self.provider);
        let symbol = contract.symbol();
        let name = contract.name();
        let decimals = contract.decimals();
        let (symbol, name, decimals) = futures::try_join!(
            async { symbol.call().await.map_err(|e| QuoteError::network("symbol", e)) },
            async { name.call().await.map_err(|e| QuoteError::network("name", e)) },
            async { decimals.call().await.map_err(|e| QuoteError::network("decimals", e)) },
        )?;
        Ok(TokenMetadata {
            symbol,
            name,
            decimals,
        })
    }
}

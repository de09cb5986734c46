use alloy::sol;

// PancakeSwap v2 factory, only pair discovery is needed
sol!(
    #[derive(Debug)]
    #[sol(rpc)]
    contract IPancakeFactory {
        function getPair(address tokenA, address tokenB) external view returns (address pair);
    }
);

// Pair contract to get tokens and reserves
sol!(
    #[derive(Debug)]
    #[sol(rpc)]
    contract IPancakePair {
        function token0() external view returns (address);
        function token1() external view returns (address);
        function getReserves() external view returns (uint112 reserve0, uint112 reserve1, uint32 blockTimestampLast);
    }
);

sol!(
    #[derive(Debug)]
    #[sol(rpc)]
    contract IERC20 {
        function name() external view returns (string);
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
        function balanceOf(address owner) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
    }
);

// Router entry points used by swap planning. The fee-on-transfer variants
// are used for every swap so taxed tokens do not revert.
sol!(
    #[derive(Debug)]
    contract IPancakeRouter {
        function swapExactETHForTokensSupportingFeeOnTransferTokens(
            uint256 amountOutMin,
            address[] calldata path,
            address to,
            uint256 deadline
        ) external payable;

        function swapExactTokensForETHSupportingFeeOnTransferTokens(
            uint256 amountIn,
            uint256 amountOutMin,
            address[] calldata path,
            address to,
            uint256 deadline
        ) external;

        function swapExactTokensForTokensSupportingFeeOnTransferTokens(
            uint256 amountIn,
            uint256 amountOutMin,
            address[] calldata path,
            address to,
            uint256 deadline
        ) external;
    }
);

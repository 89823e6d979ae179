use alloy::sol;

// Smart contract ABI definitions for the read-only calls issued by the estimator
sol! {
    /// ERC20 token metadata interface.
    ///
    /// This is a minimal interface containing only the view functions needed to
    /// describe a token taking part in a swap.
    interface IERC20 {
        /// Returns the number of decimals used by the token.
        ///
        /// # Returns
        /// The number of decimals (e.g., 18 for most tokens, 6 for USDT/USDC)
        function decimals() external view returns (uint8);

        /// Returns the token symbol.
        ///
        /// # Returns
        /// The token symbol as a string (e.g., "WETH", "USDT", "DAI")
        function symbol() external view returns (string memory);
    }

    /// Uniswap V2 Pair interface for liquidity pool interactions.
    ///
    /// Provides methods to query reserves and token addresses from Uniswap V2 pairs.
    interface IUniswapV2Pair {
        /// Returns the reserves of both tokens in the pair and the last block timestamp.
        ///
        /// # Returns
        /// * `reserve0` - The reserve amount of token0
        /// * `reserve1` - The reserve amount of token1
        /// * `blockTimestampLast` - The timestamp of the last reserve update
        function getReserves() external view returns (uint112 reserve0, uint112 reserve1, uint32 blockTimestampLast);

        /// Returns the address of the first token in the pair.
        function token0() external view returns (address);

        /// Returns the address of the second token in the pair.
        function token1() external view returns (address);
    }
}

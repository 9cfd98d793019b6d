//! Module and function names of the deployed Move package.
//!
//! Argument lists of these functions are assembled in [`crate::entry`] and [`crate::query`]
//! in the exact order the package declares them.

/// Pool module: entry points, pool state getters and the factory table.
pub mod srm {
    pub const MODULE: &str = "SRMV1";

    pub const SWAP_A_FOR_B: &str = "swap_a_for_b_with_coins_and_transfer_to_sender";
    pub const SWAP_B_FOR_A: &str = "swap_b_for_a_with_coins_and_transfer_to_sender";
    pub const ADD_LIQUIDITY: &str = "add_liquidity_with_coins_and_transfer_to_sender";
    pub const REMOVE_LIQUIDITY: &str = "remove_liquidity_with_coins_and_transfer_to_sender";
    pub const DEPOSIT_COIN_B: &str = "deposit_coinB_tokens";
    pub const DEPOSIT_LP: &str = "deposit_lp_tokens";

    pub const POOL_BALANCES: &str = "pool_balances";
    pub const POOL_FEES: &str = "get_pool_fees";
    pub const POOL_INFO: &str = "get_pool_info";

    /// Key struct of the factory `pools` table.
    pub const POOL_ITEM: &str = "PoolItem";
}

/// Stateless quote module.
pub mod quote {
    pub const MODULE: &str = "quote";

    pub const BY_SELL: &str = "get_swap_quote_by_sell";
    pub const BY_BUY: &str = "get_swap_quote_by_buy";
}

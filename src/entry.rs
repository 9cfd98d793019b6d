//! Entry point call builders.
//!
//! Liquidity and deposit calls take a coin split off the supplied coin object.
//! The split is registered on the builder first and passed to the call by handle.

use crate::{
    Deployment, abi,
    call::{CallBuilder, CallDescriptor},
    error::EncodingError,
    types::{
        AddLiquidityRequest, DepositCoinBRequest, DepositLpRequest, RemoveLiquidityRequest,
        SwapDirection, SwapRequest,
    },
};

impl Deployment {
    /// Swap of the whole `coin` with the output transferred to the sender.
    pub fn swap(
        &self,
        direction: SwapDirection,
        request: &SwapRequest,
    ) -> Result<CallDescriptor, EncodingError> {
        let function = match direction {
            SwapDirection::AToB => abi::srm::SWAP_A_FOR_B,
            SwapDirection::BToA => abi::srm::SWAP_B_FOR_A,
        };
        CallBuilder::new(self.pool_target(function)?)
            .type_params(request.coins.type_params())
            .object(request.pool)
            .object(request.config)
            .object(request.coin)
            .u64(request.amount_in)
            .u64(request.min_amount_out)
            .object(request.clock)
            .build()
    }

    pub fn swap_a_for_b(&self, request: &SwapRequest) -> Result<CallDescriptor, EncodingError> {
        self.swap(SwapDirection::AToB, request)
    }

    pub fn swap_b_for_a(&self, request: &SwapRequest) -> Result<CallDescriptor, EncodingError> {
        self.swap(SwapDirection::BToA, request)
    }

    pub fn add_liquidity(
        &self,
        request: &AddLiquidityRequest,
    ) -> Result<CallDescriptor, EncodingError> {
        let mut builder = CallBuilder::new(self.pool_target(abi::srm::ADD_LIQUIDITY)?)
            .type_params(request.coins.type_params());
        let split_a = builder.split_coin(request.coin_a, request.amount_a);
        let split_b = builder.split_coin(request.coin_b, request.amount_b);
        builder
            .object(request.pool)
            .derived(split_a)
            .u64(request.amount_a)
            .derived(split_b)
            .u64(request.amount_b)
            .u64(request.min_lp_out)
            .object(request.clock)
            .build()
    }

    pub fn remove_liquidity(
        &self,
        request: &RemoveLiquidityRequest,
    ) -> Result<CallDescriptor, EncodingError> {
        let mut builder = CallBuilder::new(self.pool_target(abi::srm::REMOVE_LIQUIDITY)?)
            .type_params(request.coins.type_params());
        let split_lp = builder.split_coin(request.lp_coin, request.lp_amount);
        builder
            .object(request.pool)
            .derived(split_lp)
            .u64(request.lp_amount)
            .u64(request.min_a_out)
            .u64(request.min_b_out)
            .object(request.clock)
            .build()
    }

    /// Deposit of coin `B` for manual burning.
    pub fn deposit_coin_b(
        &self,
        request: &DepositCoinBRequest,
    ) -> Result<CallDescriptor, EncodingError> {
        let mut builder = CallBuilder::new(self.pool_target(abi::srm::DEPOSIT_COIN_B)?)
            .type_params(request.coins.type_params());
        let split_b = builder.split_coin(request.coin_b, request.amount);
        builder
            .object(request.pool)
            .derived(split_b)
            .u64(request.amount)
            .object(request.clock)
            .build()
    }

    /// Lock of LP tokens in the pool.
    pub fn deposit_lp(&self, request: &DepositLpRequest) -> Result<CallDescriptor, EncodingError> {
        let mut builder = CallBuilder::new(self.pool_target(abi::srm::DEPOSIT_LP)?)
            .type_params(request.coins.type_params());
        let split_lp = builder.split_coin(request.lp_token, request.amount);
        builder
            .object(request.pool)
            .derived(split_lp)
            .u64(request.amount)
            .build()
    }
}

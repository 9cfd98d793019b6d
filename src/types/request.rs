use serde::{Deserialize, Serialize};

use super::{Address, CoinPair, ObjectId};

/// Swap direction of the pool entry points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwapDirection {
    AToB,
    BToA,
}

/// Swap of a whole input coin object, output is transferred to the sender.
///
/// `coin` is of type `A` for [`SwapDirection::AToB`] and of type `B` otherwise.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapRequest {
    pub pool: ObjectId,
    pub config: ObjectId,
    pub coin: ObjectId,
    pub amount_in: u64,
    pub min_amount_out: u64,
    pub clock: ObjectId,
    pub coins: CoinPair,
}

/// Liquidity provision, `amount_a` and `amount_b` are split off the given coins.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddLiquidityRequest {
    pub pool: ObjectId,
    pub coin_a: ObjectId,
    pub amount_a: u64,
    pub coin_b: ObjectId,
    pub amount_b: u64,
    pub min_lp_out: u64,
    pub clock: ObjectId,
    pub coins: CoinPair,
}

/// Liquidity withdrawal, `lp_amount` is split off the given LP coin.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveLiquidityRequest {
    pub pool: ObjectId,
    pub lp_coin: ObjectId,
    pub lp_amount: u64,
    pub min_a_out: u64,
    pub min_b_out: u64,
    pub clock: ObjectId,
    pub coins: CoinPair,
}

/// Deposit of coin `B` for manual burning.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositCoinBRequest {
    pub pool: ObjectId,
    pub coin_b: ObjectId,
    pub amount: u64,
    pub clock: ObjectId,
    pub coins: CoinPair,
}

/// Lock of LP tokens in the pool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositLpRequest {
    pub pool: ObjectId,
    pub lp_token: ObjectId,
    pub amount: u64,
    pub coins: CoinPair,
}

impl SwapRequest {
    /// Convenience constructor using the system clock object.
    pub fn new(
        pool: ObjectId,
        config: ObjectId,
        coin: ObjectId,
        amount_in: u64,
        min_amount_out: u64,
        coins: CoinPair,
    ) -> Self {
        Self {
            pool,
            config,
            coin,
            amount_in,
            min_amount_out,
            clock: Address::CLOCK,
            coins,
        }
    }
}

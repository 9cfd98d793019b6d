use serde::{Deserialize, Serialize};

use crate::error::DexError;

use super::{Address, ObjectId};

/// Reserves of both pool coins and the LP token supply.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolBalances {
    pub balance_a: u64,
    pub balance_b: u64,
    pub lp_supply: u64,
}

/// Configured fee rates of the pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolFees {
    pub lp_builder_fee: u64,
    pub burn_fee: u64,
    pub creator_royalty_fee: u64,
    pub rewards_fee: u64,
}

/// Full pool state: balances, fees and the accumulated fee buckets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolInfo {
    pub balance_a: u64,
    pub balance_b: u64,
    pub lp_supply: u64,
    pub lp_builder_fee: u64,
    pub burn_fee: u64,
    pub creator_royalty_fee: u64,
    pub rewards_fee: u64,
    pub swap_balance_a: u64,
    pub burn_balance_a: u64,
    pub burn_balance_b: u64,
    pub creator_balance_a: u64,
    pub reward_balance_a: u64,
    pub creator_royalty_wallet: Address,
}

impl PoolInfo {
    pub fn balances(&self) -> PoolBalances {
        PoolBalances {
            balance_a: self.balance_a,
            balance_b: self.balance_b,
            lp_supply: self.lp_supply,
        }
    }

    pub fn fees(&self) -> PoolFees {
        PoolFees {
            lp_builder_fee: self.lp_builder_fee,
            burn_fee: self.burn_fee,
            creator_royalty_fee: self.creator_royalty_fee,
            rewards_fee: self.rewards_fee,
        }
    }
}

/// Outcome of the factory pool lookup.
///
/// Absence of a registered pool is a regular outcome and never reported as [`PoolLookup::Fault`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PoolLookup {
    Found(ObjectId),
    NotFound,
    Fault(String),
}

impl PoolLookup {
    pub fn is_found(&self) -> bool {
        matches!(self, PoolLookup::Found(_))
    }

    pub fn pool_id(&self) -> Option<ObjectId> {
        match self {
            PoolLookup::Found(id) => Some(*id),
            _ => None,
        }
    }

    /// Converts the lookup into a conventional result, [`PoolLookup::Fault`] becomes an error.
    pub fn into_result(self) -> Result<Option<ObjectId>, DexError> {
        match self {
            PoolLookup::Found(id) => Ok(Some(id)),
            PoolLookup::NotFound => Ok(None),
            PoolLookup::Fault(reason) => Err(DexError::LookupFault(reason)),
        }
    }
}

mod address;
mod move_type;
mod pool;
mod quote;
mod request;

pub use address::{Address, ObjectId};
pub use move_type::{CoinPair, Identifier, TypeTag};
pub use pool::{PoolBalances, PoolFees, PoolInfo, PoolLookup};
pub use quote::{QuoteKind, QuoteParams, QuoteResult};
pub use request::{
    AddLiquidityRequest, DepositCoinBRequest, DepositLpRequest, RemoveLiquidityRequest,
    SwapDirection, SwapRequest,
};

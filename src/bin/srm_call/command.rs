//! Subcommands and their conversion to call descriptors.

use clap::{Args, Subcommand};
use srm_dex_sdk::{
    Deployment,
    call::CallDescriptor,
    types::{
        AddLiquidityRequest, CoinPair, DepositCoinBRequest, DepositLpRequest, ObjectId,
        QuoteKind, QuoteParams, RemoveLiquidityRequest, SwapDirection, SwapRequest, TypeTag,
    },
};

use crate::{config::Amounts, error::Result};

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Swap a whole coin A object for coin B
    SwapAForB(SwapArgs),
    /// Swap a whole coin B object for coin A
    SwapBForA(SwapArgs),
    /// Add liquidity split off two coin objects
    AddLiquidity(AddLiquidityArgs),
    /// Remove liquidity split off an LP coin object
    RemoveLiquidity(RemoveLiquidityArgs),
    /// Deposit coin B for manual burning
    DepositCoinB(DepositCoinBArgs),
    /// Lock LP tokens in the pool
    DepositLp(DepositLpArgs),
    /// Quote the output amount for a sell amount
    QuoteBySell(QuoteArgs),
    /// Quote the required input amount for a buy amount
    QuoteByBuy(QuoteArgs),
    /// Read the pool balances
    PoolBalances(PoolArgs),
    /// Read the pool fee configuration
    PoolFees(PoolArgs),
    /// Read the full pool state
    PoolInfo(PoolArgs),
}

/// Coin types of the pool.
#[derive(Debug, Args)]
pub struct CoinTypes {
    /// Coin type A (e.g. 0x2::sui::SUI)
    #[arg(long)]
    pub type_a: TypeTag,

    /// Coin type B
    #[arg(long)]
    pub type_b: TypeTag,
}

impl CoinTypes {
    fn pair(&self) -> CoinPair {
        CoinPair::new(self.type_a.clone(), self.type_b.clone())
    }
}

#[derive(Debug, Args)]
pub struct SwapArgs {
    #[arg(long)]
    pub pool: ObjectId,

    /// Global config object
    #[arg(long)]
    pub config: ObjectId,

    /// Input coin object, swapped whole
    #[arg(long)]
    pub coin: ObjectId,

    #[arg(long)]
    pub amount_in: String,

    #[arg(long, default_value = "0")]
    pub min_amount_out: String,

    #[command(flatten)]
    pub types: CoinTypes,
}

#[derive(Debug, Args)]
pub struct AddLiquidityArgs {
    #[arg(long)]
    pub pool: ObjectId,

    #[arg(long)]
    pub coin_a: ObjectId,

    #[arg(long)]
    pub amount_a: String,

    #[arg(long)]
    pub coin_b: ObjectId,

    #[arg(long)]
    pub amount_b: String,

    #[arg(long, default_value = "0")]
    pub min_lp_out: String,

    #[command(flatten)]
    pub types: CoinTypes,
}

#[derive(Debug, Args)]
pub struct RemoveLiquidityArgs {
    #[arg(long)]
    pub pool: ObjectId,

    #[arg(long)]
    pub lp_coin: ObjectId,

    #[arg(long)]
    pub lp_amount: String,

    #[arg(long, default_value = "0")]
    pub min_a_out: String,

    #[arg(long, default_value = "0")]
    pub min_b_out: String,

    #[command(flatten)]
    pub types: CoinTypes,
}

#[derive(Debug, Args)]
pub struct DepositCoinBArgs {
    #[arg(long)]
    pub pool: ObjectId,

    #[arg(long)]
    pub coin_b: ObjectId,

    #[arg(long)]
    pub amount: String,

    #[command(flatten)]
    pub types: CoinTypes,
}

#[derive(Debug, Args)]
pub struct DepositLpArgs {
    #[arg(long)]
    pub pool: ObjectId,

    #[arg(long)]
    pub lp_token: ObjectId,

    #[arg(long)]
    pub amount: String,

    #[command(flatten)]
    pub types: CoinTypes,
}

#[derive(Debug, Args)]
pub struct QuoteArgs {
    /// Sell amount for quote-by-sell, buy amount for quote-by-buy
    #[arg(long)]
    pub amount: String,

    /// Quote a B to A swap
    #[arg(long)]
    pub b_to_a: bool,

    #[arg(long)]
    pub pool_balance_a: String,

    #[arg(long)]
    pub pool_balance_b: String,

    /// Fees in basis points
    #[arg(long, default_value_t = 0)]
    pub swap_fee: u64,

    #[arg(long, default_value_t = 0)]
    pub lp_builder_fee: u64,

    #[arg(long, default_value_t = 0)]
    pub burn_fee: u64,

    #[arg(long, default_value_t = 0)]
    pub dev_royalty_fee: u64,

    #[arg(long, default_value_t = 0)]
    pub rewards_fee: u64,
}

impl QuoteArgs {
    fn params(&self, amounts: &Amounts) -> Result<QuoteParams> {
        Ok(QuoteParams {
            is_a_to_b: !self.b_to_a,
            pool_balance_a: amounts.parse("pool_balance_a", &self.pool_balance_a)?,
            pool_balance_b: amounts.parse("pool_balance_b", &self.pool_balance_b)?,
            swap_fee: self.swap_fee,
            lp_builder_fee: self.lp_builder_fee,
            burn_fee: self.burn_fee,
            dev_royalty_fee: self.dev_royalty_fee,
            rewards_fee: self.rewards_fee,
        })
    }
}

#[derive(Debug, Args)]
pub struct PoolArgs {
    #[arg(long)]
    pub pool: ObjectId,

    #[command(flatten)]
    pub types: CoinTypes,
}

impl Command {
    /// Builds the descriptor of the call, with `clock` passed to the entry points that take it.
    pub fn to_call(
        &self,
        deployment: &Deployment,
        amounts: &Amounts,
        clock: ObjectId,
    ) -> Result<CallDescriptor> {
        let descriptor = match self {
            Command::SwapAForB(args) => {
                deployment.swap(SwapDirection::AToB, &args.request(amounts, clock)?)?
            }
            Command::SwapBForA(args) => {
                deployment.swap(SwapDirection::BToA, &args.request(amounts, clock)?)?
            }
            Command::AddLiquidity(args) => deployment.add_liquidity(&AddLiquidityRequest {
                pool: args.pool,
                coin_a: args.coin_a,
                amount_a: amounts.parse("amount_a", &args.amount_a)?,
                coin_b: args.coin_b,
                amount_b: amounts.parse("amount_b", &args.amount_b)?,
                min_lp_out: amounts.parse("min_lp_out", &args.min_lp_out)?,
                clock,
                coins: args.types.pair(),
            })?,
            Command::RemoveLiquidity(args) => {
                deployment.remove_liquidity(&RemoveLiquidityRequest {
                    pool: args.pool,
                    lp_coin: args.lp_coin,
                    lp_amount: amounts.parse("lp_amount", &args.lp_amount)?,
                    min_a_out: amounts.parse("min_a_out", &args.min_a_out)?,
                    min_b_out: amounts.parse("min_b_out", &args.min_b_out)?,
                    clock,
                    coins: args.types.pair(),
                })?
            }
            Command::DepositCoinB(args) => deployment.deposit_coin_b(&DepositCoinBRequest {
                pool: args.pool,
                coin_b: args.coin_b,
                amount: amounts.parse("amount", &args.amount)?,
                clock,
                coins: args.types.pair(),
            })?,
            Command::DepositLp(args) => deployment.deposit_lp(&DepositLpRequest {
                pool: args.pool,
                lp_token: args.lp_token,
                amount: amounts.parse("amount", &args.amount)?,
                coins: args.types.pair(),
            })?,
            Command::QuoteBySell(args) => deployment.quote_call(
                QuoteKind::BySell,
                amounts.parse("amount", &args.amount)?,
                &args.params(amounts)?,
            )?,
            Command::QuoteByBuy(args) => deployment.quote_call(
                QuoteKind::ByBuy,
                amounts.parse("amount", &args.amount)?,
                &args.params(amounts)?,
            )?,
            Command::PoolBalances(args) => {
                deployment.pool_balances_call(args.pool, &args.types.pair())?
            }
            Command::PoolFees(args) => deployment.pool_fees_call(args.pool, &args.types.pair())?,
            Command::PoolInfo(args) => deployment.pool_info_call(args.pool, &args.types.pair())?,
        };
        Ok(descriptor)
    }
}

impl SwapArgs {
    fn request(&self, amounts: &Amounts, clock: ObjectId) -> Result<SwapRequest> {
        Ok(SwapRequest {
            pool: self.pool,
            config: self.config,
            coin: self.coin,
            amount_in: amounts.parse("amount_in", &self.amount_in)?,
            min_amount_out: amounts.parse("min_amount_out", &self.min_amount_out)?,
            clock,
            coins: self.types.pair(),
        })
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use srm_dex_sdk::{
        call::{CallArgument, Command as CallCommand, PureValue},
        types::Address,
    };

    use super::*;
    use crate::config::{CliConfig, EnvConfig};

    const TYPES: [&str; 4] = [
        "--type-a",
        "0x2::sui::SUI",
        "--type-b",
        "0x3::usdc::USDC",
    ];

    fn with_types(args: &[&'static str]) -> Vec<&'static str> {
        [args, &TYPES[..]].concat()
    }

    fn build(args: &[&str]) -> Result<CallDescriptor> {
        let cli = CliConfig::try_parse_from(std::iter::once("srm-call").chain(args.iter().copied()))
            .unwrap();
        let env = EnvConfig {
            package_id: "0x5a".to_string(),
            clock_id: None,
            coin_decimals: Some(6),
        };
        cli.command
            .to_call(&env.deployment()?, &cli.amounts(&env)?, env.clock()?)
    }

    #[test]
    fn test_command_swap_b_for_a() {
        let call = build(&with_types(&[
            "swap-b-for-a",
            "--pool",
            "0x11",
            "--config",
            "0x12",
            "--coin",
            "0x13",
            "--amount-in",
            "500",
        ]))
        .unwrap();
        assert_eq!(
            call.target().function().as_str(),
            "swap_b_for_a_with_coins_and_transfer_to_sender"
        );
        assert_eq!(call.type_params().len(), 2);
        assert_eq!(call.arguments().len(), 6);
        assert_eq!(
            call.arguments()[4],
            CallArgument::Pure(srm_dex_sdk::call::PureArg::new(PureValue::U64(0)).unwrap())
        );
        assert_eq!(
            call.arguments()[5],
            CallArgument::Object { id: Address::CLOCK }
        );
    }

    #[test]
    fn test_command_add_liquidity_decimal() {
        let call = build(&with_types(&[
            "--decimal",
            "add-liquidity",
            "--pool",
            "0x11",
            "--coin-a",
            "0x21",
            "--amount-a",
            "1.5",
            "--coin-b",
            "0x22",
            "--amount-b",
            "2",
        ]))
        .unwrap();
        assert_eq!(
            call.commands(),
            &[
                CallCommand::SplitCoin {
                    coin: "0x21".parse().unwrap(),
                    amount: 1_500_000,
                },
                CallCommand::SplitCoin {
                    coin: "0x22".parse().unwrap(),
                    amount: 2_000_000,
                },
            ]
        );
    }

    #[test]
    fn test_command_quote_by_buy() {
        let call = build(&[
            "quote-by-buy",
            "--amount",
            "100",
            "--b-to-a",
            "--pool-balance-a",
            "1000",
            "--pool-balance-b",
            "2000",
            "--swap-fee",
            "30",
        ])
        .unwrap();
        assert_eq!(call.target().function().as_str(), "get_swap_quote_by_buy");
        assert!(call.type_params().is_empty());
        assert_eq!(call.arguments().len(), 9);
        assert_eq!(
            call.arguments()[1],
            CallArgument::Pure(srm_dex_sdk::call::PureArg::new(PureValue::Bool(false)).unwrap())
        );
    }

    #[test]
    fn test_command_invalid_amount() {
        let result = build(&with_types(&[
            "deposit-lp",
            "--pool",
            "0x11",
            "--lp-token",
            "0x31",
            "--amount",
            "ten",
        ]));
        assert!(matches!(result, Err(crate::error::Error::Config(_))));
    }
}

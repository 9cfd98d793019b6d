use serde::{Deserialize, Serialize};

/// Direction of a swap quote.
///
/// * [`QuoteKind::BySell`] quotes the output amount received for a given input.
/// * [`QuoteKind::ByBuy`] quotes the final input amount required for a given output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuoteKind {
    BySell,
    ByBuy,
}

impl QuoteKind {
    /// Name of the leading result field.
    pub fn amount_label(&self) -> &'static str {
        match self {
            QuoteKind::BySell => "amount_out",
            QuoteKind::ByBuy => "final_amount_in",
        }
    }
}

/// Pool state and fee configuration a quote is computed against.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteParams {
    pub is_a_to_b: bool,
    pub pool_balance_a: u64,
    pub pool_balance_b: u64,
    pub swap_fee: u64,
    pub lp_builder_fee: u64,
    pub burn_fee: u64,
    pub dev_royalty_fee: u64,
    pub rewards_fee: u64,
}

/// Swap quote with the fee breakdown.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteResult {
    pub kind: QuoteKind,
    /// Output amount for [`QuoteKind::BySell`], required input amount for [`QuoteKind::ByBuy`].
    pub amount: u64,
    pub lp_builder_fee_in: u64,
    pub lp_builder_fee_out: u64,
    pub swap_fee: u64,
    pub burn_fee: u64,
    pub dev_fee: u64,
    pub rewards_fee: u64,
}

impl QuoteResult {
    pub fn amount_out(&self) -> Option<u64> {
        matches!(self.kind, QuoteKind::BySell).then_some(self.amount)
    }

    pub fn final_amount_in(&self) -> Option<u64> {
        matches!(self.kind, QuoteKind::ByBuy).then_some(self.amount)
    }

    /// Sum of all fee components.
    pub fn total_fees(&self) -> u128 {
        [
            self.lp_builder_fee_in,
            self.lp_builder_fee_out,
            self.swap_fee,
            self.burn_fee,
            self.dev_fee,
            self.rewards_fee,
        ]
        .into_iter()
        .map(u128::from)
        .sum()
    }
}

//! Read-only queries through simulated calls.
//!
//! Each query is one build, simulate and decode round trip. The pool lookup
//! reads the factory object and then its `pools` table.

use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::{
    Deployment, abi,
    call::{CallBuilder, CallDescriptor},
    client::{DynamicFieldName, ExecutionClient},
    decode::{Decode, decode_quote},
    error::{DexError, EncodingError},
    types::{
        Address, CoinPair, ObjectId, PoolBalances, PoolFees, PoolInfo, PoolLookup, QuoteKind,
        QuoteParams, QuoteResult,
    },
};

/// Path of the `pools` table ID in the factory object content.
const FACTORY_TABLE_ID: &str = "/fields/pools/fields/id/id";

/// Path of the stored value in a dynamic field object content.
const DYNAMIC_FIELD_VALUE: &str = "/fields/value";

impl Deployment {
    /// Quote call, `amount` is the sell amount for [`QuoteKind::BySell`]
    /// and the buy amount for [`QuoteKind::ByBuy`].
    pub fn quote_call(
        &self,
        kind: QuoteKind,
        amount: u64,
        params: &QuoteParams,
    ) -> Result<CallDescriptor, EncodingError> {
        let function = match kind {
            QuoteKind::BySell => abi::quote::BY_SELL,
            QuoteKind::ByBuy => abi::quote::BY_BUY,
        };
        CallBuilder::new(self.quote_target(function)?)
            .u64(amount)
            .bool(params.is_a_to_b)
            .u64(params.pool_balance_a)
            .u64(params.pool_balance_b)
            .u64(params.swap_fee)
            .u64(params.lp_builder_fee)
            .u64(params.burn_fee)
            .u64(params.dev_royalty_fee)
            .u64(params.rewards_fee)
            .build()
    }

    pub fn pool_balances_call(
        &self,
        pool: ObjectId,
        coins: &CoinPair,
    ) -> Result<CallDescriptor, EncodingError> {
        self.pool_state_call(abi::srm::POOL_BALANCES, pool, coins)
    }

    pub fn pool_fees_call(
        &self,
        pool: ObjectId,
        coins: &CoinPair,
    ) -> Result<CallDescriptor, EncodingError> {
        self.pool_state_call(abi::srm::POOL_FEES, pool, coins)
    }

    pub fn pool_info_call(
        &self,
        pool: ObjectId,
        coins: &CoinPair,
    ) -> Result<CallDescriptor, EncodingError> {
        self.pool_state_call(abi::srm::POOL_INFO, pool, coins)
    }

    fn pool_state_call(
        &self,
        function: &str,
        pool: ObjectId,
        coins: &CoinPair,
    ) -> Result<CallDescriptor, EncodingError> {
        CallBuilder::new(self.pool_target(function)?)
            .type_params(coins.type_params())
            .object(pool)
            .build()
    }

    /// Key of the pool in the factory table.
    pub fn pool_key(&self, coins: &CoinPair) -> DynamicFieldName {
        DynamicFieldName {
            r#type: self.pool_item_type(),
            value: json!({ "a": coins.a.as_str(), "b": coins.b.as_str() }),
        }
    }
}

/// Read-only access to the DEX through an [`ExecutionClient`].
#[derive(Debug)]
pub struct Dex<C> {
    deployment: Deployment,
    client: C,
    sender: Address,
}

impl<C: ExecutionClient> Dex<C> {
    /// Creates a new [`Dex`], simulated calls are issued on behalf of `sender`.
    pub fn new(deployment: &Deployment, client: C, sender: Address) -> Self {
        Self {
            deployment: deployment.clone(),
            client,
            sender,
        }
    }

    pub fn deployment(&self) -> &Deployment {
        &self.deployment
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn sender(&self) -> Address {
        self.sender
    }

    /// Output amount and fees for selling `sell_amount`.
    pub async fn quote_by_sell(
        &self,
        sell_amount: u64,
        params: &QuoteParams,
    ) -> Result<QuoteResult, DexError> {
        self.quote(QuoteKind::BySell, sell_amount, params).await
    }

    /// Required input amount and fees for buying `buy_amount`.
    pub async fn quote_by_buy(
        &self,
        buy_amount: u64,
        params: &QuoteParams,
    ) -> Result<QuoteResult, DexError> {
        self.quote(QuoteKind::ByBuy, buy_amount, params).await
    }

    pub async fn quote(
        &self,
        kind: QuoteKind,
        amount: u64,
        params: &QuoteParams,
    ) -> Result<QuoteResult, DexError> {
        let descriptor = self.deployment.quote_call(kind, amount, params)?;
        let raw = self.return_row(&descriptor).await?;
        decode_quote(kind, raw.as_ref()).inspect_err(|err| warn!(%err, "quote rejected"))
    }

    pub async fn pool_balances(
        &self,
        pool: ObjectId,
        coins: &CoinPair,
    ) -> Result<PoolBalances, DexError> {
        let descriptor = self.deployment.pool_balances_call(pool, coins)?;
        self.query(&descriptor).await
    }

    pub async fn pool_fees(&self, pool: ObjectId, coins: &CoinPair) -> Result<PoolFees, DexError> {
        let descriptor = self.deployment.pool_fees_call(pool, coins)?;
        self.query(&descriptor).await
    }

    pub async fn pool_info(&self, pool: ObjectId, coins: &CoinPair) -> Result<PoolInfo, DexError> {
        let descriptor = self.deployment.pool_info_call(pool, coins)?;
        self.query(&descriptor).await
    }

    /// Looks up the pool registered in `factory` for the coin pair.
    ///
    /// The key is the ordered `(A, B)` pair the pool was created with.
    pub async fn pool_id(&self, factory: ObjectId, coins: &CoinPair) -> PoolLookup {
        match self.lookup_pool(factory, coins).await {
            Ok(Some(id)) => PoolLookup::Found(id),
            Ok(None) => {
                debug!(%factory, a = %coins.a, b = %coins.b, "pool not registered");
                PoolLookup::NotFound
            }
            Err(reason) => {
                warn!(%factory, %reason, "pool lookup failed");
                PoolLookup::Fault(reason)
            }
        }
    }

    async fn lookup_pool(
        &self,
        factory: ObjectId,
        coins: &CoinPair,
    ) -> Result<Option<ObjectId>, String> {
        let content = self
            .client
            .get_object(factory)
            .await
            .map_err(|err| err.to_string())?
            .ok_or_else(|| format!("factory object {factory} not found"))?;
        let table_id = content
            .pointer(FACTORY_TABLE_ID)
            .and_then(Value::as_str)
            .ok_or("could not locate table ID in factory object")?
            .parse::<ObjectId>()
            .map_err(|err| err.to_string())?;

        let key = self.deployment.pool_key(coins);
        let Some(field) = self
            .client
            .get_dynamic_field(table_id, &key)
            .await
            .map_err(|err| err.to_string())?
        else {
            return Ok(None);
        };
        field
            .pointer(DYNAMIC_FIELD_VALUE)
            .and_then(Value::as_str)
            .ok_or_else(|| "pool table entry has no ID value".to_string())?
            .parse()
            .map(Some)
            .map_err(|err: EncodingError| err.to_string())
    }

    async fn query<T: Decode>(&self, descriptor: &CallDescriptor) -> Result<T, DexError> {
        let raw = self.return_row(descriptor).await?;
        T::decode(raw.as_ref()).inspect_err(|err| warn!(%err, "pool state rejected"))
    }

    /// Simulates `descriptor` and returns the first return group of the call.
    async fn return_row(&self, descriptor: &CallDescriptor) -> Result<Option<Value>, DexError> {
        debug!(call = %descriptor, sender = %self.sender, "simulating call");
        let mut result = self.client.simulate(descriptor, self.sender).await?;
        if let Some(error) = result.error.take() {
            warn!(call = %descriptor, %error, "simulated execution failed");
            return Err(DexError::ExecutionFailed(error));
        }
        Ok(result.first_return(descriptor.call_index()).cloned())
    }
}

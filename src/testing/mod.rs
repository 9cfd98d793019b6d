//! In-memory execution client and test utilities.
//!
//! [`MockClient`] answers simulated calls with canned return rows keyed by the called
//! function name, serves objects and dynamic fields from memory, and keeps a journal
//! of the simulated calls for assertions on argument order.
//!
//! Faults can be injected per operation with [`MockClient::fail`] to exercise error paths.

use std::{future::Future, sync::Mutex};

use dashmap::DashMap;
use serde_json::{Value, json};

use crate::{
    Deployment,
    call::CallDescriptor,
    client::{DynamicFieldName, ExecutionClient, SimulationResult},
    error::ClientError,
    types::{Address, CoinPair, ObjectId},
};

/// Operation name used to inject [`ExecutionClient::get_object`] faults.
pub const GET_OBJECT: &str = "get_object";

/// Operation name used to inject [`ExecutionClient::get_dynamic_field`] faults.
pub const GET_DYNAMIC_FIELD: &str = "get_dynamic_field";

/// Call recorded by [`MockClient`].
#[derive(Clone, Debug)]
pub struct SimulatedCall {
    pub descriptor: CallDescriptor,
    pub sender: Address,
}

#[derive(Debug, Default)]
pub struct MockClient {
    simulations: DashMap<String, SimulationResult>,
    rows: DashMap<String, Value>,
    objects: DashMap<ObjectId, Value>,
    dynamic_fields: DashMap<(ObjectId, String), Value>,
    faults: DashMap<String, ClientError>,
    journal: Mutex<Vec<SimulatedCall>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers calls of `function` with the single return row `row`.
    pub fn with_row(self, function: &str, row: Value) -> Self {
        self.rows.insert(function.to_string(), row);
        self
    }

    /// Answers calls of `function` with the full `result`.
    pub fn with_simulation(self, function: &str, result: SimulationResult) -> Self {
        self.simulations.insert(function.to_string(), result);
        self
    }

    pub fn with_object(self, id: ObjectId, content: Value) -> Self {
        self.objects.insert(id, content);
        self
    }

    pub fn with_dynamic_field(
        self,
        parent: ObjectId,
        name: &DynamicFieldName,
        content: Value,
    ) -> Self {
        self.dynamic_fields.insert((parent, field_key(name)), content);
        self
    }

    /// Registers a factory object with `table` as its pools table.
    pub fn with_factory(self, factory: ObjectId, table: ObjectId) -> Self {
        self.with_object(
            factory,
            json!({ "fields": { "pools": { "fields": { "id": { "id": table.to_string() } } } } }),
        )
    }

    /// Registers `pool` under the key of `coins` in the factory `table`.
    pub fn with_pool(
        self,
        deployment: &Deployment,
        table: ObjectId,
        coins: &CoinPair,
        pool: ObjectId,
    ) -> Self {
        let name = deployment.pool_key(coins);
        self.with_dynamic_field(table, &name, json!({ "fields": { "value": pool.to_string() } }))
    }

    /// Fails `operation` (function name, [`GET_OBJECT`] or [`GET_DYNAMIC_FIELD`]) with `error`.
    pub fn fail(self, operation: &str, error: ClientError) -> Self {
        self.faults.insert(operation.to_string(), error);
        self
    }

    /// Simulated calls in order of issue.
    pub fn simulated(&self) -> Vec<SimulatedCall> {
        self.journal.lock().unwrap().clone()
    }

    fn fault(&self, operation: &str) -> Result<(), ClientError> {
        match self.faults.get(operation) {
            Some(error) => Err(error.value().clone()),
            None => Ok(()),
        }
    }

    fn simulate_now(
        &self,
        descriptor: &CallDescriptor,
        sender: Address,
    ) -> Result<SimulationResult, ClientError> {
        self.journal.lock().unwrap().push(SimulatedCall {
            descriptor: descriptor.clone(),
            sender,
        });
        let function = descriptor.target().function().as_str();
        self.fault(function)?;
        if let Some(result) = self.simulations.get(function) {
            return Ok(result.value().clone());
        }
        self.rows
            .get(function)
            .map(|row| SimulationResult::with_return(descriptor.call_index(), row.value().clone()))
            .ok_or_else(|| ClientError::InvalidRequest(format!("no canned result for {function}")))
    }
}

fn field_key(name: &DynamicFieldName) -> String {
    format!("{}={}", name.r#type, name.value)
}

impl ExecutionClient for MockClient {
    fn simulate(
        &self,
        descriptor: &CallDescriptor,
        sender: Address,
    ) -> impl Future<Output = Result<SimulationResult, ClientError>> + Send {
        futures::future::ready(self.simulate_now(descriptor, sender))
    }

    fn get_object(
        &self,
        id: ObjectId,
    ) -> impl Future<Output = Result<Option<Value>, ClientError>> + Send {
        let result = self
            .fault(GET_OBJECT)
            .map(|_| self.objects.get(&id).map(|v| v.value().clone()));
        futures::future::ready(result)
    }

    fn get_dynamic_field(
        &self,
        parent: ObjectId,
        name: &DynamicFieldName,
    ) -> impl Future<Output = Result<Option<Value>, ClientError>> + Send {
        let result = self.fault(GET_DYNAMIC_FIELD).map(|_| {
            self.dynamic_fields
                .get(&(parent, field_key(name)))
                .map(|v| v.value().clone())
        });
        futures::future::ready(result)
    }
}

/// Deployment with a fixed package ID for tests.
pub fn deployment() -> Deployment {
    Deployment::new(Address::new([0x5a; Address::LENGTH]))
}

/// SUI/USDC coin pair.
pub fn sui_usdc() -> CoinPair {
    CoinPair::new(
        "0x2::sui::SUI".parse().unwrap(),
        "0xdba34672e30cb065b1f93e3ab55318768fd6fef66c15942c9f7cb846e2f900e7::usdc::USDC"
            .parse()
            .unwrap(),
    )
}

/// Object ID with all bytes set to `byte`.
pub fn object_id(byte: u8) -> ObjectId {
    Address::new([byte; Address::LENGTH])
}

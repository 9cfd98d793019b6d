//! Execution client seam.
//!
//! The SDK does no network I/O itself. Queries are issued through an
//! [`ExecutionClient`] supplied by the caller, which is also responsible for any
//! retry, backoff and timeout policy.

use std::future::Future;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    call::CallDescriptor,
    error::ClientError,
    types::{Address, ObjectId},
};

/// Capabilities the SDK requires from the execution layer client.
pub trait ExecutionClient {
    /// Executes the call without committing any state.
    fn simulate(
        &self,
        descriptor: &CallDescriptor,
        sender: Address,
    ) -> impl Future<Output = Result<SimulationResult, ClientError>> + Send;

    /// Fetches the content of an object, `None` if it does not exist.
    fn get_object(
        &self,
        id: ObjectId,
    ) -> impl Future<Output = Result<Option<Value>, ClientError>> + Send;

    /// Fetches a dynamic field of `parent`, `None` if there is no field with such name.
    fn get_dynamic_field(
        &self,
        parent: ObjectId,
        name: &DynamicFieldName,
    ) -> impl Future<Output = Result<Option<Value>, ClientError>> + Send;
}

/// Outcome of a simulated call.
///
/// `results` holds one entry per executed command, derivation commands first.
/// `error` is set when the execution aborted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    #[serde(default)]
    pub results: Vec<ExecutionResult>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Return values of a single command.
///
/// `return_values[i]` is the group of the i-th declared return value, its
/// first element holds the positional values as JSON scalars.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    #[serde(default)]
    pub return_values: Vec<Vec<Value>>,
}

impl SimulationResult {
    /// Result where `command` returned the single group `row`.
    pub fn with_return(command: usize, row: Value) -> Self {
        let mut results = vec![ExecutionResult::default(); command];
        results.push(ExecutionResult {
            return_values: vec![vec![row]],
        });
        Self {
            results,
            error: None,
        }
    }

    pub fn aborted(error: impl Into<String>) -> Self {
        Self {
            results: vec![],
            error: Some(error.into()),
        }
    }

    /// First value of the first return group of `command`, if present.
    pub fn first_return(&self, command: usize) -> Option<&Value> {
        self.results
            .get(command)?
            .return_values
            .first()?
            .first()
    }
}

/// Name of a dynamic field: Move type of the key and its JSON value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicFieldName {
    #[serde(rename = "type")]
    pub r#type: String,
    pub value: Value,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_first_return_of_command() {
        let result = SimulationResult::with_return(2, json!([1, 2]));
        assert_eq!(result.results.len(), 3);
        assert_eq!(result.first_return(0), None);
        assert_eq!(result.first_return(2), Some(&json!([1, 2])));
        assert_eq!(result.first_return(3), None);
    }

    #[test]
    fn test_simulation_result_from_json() {
        let result: SimulationResult = serde_json::from_value(json!({
            "results": [{ "returnValues": [[[10, 20, 30, 40], "ignored"]] }]
        }))
        .unwrap();
        assert_eq!(result.first_return(0), Some(&json!([10, 20, 30, 40])));
        assert_eq!(result.error, None);

        let empty: SimulationResult = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty.first_return(0), None);
    }
}

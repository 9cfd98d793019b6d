use std::fmt::Display;

/// Call argument, identifier or type tag that can not be represented
/// under its declared wire encoding.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    #[error("invalid u64 value: {0:?}")]
    InvalidU64(String),

    #[error("invalid address: {0:?}")]
    InvalidAddress(String),

    #[error("invalid Move identifier: {0:?}")]
    InvalidIdentifier(String),

    #[error("invalid type tag: {0:?}")]
    InvalidTypeTag(String),

    #[error("derived value #{0} is not defined by this call")]
    UnknownDerived(usize),

    #[error("bcs encoding failed: {0}")]
    Bcs(String),
}

/// Error reported by an [`crate::client::ExecutionClient`] implementation.
#[derive(Clone, Debug, thiserror::Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("request timed out")]
    Timeout,

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Error returned by the SDK operations.
#[derive(Debug, thiserror::Error)]
pub enum DexError {
    #[error("encoding error: {0}")]
    Encoding(#[from] EncodingError),

    #[error("malformed result of {operation}: {reason}")]
    MalformedResult {
        operation: &'static str,
        reason: String,
    },

    #[error("simulated execution failed: {0}")]
    ExecutionFailed(String),

    #[error("pool lookup failed: {0}")]
    LookupFault(String),

    #[error("client error: {0}")]
    Client(#[from] ClientError),
}

impl DexError {
    pub(crate) fn malformed(operation: &'static str, reason: impl Display) -> Self {
        Self::MalformedResult {
            operation,
            reason: reason.to_string(),
        }
    }

    /// Name of the operation whose result failed validation, if that is the failure.
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            Self::MalformedResult { operation, .. } => Some(operation),
            _ => None,
        }
    }
}

impl From<bcs::Error> for EncodingError {
    fn from(value: bcs::Error) -> Self {
        Self::Bcs(value.to_string())
    }
}

//! Error types for the call builder.

use srm_dex_sdk::error::EncodingError;

use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid call argument: {0}")]
    Encoding(#[from] EncodingError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_sources() {
        let err = Error::from(ConfigError::InvalidDecimals(20));
        assert_eq!(
            err.to_string(),
            "Configuration error: COIN_DECIMALS must be at most 19, got 20"
        );

        let err = Error::from(EncodingError::UnknownDerived(3));
        assert!(matches!(err, Error::Encoding(EncodingError::UnknownDerived(3))));
    }
}

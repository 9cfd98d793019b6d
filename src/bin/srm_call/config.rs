//! Configuration for the call builder.
//!
//! Configuration comes from two sources:
//! - Environment variables (via .env file or shell): deployment details
//! - CLI arguments: the call and its arguments

use clap::Parser;
use srm_dex_sdk::{
    Deployment,
    error::EncodingError,
    num::Converter,
    types::{Address, ObjectId},
};

use crate::command::Command;

/// Decimals of SUI, used when `COIN_DECIMALS` is not set.
const DEFAULT_COIN_DECIMALS: u8 = 9;

/// Largest number of decimals whose unit still fits in a u64.
const MAX_COIN_DECIMALS: u8 = 19;

/// Environment configuration (deployment details).
#[derive(Debug, serde::Deserialize)]
pub struct EnvConfig {
    /// Package ID of the published DEX modules
    pub package_id: String,

    /// Optional clock object ID (default: 0x6)
    pub clock_id: Option<String>,

    /// Optional decimals of decimal amounts given with `--decimal` (default: 9)
    pub coin_decimals: Option<u8>,
}

impl EnvConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    pub fn deployment(&self) -> Result<Deployment, EncodingError> {
        Ok(Deployment::new(self.package_id.parse()?))
    }

    pub fn clock(&self) -> Result<ObjectId, EncodingError> {
        self.clock_id
            .as_deref()
            .map_or(Ok(Address::CLOCK), str::parse)
    }

    pub fn coin_decimals(&self) -> Result<u8, ConfigError> {
        match self.coin_decimals.unwrap_or(DEFAULT_COIN_DECIMALS) {
            decimals if decimals > MAX_COIN_DECIMALS => Err(ConfigError::InvalidDecimals(decimals)),
            decimals => Ok(decimals),
        }
    }
}

/// CLI arguments.
#[derive(Debug, Parser)]
#[command(name = "srm-call")]
#[command(about = "Builds SRMV1 DEX call descriptors and prints them as JSON")]
pub struct CliConfig {
    /// Amounts are decimal coin amounts (e.g. "1.5") instead of base units
    #[arg(long, global = true)]
    pub decimal: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    /// Amount parser for the `--decimal` mode and the configured coin decimals.
    pub fn amounts(&self, env: &EnvConfig) -> Result<Amounts, ConfigError> {
        Ok(Amounts {
            converter: self
                .decimal
                .then(|| env.coin_decimals().map(Converter::new))
                .transpose()?,
        })
    }
}

/// Parser of amount arguments.
#[derive(Clone, Copy, Debug, Default)]
pub struct Amounts {
    converter: Option<Converter>,
}

impl Amounts {
    /// Parses `value` as base units, or as a decimal amount when a converter is set.
    pub fn parse(&self, name: &'static str, value: &str) -> Result<u64, ConfigError> {
        let parsed = match &self.converter {
            Some(converter) => converter.parse(value).ok(),
            None => value.parse().ok(),
        };
        parsed.ok_or_else(|| ConfigError::InvalidAmount(name, value.to_string()))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid amount for {0}: {1:?}")]
    InvalidAmount(&'static str, String),

    #[error("COIN_DECIMALS must be at most 19, got {0}")]
    InvalidDecimals(u8),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(coin_decimals: Option<u8>) -> EnvConfig {
        EnvConfig {
            package_id: "0x5a".to_string(),
            clock_id: None,
            coin_decimals,
        }
    }

    #[test]
    fn test_env_config_defaults() {
        let env = env(None);
        assert_eq!(env.clock().unwrap(), Address::CLOCK);
        assert_eq!(env.coin_decimals().unwrap(), DEFAULT_COIN_DECIMALS);
        assert_eq!(
            env.deployment().unwrap().package_id().to_string(),
            format!("0x{}5a", "0".repeat(62))
        );
    }

    #[test]
    fn test_env_config_invalid_values() {
        assert!(matches!(
            env(Some(20)).coin_decimals(),
            Err(ConfigError::InvalidDecimals(20))
        ));

        let env = EnvConfig {
            package_id: "0xzz".to_string(),
            clock_id: Some("not an id".to_string()),
            coin_decimals: None,
        };
        assert!(env.deployment().is_err());
        assert!(env.clock().is_err());
    }

    #[test]
    fn test_amounts_base_units() {
        let amounts = Amounts::default();
        assert_eq!(amounts.parse("amount", "18446744073709551615").unwrap(), u64::MAX);
        assert!(matches!(
            amounts.parse("amount", "1.5"),
            Err(ConfigError::InvalidAmount("amount", _))
        ));
        assert!(amounts.parse("amount", "18446744073709551616").is_err());
    }

    #[test]
    fn test_amounts_decimal() {
        let cli = CliConfig::try_parse_from([
            "srm-call",
            "--decimal",
            "pool-fees",
            "--pool",
            "0x1",
            "--type-a",
            "0x2::sui::SUI",
            "--type-b",
            "0x2::sui::SUI",
        ])
        .unwrap();
        let amounts = cli.amounts(&env(Some(6))).unwrap();
        assert_eq!(amounts.parse("amount", "1.5").unwrap(), 1_500_000);
        assert!(amounts.parse("amount", "-1").is_err());
    }
}

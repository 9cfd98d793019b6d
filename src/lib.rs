//! SRM DEX SDK.
//!
//! # Overview
//!
//! Client-side helpers for the SRM DEX Move package.
//!
//! Use [`Deployment`] to build [`call::CallDescriptor`]s for the entry points
//! (swaps, liquidity, deposits, see [`entry`]) and hand them to your transaction
//! pipeline for signing and submission.
//!
//! Use [`query::Dex`] on top of your [`client::ExecutionClient`] to get swap quotes
//! and pool state via simulated calls, decoded into typed results by [`decode`],
//! and to look up pools registered in the factory.
//!
//! # Limitations/follow-ups
//!
//! * Transport, signing and submission are out of scope, the caller provides
//!   an [`client::ExecutionClient`] implementation.
//!
//! * Object arguments are passed by ID only, resolving versions and digests
//!   for submission is left to the transaction pipeline.
//!
//! # Testing
//!
//! [`testing`] module provides an in-memory [`client::ExecutionClient`] with canned responses.

pub mod abi;
pub mod call;
pub mod client;
pub mod decode;
pub mod entry;
pub mod error;
pub mod num;
pub mod query;
pub mod testing;
pub mod types;

use call::CallTarget;
use error::EncodingError;
use types::Address;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Deployed DEX package.
pub struct Deployment {
    package_id: Address,
}

impl Deployment {
    pub fn new(package_id: Address) -> Self {
        Self { package_id }
    }

    pub fn package_id(&self) -> Address {
        self.package_id
    }

    /// Function of the pool module.
    pub fn pool_target(&self, function: &str) -> Result<CallTarget, EncodingError> {
        CallTarget::new(self.package_id, abi::srm::MODULE, function)
    }

    /// Function of the quote module.
    pub fn quote_target(&self, function: &str) -> Result<CallTarget, EncodingError> {
        CallTarget::new(self.package_id, abi::quote::MODULE, function)
    }

    /// Move type of the factory table key.
    pub fn pool_item_type(&self) -> String {
        format!(
            "{}::{}::{}",
            self.package_id,
            abi::srm::MODULE,
            abi::srm::POOL_ITEM
        )
    }
}

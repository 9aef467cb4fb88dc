//! Error taxonomy for contract deployment runs.
//!
//! Every variant is fatal to the run. Nothing is retried locally.

use crate::ContractKind;

/// Errors raised while deploying or initializing a contract.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// A contract that must already be deployed is absent from the registry.
    #[error("{dependent} requires {dependency} to be deployed first, but no address is recorded")]
    MissingDependency {
        dependent: ContractKind,
        dependency: ContractKind,
    },

    /// The contract identifier does not name a known contract kind.
    #[error("unknown contract: {0}")]
    UnknownContract(String),

    /// The deploy binary failed or printed something other than an address.
    #[error("contract deployment failed: {0}")]
    DeploymentFailed(String),

    /// A remote contract call was rejected or could not be submitted.
    #[error("remote call `{method}` failed: {reason}")]
    RemoteCallFailed { method: String, reason: String },

    /// The chain configuration lacks a value required by this run.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The signing key could not be decoded.
    #[error("invalid private key: {0}")]
    InvalidKey(String),

    /// The on-chain domain separator disagrees with the locally computed one.
    #[error("domain separator mismatch: expected {expected}, found {actual} on chain")]
    DomainSeparatorMismatch { expected: String, actual: String },
}

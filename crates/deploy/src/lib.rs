//! axstellar-deploy - Deployment library for Axelar contracts on Stellar.
//!
//! This crate deploys Soroban contracts through the Stellar CLI, records them
//! in the chain config, and initializes them with per-contract arguments.

mod client;
pub use client::{BroadcastOptions, BroadcastOutcome, ContractClient, ContractDeployer, Invocation};

mod config;
pub use config::{AxelarConfig, ChainState, ConfigStore, ContractRecord};

mod contract;
pub use contract::ContractKind;

mod deployer;
pub use deployer::{DeployContext, DeployOptions};

mod domain;
pub use domain::{DomainSeparatorResolver, DomainSeparatorSource, calculate_domain_separator};

mod error;
pub use error::DeployError;

mod hooks;
pub use hooks::PostDeployHook;

mod init_args;
pub use init_args::{
    InitArgsBuilder, InitializeArgs, MINIMUM_ROTATION_DELAY, PREVIOUS_SIGNER_RETENTION, SignerSet,
    WeightedSigner, signer_set_nonce,
};

pub mod lcd;

mod network;
pub use network::{Environment, NetworkType};

pub mod stellar_cli;
pub use stellar_cli::StellarCli;

mod value;
pub use value::{ContractValue, MAX_SAFE_INTEGER};

mod wallet;
pub use wallet::Wallet;

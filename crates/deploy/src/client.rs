//! Narrow interfaces to the deploy binary and to remote contract calls.

use std::{future::Future, path::Path};

use crate::{ChainState, ContractValue, DeployError, Wallet};

/// A pending contract method call, built before it is broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Address of the contract to call.
    pub contract: String,
    /// Method name.
    pub method: String,
    /// Named arguments in call order.
    pub args: Vec<(String, ContractValue)>,
}

impl Invocation {
    /// Prepare a call of `method` on `contract`.
    pub fn call(
        contract: impl Into<String>,
        method: impl Into<String>,
        args: impl IntoIterator<Item = (String, ContractValue)>,
    ) -> Self {
        Self {
            contract: contract.into(),
            method: method.into(),
            args: args.into_iter().collect(),
        }
    }
}

/// Broadcast settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastOptions {
    /// Only simulate the call and report its cost.
    pub estimate_cost: bool,
}

/// What came back from a broadcast.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastOutcome {
    /// The call's return value as printed by the network client, if any.
    pub output: String,
    /// Resource cost report, when the call was only simulated.
    pub cost: Option<String>,
}

/// Uploads and instantiates contract wasm.
pub trait ContractDeployer {
    /// Deploy the wasm at `wasm_path` and return the new contract address.
    fn deploy(
        &self,
        wasm_path: &Path,
        wallet: &Wallet,
        chain: &ChainState,
    ) -> impl Future<Output = Result<String, DeployError>> + Send;
}

/// Signs and submits contract calls.
pub trait ContractClient {
    /// Broadcast `invocation`, signed by `wallet`. `description` is used for logging.
    fn broadcast(
        &self,
        invocation: &Invocation,
        wallet: &Wallet,
        chain: &ChainState,
        description: &str,
        options: BroadcastOptions,
    ) -> impl Future<Output = Result<BroadcastOutcome, DeployError>> + Send;
}

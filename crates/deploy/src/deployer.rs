//! Deployment orchestration: deploy or adopt, record, initialize, run hooks.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::{
    BroadcastOptions, ChainState, ContractClient, ContractDeployer, ContractKind, ContractRecord,
    DomainSeparatorResolver, InitArgsBuilder, Invocation, PostDeployHook, Wallet,
};

/// Everything a run borrows from its caller.
///
/// The chain state is mutated in place. Persisting it is the caller's job.
pub struct DeployContext<'a, D, C> {
    pub chain: &'a mut ChainState,
    pub wallet: &'a Wallet,
    pub deployer: &'a D,
    pub client: &'a C,
    pub domain_separator: &'a DomainSeparatorResolver,
}

/// What to deploy and how.
///
/// # Example
///
/// ```
/// use axstellar_deploy::DeployOptions;
///
/// let options = DeployOptions::new("axelar_operators", "axelar_operators.wasm")
///     .initialize(true)
///     .nonce(Some("v1".to_string()));
/// assert!(options.initialize);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployOptions {
    /// Registry identifier of the contract.
    pub contract_name: String,
    /// Path to the contract wasm.
    pub wasm_path: PathBuf,
    /// Adopt this already deployed address instead of deploying.
    pub address: Option<String>,
    /// Call `initialize` after deploying.
    pub initialize: bool,
    /// Simulate contract calls instead of submitting them.
    pub estimate_cost: bool,
    /// Human-readable nonce for the initial signer set.
    pub nonce: Option<String>,
}

impl DeployOptions {
    pub fn new(contract_name: impl Into<String>, wasm_path: impl Into<PathBuf>) -> Self {
        Self {
            contract_name: contract_name.into(),
            wasm_path: wasm_path.into(),
            address: None,
            initialize: false,
            estimate_cost: false,
            nonce: None,
        }
    }

    /// Adopt an existing contract instead of deploying a new one.
    pub fn address(mut self, address: Option<String>) -> Self {
        self.address = address;
        self
    }

    pub fn initialize(mut self, initialize: bool) -> Self {
        self.initialize = initialize;
        self
    }

    pub fn estimate_cost(mut self, estimate_cost: bool) -> Self {
        self.estimate_cost = estimate_cost;
        self
    }

    pub fn nonce(mut self, nonce: Option<String>) -> Self {
        self.nonce = nonce;
        self
    }

    fn broadcast_options(&self) -> BroadcastOptions {
        BroadcastOptions {
            estimate_cost: self.estimate_cost,
        }
    }

    /// Run the deployment against `ctx.chain`.
    ///
    /// Steps run in order and the first failure aborts the run. Nothing is
    /// rolled back: the recorded address, and the serialized `initializeArgs`
    /// written before the `initialize` call, stay in the registry.
    pub async fn run<D, C>(&self, ctx: DeployContext<'_, D, C>) -> Result<()>
    where
        D: ContractDeployer,
        C: ContractClient,
    {
        let DeployContext {
            chain,
            wallet,
            deployer,
            client,
            domain_separator,
        } = ctx;
        let name = self.contract_name.as_str();

        // The registry exists from here on, even if deployment fails.
        chain.contracts_mut();

        let address = match &self.address {
            Some(address) => {
                tracing::info!(contract = %name, %address, "Using existing contract");
                address.clone()
            }
            None => {
                tracing::info!(contract = %name, wasm = %self.wasm_path.display(), "Deploying contract...");
                let address = deployer
                    .deploy(&self.wasm_path, wallet, chain)
                    .await
                    .with_context(|| format!("Failed to deploy {name}"))?;
                tracing::info!(contract = %name, %address, "Contract deployed");
                address
            }
        };

        chain.contracts_mut().insert(
            name.to_string(),
            ContractRecord::new(address.clone(), wallet.public_key()),
        );

        if !self.initialize {
            return Ok(());
        }

        let args = InitArgsBuilder::new(chain, wallet, domain_separator)
            .nonce(self.nonce.as_deref())
            .build(name)
            .await
            .with_context(|| format!("Failed to build initialize arguments for {name}"))?;

        let serialized = args.to_json();
        tracing::info!(
            contract = %name,
            args = %serde_json::Value::Object(serialized.clone()),
            "Initializing contract..."
        );
        if let Some(record) = chain.contracts_mut().get_mut(name) {
            record.initialize_args = Some(serialized);
        }

        let invocation = Invocation::call(&address, "initialize", args.iter().cloned());
        client
            .broadcast(
                &invocation,
                wallet,
                chain,
                &format!("Initialized {name}"),
                self.broadcast_options(),
            )
            .await
            .with_context(|| format!("Failed to initialize {name}"))?;

        // Initialization already resolved the identifier to a known kind.
        let hook = ContractKind::parse(name)
            .ok()
            .and_then(PostDeployHook::for_contract);
        if let Some(hook) = hook {
            tracing::info!(contract = %name, ?hook, "Running post-deploy hook...");
            hook.run(chain, wallet, client, self.broadcast_options())
                .await
                .with_context(|| format!("Post-deploy hook failed for {name}"))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_builder() {
        let options = DeployOptions::new("axelar_gateway", "/tmp/gateway.wasm")
            .address(Some("CGATEWAY".to_string()))
            .initialize(true)
            .estimate_cost(true)
            .nonce(Some("n".to_string()));

        assert_eq!(options.contract_name, "axelar_gateway");
        assert_eq!(options.wasm_path, PathBuf::from("/tmp/gateway.wasm"));
        assert_eq!(options.address.as_deref(), Some("CGATEWAY"));
        assert!(options.initialize);
        assert_eq!(
            options.broadcast_options(),
            BroadcastOptions {
                estimate_cost: true
            }
        );
        assert_eq!(options.nonce.as_deref(), Some("n"));
    }

    #[test]
    fn test_options_defaults() {
        let options = DeployOptions::new("axelar_operators", "ops.wasm");
        assert!(options.address.is_none());
        assert!(!options.initialize);
        assert!(!options.estimate_cost);
        assert!(options.nonce.is_none());
    }
}

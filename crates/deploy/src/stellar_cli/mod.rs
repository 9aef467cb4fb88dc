//! Stellar CLI adapter: deploys wasm and invokes contract methods by running
//! the `stellar` binary.

mod cmd;

use std::path::{Path, PathBuf};

use tokio::process::Command;

pub use cmd::{DeployCmdBuilder, InvokeCmdBuilder, snake_case};

use crate::{
    BroadcastOptions, BroadcastOutcome, ChainState, ContractClient, ContractDeployer, DeployError,
    Invocation, Wallet,
};

/// Default name of the Stellar CLI binary, resolved through `PATH`.
pub const DEFAULT_BINARY: &str = "stellar";

/// Captured result of a finished CLI process.
struct CliOutput {
    success: bool,
    stdout: String,
    stderr: String,
}

/// Runs the Stellar CLI.
#[derive(Debug, Clone)]
pub struct StellarCli {
    binary: PathBuf,
}

impl Default for StellarCli {
    fn default() -> Self {
        Self::new(DEFAULT_BINARY)
    }
}

impl StellarCli {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    async fn run(&self, args: Vec<String>) -> std::io::Result<CliOutput> {
        // Arguments carry the secret seed, so only the subcommand is logged.
        tracing::debug!(
            binary = %self.binary.display(),
            subcommand = %args.iter().take(2).cloned().collect::<Vec<_>>().join(" "),
            "Running Stellar CLI"
        );

        let output = Command::new(&self.binary).args(&args).output().await?;

        Ok(CliOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

impl ContractDeployer for StellarCli {
    async fn deploy(
        &self,
        wasm_path: &Path,
        wallet: &Wallet,
        chain: &ChainState,
    ) -> Result<String, DeployError> {
        let args = DeployCmdBuilder::new(
            wasm_path,
            wallet.secret(),
            &chain.rpc,
            chain.network_passphrase()?,
        )
        .build();

        let output = self.run(args).await.map_err(|e| {
            DeployError::DeploymentFailed(format!(
                "failed to run {}: {e}",
                self.binary.display()
            ))
        })?;

        if !output.success {
            return Err(DeployError::DeploymentFailed(output.stderr));
        }

        let mut lines = output.stdout.lines();
        match (lines.next(), lines.next()) {
            (Some(address), None) if !address.trim().is_empty() => Ok(address.trim().to_string()),
            _ => Err(DeployError::DeploymentFailed(format!(
                "expected a single contract address on stdout, got `{}`",
                output.stdout
            ))),
        }
    }
}

impl ContractClient for StellarCli {
    async fn broadcast(
        &self,
        invocation: &Invocation,
        wallet: &Wallet,
        chain: &ChainState,
        description: &str,
        options: BroadcastOptions,
    ) -> Result<BroadcastOutcome, DeployError> {
        let args = InvokeCmdBuilder::new(
            &invocation.contract,
            &invocation.method,
            wallet.secret(),
            &chain.rpc,
            chain.network_passphrase()?,
        )
        .args(&invocation.args)
        .estimate_cost(options.estimate_cost)
        .build();

        let failed = |reason: String| DeployError::RemoteCallFailed {
            method: invocation.method.clone(),
            reason,
        };

        let output = self
            .run(args)
            .await
            .map_err(|e| failed(format!("failed to run {}: {e}", self.binary.display())))?;

        if !output.success {
            return Err(failed(output.stderr));
        }

        let cost = options.estimate_cost.then(|| output.stderr.clone());
        if let Some(cost) = &cost {
            tracing::info!(contract = %invocation.contract, method = %invocation.method, %cost, "{description} (estimated)");
        } else {
            tracing::info!(contract = %invocation.contract, method = %invocation.method, "{description}");
        }

        Ok(BroadcastOutcome {
            output: output.stdout,
            cost,
        })
    }
}

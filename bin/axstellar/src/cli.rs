use std::path::PathBuf;

use axstellar_deploy::{Environment, stellar_cli};
use clap::{Args, Parser, Subcommand};
use tracing::level_filters::LevelFilter;

/// The default directory holding `<env>.json` chain configs.
const DEFAULT_CONFIG_DIR: &str = "axelar-chains-config/info";

#[derive(Parser)]
#[command(name = "axstellar")]
#[command(author, version, about = "Deploy and initialize Axelar contracts on Stellar")]
pub struct Cli {
    /// The environment to deploy to. Selects `<config-dir>/<env>.json`.
    #[arg(short, long, global = true, env = "ENV", default_value_t = Environment::Testnet)]
    pub env: Environment,

    /// Secret seed (`S...`) of the deploying account.
    #[arg(short, long, global = true, env = "PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,

    /// Verbose output. Raises the log level to at least debug.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The log level.
    #[arg(long, global = true, env = "AXSTELLAR_LOG_LEVEL", default_value_t = LevelFilter::INFO)]
    pub log_level: LevelFilter,

    /// Name of the chain entry in the config file.
    #[arg(long, global = true, env = "CHAIN", default_value = "stellar")]
    pub chain_name: String,

    /// Directory containing the chain config files.
    #[arg(long, global = true, env = "AXSTELLAR_CONFIG_DIR", default_value = DEFAULT_CONFIG_DIR)]
    pub config_dir: PathBuf,

    /// The Stellar CLI binary used to deploy and invoke contracts.
    #[arg(long, global = true, env = "STELLAR_CLI", default_value = stellar_cli::DEFAULT_BINARY)]
    pub stellar_cli: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// The effective log level.
    pub fn max_level(&self) -> LevelFilter {
        if self.verbose {
            self.log_level.max(LevelFilter::DEBUG)
        } else {
            self.log_level
        }
    }

    /// Path of the config file for the selected environment.
    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join(self.env.config_file_name())
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Deploy a contract, or adopt an existing one, and optionally initialize it.
    Deploy(DeployArgs),
}

#[derive(Args, Debug, Clone)]
pub struct DeployArgs {
    /// Contract identifier, e.g. `axelar_gateway`.
    #[arg(long, alias = "contractName")]
    pub contract_name: String,

    /// Path to the contract wasm.
    #[arg(long, alias = "wasmPath")]
    pub wasm_path: PathBuf,

    /// Call `initialize` on the contract after deploying it.
    #[arg(long)]
    pub initialize: bool,

    /// Use this already deployed contract instead of deploying a new one.
    #[arg(long)]
    pub address: Option<String>,

    /// Simulate contract calls and report their cost instead of submitting them.
    #[arg(long, alias = "estimateCost")]
    pub estimate_cost: bool,

    /// Nonce for the initial signer set, hashed with keccak256.
    #[arg(long)]
    pub nonce: Option<String>,

    /// Domain separator: a 32-byte hex hash, `offline` to compute it locally,
    /// or anything else to compute it and check it against Axelar.
    #[arg(long, alias = "domainSeparator", default_value = "offline")]
    pub domain_separator: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_deploy_with_camel_case_aliases() {
        let cli = Cli::try_parse_from([
            "axstellar",
            "deploy",
            "--contractName",
            "axelar_operators",
            "--wasmPath",
            "ops.wasm",
            "--initialize",
            "--estimateCost",
            "-e",
            "devnet-amplifier",
            "-p",
            "SSECRET",
        ])
        .unwrap();

        assert_eq!(cli.env, Environment::DevnetAmplifier);
        assert_eq!(cli.private_key.as_deref(), Some("SSECRET"));
        assert_eq!(
            cli.config_path(),
            PathBuf::from("axelar-chains-config/info/devnet-amplifier.json")
        );

        let Command::Deploy(args) = cli.command;
        assert_eq!(args.contract_name, "axelar_operators");
        assert_eq!(args.wasm_path, PathBuf::from("ops.wasm"));
        assert!(args.initialize);
        assert!(args.estimate_cost);
        assert!(args.address.is_none());
        assert_eq!(args.domain_separator, "offline");
    }

    #[test]
    fn test_contract_name_and_wasm_path_are_required() {
        assert!(Cli::try_parse_from(["axstellar", "deploy", "--wasm-path", "x.wasm"]).is_err());
        assert!(Cli::try_parse_from(["axstellar", "deploy", "--contract-name", "x"]).is_err());
    }

    #[test]
    fn test_unknown_contract_name_parses() {
        let cli = Cli::try_parse_from([
            "axstellar",
            "deploy",
            "--contract-name",
            "not_a_contract",
            "--wasm-path",
            "x.wasm",
        ])
        .unwrap();
        let Command::Deploy(args) = cli.command;
        assert_eq!(args.contract_name, "not_a_contract");
    }

    #[test]
    fn test_verbose_raises_log_level() {
        let cli = Cli::try_parse_from([
            "axstellar",
            "deploy",
            "--contract-name",
            "x",
            "--wasm-path",
            "x.wasm",
            "--verbose",
        ])
        .unwrap();
        assert_eq!(cli.max_level(), LevelFilter::DEBUG);
    }
}

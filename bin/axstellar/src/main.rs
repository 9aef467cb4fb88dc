//! axstellar is a CLI tool to deploy and initialize Axelar contracts on Stellar.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;

use axstellar_deploy::{
    ConfigStore, DeployContext, DeployOptions, DomainSeparatorResolver, DomainSeparatorSource,
    StellarCli, Wallet,
};
use cli::{Cli, Command, DeployArgs};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize the logger.
    tracing_subscriber::fmt().with_max_level(cli.max_level()).init();

    match &cli.command {
        Command::Deploy(args) => deploy(&cli, args).await,
    }
}

async fn deploy(cli: &Cli, args: &DeployArgs) -> Result<()> {
    let private_key = cli
        .private_key
        .as_deref()
        .context("A private key is required (--private-key or PRIVATE_KEY)")?;
    let wallet = Wallet::from_secret(private_key)?;

    let config_path = cli.config_path();
    let mut config = ConfigStore::load_from_file(&config_path)?;

    let domain_separator = DomainSeparatorResolver::new(
        cli.env,
        DomainSeparatorSource::from(args.domain_separator.as_str()),
        config.axelar.clone(),
    );
    let stellar = StellarCli::new(&cli.stellar_cli);

    let options = DeployOptions::new(&args.contract_name, &args.wasm_path)
        .address(args.address.clone())
        .initialize(args.initialize)
        .estimate_cost(args.estimate_cost)
        .nonce(args.nonce.clone());

    let chain = config.chain_mut(&cli.chain_name)?;
    let network_type = chain.network_type()?;

    tracing::info!(
        env = %cli.env,
        chain = %cli.chain_name,
        config_path = %config_path.display(),
        rpc = %chain.rpc,
        %network_type,
        network_id = %network_type.network_id(),
        wallet = %wallet.public_key(),
        "Starting deployment..."
    );

    let result = options
        .run(DeployContext {
            chain,
            wallet: &wallet,
            deployer: &stellar,
            client: &stellar,
            domain_separator: &domain_separator,
        })
        .await;

    // Persist whatever was recorded, including the progress of a failed run.
    config.persist_outcome(&config_path, result)?;
    tracing::info!(contract = %args.contract_name, "✓ Deployment complete!");

    Ok(())
}

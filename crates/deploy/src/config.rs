//! Persisted chain configuration and contract registry.
//!
//! The config file is owned by other tooling as well, so every record keeps
//! the fields it does not model in an `extra` map and writes them back as-is.

use std::path::Path;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{DeployError, NetworkType};

/// A deployed (or adopted) contract as recorded in the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractRecord {
    /// The contract address.
    pub address: String,
    /// Public key of the wallet that deployed or adopted the contract.
    pub deployer: String,
    /// JSON projection of the arguments passed to `initialize`, if requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initialize_args: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ContractRecord {
    /// Create a record for a freshly deployed or adopted contract.
    pub fn new(address: impl Into<String>, deployer: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            deployer: deployer.into(),
            initialize_args: None,
            extra: Map::new(),
        }
    }
}

/// Per-network chain state, including the contract registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainState {
    /// Human-readable chain name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The chain's identifier on the Axelar network.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axelar_id: Option<String>,
    /// Soroban RPC endpoint.
    pub rpc: String,
    /// Network discriminator, selects the network passphrase. Only Stellar
    /// chains carry one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_type: Option<NetworkType>,
    /// Contract registry keyed by contract identifier, in file order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contracts: Option<IndexMap<String, ContractRecord>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChainState {
    /// Create a chain entry with an empty registry slot.
    pub fn new(rpc: impl Into<String>, network_type: NetworkType) -> Self {
        Self {
            name: None,
            axelar_id: None,
            rpc: rpc.into(),
            network_type: Some(network_type),
            contracts: None,
            extra: Map::new(),
        }
    }

    /// The Stellar network this chain points at.
    pub fn network_type(&self) -> Result<NetworkType, DeployError> {
        self.network_type.ok_or_else(|| {
            DeployError::InvalidConfig(format!(
                "chain `{}` has no networkType",
                self.name.as_deref().unwrap_or(&self.rpc)
            ))
        })
    }

    /// The network passphrase for this chain.
    pub fn network_passphrase(&self) -> Result<&'static str, DeployError> {
        Ok(self.network_type()?.passphrase())
    }

    /// The contract registry, created if the config did not have one yet.
    pub fn contracts_mut(&mut self) -> &mut IndexMap<String, ContractRecord> {
        self.contracts.get_or_insert_with(IndexMap::new)
    }

    /// Look up a recorded contract by identifier.
    pub fn contract(&self, identifier: &str) -> Option<&ContractRecord> {
        self.contracts.as_ref()?.get(identifier)
    }

    /// Address of a recorded contract, if any.
    pub fn contract_address(&self, identifier: &str) -> Option<&str> {
        self.contract(identifier).map(|record| record.address.as_str())
    }
}

/// Axelar network settings used to derive and verify the domain separator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxelarConfig {
    /// Axelar chain id, e.g. `axelar-testnet-lisbon-3`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<String>,
    /// LCD (REST) endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lcd: Option<String>,
    /// Amplifier contracts, keyed by contract name (`Router`, `MultisigProver`, ...).
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub contracts: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AxelarConfig {
    /// Address of the Axelar router contract.
    pub fn router_address(&self) -> Option<&str> {
        self.contracts.get("Router")?.get("address")?.as_str()
    }

    /// Address of the multisig prover deployed for the given chain.
    pub fn multisig_prover_address(&self, axelar_id: &str) -> Option<&str> {
        self.contracts
            .get("MultisigProver")?
            .get(axelar_id)?
            .get("address")?
            .as_str()
    }
}

/// The whole config file: Axelar settings plus chain states keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigStore {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axelar: Option<AxelarConfig>,
    #[serde(default)]
    pub chains: IndexMap<String, ChainState>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ConfigStore {
    /// Load the config from a JSON file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("Configuration file not found: {}", path.display());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Self =
            serde_json::from_str(&content).context("Failed to parse config file as JSON")?;
        tracing::debug!(path = %path.display(), chains = config.chains.len(), "Configuration loaded");
        Ok(config)
    }

    /// Save the config as pretty-printed JSON.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let mut content =
            serde_json::to_string_pretty(self).context("Failed to serialize config to JSON")?;
        content.push('\n');
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        tracing::info!(path = %path.display(), "Configuration saved");
        Ok(())
    }

    /// Save the config after a run, whatever its outcome.
    ///
    /// A failed run still leaves its partial progress on disk. The run's error
    /// wins over a save error, which is attached to it as context.
    pub fn persist_outcome<T>(&self, path: &Path, outcome: Result<T>) -> Result<T> {
        let saved = self.save_to_file(path);
        match (outcome, saved) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(err)) => Err(err),
            (Err(err), Ok(())) => Err(err),
            (Err(err), Err(save_err)) => {
                tracing::error!(error = %format!("{save_err:#}"), "Failed to save config after a failed run");
                Err(err.context(format!("config was not saved: {save_err:#}")))
            }
        }
    }

    /// Mutable access to a Stellar chain's state.
    pub fn chain_mut(&mut self, name: &str) -> Result<&mut ChainState, DeployError> {
        let chain = self.chains.get_mut(name).ok_or_else(|| {
            DeployError::InvalidConfig(format!("chain `{name}` not found in config"))
        })?;
        chain.network_type()?;
        Ok(chain)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempdir::TempDir;

    use super::*;

    fn sample() -> Value {
        json!({
            "axelar": {
                "chainId": "axelar-testnet-lisbon-3",
                "lcd": "https://lcd.example.org",
                "contracts": {
                    "Router": { "address": "axelar1router" },
                    "MultisigProver": { "stellar": { "address": "axelar1prover" }, "codeId": 3 }
                },
                "rpc": "https://rpc.example.org"
            },
            "chains": {
                "stellar": {
                    "name": "Stellar",
                    "axelarId": "stellar",
                    "rpc": "https://soroban-testnet.stellar.org",
                    "networkType": "testnet",
                    "tokenSymbol": "XLM",
                    "contracts": {
                        "axelar_operators": {
                            "address": "CAOPS",
                            "deployer": "GDEPLOYER",
                            "initializeArgs": { "owner": "GDEPLOYER" },
                            "version": "1.0.0"
                        }
                    }
                }
            },
            "version": 2
        })
    }

    #[test]
    fn test_parse_config_and_lookups() {
        let config: ConfigStore = serde_json::from_value(sample()).unwrap();
        let axelar = config.axelar.as_ref().unwrap();
        assert_eq!(axelar.router_address(), Some("axelar1router"));
        assert_eq!(axelar.multisig_prover_address("stellar"), Some("axelar1prover"));
        assert_eq!(axelar.multisig_prover_address("other"), None);

        let chain = &config.chains["stellar"];
        assert_eq!(chain.network_type, Some(NetworkType::Testnet));
        assert_eq!(chain.axelar_id.as_deref(), Some("stellar"));
        assert_eq!(chain.contract_address("axelar_operators"), Some("CAOPS"));
        assert_eq!(chain.contract_address("axelar_gateway"), None);
    }

    #[test]
    fn test_unknown_fields_survive_round_trip() {
        let config: ConfigStore = serde_json::from_value(sample()).unwrap();
        assert_eq!(serde_json::to_value(&config).unwrap(), sample());
    }

    #[test]
    fn test_save_keeps_file_order_and_absent_sections() {
        let dir = TempDir::new("axstellar-config").unwrap();
        let path = dir.path().join("testnet.json");
        let original = json!({
            "axelar": { "chainId": "axelar-testnet-lisbon-3" },
            "chains": {
                "stellar": {
                    "rpc": "https://soroban-testnet.stellar.org",
                    "networkType": "testnet",
                    "contracts": {
                        "axelar_operators": { "address": "CAOPS", "deployer": "GDEPLOYER" },
                        "axelar_auth_verifier": { "address": "CAUTH", "deployer": "GDEPLOYER" }
                    }
                },
                "avalanche": {
                    "name": "Avalanche",
                    "axelarId": "Avalanche",
                    "rpc": "https://api.avax-test.network/ext/bc/C/rpc",
                    "chainType": "evm"
                }
            }
        });
        let mut text = serde_json::to_string_pretty(&original).unwrap();
        text.push('\n');
        std::fs::write(&path, &text).unwrap();

        let config = ConfigStore::load_from_file(&path).unwrap();
        config.save_to_file(&path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), text);
    }

    #[test]
    fn test_contracts_mut_appends_after_existing_records() {
        let mut config: ConfigStore = serde_json::from_value(sample()).unwrap();
        let chain = config.chain_mut("stellar").unwrap();
        chain
            .contracts_mut()
            .insert("axelar_gateway".into(), ContractRecord::new("CGW", "GDEPLOYER"));

        let names: Vec<&str> = chain
            .contracts
            .as_ref()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(names, ["axelar_operators", "axelar_gateway"]);
    }

    #[test]
    fn test_chain_mut_requires_network_type() {
        let mut config: ConfigStore = serde_json::from_value(json!({
            "chains": {
                "avalanche": { "rpc": "https://api.avax-test.network/ext/bc/C/rpc" }
            }
        }))
        .unwrap();

        assert!(config.chains["avalanche"].network_type.is_none());
        assert!(matches!(
            config.chain_mut("avalanche"),
            Err(DeployError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_persist_outcome_saves_after_failed_run() {
        let dir = TempDir::new("axstellar-config").unwrap();
        let path = dir.path().join("testnet.json");
        let config: ConfigStore = serde_json::from_value(sample()).unwrap();

        let err = config
            .persist_outcome::<()>(&path, Err(DeployError::UnknownContract("x".into()).into()))
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<DeployError>(),
            Some(DeployError::UnknownContract(_))
        ));
        assert_eq!(ConfigStore::load_from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_persist_outcome_keeps_run_error_when_save_fails() {
        let dir = TempDir::new("axstellar-config").unwrap();
        let path = dir.path().join("missing").join("testnet.json");
        let config = ConfigStore::default();

        let err = config
            .persist_outcome::<()>(
                &path,
                Err(DeployError::RemoteCallFailed {
                    method: "initialize".into(),
                    reason: "rejected".into(),
                }
                .into()),
            )
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<DeployError>(),
            Some(DeployError::RemoteCallFailed { method, .. }) if method == "initialize"
        ));
        assert!(format!("{err:#}").contains("config was not saved"));
    }

    #[test]
    fn test_persist_outcome_reports_save_error_after_success() {
        let dir = TempDir::new("axstellar-config").unwrap();
        let path = dir.path().join("missing").join("testnet.json");

        let result = ConfigStore::default().persist_outcome(&path, Ok(7));
        assert!(result.is_err());
        assert_eq!(
            ConfigStore::default()
                .persist_outcome(&dir.path().join("testnet.json"), Ok(7))
                .unwrap(),
            7
        );
    }

    #[test]
    fn test_contracts_mut_creates_registry() {
        let mut chain = ChainState::new("http://localhost:8000/soroban/rpc", NetworkType::Local);
        assert!(chain.contracts.is_none());

        chain
            .contracts_mut()
            .insert("axelar_operators".into(), ContractRecord::new("CA", "GA"));
        assert_eq!(chain.contract_address("axelar_operators"), Some("CA"));
        assert_eq!(
            chain.network_passphrase().unwrap(),
            "Standalone Network ; February 2017"
        );
    }

    #[test]
    fn test_record_without_init_args_omits_field() {
        let record = ContractRecord::new("CA", "GA");
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({ "address": "CA", "deployer": "GA" })
        );
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = TempDir::new("axstellar-config").unwrap();
        let path = dir.path().join("testnet.json");

        let mut config: ConfigStore = serde_json::from_value(sample()).unwrap();
        config
            .chain_mut("stellar")
            .unwrap()
            .contracts_mut()
            .insert("axelar_gateway".into(), ContractRecord::new("CGW", "GDEPLOYER"));
        config.save_to_file(&path).unwrap();

        let loaded = ConfigStore::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new("axstellar-config").unwrap();
        assert!(ConfigStore::load_from_file(&dir.path().join("nope.json")).is_err());
    }

    #[test]
    fn test_chain_mut_unknown_chain() {
        let mut config = ConfigStore::default();
        assert!(matches!(
            config.chain_mut("stellar"),
            Err(DeployError::InvalidConfig(_))
        ));
    }
}

//! Domain separator resolution for the auth verifier.
//!
//! The expected separator is `keccak256(axelarId ++ routerAddress ++ axelarChainId)`.
//! It can be taken on trust (`offline`), cross-checked against the chain's
//! multisig prover on Axelar (online), or overridden with a literal hash.

use std::str::FromStr;

use alloy_core::primitives::{B256, keccak256};
use serde::Deserialize;

use crate::{AxelarConfig, ChainState, DeployError, Environment, lcd};

/// Where the domain separator comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainSeparatorSource {
    /// Compute it locally from the config, without network access.
    Offline,
    /// Compute it locally and check it against the value stored on Axelar.
    Online,
    /// Use the given hash as-is.
    Literal(B256),
}

impl From<&str> for DomainSeparatorSource {
    fn from(value: &str) -> Self {
        if value.eq_ignore_ascii_case("offline") {
            return DomainSeparatorSource::Offline;
        }
        match B256::from_str(value) {
            Ok(hash) => DomainSeparatorSource::Literal(hash),
            Err(_) => DomainSeparatorSource::Online,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProverConfig {
    domain_separator: String,
}

/// Resolves the domain separator for a chain.
#[derive(Debug, Clone)]
pub struct DomainSeparatorResolver {
    env: Environment,
    source: DomainSeparatorSource,
    axelar: Option<AxelarConfig>,
}

impl DomainSeparatorResolver {
    pub fn new(
        env: Environment,
        source: DomainSeparatorSource,
        axelar: Option<AxelarConfig>,
    ) -> Self {
        Self {
            env,
            source,
            axelar,
        }
    }

    /// Resolve the separator for `chain`.
    ///
    /// Only the online source performs a network call.
    pub async fn resolve(&self, chain: &ChainState) -> Result<B256, DeployError> {
        if self.env == Environment::Local {
            return Ok(match self.source {
                DomainSeparatorSource::Literal(hash) => hash,
                _ => B256::ZERO,
            });
        }

        if let DomainSeparatorSource::Literal(hash) = self.source {
            return Ok(hash);
        }

        let expected = self.expected(chain)?;
        if self.source == DomainSeparatorSource::Offline {
            return Ok(expected);
        }

        let actual = self.fetch(chain).await?;
        if actual != expected {
            return Err(DeployError::DomainSeparatorMismatch {
                expected: expected.to_string(),
                actual: actual.to_string(),
            });
        }

        Ok(expected)
    }

    /// Compute the separator from the Axelar config.
    pub fn expected(&self, chain: &ChainState) -> Result<B256, DeployError> {
        let axelar = self.axelar()?;
        let axelar_id = Self::axelar_id(chain)?;
        let router = axelar
            .router_address()
            .ok_or_else(|| DeployError::InvalidConfig("missing Axelar Router address".into()))?;
        let chain_id = axelar
            .chain_id
            .as_deref()
            .ok_or_else(|| DeployError::InvalidConfig("missing Axelar chain id".into()))?;

        Ok(calculate_domain_separator(axelar_id, router, chain_id))
    }

    async fn fetch(&self, chain: &ChainState) -> Result<B256, DeployError> {
        let axelar = self.axelar()?;
        let axelar_id = Self::axelar_id(chain)?;
        let lcd_url = axelar
            .lcd
            .as_deref()
            .ok_or_else(|| DeployError::InvalidConfig("missing Axelar LCD endpoint".into()))?;
        let prover = axelar.multisig_prover_address(axelar_id).ok_or_else(|| {
            DeployError::InvalidConfig(format!("missing MultisigProver address for {axelar_id}"))
        })?;

        let query = |e: anyhow::Error| DeployError::RemoteCallFailed {
            method: "config".to_string(),
            reason: format!("{e:#}"),
        };
        let client = lcd::create_client().map_err(query)?;
        let config: ProverConfig = lcd::query_contract_smart(
            &client,
            lcd_url,
            prover,
            &serde_json::Value::String("config".to_string()),
        )
        .await
        .map_err(query)?;

        B256::from_str(&config.domain_separator).map_err(|e| DeployError::RemoteCallFailed {
            method: "config".to_string(),
            reason: format!("invalid domain separator `{}`: {e}", config.domain_separator),
        })
    }

    fn axelar(&self) -> Result<&AxelarConfig, DeployError> {
        self.axelar
            .as_ref()
            .ok_or_else(|| DeployError::InvalidConfig("missing `axelar` section".into()))
    }

    fn axelar_id(chain: &ChainState) -> Result<&str, DeployError> {
        chain
            .axelar_id
            .as_deref()
            .ok_or_else(|| DeployError::InvalidConfig("missing or invalid axelarId for chain".into()))
    }
}

/// `keccak256(chain ++ router ++ network)` over the UTF-8 concatenation.
pub fn calculate_domain_separator(chain: &str, router: &str, network: &str) -> B256 {
    keccak256(format!("{chain}{router}{network}").as_bytes())
}

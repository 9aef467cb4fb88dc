//! Per-contract `initialize` argument derivation.

use alloy_core::primitives::keccak256;
use derive_more::Deref;
use serde_json::{Map, Value};

use crate::{ChainState, ContractKind, ContractValue, DeployError, DomainSeparatorResolver, Wallet};

/// How many previous signer sets the auth verifier keeps accepting.
pub const PREVIOUS_SIGNER_RETENTION: u64 = 15;

/// Minimum delay, in seconds, between two signer rotations.
pub const MINIMUM_ROTATION_DELAY: u64 = 0;

/// Ordered, named arguments for a contract's `initialize` method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref)]
pub struct InitializeArgs(Vec<(String, ContractValue)>);

impl InitializeArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an argument. Order of insertion is the call order.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ContractValue>) -> Self {
        self.0.push((name.into(), value.into()));
        self
    }

    /// Look up an argument by name.
    pub fn get(&self, name: &str) -> Option<&ContractValue> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// The JSON-safe projection persisted as `initializeArgs`.
    pub fn to_json(&self) -> Map<String, Value> {
        self.0
            .iter()
            .map(|(name, value)| (name.clone(), value.to_json()))
            .collect()
    }
}

/// A signer and its voting weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedSigner {
    pub signer: String,
    pub weight: u128,
}

/// The identities allowed to authorize actions on the auth verifier.
///
/// Threshold and weights are checked by the contract itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignerSet {
    pub nonce: [u8; 32],
    pub signers: Vec<WeightedSigner>,
    pub threshold: u128,
}

impl SignerSet {
    /// A set where the deploying wallet is the sole signer.
    pub fn bootstrap(wallet: &Wallet, nonce: [u8; 32]) -> Self {
        Self {
            nonce,
            signers: vec![WeightedSigner {
                signer: wallet.address().to_string(),
                weight: 1,
            }],
            threshold: 1,
        }
    }
}

impl From<&SignerSet> for ContractValue {
    fn from(set: &SignerSet) -> Self {
        let signers = set
            .signers
            .iter()
            .map(|s| {
                ContractValue::map([
                    ("signer", ContractValue::Address(s.signer.clone())),
                    ("weight", ContractValue::U128(s.weight)),
                ])
            })
            .collect();

        ContractValue::map([
            ("nonce", ContractValue::Bytes(set.nonce.to_vec())),
            ("signers", ContractValue::Vec(signers)),
            ("threshold", ContractValue::U128(set.threshold)),
        ])
    }
}

/// Derive a signer set nonce: keccak256 of the given string, or all zeroes.
pub fn signer_set_nonce(nonce: Option<&str>) -> [u8; 32] {
    match nonce {
        Some(nonce) => keccak256(nonce.as_bytes()).0,
        None => [0u8; 32],
    }
}

/// Builds `initialize` arguments for a contract kind.
///
/// Apart from an online domain separator lookup this reads its inputs only;
/// the registry is never modified.
#[derive(Debug, Clone)]
pub struct InitArgsBuilder<'a> {
    chain: &'a ChainState,
    wallet: &'a Wallet,
    domain_separator: &'a DomainSeparatorResolver,
    nonce: Option<&'a str>,
}

impl<'a> InitArgsBuilder<'a> {
    pub fn new(
        chain: &'a ChainState,
        wallet: &'a Wallet,
        domain_separator: &'a DomainSeparatorResolver,
    ) -> Self {
        Self {
            chain,
            wallet,
            domain_separator,
            nonce: None,
        }
    }

    /// Set the human-readable nonce hashed into the initial signer set.
    pub fn nonce(mut self, nonce: Option<&'a str>) -> Self {
        self.nonce = nonce;
        self
    }

    /// Build the arguments for a contract identifier.
    pub async fn build(&self, identifier: &str) -> Result<InitializeArgs, DeployError> {
        let kind = ContractKind::parse(identifier)?;
        self.build_for(kind).await
    }

    /// Build the arguments for a known contract kind.
    pub async fn build_for(&self, kind: ContractKind) -> Result<InitializeArgs, DeployError> {
        let owner = ContractValue::Address(self.wallet.address().to_string());

        let args = match kind {
            ContractKind::AxelarGateway => {
                let auth = ContractKind::AxelarAuthVerifier;
                let auth_address = self
                    .chain
                    .contract_address(&auth.identifier())
                    .ok_or(DeployError::MissingDependency {
                        dependent: kind,
                        dependency: auth,
                    })?;

                InitializeArgs::new()
                    .with("authAddress", ContractValue::Address(auth_address.to_string()))
                    .with("owner", owner)
            }
            ContractKind::AxelarAuthVerifier => {
                let domain_separator = self.domain_separator.resolve(self.chain).await?;
                let signer_set = SignerSet::bootstrap(self.wallet, signer_set_nonce(self.nonce));

                InitializeArgs::new()
                    .with("owner", owner)
                    .with(
                        "previousSignerRetention",
                        ContractValue::U64(PREVIOUS_SIGNER_RETENTION),
                    )
                    .with(
                        "domainSeparator",
                        ContractValue::Bytes(domain_separator.to_vec()),
                    )
                    .with(
                        "minimumRotationDelay",
                        ContractValue::U64(MINIMUM_ROTATION_DELAY),
                    )
                    .with(
                        "initialSigners",
                        ContractValue::Vec(vec![ContractValue::from(&signer_set)]),
                    )
            }
            ContractKind::AxelarOperators => InitializeArgs::new().with("owner", owner),
            ContractKind::AxelarGasService => InitializeArgs::new()
                .with("owner", owner.clone())
                .with("gasCollector", owner),
        };

        Ok(args)
    }
}

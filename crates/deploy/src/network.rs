//! Stellar network and deployment environment selectors.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// The Stellar network a chain entry points at.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum NetworkType {
    Local,
    Futurenet,
    Testnet,
    Mainnet,
}

impl NetworkType {
    /// The passphrase transactions on this network are signed against.
    pub fn passphrase(&self) -> &'static str {
        match self {
            NetworkType::Local => "Standalone Network ; February 2017",
            NetworkType::Futurenet => "Test SDF Future Network ; October 2022",
            NetworkType::Testnet => "Test SDF Network ; September 2015",
            NetworkType::Mainnet => "Public Global Stellar Network ; September 2015",
        }
    }

    /// The network id, i.e. the SHA-256 of the passphrase, hex-encoded.
    pub fn network_id(&self) -> String {
        hex::encode(Sha256::digest(self.passphrase().as_bytes()))
    }
}

/// The deployment environment, which also names the config file to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Environment {
    Local,
    Devnet,
    DevnetAmplifier,
    Stagenet,
    Testnet,
    Mainnet,
}

impl Environment {
    /// File name of this environment's config, e.g. `testnet.json`.
    pub fn config_file_name(&self) -> String {
        format!("{self}.json")
    }
}

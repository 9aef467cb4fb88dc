//! Signing identity used for deployments and contract calls.

use std::fmt;

use ed25519_dalek::SigningKey;
use stellar_strkey::ed25519::{PrivateKey, PublicKey};

use crate::DeployError;

/// A Stellar account able to sign deployments and contract calls.
///
/// The secret seed is kept in strkey form (`S...`) because the Stellar CLI
/// takes it verbatim as the transaction source.
#[derive(Clone)]
pub struct Wallet {
    secret: String,
    public_key: String,
}

impl Wallet {
    /// Resolve a wallet from a secret seed (`S...` strkey).
    pub fn from_secret(secret: &str) -> Result<Self, DeployError> {
        let secret = secret.trim();
        let private_key =
            PrivateKey::from_string(secret).map_err(|e| DeployError::InvalidKey(e.to_string()))?;

        let signing_key = SigningKey::from_bytes(&private_key.0);
        let public_key = PublicKey(signing_key.verifying_key().to_bytes()).to_string();

        Ok(Self {
            secret: secret.to_string(),
            public_key,
        })
    }

    /// The account public key as a `G...` strkey.
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// The account address. For Stellar accounts this is the public key.
    pub fn address(&self) -> &str {
        &self.public_key
    }

    /// The secret seed, passed as the signing source to the Stellar CLI.
    pub(crate) fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("public_key", &self.public_key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

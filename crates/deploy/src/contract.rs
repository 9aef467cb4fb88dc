//! The closed set of contract kinds this tool knows how to initialize.

use std::str::FromStr;

use crate::DeployError;

/// A contract kind, identified in the registry by its snake_case name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum ContractKind {
    AxelarGateway,
    AxelarAuthVerifier,
    AxelarOperators,
    AxelarGasService,
}

impl ContractKind {
    /// Resolve a contract identifier, failing with [`DeployError::UnknownContract`].
    pub fn parse(identifier: &str) -> Result<Self, DeployError> {
        Self::from_str(identifier).map_err(|_| DeployError::UnknownContract(identifier.to_string()))
    }

    /// The key under which this contract is recorded in the registry.
    pub fn identifier(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_identifiers_are_snake_case() {
        assert_eq!(ContractKind::AxelarGateway.identifier(), "axelar_gateway");
        assert_eq!(
            ContractKind::AxelarAuthVerifier.identifier(),
            "axelar_auth_verifier"
        );
        assert_eq!(ContractKind::AxelarOperators.identifier(), "axelar_operators");
        assert_eq!(ContractKind::AxelarGasService.identifier(), "axelar_gas_service");
    }

    #[test]
    fn test_parse_round_trips_every_kind() {
        for kind in ContractKind::iter() {
            assert_eq!(ContractKind::parse(&kind.identifier()).unwrap(), kind);
        }
    }

    #[test]
    fn test_parse_unknown_identifier() {
        let err = ContractKind::parse("axelar_token").unwrap_err();
        assert!(matches!(err, DeployError::UnknownContract(name) if name == "axelar_token"));
    }
}

//! Follow-up actions run after a contract has been initialized.

use crate::{
    BroadcastOptions, ChainState, ContractClient, ContractKind, ContractValue, DeployError,
    Invocation, Wallet,
};

/// An action tied to a contract kind, run after its `initialize` succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostDeployHook {
    /// Hand ownership of the auth verifier over to the freshly deployed gateway.
    TransferAuthVerifierOwnership,
}

impl PostDeployHook {
    /// The hook registered for `kind`, if any.
    pub fn for_contract(kind: ContractKind) -> Option<Self> {
        match kind {
            ContractKind::AxelarGateway => Some(PostDeployHook::TransferAuthVerifierOwnership),
            ContractKind::AxelarAuthVerifier
            | ContractKind::AxelarOperators
            | ContractKind::AxelarGasService => None,
        }
    }

    /// Run the hook against the current registry.
    pub async fn run<C: ContractClient>(
        &self,
        chain: &ChainState,
        wallet: &Wallet,
        client: &C,
        options: BroadcastOptions,
    ) -> Result<(), DeployError> {
        match self {
            PostDeployHook::TransferAuthVerifierOwnership => {
                let auth = ContractKind::AxelarAuthVerifier;
                let gateway = ContractKind::AxelarGateway;
                let missing = |dependency| DeployError::MissingDependency {
                    dependent: gateway,
                    dependency,
                };

                let auth_address = chain
                    .contract_address(&auth.identifier())
                    .ok_or_else(|| missing(auth))?;
                let gateway_address = chain
                    .contract_address(&gateway.identifier())
                    .ok_or_else(|| missing(gateway))?;

                let invocation = Invocation::call(
                    auth_address,
                    "transfer_ownership",
                    [(
                        "new_owner".to_string(),
                        ContractValue::Address(gateway_address.to_string()),
                    )],
                );

                client
                    .broadcast(
                        &invocation,
                        wallet,
                        chain,
                        "Transferred auth verifier ownership to gateway",
                        options,
                    )
                    .await?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_only_gateway_has_a_hook() {
        for kind in ContractKind::iter() {
            let hook = PostDeployHook::for_contract(kind);
            if kind == ContractKind::AxelarGateway {
                assert_eq!(hook, Some(PostDeployHook::TransferAuthVerifierOwnership));
            } else {
                assert_eq!(hook, None, "{kind} should have no hook");
            }
        }
    }
}

//! Command builders for the Stellar CLI.

use std::path::Path;

use crate::ContractValue;

/// Network and signing flags shared by every Stellar CLI command.
#[derive(Debug, Clone)]
struct NetworkArgs {
    source: String,
    rpc_url: String,
    network_passphrase: String,
}

impl NetworkArgs {
    fn extend(self, cmd: &mut Vec<String>) {
        cmd.extend([
            "--source".to_string(),
            self.source,
            "--rpc-url".to_string(),
            self.rpc_url,
            "--network-passphrase".to_string(),
            self.network_passphrase,
        ]);
    }
}

/// Builder for `stellar contract deploy`.
#[derive(Debug, Clone)]
pub struct DeployCmdBuilder {
    wasm: String,
    network: NetworkArgs,
}

impl DeployCmdBuilder {
    /// Create a deploy command for the given wasm, signing source and network.
    pub fn new(
        wasm: impl AsRef<Path>,
        source: impl Into<String>,
        rpc_url: impl Into<String>,
        network_passphrase: impl Into<String>,
    ) -> Self {
        Self {
            wasm: wasm.as_ref().display().to_string(),
            network: NetworkArgs {
                source: source.into(),
                rpc_url: rpc_url.into(),
                network_passphrase: network_passphrase.into(),
            },
        }
    }

    /// Build the arguments, without the binary itself.
    pub fn build(self) -> Vec<String> {
        let mut cmd = vec![
            "contract".to_string(),
            "deploy".to_string(),
            "--wasm".to_string(),
            self.wasm,
        ];
        self.network.extend(&mut cmd);
        cmd
    }
}

/// Builder for `stellar contract invoke`.
#[derive(Debug, Clone)]
pub struct InvokeCmdBuilder {
    contract: String,
    method: String,
    network: NetworkArgs,
    args: Vec<(String, String)>,
    estimate_cost: bool,
}

impl InvokeCmdBuilder {
    /// Create an invoke command for `method` on `contract`.
    pub fn new(
        contract: impl Into<String>,
        method: impl Into<String>,
        source: impl Into<String>,
        rpc_url: impl Into<String>,
        network_passphrase: impl Into<String>,
    ) -> Self {
        Self {
            contract: contract.into(),
            method: method.into(),
            network: NetworkArgs {
                source: source.into(),
                rpc_url: rpc_url.into(),
                network_passphrase: network_passphrase.into(),
            },
            args: Vec::new(),
            estimate_cost: false,
        }
    }

    /// Add a method argument. The flag is the snake_case form of `name`.
    pub fn arg(mut self, name: &str, value: &ContractValue) -> Self {
        self.args.push((snake_case(name), value.to_cli_arg()));
        self
    }

    /// Add several method arguments, in order.
    pub fn args<'a>(mut self, args: impl IntoIterator<Item = &'a (String, ContractValue)>) -> Self {
        for (name, value) in args {
            self = self.arg(name, value);
        }
        self
    }

    /// Simulate only and print the cost report.
    pub fn estimate_cost(mut self, estimate_cost: bool) -> Self {
        self.estimate_cost = estimate_cost;
        self
    }

    /// Build the arguments, without the binary itself.
    pub fn build(self) -> Vec<String> {
        let mut cmd = vec![
            "contract".to_string(),
            "invoke".to_string(),
            "--id".to_string(),
            self.contract,
        ];
        self.network.extend(&mut cmd);

        if self.estimate_cost {
            cmd.push("--cost".to_string());
            cmd.push("--send=no".to_string());
        }

        cmd.push("--".to_string());
        cmd.push(self.method);
        for (name, value) in self.args {
            cmd.push(format!("--{name}"));
            cmd.push(value);
        }

        cmd
    }
}

/// `authAddress` -> `auth_address`. Names already in snake_case are unchanged.
pub fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

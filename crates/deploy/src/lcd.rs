//! Queries against the Axelar LCD (Cosmos REST) endpoint.

use anyhow::Context;
use base64::{Engine, engine::general_purpose::STANDARD};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

/// Create an HTTP client for LCD requests.
///
/// No timeout is set; a slow endpoint blocks the run until it answers.
pub fn create_client() -> Result<reqwest::Client, anyhow::Error> {
    reqwest::Client::builder()
        .build()
        .context("Failed to create HTTP client")
}

/// Build the URL of a CosmWasm smart query.
///
/// The query message is JSON-encoded, then base64-encoded into the path.
pub fn smart_query_url(lcd: &str, contract: &str, msg: &Value) -> Result<Url, anyhow::Error> {
    let mut base = Url::parse(lcd).with_context(|| format!("Invalid LCD URL: {lcd}"))?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    let encoded = STANDARD.encode(msg.to_string());
    base.join(&format!("cosmwasm/wasm/v1/contract/{contract}/smart/{encoded}"))
        .context("Failed to build smart query URL")
}

/// Run a CosmWasm smart query and deserialize its `data` field.
pub async fn query_contract_smart<T: DeserializeOwned>(
    client: &reqwest::Client,
    lcd: &str,
    contract: &str,
    msg: &Value,
) -> Result<T, anyhow::Error> {
    let url = smart_query_url(lcd, contract, msg)?;
    tracing::debug!(%url, contract, "Querying contract");

    let response: Value = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to query contract {contract}"))?
        .json()
        .await
        .with_context(|| format!("Failed to parse query response from {contract}"))?;

    if let Some(message) = response.get("message").and_then(|m| m.as_str()) {
        anyhow::bail!("LCD error: {message}");
    }

    let data = response
        .get("data")
        .context("No data in query response")?
        .clone();

    serde_json::from_value(data).context("Failed to deserialize query data")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_smart_query_url() {
        let url = smart_query_url("https://lcd.example.org", "axelar1prover", &json!("config"))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://lcd.example.org/cosmwasm/wasm/v1/contract/axelar1prover/smart/ImNvbmZpZyI="
        );
    }

    #[test]
    fn test_smart_query_url_keeps_base_path() {
        let url = smart_query_url("https://example.org/lcd", "axelar1x", &json!("config")).unwrap();
        assert!(
            url.as_str()
                .starts_with("https://example.org/lcd/cosmwasm/wasm/v1/contract/axelar1x/smart/")
        );
    }

    #[test]
    fn test_smart_query_url_rejects_garbage() {
        assert!(smart_query_url("not a url", "axelar1x", &json!("config")).is_err());
    }
}

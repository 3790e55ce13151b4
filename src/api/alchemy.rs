//! Alchemy JSON-RPC client.
//!
//! Covers the two provider capabilities the supply computation needs:
//! - `alchemy_getTokenBalances` — token balance entries for one address
//! - `eth_call` — read-only `totalSupply()` on the token contract
//!
//! A client is request-scoped: the credential varies per caller, so a new
//! instance is built for every request that passes the credential gate.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

/// Function selector for `totalSupply()`.
const TOTAL_SUPPLY_SELECTOR: &str = "0x18160ddd";

// ============================================================================
// Wire Structures
// ============================================================================

/// JSON-RPC request wrapper
#[derive(Debug, Serialize)]
struct JsonRpcRequest<T> {
    jsonrpc: &'static str,
    id: &'static str,
    method: &'static str,
    params: T,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

/// Result of an `alchemy_getTokenBalances` query.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalancesResult {
    pub address: String,
    pub token_balances: Vec<TokenBalanceEntry>,
}

/// One balance entry; `token_balance` is a base-unit hex quantity.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalanceEntry {
    pub contract_address: String,
    pub token_balance: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
struct CallRequest<'a> {
    to: &'a str,
    data: &'a str,
}

// ============================================================================
// Alchemy Client
// ============================================================================

#[derive(Debug, Clone)]
pub struct AlchemyClient {
    api_key: String,
    rpc_url: String,
    client: Client,
}

impl AlchemyClient {
    /// Create a client bound to one caller's credential.
    pub fn new(api_key: &str, rpc_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client for Alchemy")?;

        Ok(Self {
            api_key: api_key.to_string(),
            rpc_url: rpc_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Fetch the balance entries held by `address` for a single token contract.
    pub async fn get_token_balances(
        &self,
        address: &str,
        contract_address: &str,
    ) -> Result<TokenBalancesResult> {
        debug!("Fetching token balances of {} for {}", address, contract_address);

        self.rpc_call("alchemy_getTokenBalances", (address, [contract_address]))
            .await
    }

    /// Read `totalSupply()` on the token contract; returns the raw base-unit
    /// quantity as a hex string.
    pub async fn call_total_supply(&self, contract_address: &str) -> Result<String> {
        debug!("Calling totalSupply() on {}", contract_address);

        let call = CallRequest {
            to: contract_address,
            data: TOTAL_SUPPLY_SELECTOR,
        };

        self.rpc_call("eth_call", (call, "latest")).await
    }

    async fn rpc_call<P, R>(&self, method: &'static str, params: P) -> Result<R>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let url = format!("{}/{}", self.rpc_url, self.api_key);

        let rpc_request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: "supply-api",
            method,
            params,
        };

        let response = self
            .client
            .post(&url)
            .json(&rpc_request)
            .send()
            .await
            .with_context(|| format!("Failed to send {} request to Alchemy", method))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("Alchemy API error: {} - {}", status, error_text);
            anyhow::bail!("Alchemy API error: {} - {}", status, error_text);
        }

        let rpc_response: JsonRpcResponse<R> = response
            .json()
            .await
            .with_context(|| format!("Failed to parse Alchemy {} response", method))?;

        if let Some(rpc_error) = rpc_response.error {
            anyhow::bail!("Alchemy RPC error {}: {}", rpc_error.code, rpc_error.message);
        }

        rpc_response
            .result
            .with_context(|| format!("Alchemy {} response missing result", method))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    #[test]
    fn test_token_balances_parsing() {
        let json = r#"{
            "address": "0x78605Df79524164911C144801f41e9811B7DB73D",
            "tokenBalances": [{
                "contractAddress": "0x1A4b46696b2bB4794Eb3D4c26f1c55F9170fa4C5",
                "tokenBalance": "0xde0b6b3a7640000",
                "error": null
            }]
        }"#;

        let result: TokenBalancesResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.token_balances.len(), 1);
        assert_eq!(
            result.token_balances[0].token_balance.as_deref(),
            Some("0xde0b6b3a7640000")
        );
        assert!(result.token_balances[0].error.is_none());
    }

    #[tokio::test]
    async fn test_get_token_balances_request_shape() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("POST", "/test-key")
            .match_body(Matcher::PartialJsonString(
                json!({
                    "jsonrpc": "2.0",
                    "method": "alchemy_getTokenBalances",
                    "params": ["0xabc", ["0xdef"]]
                })
                .to_string(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "jsonrpc": "2.0",
                    "id": "supply-api",
                    "result": {
                        "address": "0xabc",
                        "tokenBalances": [{
                            "contractAddress": "0xdef",
                            "tokenBalance": "0x0",
                            "error": null
                        }]
                    }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client =
            AlchemyClient::new("test-key", &server.url(), Duration::from_secs(5)).unwrap();
        let result = client.get_token_balances("0xabc", "0xdef").await.unwrap();

        mock.assert_async().await;
        assert_eq!(result.address, "0xabc");
        assert_eq!(result.token_balances[0].token_balance.as_deref(), Some("0x0"));
    }

    #[tokio::test]
    async fn test_http_error_is_surfaced() {
        let mut server = mockito::Server::new_async().await;

        let _mock = server
            .mock("POST", "/test-key")
            .with_status(429)
            .with_body("rate limited")
            .create_async()
            .await;

        let client =
            AlchemyClient::new("test-key", &server.url(), Duration::from_secs(5)).unwrap();
        let err = client
            .get_token_balances("0xabc", "0xdef")
            .await
            .unwrap_err();

        assert!(err.to_string().contains("429"));
    }

    #[tokio::test]
    async fn test_rpc_error_is_surfaced() {
        let mut server = mockito::Server::new_async().await;

        let _mock = server
            .mock("POST", "/bad-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "jsonrpc": "2.0",
                    "id": "supply-api",
                    "error": { "code": -32000, "message": "invalid api key" }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client =
            AlchemyClient::new("bad-key", &server.url(), Duration::from_secs(5)).unwrap();
        let err = client.call_total_supply("0xdef").await.unwrap_err();

        assert!(err.to_string().contains("invalid api key"));
    }
}

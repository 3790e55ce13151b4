use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;

// Mainnet defaults for the watched token. Every value can be overridden
// through the environment; the locked list is deployment-specific and has
// no default.
const DEFAULT_TOKEN_CONTRACT_ADDRESS: &str = "0x1A4b46696b2bB4794Eb3D4c26f1c55F9170fa4C5";
const DEFAULT_BURN_ADDRESS: &str = "0x000000000000000000000000000000000000dEaD";
const DEFAULT_TREASURY_ADDRESS: &str = "0x78605Df79524164911C144801f41e9811B7DB73D";
const DEFAULT_LP_WALLET_ADDRESS: &str = "0x5C128d25A21f681e678cB050E551A895c9309945";

const DEFAULT_ALCHEMY_RPC_URL: &str = "https://eth-mainnet.g.alchemy.com/v2";

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    pub api_host: String,
    pub api_port: u16,

    pub provider_rpc_url: String,
    pub provider_timeout_secs: u64,

    pub token_contract_address: String,
    pub burn_address: String,
    pub treasury_address: String,
    pub lp_wallet_address: String,
    /// Locked/vesting addresses, in the order they appear in responses.
    pub locked_addresses: Vec<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Comma-separated list; blank segments are dropped
        let locked_addresses = env::var("LOCKED_ADDRESSES")
            .map(|raw| {
                raw.split(',')
                    .map(|address| address.trim().to_string())
                    .filter(|address| !address.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            api_host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            api_port: env::var("API_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("Failed to parse API_PORT")?,

            provider_rpc_url: env::var("ALCHEMY_RPC_URL")
                .unwrap_or_else(|_| DEFAULT_ALCHEMY_RPC_URL.to_string()),
            provider_timeout_secs: env::var("PROVIDER_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .context("Failed to parse PROVIDER_TIMEOUT_SECS")?,

            token_contract_address: env::var("TOKEN_CONTRACT_ADDRESS")
                .unwrap_or_else(|_| DEFAULT_TOKEN_CONTRACT_ADDRESS.to_string()),
            burn_address: env::var("BURN_ADDRESS")
                .unwrap_or_else(|_| DEFAULT_BURN_ADDRESS.to_string()),
            treasury_address: env::var("TREASURY_ADDRESS")
                .unwrap_or_else(|_| DEFAULT_TREASURY_ADDRESS.to_string()),
            lp_wallet_address: env::var("LP_WALLET_ADDRESS")
                .unwrap_or_else(|_| DEFAULT_LP_WALLET_ADDRESS.to_string()),
            locked_addresses,
        })
    }
}

//! Request and Response DTOs for the Web API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::supply::normalize::format_token_amount;
use crate::supply::{NormalizedBalance, SupplySnapshot};

// ============================================================================
// Health
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

// ============================================================================
// Circulating Supply
// ============================================================================

/// Query parameters for the token-balances endpoint
#[derive(Debug, Deserialize)]
pub struct SupplyQuery {
    #[serde(rename = "alchemyApi")]
    pub alchemy_api: Option<String>,
}

/// One watched address and its token balance; `token_balance` is `null`
/// when the provider had no entry for the address.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressBalance {
    pub address: String,
    pub token_balance: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyResults {
    pub total_supply: String,
    pub treasury_balance: AddressBalance,
    pub lp_balance: AddressBalance,
    pub burned_balance: AddressBalance,
    pub locked_balances: Vec<AddressBalance>,
    pub circulating_supply: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyResponse {
    pub success: bool,
    pub status_code: u16,
    pub results: SupplyResults,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureResponse {
    pub success: bool,
    pub status_code: u16,
    pub message: String,
}

impl From<NormalizedBalance> for AddressBalance {
    fn from(balance: NormalizedBalance) -> Self {
        Self {
            address: balance.address,
            token_balance: balance.amount.as_ref().map(format_token_amount),
        }
    }
}

impl From<SupplySnapshot> for SupplyResults {
    fn from(snapshot: SupplySnapshot) -> Self {
        Self {
            total_supply: format_token_amount(&snapshot.total_supply),
            treasury_balance: snapshot.treasury_balance.into(),
            lp_balance: snapshot.lp_balance.into(),
            burned_balance: snapshot.burned_balance.into(),
            locked_balances: snapshot
                .locked_balances
                .into_iter()
                .map(Into::into)
                .collect(),
            circulating_supply: format_token_amount(&snapshot.circulating_supply),
        }
    }
}

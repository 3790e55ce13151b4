//! Parallel fetch orchestration and the circulating-supply arithmetic.

use bigdecimal::{BigDecimal, Zero};
use futures::future::try_join_all;
use std::time::Duration;
use tracing::{debug, info};

use crate::api::alchemy::AlchemyClient;
use crate::config::Config;
use crate::error::SupplyError;

use super::normalize::{format_token_amount, parse_base_units, to_token_amount};

/// Balance of one watched address, scaled to whole tokens.
///
/// `amount` is `None` when the provider returned no entry for the address;
/// it contributes zero to the aggregate either way.
#[derive(Debug, Clone)]
pub struct NormalizedBalance {
    pub address: String,
    pub amount: Option<BigDecimal>,
}

/// Aggregate supply picture, built fresh per request from live reads.
#[derive(Debug, Clone)]
pub struct SupplySnapshot {
    pub total_supply: BigDecimal,
    pub treasury_balance: NormalizedBalance,
    pub lp_balance: NormalizedBalance,
    pub burned_balance: NormalizedBalance,
    pub locked_balances: Vec<NormalizedBalance>,
    pub circulating_supply: BigDecimal,
}

/// Fetch and normalize the token balance held by `address`.
///
/// Only one contract is ever queried, so only the first entry matters.
pub async fn fetch_normalized_balance(
    client: &AlchemyClient,
    address: &str,
    contract_address: &str,
) -> Result<NormalizedBalance, SupplyError> {
    let balances = client
        .get_token_balances(address, contract_address)
        .await
        .map_err(|e| SupplyError::Provider(e.to_string()))?;

    let amount = match balances.token_balances.into_iter().next() {
        Some(entry) => {
            if let Some(entry_error) = entry.error {
                return Err(SupplyError::Provider(format!(
                    "balance lookup failed for {}: {}",
                    address, entry_error
                )));
            }
            match entry.token_balance {
                Some(raw) => {
                    let base_units = parse_base_units(&raw)
                        .map_err(|e| SupplyError::Aggregation(e.to_string()))?;
                    Some(to_token_amount(base_units))
                }
                None => None,
            }
        }
        None => None,
    };

    Ok(NormalizedBalance {
        address: address.to_string(),
        amount,
    })
}

/// Fetch the token's total supply as a whole-token decimal.
pub async fn fetch_total_supply(
    client: &AlchemyClient,
    contract_address: &str,
) -> Result<BigDecimal, SupplyError> {
    let raw = client
        .call_total_supply(contract_address)
        .await
        .map_err(|e| SupplyError::Provider(e.to_string()))?;

    let base_units = parse_base_units(&raw).map_err(|e| SupplyError::Aggregation(e.to_string()))?;

    Ok(to_token_amount(base_units))
}

/// Subtract every non-circulating balance from the total supply.
///
/// Exact decimal arithmetic; a transient provider inconsistency between
/// reads can drive the result negative and it is surfaced as-is.
pub fn circulating_supply(
    total_supply: &BigDecimal,
    treasury: &NormalizedBalance,
    lp: &NormalizedBalance,
    burned: &NormalizedBalance,
    locked: &[NormalizedBalance],
) -> BigDecimal {
    fn held(balance: &NormalizedBalance) -> BigDecimal {
        balance.amount.clone().unwrap_or_else(BigDecimal::zero)
    }

    let locked_total = locked
        .iter()
        .fold(BigDecimal::zero(), |total, balance| total + held(balance));

    total_supply.clone() - held(treasury) - held(lp) - held(burned) - locked_total
}

/// Run the full aggregation for one request.
///
/// Issues the total-supply read and every balance lookup concurrently and
/// waits for all of them; the first failure fails the whole snapshot, no
/// partial results.
pub async fn compute_supply_snapshot(
    config: &Config,
    api_key: &str,
) -> Result<SupplySnapshot, SupplyError> {
    if api_key.is_empty() {
        return Err(SupplyError::MissingCredential);
    }

    // Request-scoped client: the credential differs per caller
    let client = AlchemyClient::new(
        api_key,
        &config.provider_rpc_url,
        Duration::from_secs(config.provider_timeout_secs),
    )
    .map_err(|e| SupplyError::Provider(e.to_string()))?;

    let contract = config.token_contract_address.as_str();
    debug!(
        "Aggregating supply for {} across {} locked addresses",
        contract,
        config.locked_addresses.len()
    );

    let (total_supply, treasury_balance, lp_balance, burned_balance, locked_balances) = tokio::try_join!(
        fetch_total_supply(&client, contract),
        fetch_normalized_balance(&client, &config.treasury_address, contract),
        fetch_normalized_balance(&client, &config.lp_wallet_address, contract),
        fetch_normalized_balance(&client, &config.burn_address, contract),
        try_join_all(
            config
                .locked_addresses
                .iter()
                .map(|address| fetch_normalized_balance(&client, address, contract)),
        ),
    )?;

    let circulating = circulating_supply(
        &total_supply,
        &treasury_balance,
        &lp_balance,
        &burned_balance,
        &locked_balances,
    );
    info!("Circulating supply: {}", format_token_amount(&circulating));

    Ok(SupplySnapshot {
        total_supply,
        treasury_balance,
        lp_balance,
        burned_balance,
        locked_balances,
        circulating_supply: circulating,
    })
}

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ConnectWalletRequest {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub chain_id: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DisconnectWalletRequest {
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WalletConnection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub chain_id: Option<u64>,
    pub connected: bool,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WalletBalance {
    pub address: String,
    pub balance_wei: String,
    pub balance_eth: Decimal,
    pub eth_price: Decimal,
    pub balance_usd: Decimal,
    pub block_number: Option<u64>,
}

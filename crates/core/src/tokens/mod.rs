//! Supported token registry.
//!
//! Maps user-facing symbols ("ETH") to CoinGecko ids ("ethereum"). Tokens
//! outside the registry are passed through as ids when they look like one.

use serde::Serialize;

use crate::errors::{Error, Result};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct TokenInfo {
    pub id: &'static str,
    pub symbol: &'static str,
    pub name: &'static str,
}

impl TokenInfo {
    const fn new(id: &'static str, symbol: &'static str, name: &'static str) -> Self {
        Self { id, symbol, name }
    }
}

pub const SUPPORTED_TOKENS: &[TokenInfo] = &[
    TokenInfo::new("ethereum", "ETH", "Ethereum"),
    TokenInfo::new("bitcoin", "BTC", "Bitcoin"),
    TokenInfo::new("solana", "SOL", "Solana"),
    TokenInfo::new("usd-coin", "USDC", "USD Coin"),
    TokenInfo::new("tether", "USDT", "Tether"),
    TokenInfo::new("matic-network", "MATIC", "Polygon"),
    TokenInfo::new("chainlink", "LINK", "Chainlink"),
    TokenInfo::new("arbitrum", "ARB", "Arbitrum"),
    TokenInfo::new("binancecoin", "BNB", "BNB"),
    TokenInfo::new("avalanche-2", "AVAX", "Avalanche"),
];

/// Tokens returned by the multi-price endpoint when none are requested.
pub const DEFAULT_PRICE_TOKENS: &[&str] =
    &["ethereum", "bitcoin", "solana", "usd-coin", "chainlink"];

const MAX_TOKEN_ID_LEN: usize = 64;

/// Find a registered token by id or symbol, case-insensitively.
pub fn find_token(query: &str) -> Option<&'static TokenInfo> {
    let query = query.trim();
    SUPPORTED_TOKENS
        .iter()
        .find(|t| t.id.eq_ignore_ascii_case(query) || t.symbol.eq_ignore_ascii_case(query))
}

/// Resolve a symbol or id to the provider token id.
pub fn resolve_token_id(query: &str) -> Result<String> {
    if let Some(token) = find_token(query) {
        return Ok(token.id.to_string());
    }

    let candidate = query.trim().to_ascii_lowercase();
    let well_formed = !candidate.is_empty()
        && candidate.len() <= MAX_TOKEN_ID_LEN
        && candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-');
    if !well_formed {
        return Err(Error::invalid_input(format!("Invalid token: '{}'", query)));
    }
    Ok(candidate)
}

/// Display symbol for a token id, falling back to the uppercased id.
pub fn symbol_for(token_id: &str) -> String {
    find_token(token_id)
        .map(|t| t.symbol.to_string())
        .unwrap_or_else(|| token_id.to_ascii_uppercase())
}

pub fn default_price_tokens() -> Vec<String> {
    DEFAULT_PRICE_TOKENS.iter().map(|t| t.to_string()).collect()
}

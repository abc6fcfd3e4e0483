//! Ethereum chain reads.
//!
//! Only read-only calls are supported: gas price, account balance and
//! block height. No transaction is ever built or signed.

mod rpc;

pub use rpc::JsonRpcClient;

use async_trait::async_trait;

use crate::errors::MarketDataError;

const ADDRESS_HEX_LEN: usize = 40;

/// Read-only access to an EVM chain.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Current gas price in wei.
    async fn gas_price_wei(&self) -> Result<u128, MarketDataError>;

    /// Balance of an account at the latest block, in wei.
    async fn balance_wei(&self, address: &str) -> Result<u128, MarketDataError>;

    /// Latest block number.
    async fn block_number(&self) -> Result<u64, MarketDataError>;
}

/// Check that `address` is `0x` followed by 40 hex digits.
///
/// Returns the lowercase form. Checksums are not verified.
pub fn validate_address(address: &str) -> Result<String, MarketDataError> {
    let trimmed = address.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .ok_or_else(|| MarketDataError::InvalidAddress(address.to_string()))?;

    if digits.len() != ADDRESS_HEX_LEN || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(MarketDataError::InvalidAddress(address.to_string()));
    }

    Ok(format!("0x{}", digits.to_ascii_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_address_is_lowercased() {
        let addr = validate_address("0xAbCdEf0123456789abcdef0123456789ABCDEF01").unwrap();
        assert_eq!(addr, "0xabcdef0123456789abcdef0123456789abcdef01");
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let addr = validate_address("  0x0000000000000000000000000000000000000001 ").unwrap();
        assert_eq!(addr, "0x0000000000000000000000000000000000000001");
    }

    #[test]
    fn test_invalid_addresses() {
        for bad in [
            "",
            "0x",
            "abcdef0123456789abcdef0123456789abcdef01",
            "0xabcdef0123456789abcdef0123456789abcdef0",
            "0xabcdef0123456789abcdef0123456789abcdef012",
            "0xgggggg0123456789abcdef0123456789abcdef01",
        ] {
            assert!(
                matches!(validate_address(bad), Err(MarketDataError::InvalidAddress(_))),
                "expected {bad:?} to be rejected"
            );
        }
    }
}

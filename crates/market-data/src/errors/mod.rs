//! Error types for the market data crate.

use thiserror::Error;

/// Errors that can occur while talking to price providers or the chain.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The provider does not know the requested token.
    #[error("Token not found: {0}")]
    TokenNotFound(String),

    /// A provider returned an error or an unexpected payload.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The given string is not a well-formed account address.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// No chain RPC endpoint is configured.
    #[error("Ethereum RPC endpoint is not configured")]
    ChainUnavailable,

    /// The JSON-RPC node answered with an error object or bad result.
    #[error("RPC error in {method}: {message}")]
    Rpc {
        /// The JSON-RPC method that failed
        method: String,
        /// The error message
        message: String,
    },

    /// A network error occurred while communicating with an upstream.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// True when the failure came from an upstream service rather than
    /// from the caller's input.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::ProviderError { .. } | Self::Rpc { .. } | Self::Network(_)
        )
    }
}

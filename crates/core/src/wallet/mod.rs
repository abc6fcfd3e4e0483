//! Wallet module - address validation and on-chain balance reads.
//!
//! No session or key material is ever stored: connecting a wallet only
//! validates and normalizes its address.

mod wallet_model;
mod wallet_service;

pub use wallet_model::{
    ConnectWalletRequest, DisconnectWalletRequest, WalletBalance, WalletConnection,
};
pub use wallet_service::WalletService;

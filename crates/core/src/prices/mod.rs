//! Price service - cached token prices with a static fallback.

mod prices_service;

pub use prices_service::PriceService;

#[cfg(test)]
mod prices_service_tests;

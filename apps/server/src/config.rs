use std::{net::SocketAddr, time::Duration};

use anyhow::Context;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_CACHE_TTL_SECS: u64 = 30;

#[derive(Clone, Debug)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub coingecko_api_key: Option<String>,
    pub coingecko_base_url: Option<String>,
    pub ethereum_rpc_url: Option<String>,
    pub backend_url: Option<String>,
    pub worker_enabled: bool,
    pub price_cache_ttl: Duration,
    pub worker_id: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            cors_allow: vec!["*".to_string()],
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            coingecko_api_key: None,
            coingecko_base_url: None,
            ethereum_rpc_url: None,
            backend_url: None,
            worker_enabled: true,
            price_cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            worker_id: "worker-1".to_string(),
        }
    }
}

impl Config {
    /// Load `.env` (if present) and read the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let listen_addr: SocketAddr = match var("LOOTOS_LISTEN_ADDR") {
            Some(addr) => addr
                .parse()
                .with_context(|| format!("Invalid LOOTOS_LISTEN_ADDR '{}'", addr))?,
            None => {
                let port = var("PORT")
                    .and_then(|p| p.parse::<u16>().ok())
                    .unwrap_or(DEFAULT_PORT);
                SocketAddr::from(([0, 0, 0, 0], port))
            }
        };
        let cors_allow = var("LOOTOS_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = var("LOOTOS_REQUEST_TIMEOUT_MS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_MS);
        let cache_ttl_secs: u64 = var("LOOTOS_PRICE_CACHE_TTL_SECS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_CACHE_TTL_SECS);
        let worker_enabled = var("LOOTOS_WORKER_ENABLED")
            .map(|v| !matches!(v.to_ascii_lowercase().as_str(), "false" | "0" | "no" | "off"))
            .unwrap_or(true);

        Ok(Self {
            listen_addr,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            coingecko_api_key: var("COINGECKO_API_KEY"),
            coingecko_base_url: var("COINGECKO_BASE_URL"),
            ethereum_rpc_url: var("ETHEREUM_RPC_URL"),
            backend_url: var("BACKEND_URL"),
            worker_enabled,
            price_cache_ttl: Duration::from_secs(cache_ttl_secs),
            worker_id: var("HOSTNAME").unwrap_or_else(|| "worker-1".to_string()),
        })
    }
}

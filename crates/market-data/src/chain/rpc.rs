use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{validate_address, ChainClient};
use crate::errors::MarketDataError;
use crate::models::parse_hex_quantity;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// Ethereum JSON-RPC 2.0 client over HTTP.
pub struct JsonRpcClient {
    client: Client,
    url: String,
    next_id: AtomicU64,
}

impl JsonRpcClient {
    pub fn new(url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            url: url.into(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value, MarketDataError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };
        debug!("JSON-RPC call {} (id {})", method, request.id);

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let body: RpcResponse = response.json().await?;
        into_result(method, body)
    }

    async fn call_quantity(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<u128, MarketDataError> {
        let value = self.call(method, params).await?;
        quantity_from_value(method, &value)
    }
}

fn into_result(method: &str, body: RpcResponse) -> Result<Value, MarketDataError> {
    if let Some(err) = body.error {
        return Err(MarketDataError::Rpc {
            method: method.to_string(),
            message: format!("{} (code {})", err.message, err.code),
        });
    }
    body.result.ok_or_else(|| MarketDataError::Rpc {
        method: method.to_string(),
        message: "response has neither result nor error".to_string(),
    })
}

fn quantity_from_value(method: &str, value: &Value) -> Result<u128, MarketDataError> {
    value
        .as_str()
        .and_then(parse_hex_quantity)
        .ok_or_else(|| MarketDataError::Rpc {
            method: method.to_string(),
            message: format!("invalid quantity: {}", value),
        })
}

#[async_trait]
impl ChainClient for JsonRpcClient {
    async fn gas_price_wei(&self) -> Result<u128, MarketDataError> {
        self.call_quantity("eth_gasPrice", Vec::new()).await
    }

    async fn balance_wei(&self, address: &str) -> Result<u128, MarketDataError> {
        let address = validate_address(address)?;
        self.call_quantity(
            "eth_getBalance",
            vec![Value::String(address), Value::String("latest".to_string())],
        )
        .await
    }

    async fn block_number(&self) -> Result<u64, MarketDataError> {
        let block = self.call_quantity("eth_blockNumber", Vec::new()).await?;
        u64::try_from(block).map_err(|_| MarketDataError::Rpc {
            method: "eth_blockNumber".to_string(),
            message: format!("block number out of range: {}", block),
        })
    }
}

//! JSON-RPC implementation of [`ChainReader`].

use crate::provider::{CallRequest, ChainReader};
use async_trait::async_trait;
use dex_domain::SwapError;
use primitive_types::{H160, U256};
use serde_json::{Value, json};
use tracing::debug;

/// Read-only client over an EVM JSON-RPC endpoint.
#[derive(Debug, Clone)]
pub struct RpcClient {
    http: reqwest::Client,
    url: String,
}

impl RpcClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
        }
    }

    async fn request(&self, method: &str, params: Value) -> Result<Value, SwapError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        debug!(method, url = %self.url, "RPC request");

        let response = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| SwapError::Network(format!("{method}: {e}")))?;

        let payload: Value = response
            .json()
            .await
            .map_err(|e| SwapError::Network(format!("{method}: invalid response: {e}")))?;

        if let Some(err) = payload.get("error") {
            return Err(SwapError::Network(format!("{method}: {err}")));
        }

        payload
            .get("result")
            .cloned()
            .ok_or_else(|| SwapError::Network(format!("{method}: missing result")))
    }

    fn result_str(value: &Value, method: &str) -> Result<String, SwapError> {
        value
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| SwapError::Network(format!("{method}: non-string result")))
    }
}

#[async_trait]
impl ChainReader for RpcClient {
    async fn call(&self, request: CallRequest) -> Result<Vec<u8>, SwapError> {
        let params = json!([
            {
                "to": format!("{:#x}", request.to),
                "data": format!("0x{}", hex::encode(&request.data)),
            },
            "latest",
        ]);
        let result = self.request("eth_call", params).await?;
        decode_hex_bytes(&Self::result_str(&result, "eth_call")?)
    }

    async fn native_balance(&self, owner: H160) -> Result<U256, SwapError> {
        let params = json!([format!("{owner:#x}"), "latest"]);
        let result = self.request("eth_getBalance", params).await?;
        decode_quantity(&Self::result_str(&result, "eth_getBalance")?)
    }
}

fn decode_hex_bytes(s: &str) -> Result<Vec<u8>, SwapError> {
    let stripped = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(stripped).map_err(|e| SwapError::Network(format!("invalid hex in response: {e}")))
}

/// Parses an RPC quantity (`0x1a`), which unlike return data may carry an
/// odd number of nibbles.
fn decode_quantity(s: &str) -> Result<U256, SwapError> {
    let stripped = s.strip_prefix("0x").unwrap_or(s);
    let padded = if stripped.len() % 2 == 1 {
        format!("0{stripped}")
    } else {
        stripped.to_string()
    };
    let bytes = decode_hex_bytes(&padded)?;
    if bytes.len() > 32 {
        return Err(SwapError::Network(format!("quantity too large: {s}")));
    }
    Ok(U256::from_big_endian(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_quantity_handles_odd_nibbles() {
        assert_eq!(decode_quantity("0x1a").unwrap(), U256::from(26u64));
        assert_eq!(decode_quantity("0xa").unwrap(), U256::from(10u64));
        assert_eq!(decode_quantity("0x0").unwrap(), U256::zero());
    }

    #[test]
    fn test_decode_hex_bytes() {
        assert_eq!(decode_hex_bytes("0x00ff").unwrap(), vec![0x00, 0xff]);
        assert!(decode_hex_bytes("0xzz").is_err());
    }
}

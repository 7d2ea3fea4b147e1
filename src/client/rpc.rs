//! Default JSON-RPC transport.
//!
//! Uses ureq for lightweight RPC calls instead of a heavy node client.
//! This is the one place that touches raw receipts: the minted position
//! id is decoded here, against the deployment's transfer-event selector,
//! and handed to the core as a typed field.

use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::U256;
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::calls::{RouteNode, TokenAmount};
use crate::client::base::Provider;
use crate::core::{
    CallBatch, Confirmation, PoolKey, PoolPrice, ProtocolConfig, Quote, SdkError, SdkResult, Tick,
    TxHash,
};
use crate::protocol::math;

const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(2);
const RECEIPT_POLL_ATTEMPTS: u32 = 60;

pub struct JsonRpcProvider {
    url: String,
    config: Arc<ProtocolConfig>,
}

impl JsonRpcProvider {
    pub fn new(url: &str, config: Arc<ProtocolConfig>) -> Self {
        JsonRpcProvider {
            url: url.to_string(),
            config,
        }
    }

    fn call(&self, method: &str, params: Value) -> SdkResult<Value> {
        let payload = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let response = ureq::post(&self.url)
            .set("Content-Type", "application/json")
            .send_json(payload)
            .map_err(|e| SdkError::RpcError(format!("{method} failed: {e}")))?;

        let body: Value = response
            .into_json()
            .map_err(|e| SdkError::RpcError(format!("{method} returned invalid JSON: {e}")))?;

        if let Some(error) = body.get("error") {
            return Err(SdkError::RpcError(format!("{method} error: {error}")));
        }
        Ok(body.get("result").cloned().unwrap_or(Value::Null))
    }

    /// Scan receipt events for the position-NFT transfer minted from the
    /// zero address and return its token id.
    fn decode_minted_position_id(&self, events: &[Value]) -> Option<u64> {
        let positions = self.config.positions.felt();
        let selector = self.config.transfer_event_selector;
        events.iter().find_map(|event| {
            let from_contract = u256_field(event, "from_address").ok()?;
            if from_contract != positions {
                return None;
            }
            let keys = event.get("keys")?.as_array()?;
            if parse_u256(keys.first()?).ok()? != selector {
                return None;
            }
            let data = event.get("data")?.as_array()?;
            // Transfer(from, to, token_id): minted iff from is zero.
            if parse_u256(data.first()?).ok()? != U256::ZERO {
                return None;
            }
            let id_low = parse_u256(data.get(2)?).ok()?;
            id_low.try_into().ok()
        })
    }
}

#[async_trait]
impl Provider for JsonRpcProvider {
    async fn pool_price(&self, key: &PoolKey) -> SdkResult<PoolPrice> {
        let result = self.call("maelstrom_getPoolPrice", json!([key]))?;
        if result.is_null() {
            return Err(SdkError::PoolNotFound {
                fee_percent: math::fee_to_percent(key.fee),
                tick_spacing_percent: math::tick_spacing_to_percent(key.tick_spacing)?,
            });
        }
        let sqrt_ratio = u256_field(&result, "sqrt_ratio")?;
        let tick = result
            .get("tick")
            .ok_or_else(|| SdkError::RpcError("price response missing tick".into()))?;
        Ok(PoolPrice {
            sqrt_ratio,
            tick: Tick {
                magnitude: tick
                    .get("magnitude")
                    .and_then(Value::as_u64)
                    .ok_or_else(|| SdkError::RpcError("price response missing tick magnitude".into()))?
                    as u128,
                negative: tick
                    .get("negative")
                    .and_then(Value::as_bool)
                    .unwrap_or(false),
            },
        })
    }

    async fn quote(&self, node: &RouteNode, amount: &TokenAmount) -> SdkResult<Quote> {
        let result = self.call("maelstrom_quote", json!([node, amount]))?;
        if result.is_null() {
            return Err(SdkError::InsufficientQuote(
                "quoter returned no route for this trade".to_string(),
            ));
        }
        Ok(Quote {
            delta0: i128_field(&result, "delta0")?,
            delta1: i128_field(&result, "delta1")?,
        })
    }

    async fn submit(&self, batch: CallBatch) -> SdkResult<TxHash> {
        let result = self.call("account_submitCalls", json!([batch.calls()]))?;
        let hash = parse_u256(&result)?;
        debug!(tx_hash = %TxHash(hash), "batch accepted");
        Ok(TxHash(hash))
    }

    async fn wait_for_confirmation(&self, tx_hash: TxHash) -> SdkResult<Confirmation> {
        for _ in 0..RECEIPT_POLL_ATTEMPTS {
            let receipt = self.call("chain_getTransactionReceipt", json!([tx_hash]))?;
            if receipt.is_null() {
                std::thread::sleep(RECEIPT_POLL_INTERVAL);
                continue;
            }
            let succeeded = receipt
                .get("status")
                .and_then(Value::as_str)
                .map(|s| s == "succeeded")
                .unwrap_or(false);
            let revert_reason = receipt
                .get("revert_reason")
                .and_then(Value::as_str)
                .map(str::to_string);
            let events = receipt
                .get("events")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();
            return Ok(Confirmation {
                tx_hash,
                succeeded,
                revert_reason,
                minted_position_id: self.decode_minted_position_id(&events),
            });
        }
        Err(SdkError::RpcError(format!(
            "transaction {tx_hash} not confirmed after {RECEIPT_POLL_ATTEMPTS} polls"
        )))
    }
}

fn parse_u256(value: &Value) -> SdkResult<U256> {
    let s = value
        .as_str()
        .ok_or_else(|| SdkError::RpcError(format!("expected hex string, got {value}")))?;
    let digits = s.strip_prefix("0x").unwrap_or(s);
    U256::from_str_radix(digits, 16)
        .map_err(|e| SdkError::RpcError(format!("invalid hex value {s:?}: {e}")))
}

fn u256_field(value: &Value, field: &str) -> SdkResult<U256> {
    parse_u256(
        value
            .get(field)
            .ok_or_else(|| SdkError::RpcError(format!("response missing field {field:?}")))?,
    )
}

fn i128_field(value: &Value, field: &str) -> SdkResult<i128> {
    let v = value
        .get(field)
        .ok_or_else(|| SdkError::RpcError(format!("response missing field {field:?}")))?;
    match v {
        Value::String(s) => s
            .parse::<i128>()
            .map_err(|e| SdkError::RpcError(format!("invalid signed amount {s:?}: {e}"))),
        Value::Number(n) => n
            .as_i64()
            .map(i128::from)
            .ok_or_else(|| SdkError::RpcError(format!("invalid signed amount {n}"))),
        _ => Err(SdkError::RpcError(format!(
            "invalid signed amount {v} for field {field:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Address;

    #[test]
    fn minted_id_decode_requires_zero_sender_and_selector() {
        let config = Arc::new(ProtocolConfig::mainnet());
        let provider = JsonRpcProvider::new("http://localhost:5050", config.clone());
        let positions = config.positions;
        let selector = format!("{:#x}", config.transfer_event_selector);
        let owner = "0x0123";

        let minted = json!({
            "from_address": positions,
            "keys": [selector],
            "data": ["0x0", owner, "0x2a", "0x0"],
        });
        assert_eq!(provider.decode_minted_position_id(&[minted]), Some(42));

        // A regular transfer (non-zero sender) is not a mint.
        let moved = json!({
            "from_address": positions,
            "keys": [selector],
            "data": [owner, "0x0456", "0x2a", "0x0"],
        });
        assert_eq!(provider.decode_minted_position_id(&[moved]), None);

        // Events from other contracts are ignored.
        let other = json!({
            "from_address": Address::ZERO,
            "keys": [selector],
            "data": ["0x0", owner, "0x2a", "0x0"],
        });
        assert_eq!(provider.decode_minted_position_id(&[other]), None);
    }

    #[test]
    fn signed_amounts_parse_from_strings_and_numbers() {
        let body = json!({"delta0": "-5000", "delta1": 7000});
        assert_eq!(i128_field(&body, "delta0").unwrap(), -5000);
        assert_eq!(i128_field(&body, "delta1").unwrap(), 7000);
        assert!(i128_field(&body, "delta2").is_err());
    }
}

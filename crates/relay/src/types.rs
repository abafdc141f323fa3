//! JSON-RPC envelopes and relay method payloads.
use crate::RelayError;
use alloy::primitives::{Bytes, B256, U256, U64};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zkarnage_types::{AccountReputation, BundleStatus, TxStatus};

/// Simulate a bundle.
pub const CALL_BUNDLE: &str = "eth_callBundle";
/// Submit a bundle.
pub const SEND_BUNDLE: &str = "eth_sendBundle";
/// Cancel a bundle by replacement UUID.
pub const CANCEL_BUNDLE: &str = "eth_cancelBundle";
/// Query bundle progress.
pub const GET_BUNDLE_STATS: &str = "flashbots_getBundleStatsV2";
/// Query account reputation.
pub const GET_USER_STATS: &str = "flashbots_getUserStatsV2";

/// A JSON-RPC 2.0 request. Relay methods take a single-element params
/// array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonRpcRequest<P> {
    /// Always `"2.0"`.
    pub jsonrpc: String,
    /// Request id.
    pub id: u64,
    /// Method name.
    pub method: String,
    /// Method parameters.
    pub params: [P; 1],
}

impl<P> JsonRpcRequest<P> {
    /// Create a request for `method` with id 1.
    pub fn new(method: &str, params: P) -> Self {
        Self { jsonrpc: "2.0".to_string(), id: 1, method: method.to_string(), params: [params] }
    }

    /// The single parameter object.
    pub fn param(&self) -> &P {
        &self.params[0]
    }
}

/// A JSON-RPC error object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonRpcErrorObject {
    /// Error code.
    pub code: i64,
    /// Error message.
    pub message: String,
}

/// A JSON-RPC 2.0 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonRpcResponse<R> {
    /// Always `"2.0"`.
    #[serde(default)]
    pub jsonrpc: String,
    /// Echoed request id.
    #[serde(default)]
    pub id: Option<u64>,
    /// The result, on success.
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub result: Option<R>,
    /// The error, on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcErrorObject>,
}

impl<R> JsonRpcResponse<R> {
    /// A successful response.
    pub fn success(result: R) -> Self {
        Self { jsonrpc: "2.0".to_string(), id: Some(1), result: Some(result), error: None }
    }

    /// A failed response.
    pub fn failure(code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: Some(1),
            result: None,
            error: Some(JsonRpcErrorObject { code, message: message.into() }),
        }
    }

    /// Convert into a result. An error object wins over a result.
    pub fn into_result(self) -> Result<R, RelayError> {
        if let Some(JsonRpcErrorObject { code, message }) = self.error {
            return Err(RelayError::Rpc { code, message });
        }
        self.result.ok_or(RelayError::MissingField("result"))
    }
}

/// Parameters for [`CALL_BUNDLE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallBundleParams {
    /// Signed transactions.
    pub txs: Vec<Bytes>,
    /// Block the bundle is simulated for.
    pub block_number: U64,
    /// State to simulate on top of, usually `"latest"`.
    pub state_block_number: String,
}

/// Per-transaction simulation outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallBundleTxResult {
    /// Transaction hash.
    #[serde(default)]
    pub tx_hash: Option<B256>,
    /// Gas used.
    #[serde(default)]
    pub gas_used: Option<u64>,
    /// Execution error, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Revert reason, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revert: Option<String>,
}

impl CallBundleTxResult {
    /// The failure reason, if the transaction errored or reverted.
    pub fn failure(&self) -> Option<&str> {
        self.error.as_deref().or(self.revert.as_deref())
    }
}

/// Result of [`CALL_BUNDLE`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallBundleResponse {
    /// Relay-assigned bundle hash.
    #[serde(default)]
    pub bundle_hash: Option<B256>,
    /// Per-transaction results, in bundle order.
    #[serde(default)]
    pub results: Vec<CallBundleTxResult>,
}

/// Result of [`SEND_BUNDLE`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendBundleResponse {
    /// Relay-assigned bundle hash.
    #[serde(default)]
    pub bundle_hash: Option<B256>,
}

/// Parameters for [`CANCEL_BUNDLE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelBundleParams {
    /// The replacement UUID the bundle was submitted with.
    pub replacement_uuid: String,
}

/// Parameters for [`GET_BUNDLE_STATS`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleStatsParams {
    /// Bundle hash returned on submission.
    pub bundle_hash: B256,
    /// The block the bundle targets.
    pub block_number: U64,
}

/// A builder and the time it acted on a bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderTimestamp {
    /// Builder public key.
    pub pubkey: String,
    /// When the builder acted.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Result of [`GET_BUNDLE_STATS`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleStatsResponse {
    /// Whether the bundle was treated as high priority.
    #[serde(default)]
    pub is_high_priority: bool,
    /// Whether the relay simulated the bundle.
    #[serde(default)]
    pub is_simulated: bool,
    /// When the relay simulated the bundle.
    #[serde(default)]
    pub simulated_at: Option<DateTime<Utc>>,
    /// When the relay received the bundle.
    #[serde(default)]
    pub received_at: Option<DateTime<Utc>>,
    /// Builders that considered the bundle.
    #[serde(default)]
    pub considered_by_builders_at: Vec<BuilderTimestamp>,
    /// Builders that sealed a block with the bundle.
    #[serde(default)]
    pub sealed_by_builders_at: Vec<BuilderTimestamp>,
}

impl From<BundleStatsResponse> for BundleStatus {
    fn from(stats: BundleStatsResponse) -> Self {
        Self {
            simulated: stats.is_simulated,
            high_priority: stats.is_high_priority,
            received_at: stats.received_at,
            simulated_at: stats.simulated_at,
            considered_by: stats.considered_by_builders_at.into_iter().map(|b| b.pubkey).collect(),
            sealed_by: stats.sealed_by_builders_at.into_iter().map(|b| b.pubkey).collect(),
        }
    }
}

/// Parameters for [`GET_USER_STATS`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatsParams {
    /// A recent block number. The relay rejects stale ones.
    pub block_number: U64,
}

/// Result of [`GET_USER_STATS`]. Amounts are decimal strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatsResponse {
    /// Whether the account's bundles are high priority.
    #[serde(default)]
    pub is_high_priority: bool,
    /// Total validator payments, in wei.
    #[serde(default)]
    pub all_time_validator_payments: String,
    /// Total gas simulated.
    #[serde(default)]
    pub all_time_gas_simulated: String,
    /// Validator payments over the last 7 days.
    #[serde(default)]
    pub last_7d_validator_payments: String,
    /// Gas simulated over the last 7 days.
    #[serde(default)]
    pub last_7d_gas_simulated: String,
    /// Validator payments over the last day.
    #[serde(default)]
    pub last_1d_validator_payments: String,
    /// Gas simulated over the last day.
    #[serde(default)]
    pub last_1d_gas_simulated: String,
}

/// Parse a decimal amount. Empty strings count as zero.
fn parse_amount(field: &'static str, value: &str) -> Result<U256, RelayError> {
    if value.is_empty() {
        return Ok(U256::ZERO);
    }
    U256::from_str_radix(value, 10)
        .map_err(|_| RelayError::InvalidQuantity { field, value: value.to_string() })
}

impl TryFrom<UserStatsResponse> for AccountReputation {
    type Error = RelayError;

    fn try_from(stats: UserStatsResponse) -> Result<Self, Self::Error> {
        Ok(Self {
            high_priority: stats.is_high_priority,
            validator_payments: parse_amount(
                "allTimeValidatorPayments",
                &stats.all_time_validator_payments,
            )?,
            gas_simulated: parse_amount("allTimeGasSimulated", &stats.all_time_gas_simulated)?,
        })
    }
}

/// Response from the transaction status API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxStatusResponse {
    /// Reported status.
    #[serde(default)]
    pub status: TxStatus,
    /// Echoed transaction hash.
    #[serde(default)]
    pub hash: Option<B256>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_envelope() {
        let req = JsonRpcRequest::new(
            GET_USER_STATS,
            UserStatsParams { block_number: U64::from(19_000_000) },
        );
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "flashbots_getUserStatsV2",
                "params": [{ "blockNumber": "0x121eac0" }]
            })
        );
    }

    #[test]
    fn bundle_stats_params() {
        let params =
            BundleStatsParams { bundle_hash: B256::repeat_byte(0xab), block_number: U64::from(100) };
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["blockNumber"], "0x64");
        assert_eq!(json["bundleHash"], format!("0x{}", "ab".repeat(32)));
    }

    #[test]
    fn error_object_wins() {
        let resp: JsonRpcResponse<SendBundleResponse> = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": { "code": -32000, "message": "block number too old" }
        }))
        .unwrap();
        assert!(matches!(
            resp.into_result(),
            Err(RelayError::Rpc { code: -32000, message }) if message == "block number too old"
        ));
    }

    #[test]
    fn bundle_stats_conversion() {
        let stats: BundleStatsResponse = serde_json::from_value(json!({
            "isHighPriority": true,
            "isSimulated": true,
            "simulatedAt": "2024-06-01T12:00:01.123Z",
            "receivedAt": "2024-06-01T12:00:00.456Z",
            "consideredByBuildersAt": [
                { "pubkey": "0xaa", "timestamp": "2024-06-01T12:00:02Z" },
                { "pubkey": "0xbb", "timestamp": "2024-06-01T12:00:03Z" }
            ],
            "sealedByBuildersAt": [{ "pubkey": "0xbb", "timestamp": "2024-06-01T12:00:04Z" }]
        }))
        .unwrap();

        let status = BundleStatus::from(stats);
        assert!(status.simulated);
        assert!(status.high_priority);
        assert!(status.is_sealed());
        assert_eq!(status.considered_by.len(), 2);
        assert!(status.sealed_by.contains("0xbb"));
        assert!(status.received_at.unwrap() < status.simulated_at.unwrap());
    }

    #[test]
    fn user_stats_conversion() {
        let stats: UserStatsResponse = serde_json::from_value(json!({
            "isHighPriority": false,
            "allTimeValidatorPayments": "1280749594841472", "allTimeGasSimulated": "30049470846",
            "last7dValidatorPayments": "1280749594841472", "last7dGasSimulated": "30049470846",
            "last1dValidatorPayments": "142305510537941", "last1dGasSimulated": "2731770076"
        }))
        .unwrap();
        let rep = AccountReputation::try_from(stats).unwrap();
        assert!(!rep.high_priority);
        assert_eq!(rep.validator_payments, U256::from(1_280_749_594_841_472u64));
        assert_eq!(rep.gas_simulated, U256::from(30_049_470_846u64));

        let bad = UserStatsResponse {
            all_time_validator_payments: "lots".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            AccountReputation::try_from(bad),
            Err(RelayError::InvalidQuantity { field: "allTimeValidatorPayments", .. })
        ));
    }

    #[test]
    fn simulation_failures() {
        let ok = CallBundleTxResult::default();
        assert_eq!(ok.failure(), None);
        let reverted =
            CallBundleTxResult { revert: Some("out of gas".into()), ..Default::default() };
        assert_eq!(reverted.failure(), Some("out of gas"));
    }
}

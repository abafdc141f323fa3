use crate::{
    types::{
        BundleStatsParams, BundleStatsResponse, CallBundleParams, CallBundleResponse,
        CallBundleTxResult, CancelBundleParams, JsonRpcRequest, JsonRpcResponse,
        SendBundleResponse, TxStatusResponse, UserStatsParams, UserStatsResponse, CALL_BUNDLE,
        CANCEL_BUNDLE, GET_BUNDLE_STATS, GET_USER_STATS, SEND_BUNDLE,
    },
    RelayError, RelaySigner, Result, SIGNATURE_HEADER,
};
use alloy::primitives::{TxHash, B256, U64};
use reqwest::{header::CONTENT_TYPE, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, instrument, warn};
use url::Url;
use zkarnage_bundle::SignedBundle;
use zkarnage_types::{AccountReputation, AttackConfig, BundleStatus, TxStatus};

/// State block used for simulation unless told otherwise.
const LATEST: &str = "latest";

/// Outcome of a bundle simulation.
///
/// Transport and parse failures are folded into `success == false` with the
/// reason in `error`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulationResult {
    /// True only if the relay answered and every transaction simulated
    /// cleanly.
    pub success: bool,
    /// Bundle hash, if the relay produced one.
    pub bundle_hash: Option<B256>,
    /// Per-transaction results.
    pub results: Vec<CallBundleTxResult>,
    /// The first failure reason, if any.
    pub error: Option<String>,
}

impl SimulationResult {
    /// A failed simulation with no relay output.
    pub fn failed(error: impl ToString) -> Self {
        Self { error: Some(error.to_string()), ..Default::default() }
    }

    fn from_response(response: CallBundleResponse) -> Self {
        let error = response.results.iter().find_map(CallBundleTxResult::failure).map(Into::into);
        Self {
            success: error.is_none(),
            bundle_hash: response.bundle_hash,
            results: response.results,
            error,
        }
    }
}

/// Authenticated client for a Flashbots-style relay.
///
/// Bundle methods are signed JSON-RPC POSTs to `url`. Transaction status
/// lookups are plain GETs against `status_url`, which should end in a slash.
#[derive(Debug, Clone)]
pub struct RelayClient {
    url: Url,
    status_url: Url,
    client: reqwest::Client,
    signer: RelaySigner,
}

impl RelayClient {
    /// Create a new client with the given URLs and a new reqwest client.
    pub fn new(url: Url, status_url: Url, signer: impl Into<RelaySigner>) -> Self {
        Self::new_with_client(url, status_url, signer, reqwest::Client::new())
    }

    /// Create a new client using a specific reqwest client.
    pub fn new_with_client(
        url: Url,
        status_url: Url,
        signer: impl Into<RelaySigner>,
        client: reqwest::Client,
    ) -> Self {
        Self { url, status_url, client, signer: signer.into() }
    }

    /// Create a client from the loaded configuration, authenticating with
    /// the configured relay key.
    pub fn from_config(config: &AttackConfig) -> Self {
        Self::new(
            config.relay_url().clone(),
            config.status_url().clone(),
            config.auth_signer().clone(),
        )
    }

    /// Get the relay URL.
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Get the transaction status API URL.
    pub const fn status_url(&self) -> &Url {
        &self.status_url
    }

    /// Get the request signer.
    pub const fn signer(&self) -> &RelaySigner {
        &self.signer
    }

    /// Get the client used to send requests.
    pub const fn client(&self) -> &reqwest::Client {
        &self.client
    }

    async fn call_raw<P, R>(&self, method: &'static str, params: P) -> Result<JsonRpcResponse<R>>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let body = serde_json::to_vec(&JsonRpcRequest::new(method, params))?;
        let signature = self.signer.sign(&body)?;

        let response = self
            .client
            .post(self.url.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(SIGNATURE_HEADER, signature)
            .body(body)
            .send()
            .await
            .inspect_err(|e| warn!(%e, method, "Failed to reach relay"))?;

        let status = response.status();
        let text = response.text().await?;
        if status != StatusCode::OK {
            warn!(%status, method, body = %text, "Relay returned an error status");
            return Err(RelayError::Status { status, body: text });
        }

        serde_json::from_str(&text)
            .inspect_err(|e| warn!(%e, method, "Failed to parse response from relay"))
            .map_err(Into::into)
    }

    async fn call<P, R>(&self, method: &'static str, params: P) -> Result<R>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        self.call_raw(method, params)
            .await?
            .into_result()
            .inspect_err(|e| debug!(%e, method, "Relay call failed"))
    }

    /// Simulate a bundle against `state_block` (default `"latest"`).
    ///
    /// Success requires every transaction in the bundle to execute without
    /// error or revert. Only a failure to sign the request is returned as an
    /// error; transport and parse failures become a failed result.
    #[instrument(skip_all, fields(target_block = bundle.target_block()))]
    pub async fn simulate(
        &self,
        bundle: &SignedBundle,
        state_block: Option<&str>,
    ) -> Result<SimulationResult> {
        let params = CallBundleParams {
            txs: bundle.txs().to_vec(),
            block_number: U64::from(bundle.target_block()),
            state_block_number: state_block.unwrap_or(LATEST).to_string(),
        };

        match self.call::<_, CallBundleResponse>(CALL_BUNDLE, params).await {
            Ok(response) => {
                let result = SimulationResult::from_response(response);
                debug!(
                    success = result.success,
                    bundle_hash = ?result.bundle_hash,
                    "simulated bundle"
                );
                Ok(result)
            }
            Err(e) if e.is_signing() => Err(e),
            Err(e) => Ok(SimulationResult::failed(e)),
        }
    }

    /// Submit a bundle, returning the relay-assigned bundle hash.
    #[instrument(skip_all, fields(target_block = bundle.target_block()))]
    pub async fn submit(&self, bundle: &SignedBundle) -> Result<B256> {
        let response: SendBundleResponse = self.call(SEND_BUNDLE, bundle).await?;
        response.bundle_hash.ok_or(RelayError::MissingField("bundleHash"))
    }

    /// Fetch the relay's view of a submitted bundle. Stats are keyed by the
    /// target block, so it is required.
    #[instrument(skip_all, fields(bundle_hash = %bundle_hash, target_block = target_block))]
    pub async fn bundle_status(&self, bundle_hash: B256, target_block: u64) -> Result<BundleStatus> {
        let params = BundleStatsParams { bundle_hash, block_number: U64::from(target_block) };
        let stats: BundleStatsResponse = self.call(GET_BUNDLE_STATS, params).await?;
        Ok(stats.into())
    }

    /// Fetch the signing account's reputation as of a recent block.
    #[instrument(skip_all, fields(block_number = block_number))]
    pub async fn user_stats(&self, block_number: u64) -> Result<AccountReputation> {
        let params = UserStatsParams { block_number: U64::from(block_number) };
        let stats: UserStatsResponse = self.call(GET_USER_STATS, params).await?;
        stats.try_into()
    }

    /// Cancel a bundle by the replacement UUID it was submitted with.
    #[instrument(skip_all, fields(replacement_uuid = replacement_uuid))]
    pub async fn cancel(&self, replacement_uuid: &str) -> Result<()> {
        let params = CancelBundleParams { replacement_uuid: replacement_uuid.to_string() };
        let response: JsonRpcResponse<serde_json::Value> =
            self.call_raw(CANCEL_BUNDLE, params).await?;
        match response.error {
            Some(e) => Err(RelayError::Rpc { code: e.code, message: e.message }),
            None => Ok(()),
        }
    }

    /// Look up a single transaction in the status API.
    #[instrument(skip_all, fields(tx_hash = %tx_hash))]
    pub async fn transaction_status(&self, tx_hash: TxHash) -> Result<TxStatus> {
        let url = self
            .status_url
            .join(&format!("tx/{tx_hash}"))
            .inspect_err(|e| warn!(%e, "Failed to join status URL"))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .inspect_err(|e| warn!(%e, "Failed to reach status API"))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::Status { status, body });
        }

        let response: TxStatusResponse = response.json().await?;
        Ok(response.status)
    }
}

//! An in-memory [`BundleRelay`].
use alloy::primitives::{TxHash, B256};
use reqwest::StatusCode;
use std::sync::{Arc, Mutex};
use zkarnage_attack::BundleRelay;
use zkarnage_bundle::SignedBundle;
use zkarnage_relay::{RelayError, SimulationResult};
use zkarnage_types::{AccountReputation, BundleStatus, TxStatus};

/// The bundle hash a default [`MockRelay`] returns.
pub const MOCK_BUNDLE_HASH: B256 = B256::repeat_byte(0xb0);

#[derive(Debug)]
struct RelayState {
    simulation: SimulationResult,
    submit_hash: Option<B256>,
    unreachable: bool,
    signing_fails: bool,
    bundle_status: BundleStatus,
    user_stats: Option<AccountReputation>,
    tx_status: TxStatus,

    simulated: Vec<SignedBundle>,
    submitted: Vec<SignedBundle>,
    cancelled: Vec<String>,
    status_queries: usize,
    user_stats_queries: Vec<u64>,
}

/// A mock relay that accepts everything by default and captures what it is
/// sent.
#[derive(Debug, Clone)]
pub struct MockRelay {
    state: Arc<Mutex<RelayState>>,
}

impl Default for MockRelay {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRelay {
    /// Create a relay that simulates cleanly, accepts submissions and
    /// reports the account as high priority.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(RelayState {
                simulation: SimulationResult {
                    success: true,
                    bundle_hash: Some(MOCK_BUNDLE_HASH),
                    ..Default::default()
                },
                submit_hash: Some(MOCK_BUNDLE_HASH),
                unreachable: false,
                signing_fails: false,
                bundle_status: BundleStatus::default(),
                user_stats: Some(AccountReputation { high_priority: true, ..Default::default() }),
                tx_status: TxStatus::Unknown,
                simulated: Vec::new(),
                submitted: Vec::new(),
                cancelled: Vec::new(),
                status_queries: 0,
                user_stats_queries: Vec::new(),
            })),
        }
    }

    /// Return `simulation` for every simulation.
    pub fn with_simulation(self, simulation: SimulationResult) -> Self {
        self.state.lock().unwrap().simulation = simulation;
        self
    }

    /// Return `hash` from submissions. `None` models a response without a
    /// bundle hash.
    pub fn with_submit_hash(self, hash: Option<B256>) -> Self {
        self.state.lock().unwrap().submit_hash = hash;
        self
    }

    /// Answer every call except simulation with a 503.
    pub fn with_unreachable(self) -> Self {
        self.state.lock().unwrap().unreachable = true;
        self
    }

    /// Fail to sign every request, simulation included.
    pub fn with_signing_failure(self) -> Self {
        self.state.lock().unwrap().signing_fails = true;
        self
    }

    /// Report `status` for every bundle.
    pub fn with_bundle_status(self, status: BundleStatus) -> Self {
        self.state.lock().unwrap().bundle_status = status;
        self
    }

    /// Report `stats` for the account. `None` makes the lookup fail.
    pub fn with_user_stats(self, stats: Option<AccountReputation>) -> Self {
        self.state.lock().unwrap().user_stats = stats;
        self
    }

    /// Report `status` from the transaction status API.
    pub fn with_tx_status(self, status: TxStatus) -> Self {
        self.state.lock().unwrap().tx_status = status;
        self
    }

    /// Bundles sent for simulation.
    pub fn simulated_bundles(&self) -> Vec<SignedBundle> {
        self.state.lock().unwrap().simulated.clone()
    }

    /// Bundles submitted.
    pub fn submitted_bundles(&self) -> Vec<SignedBundle> {
        self.state.lock().unwrap().submitted.clone()
    }

    /// Replacement UUIDs cancelled.
    pub fn cancelled(&self) -> Vec<String> {
        self.state.lock().unwrap().cancelled.clone()
    }

    /// How many bundle status queries were made.
    pub fn status_queries(&self) -> usize {
        self.state.lock().unwrap().status_queries
    }

    /// Block numbers user stats were requested for.
    pub fn user_stats_queries(&self) -> Vec<u64> {
        self.state.lock().unwrap().user_stats_queries.clone()
    }

    fn signing_error() -> RelayError {
        RelayError::Signing(alloy::signers::Error::other("mock signer unavailable"))
    }

    fn check(state: &RelayState) -> Result<(), RelayError> {
        if state.signing_fails {
            return Err(Self::signing_error());
        }
        if state.unreachable {
            return Err(RelayError::Status {
                status: StatusCode::SERVICE_UNAVAILABLE,
                body: "mock relay unavailable".to_string(),
            });
        }
        Ok(())
    }
}

impl BundleRelay for MockRelay {
    async fn simulate(&self, bundle: &SignedBundle) -> Result<SimulationResult, RelayError> {
        let mut state = self.state.lock().unwrap();
        if state.signing_fails {
            return Err(Self::signing_error());
        }
        state.simulated.push(bundle.clone());
        Ok(state.simulation.clone())
    }

    async fn submit(&self, bundle: &SignedBundle) -> Result<B256, RelayError> {
        let mut state = self.state.lock().unwrap();
        Self::check(&state)?;
        state.submitted.push(bundle.clone());
        state.submit_hash.ok_or(RelayError::MissingField("bundleHash"))
    }

    async fn bundle_status(
        &self,
        _bundle_hash: B256,
        _target_block: u64,
    ) -> Result<BundleStatus, RelayError> {
        let mut state = self.state.lock().unwrap();
        Self::check(&state)?;
        state.status_queries += 1;
        Ok(state.bundle_status.clone())
    }

    async fn user_stats(&self, block_number: u64) -> Result<AccountReputation, RelayError> {
        let mut state = self.state.lock().unwrap();
        Self::check(&state)?;
        state.user_stats_queries.push(block_number);
        state.user_stats.ok_or_else(|| RelayError::Rpc {
            code: -32000,
            message: "block number too old".to_string(),
        })
    }

    async fn transaction_status(&self, _tx_hash: TxHash) -> Result<TxStatus, RelayError> {
        let state = self.state.lock().unwrap();
        Self::check(&state)?;
        Ok(state.tx_status)
    }

    async fn cancel(&self, replacement_uuid: &str) -> Result<(), RelayError> {
        let mut state = self.state.lock().unwrap();
        Self::check(&state)?;
        state.cancelled.push(replacement_uuid.to_string());
        Ok(())
    }
}

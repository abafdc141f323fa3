use alloy::primitives::{Address, TxHash, B256};
use core::future::Future;
use zkarnage_bundle::SignedBundle;
use zkarnage_relay::{RelayError, SimulationResult};
use zkarnage_types::{AccountReputation, BundleStatus, ObservedTx, TxStatus};

/// Read access to the chain being attacked.
///
/// Implementors answer from the chain's current view; nothing is cached
/// between calls.
pub trait ChainReader {
    /// The error type returned by chain queries.
    type Error: core::error::Error + Send + Sync + 'static;

    /// Current head block number.
    fn block_number(&self) -> impl Future<Output = Result<u64, Self::Error>> + Send;

    /// Base fee of the latest block, in wei.
    fn base_fee(&self) -> impl Future<Output = Result<u128, Self::Error>> + Send;

    /// Number of transactions sent by `account`, which is its next nonce.
    fn transaction_count(
        &self,
        account: Address,
    ) -> impl Future<Output = Result<u64, Self::Error>> + Send;

    /// Transactions in block `number`, or `None` if the block is unknown.
    fn block_transactions(
        &self,
        number: u64,
    ) -> impl Future<Output = Result<Option<Vec<ObservedTx>>, Self::Error>> + Send;

    /// Receipt success flag for `hash`, or `None` if there is no receipt.
    fn receipt_status(
        &self,
        hash: TxHash,
    ) -> impl Future<Output = Result<Option<bool>, Self::Error>> + Send;
}

/// A bundle relay.
///
/// Implementors are responsible for authenticating requests. Simulation
/// folds relay failures into its result and only reports failures to sign
/// the request; every other call reports all failures.
pub trait BundleRelay {
    /// Simulate a bundle against the latest state.
    fn simulate(
        &self,
        bundle: &SignedBundle,
    ) -> impl Future<Output = Result<SimulationResult, RelayError>> + Send;

    /// Submit a bundle, returning its bundle hash.
    fn submit(&self, bundle: &SignedBundle)
        -> impl Future<Output = Result<B256, RelayError>> + Send;

    /// Fetch progress for a submitted bundle.
    fn bundle_status(
        &self,
        bundle_hash: B256,
        target_block: u64,
    ) -> impl Future<Output = Result<BundleStatus, RelayError>> + Send;

    /// Fetch the signing account's reputation.
    fn user_stats(
        &self,
        block_number: u64,
    ) -> impl Future<Output = Result<AccountReputation, RelayError>> + Send;

    /// Look up a single transaction's status.
    fn transaction_status(
        &self,
        tx_hash: TxHash,
    ) -> impl Future<Output = Result<TxStatus, RelayError>> + Send;

    /// Cancel a bundle by replacement UUID.
    fn cancel(&self, replacement_uuid: &str)
        -> impl Future<Output = Result<(), RelayError>> + Send;
}

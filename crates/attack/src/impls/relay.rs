use crate::BundleRelay;
use alloy::primitives::{TxHash, B256};
use zkarnage_bundle::SignedBundle;
use zkarnage_relay::{RelayClient, RelayError, SimulationResult};
use zkarnage_types::{AccountReputation, BundleStatus, TxStatus};

impl BundleRelay for RelayClient {
    async fn simulate(&self, bundle: &SignedBundle) -> Result<SimulationResult, RelayError> {
        RelayClient::simulate(self, bundle, None).await
    }

    async fn submit(&self, bundle: &SignedBundle) -> Result<B256, RelayError> {
        RelayClient::submit(self, bundle).await
    }

    async fn bundle_status(
        &self,
        bundle_hash: B256,
        target_block: u64,
    ) -> Result<BundleStatus, RelayError> {
        RelayClient::bundle_status(self, bundle_hash, target_block).await
    }

    async fn user_stats(&self, block_number: u64) -> Result<AccountReputation, RelayError> {
        RelayClient::user_stats(self, block_number).await
    }

    async fn transaction_status(&self, tx_hash: TxHash) -> Result<TxStatus, RelayError> {
        RelayClient::transaction_status(self, tx_hash).await
    }

    async fn cancel(&self, replacement_uuid: &str) -> Result<(), RelayError> {
        RelayClient::cancel(self, replacement_uuid).await
    }
}

use crate::{AttackOptions, BundleRelay, ChainReader};
use alloy::primitives::{Address, TxHash, B256};
use std::{collections::BTreeSet, time::Duration};
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{debug, info, instrument, warn};

/// A submitted bundle being tracked.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TrackedBundle {
    /// Relay-assigned bundle hash.
    pub bundle_hash: B256,
    /// Hash of the attack transaction.
    pub tx_hash: TxHash,
    /// The attacking account.
    pub sender: Address,
    /// Block the bundle targets.
    pub target_block: u64,
    /// How long the bundle stays valid from the start of tracking. Tracking
    /// gives up once this lapses before the target block arrives.
    pub valid_for: Duration,
}

/// How a tracked bundle resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Found in the target block with a successful receipt.
    Included {
        /// The block it landed in.
        block: u64,
    },
    /// Found in the target block, but the transaction reverted.
    Reverted {
        /// The block it landed in.
        block: u64,
    },
    /// Not found in the block, but the status API reports it included.
    IncludedPerStatusApi,
    /// Not found anywhere.
    Missing,
    /// Builders sealed a block with the bundle, but it is not on chain.
    /// Usually the builder was outbid or discarded the block.
    SealedButMissing {
        /// Builders that reported sealing the bundle.
        builders: BTreeSet<String>,
    },
    /// The bundle's validity lapsed before the target block arrived.
    Expired,
}

impl Resolution {
    /// True if the attack transaction landed and succeeded.
    pub const fn is_included(&self) -> bool {
        matches!(self, Self::Included { .. } | Self::IncludedPerStatusApi)
    }
}

/// Where an [`InclusionTracker`] is in its lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TrackerState {
    /// Polling the chain head until the target block arrives.
    #[default]
    WaitingForBlock,
    /// The target block has been produced.
    BlockReached,
    /// Scanning the target block for the attack transaction.
    CheckingBlockContents,
    /// Asking the relay and status API about the transaction.
    CheckingStatusApi,
    /// Terminal.
    Resolved(Resolution),
}

/// Follows one submitted bundle until it is known to have landed or not.
///
/// The chain head is polled every `poll_interval`. Relay progress is logged
/// every `status_interval`, measured from the last status check rather than
/// counted in polls. Once the head reaches the target block the block is
/// scanned for the transaction, then the status API and finally the relay's
/// bundle stats are consulted. Errors from any source are logged and never
/// abort tracking.
#[derive(Debug)]
pub struct InclusionTracker<'a, C, R> {
    chain: &'a C,
    relay: &'a R,
    poll_interval: Duration,
    status_interval: Duration,
    state: TrackerState,
}

impl<'a, C, R> InclusionTracker<'a, C, R>
where
    C: ChainReader,
    R: BundleRelay,
{
    /// Create a tracker using the intervals in `options`.
    pub const fn new(chain: &'a C, relay: &'a R, options: &AttackOptions) -> Self {
        Self {
            chain,
            relay,
            poll_interval: options.poll_interval(),
            status_interval: options.status_interval(),
            state: TrackerState::WaitingForBlock,
        }
    }

    /// Get the current state.
    pub const fn state(&self) -> &TrackerState {
        &self.state
    }

    fn resolve(&mut self, resolution: Resolution) -> Resolution {
        self.state = TrackerState::Resolved(resolution.clone());
        resolution
    }

    /// Track `bundle` until it resolves.
    #[instrument(skip_all, fields(
        bundle_hash = %bundle.bundle_hash,
        tx_hash = %bundle.tx_hash,
        target_block = bundle.target_block,
    ))]
    pub async fn track(&mut self, bundle: &TrackedBundle) -> Resolution {
        self.state = TrackerState::WaitingForBlock;
        if !self.wait_for_block(bundle).await {
            warn!("bundle expired before the target block");
            return self.resolve(Resolution::Expired);
        }
        self.state = TrackerState::BlockReached;

        self.state = TrackerState::CheckingBlockContents;
        if let Some(resolution) = self.check_block(bundle).await {
            return self.resolve(resolution);
        }

        self.state = TrackerState::CheckingStatusApi;
        let resolution = self.check_status_api(bundle).await;
        self.resolve(resolution)
    }

    /// Poll until the head reaches the target block. Returns `false` if the
    /// bundle's validity lapses first.
    async fn wait_for_block(&self, bundle: &TrackedBundle) -> bool {
        let start = Instant::now();
        let deadline = start + bundle.valid_for;
        let mut last_status = start;
        let mut last_head = None;

        let mut poll = interval(self.poll_interval);
        poll.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            poll.tick().await;

            match self.chain.block_number().await {
                Ok(head) => {
                    if last_head != Some(head) {
                        info!(
                            head,
                            remaining = bundle.target_block.saturating_sub(head),
                            "chain head advanced"
                        );
                        last_head = Some(head);
                    }
                    if head >= bundle.target_block {
                        return true;
                    }
                }
                Err(e) => warn!(%e, "failed to fetch chain head"),
            }

            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            if now.duration_since(last_status) >= self.status_interval {
                last_status = now;
                self.log_progress(bundle).await;
            }
        }
    }

    async fn log_progress(&self, bundle: &TrackedBundle) {
        match self.relay.bundle_status(bundle.bundle_hash, bundle.target_block).await {
            Ok(status) => info!(
                simulated = status.simulated,
                high_priority = status.high_priority,
                considered_by = status.considered_by.len(),
                sealed_by = status.sealed_by.len(),
                "bundle status"
            ),
            Err(e) => warn!(%e, "failed to fetch bundle status"),
        }
    }

    /// Scan the target block. Returns `None` if the transaction was not
    /// found or its receipt could not be read.
    async fn check_block(&self, bundle: &TrackedBundle) -> Option<Resolution> {
        let block = bundle.target_block;
        let txs = match self.chain.block_transactions(block).await {
            Ok(Some(txs)) => txs,
            Ok(None) => {
                warn!(block, "target block not found");
                return None;
            }
            Err(e) => {
                warn!(%e, block, "failed to fetch target block");
                return None;
            }
        };

        let Some(found) = txs.iter().find(|tx| tx.matches(bundle.tx_hash, bundle.sender)) else {
            debug!(block, tx_count = txs.len(), "attack transaction not in target block");
            return None;
        };

        match self.chain.receipt_status(found.hash).await {
            Ok(Some(true)) => {
                info!(block, tx_hash = %found.hash, "attack transaction included");
                Some(Resolution::Included { block })
            }
            Ok(Some(false)) => {
                warn!(block, tx_hash = %found.hash, "attack transaction included but reverted");
                Some(Resolution::Reverted { block })
            }
            Ok(None) => {
                warn!(tx_hash = %found.hash, "no receipt for transaction in target block");
                None
            }
            Err(e) => {
                warn!(%e, tx_hash = %found.hash, "failed to fetch receipt");
                None
            }
        }
    }

    async fn check_status_api(&self, bundle: &TrackedBundle) -> Resolution {
        match self.relay.transaction_status(bundle.tx_hash).await {
            Ok(status) if status.is_included() => {
                info!("status API reports transaction included");
                return Resolution::IncludedPerStatusApi;
            }
            Ok(status) => debug!(?status, "status API lookup"),
            Err(e) => warn!(%e, "failed to look up transaction status"),
        }

        match self.relay.bundle_status(bundle.bundle_hash, bundle.target_block).await {
            Ok(status) if status.is_sealed() => {
                warn!(
                    builders = ?status.sealed_by,
                    "bundle sealed by builders but not on chain"
                );
                Resolution::SealedButMissing { builders: status.sealed_by }
            }
            Ok(_) => Resolution::Missing,
            Err(e) => {
                warn!(%e, "failed to fetch final bundle status");
                Resolution::Missing
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_successful_resolutions_count() {
        assert!(Resolution::Included { block: 1 }.is_included());
        assert!(Resolution::IncludedPerStatusApi.is_included());
        assert!(!Resolution::Reverted { block: 1 }.is_included());
        assert!(!Resolution::Missing.is_included());
        assert!(!Resolution::Expired.is_included());
        assert!(!Resolution::SealedButMissing { builders: BTreeSet::new() }.is_included());
    }
}

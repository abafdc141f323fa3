use alloy::primitives::U256;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Relay-reported state of a submitted bundle.
///
/// Only ever built from a fresh status poll.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundleStatus {
    /// Whether the relay simulated the bundle.
    pub simulated: bool,
    /// Whether the bundle was treated as high priority.
    pub high_priority: bool,
    /// When the relay received the bundle.
    pub received_at: Option<DateTime<Utc>>,
    /// When the relay simulated the bundle.
    pub simulated_at: Option<DateTime<Utc>>,
    /// Builders that considered the bundle.
    pub considered_by: BTreeSet<String>,
    /// Builders that sealed a block containing the bundle.
    pub sealed_by: BTreeSet<String>,
}

impl BundleStatus {
    /// True if at least one builder sealed the bundle.
    pub fn is_sealed(&self) -> bool {
        !self.sealed_by.is_empty()
    }
}

/// Status of a single transaction, as reported by the transaction status
/// API.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TxStatus {
    /// Not yet seen on chain.
    Pending,
    /// Included on chain.
    Included,
    /// Failed or dropped.
    Failed,
    /// Cancelled by the sender.
    Cancelled,
    /// The API does not know the transaction.
    #[default]
    #[serde(other)]
    Unknown,
}

impl TxStatus {
    /// True if the transaction is reported included.
    pub const fn is_included(&self) -> bool {
        matches!(self, Self::Included)
    }
}

/// Snapshot of the signing account's standing with the relay.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct AccountReputation {
    /// Whether bundles from this account are high priority.
    pub high_priority: bool,
    /// Cumulative payments to validators, in wei.
    pub validator_payments: U256,
    /// Cumulative gas simulated.
    pub gas_simulated: U256,
}

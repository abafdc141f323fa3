//! Constants for the Holesky testnet.

use crate::NetworkConstants;

/// Name for the network.
pub const NAME: &str = "holesky";
/// Chain ID for Holesky.
pub const CHAIN_ID: u64 = 17000;
/// Flashbots relay accepting bundles for Holesky.
pub const RELAY_URL: &str = "https://relay-holesky.flashbots.net";
/// Flashbots Protect transaction status API for Holesky.
pub const STATUS_URL: &str = "https://protect-holesky.flashbots.net/";
/// Slot duration in seconds.
pub const BLOCK_TIME: u64 = 12;

/// Holesky constants.
pub const HOLESKY: NetworkConstants =
    NetworkConstants::new(NAME, CHAIN_ID, RELAY_URL, STATUS_URL, BLOCK_TIME);

//! Constants for local test chains.

use crate::NetworkConstants;

/// Name for the network.
pub const NAME: &str = "test";
/// Chain ID used by anvil.
pub const CHAIN_ID: u64 = 31337;
/// Placeholder relay URL. Tests point the client at a local server instead.
pub const RELAY_URL: &str = "http://127.0.0.1:8545/";
/// Placeholder status URL.
pub const STATUS_URL: &str = "http://127.0.0.1:8545/";
/// Slot duration in seconds.
pub const BLOCK_TIME: u64 = 12;

/// Test network constants.
pub const TEST_NETWORK: NetworkConstants =
    NetworkConstants::new(NAME, CHAIN_ID, RELAY_URL, STATUS_URL, BLOCK_TIME);

//! Constants for Ethereum Mainnet.

use crate::NetworkConstants;

/// Name for the network.
pub const NAME: &str = "mainnet";
/// Chain ID for Ethereum Mainnet.
pub const CHAIN_ID: u64 = 1;
/// Flashbots relay accepting bundles for Mainnet.
pub const RELAY_URL: &str = "https://relay.flashbots.net";
/// Flashbots Protect transaction status API for Mainnet.
pub const STATUS_URL: &str = "https://protect.flashbots.net/";
/// Slot duration in seconds.
pub const BLOCK_TIME: u64 = 12;

/// Mainnet constants.
pub const MAINNET: NetworkConstants =
    NetworkConstants::new(NAME, CHAIN_ID, RELAY_URL, STATUS_URL, BLOCK_TIME);

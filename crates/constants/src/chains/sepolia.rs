//! Constants for the Sepolia testnet.

use crate::NetworkConstants;

/// Name for the network.
pub const NAME: &str = "sepolia";
/// Chain ID for Sepolia.
pub const CHAIN_ID: u64 = 11155111;
/// Flashbots relay accepting bundles for Sepolia.
pub const RELAY_URL: &str = "https://relay-sepolia.flashbots.net";
/// Flashbots Protect transaction status API for Sepolia.
pub const STATUS_URL: &str = "https://protect-sepolia.flashbots.net/";
/// Slot duration in seconds.
pub const BLOCK_TIME: u64 = 12;

/// Sepolia constants.
pub const SEPOLIA: NetworkConstants =
    NetworkConstants::new(NAME, CHAIN_ID, RELAY_URL, STATUS_URL, BLOCK_TIME);

/// Ethereum mainnet constants.
pub mod mainnet;

/// Sepolia testnet constants.
pub mod sepolia;

/// Holesky testnet constants.
pub mod holesky;

/// Test utilities for chains.
pub mod test_utils;

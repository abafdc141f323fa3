mod network;
pub use network::{Network, ParseNetworkError};

/// Constants describing one network the runner can target.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct NetworkConstants {
    name: &'static str,
    chain_id: u64,
    relay_url: &'static str,
    status_url: &'static str,
    block_time: u64,
}

impl NetworkConstants {
    /// Create a new set of network constants.
    pub const fn new(
        name: &'static str,
        chain_id: u64,
        relay_url: &'static str,
        status_url: &'static str,
        block_time: u64,
    ) -> Self {
        Self { name, chain_id, relay_url, status_url, block_time }
    }

    /// Get the network name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Get the chain ID.
    pub const fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Get the default Flashbots relay URL.
    pub const fn relay_url(&self) -> &'static str {
        self.relay_url
    }

    /// Get the default transaction status API URL.
    pub const fn status_url(&self) -> &'static str {
        self.status_url
    }

    /// Get the block time in seconds.
    pub const fn block_time(&self) -> u64 {
        self.block_time
    }
}

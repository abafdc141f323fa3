mod error;
pub use error::ConfigError;

pub mod env_utils;

use alloy::{primitives::Address, signers::local::PrivateKeySigner};
use url::Url;
use zkarnage_constants::Network;

/// HTTP JSON-RPC endpoint of the chain.
pub const ETH_RPC_URL: &str = "ETH_RPC_URL";
/// Private key of the account sending the attack transaction.
pub const PRIVATE_KEY: &str = "PRIVATE_KEY";
/// Address of the deployed attack contract.
pub const ATTACK_CONTRACT: &str = "ATTACK_CONTRACT";
/// Optional relay URL override.
pub const FLASHBOTS_RELAY_URL: &str = "FLASHBOTS_RELAY_URL";
/// Optional transaction status API override.
pub const FLASHBOTS_STATUS_URL: &str = "FLASHBOTS_STATUS_URL";
/// Optional key used to authenticate with the relay.
pub const FLASHBOTS_AUTH_KEY: &str = "FLASHBOTS_AUTH_KEY";

/// Everything a run needs from its environment.
#[derive(Debug, Clone)]
pub struct AttackConfig {
    network: Network,
    rpc_url: Url,
    signer: PrivateKeySigner,
    auth_signer: PrivateKeySigner,
    attack_contract: Address,
    relay_url: Url,
    status_url: Url,
}

impl AttackConfig {
    /// Create a new config from its parts.
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        network: Network,
        rpc_url: Url,
        signer: PrivateKeySigner,
        auth_signer: PrivateKeySigner,
        attack_contract: Address,
        relay_url: Url,
        status_url: Url,
    ) -> Self {
        Self { network, rpc_url, signer, auth_signer, attack_contract, relay_url, status_url }
    }

    /// Load the config from the environment, using `network` for defaults.
    pub fn from_env(network: Network) -> Result<Self, ConfigError> {
        let constants = network.constants();

        let rpc_url = env_utils::load_url(ETH_RPC_URL)?;
        let signer = env_utils::load_signer(PRIVATE_KEY)?;
        let auth_signer =
            env_utils::load_signer_opt(FLASHBOTS_AUTH_KEY)?.unwrap_or_else(|| signer.clone());
        let attack_contract = env_utils::load_address(ATTACK_CONTRACT)?;
        let relay_url = match env_utils::load_url_opt(FLASHBOTS_RELAY_URL)? {
            Some(url) => url,
            None => constants.relay_url().parse()?,
        };
        let status_url = match env_utils::load_base_url_opt(FLASHBOTS_STATUS_URL)? {
            Some(url) => url,
            None => constants.status_url().parse()?,
        };

        Ok(Self { network, rpc_url, signer, auth_signer, attack_contract, relay_url, status_url })
    }

    /// Get the network.
    pub const fn network(&self) -> Network {
        self.network
    }

    /// Get the chain RPC URL.
    pub const fn rpc_url(&self) -> &Url {
        &self.rpc_url
    }

    /// Get the transaction signer.
    pub const fn signer(&self) -> &PrivateKeySigner {
        &self.signer
    }

    /// Get the relay authentication signer.
    pub const fn auth_signer(&self) -> &PrivateKeySigner {
        &self.auth_signer
    }

    /// Get the attack contract address.
    pub const fn attack_contract(&self) -> Address {
        self.attack_contract
    }

    /// Get the relay URL.
    pub const fn relay_url(&self) -> &Url {
        &self.relay_url
    }

    /// Get the transaction status API URL.
    pub const fn status_url(&self) -> &Url {
        &self.status_url
    }
}

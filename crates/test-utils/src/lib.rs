pub mod chain;
pub mod relay;
pub mod server;
pub mod users;

pub use zkarnage_constants::test_utils as test_constants;

use alloy::primitives::Address;
use zkarnage_bundle::{AttackCall, TransactionBuilder};

/// Address the test attack contract is "deployed" at.
pub const TEST_CONTRACT: Address = Address::repeat_byte(0xcc);

/// Gas limit used by [`test_builder`].
pub const TEST_GAS_LIMIT: u64 = 1_000_000;

/// A builder targeting two dummy contracts on the test network.
pub fn test_builder() -> TransactionBuilder {
    TransactionBuilder::new(
        TEST_CONTRACT,
        AttackCall::targets([Address::repeat_byte(0x01), Address::repeat_byte(0x02)]),
        TEST_GAS_LIMIT,
        test_constants::CHAIN_ID,
    )
}

/// Install a test subscriber honouring `RUST_LOG`. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

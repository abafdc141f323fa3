mod provider;
pub use provider::RpcChain;

mod relay;

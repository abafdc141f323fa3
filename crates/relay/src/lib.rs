//! Flashbots relay client.
//!
//! Every request is a JSON-RPC call signed with the relay authentication
//! key. See [`RelaySigner`] for the signature scheme and [`RelayClient`] for
//! the supported methods.

#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    clippy::missing_const_for_fn,
    rustdoc::all
)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

/// The [`RelayClient`].
pub mod client;
pub use client::{RelayClient, SimulationResult};

mod error;
pub use error::RelayError;

mod signer;
pub use signer::{RelaySigner, SIGNATURE_HEADER};

/// Request and response types for the relay.
pub mod types;

/// Result type for [`RelayClient`] operations.
pub type Result<T> = std::result::Result<T, RelayError>;

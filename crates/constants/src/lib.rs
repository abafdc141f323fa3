//! zkarnage network constants.
//!
//! This crate contains the per-network constants the bundle runner needs:
//! chain ids, Flashbots relay endpoints, Protect status endpoints and block
//! times.

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

mod chains;
pub use chains::{holesky, mainnet, sepolia, test_utils};

mod types;
pub use types::{Network, NetworkConstants, ParseNetworkError};

/// One gwei, in wei.
pub const GWEI: u128 = 1_000_000_000;

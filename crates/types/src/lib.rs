//! zkarnage types and utilities used throughout the bundle runner.

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
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod config;
pub use config::{env_utils, AttackConfig, ConfigError};

mod schedule;
pub use schedule::TargetPolicy;

mod status;
pub use status::{AccountReputation, BundleStatus, TxStatus};

mod tx;
pub use tx::{AttackTransaction, ObservedTx};

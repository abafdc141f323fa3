//! zkarnage Bundle Library
//!
//! Contains the [`TransactionBuilder`], which turns chain fee levels and the
//! account's relay standing into a signed attack transaction, and the
//! [`SignedBundle`] that carries it to the relay.

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

pub mod bindings;

mod builder;
pub use builder::{SignedAttack, TransactionBuilder};

mod bundle;
pub use bundle::SignedBundle;

mod call;
pub use call::{AttackCall, Operation, ParseOperationError};

mod error;
pub use error::BuildError;

mod fee;
pub use fee::{FeeLevels, FeePolicy};

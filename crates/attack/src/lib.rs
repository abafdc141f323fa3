//! Attack orchestration.
//!
//! An [`AttackOrchestrator`] drives a bounded number of bundle attempts,
//! each built, simulated, submitted and then followed by an
//! [`InclusionTracker`] until it resolves. The chain and the relay are
//! reached through the [`ChainReader`] and [`BundleRelay`] traits so either
//! can be swapped out.

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

mod error;
pub use error::AttackError;

mod impls;
pub use impls::RpcChain;

mod options;
pub use options::AttackOptions;

mod orchestrator;
pub use orchestrator::{AttackAttempt, AttackOrchestrator, AttackReport, AttemptOutcome};

mod tracker;
pub use tracker::{InclusionTracker, Resolution, TrackedBundle, TrackerState};

mod traits;
pub use traits::{BundleRelay, ChainReader};

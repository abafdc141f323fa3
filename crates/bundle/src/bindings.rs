//! Bindings for the deployed attack contract.
#![allow(missing_docs)]

alloy::sol!(
    #[derive(Debug, PartialEq, Eq)]
    interface ZKarnage {
        /// Call every contract in `targets`, forcing their code to be loaded.
        function attack(address[] targets);

        /// Loop a single precompile `operation` until less than
        /// `gasThreshold` gas remains.
        function f(uint256 operation, uint256 gasThreshold, uint256 target);
    }
);

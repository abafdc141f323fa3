/// Errors that can occur while building or signing an attack transaction.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The computed fees would allow a tip above the fee cap.
    #[error("invalid fee configuration: max fee {max_fee} is below max priority fee {max_priority_fee}")]
    InvalidFeeConfiguration {
        /// The computed max fee per gas.
        max_fee: u128,
        /// The computed max priority fee per gas.
        max_priority_fee: u128,
    },
    /// The call targets no contracts.
    #[error("attack call must target at least one contract")]
    NoTargets,
    /// Error signing the transaction.
    #[error(transparent)]
    Signer(#[from] alloy::signers::Error),
}

use zkarnage_bundle::BuildError;
use zkarnage_relay::RelayError;
use zkarnage_types::ConfigError;

/// Errors returned by the [`AttackOrchestrator`].
///
/// [`AttackOrchestrator`]: crate::AttackOrchestrator
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AttackError {
    /// Missing or malformed configuration.
    #[error(transparent)]
    Configuration(#[from] ConfigError),
    /// The attack call has nothing to target.
    #[error("attack call has no targets")]
    NoTargets,
    /// The attack transaction or a relay request could not be signed.
    #[error("signing failed: {0}")]
    Signing(#[source] alloy::signers::Error),
    /// The fee policy produced a max fee below the priority fee.
    #[error("invalid fee configuration: max fee {max_fee} below priority fee {max_priority_fee}")]
    InvalidFeeConfiguration {
        /// Computed max fee per gas.
        max_fee: u128,
        /// Computed max priority fee per gas.
        max_priority_fee: u128,
    },
    /// The relay could not be reached or answered with an error status.
    #[error("relay unreachable: {0}")]
    RelayTransport(#[source] RelayError),
    /// The relay answered, but not usefully.
    #[error("relay protocol error: {0}")]
    RelayProtocol(#[source] RelayError),
    /// Simulation failed without producing a bundle hash.
    #[error("bundle simulation failed: {0}")]
    SimulationFailure(String),
    /// A chain query failed.
    #[error("chain query failed: {0}")]
    Chain(#[source] Box<dyn core::error::Error + Send + Sync>),
}

impl From<RelayError> for AttackError {
    fn from(err: RelayError) -> Self {
        match err {
            RelayError::Signing(err) => Self::Signing(err),
            err if err.is_transport() => Self::RelayTransport(err),
            err => Self::RelayProtocol(err),
        }
    }
}

impl From<BuildError> for AttackError {
    fn from(err: BuildError) -> Self {
        match err {
            BuildError::InvalidFeeConfiguration { max_fee, max_priority_fee } => {
                Self::InvalidFeeConfiguration { max_fee, max_priority_fee }
            }
            BuildError::NoTargets => Self::NoTargets,
            BuildError::Signer(err) => Self::Signing(err),
        }
    }
}

impl AttackError {
    /// Wrap a chain error.
    pub fn chain(err: impl core::error::Error + Send + Sync + 'static) -> Self {
        Self::Chain(Box::new(err))
    }

    /// True if the run cannot continue. Fatal errors are not retried.
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Configuration(_)
                | Self::NoTargets
                | Self::Signing(_)
                | Self::InvalidFeeConfiguration { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relay_errors_split_on_transport() {
        let protocol: AttackError = RelayError::MissingField("bundleHash").into();
        assert!(matches!(protocol, AttackError::RelayProtocol(_)));
        assert!(!protocol.is_fatal());
    }

    #[test]
    fn relay_signing_errors_are_fatal() {
        let err: AttackError =
            RelayError::Signing(alloy::signers::Error::other("no key")).into();
        assert!(matches!(err, AttackError::Signing(_)));
        assert!(err.is_fatal());
    }

    #[test]
    fn build_errors_are_fatal() {
        let err: AttackError =
            BuildError::InvalidFeeConfiguration { max_fee: 1, max_priority_fee: 2 }.into();
        assert!(err.is_fatal());
        assert!(AttackError::from(BuildError::NoTargets).is_fatal());
        assert!(AttackError::from(ConfigError::missing("PRIVATE_KEY")).is_fatal());
        assert!(!AttackError::SimulationFailure("reverted".into()).is_fatal());
    }
}

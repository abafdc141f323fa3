use crate::BuildError;
use zkarnage_constants::GWEI;

/// Fee fields for one transaction, in wei.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FeeLevels {
    /// Maximum fee per gas.
    pub max_fee_per_gas: u128,
    /// Maximum priority fee per gas.
    pub max_priority_fee_per_gas: u128,
}

/// Priority-aware fee policy.
///
/// Accounts without relay priority compete on fee alone, so they tip more.
/// The max fee is always the current base fee plus a fixed premium.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FeePolicy {
    priority_tip: u128,
    priority_premium: u128,
    standard_tip: u128,
    standard_premium: u128,
}

impl Default for FeePolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl FeePolicy {
    /// The default policy: 5/10 gwei for high-priority senders, 15/20 gwei
    /// otherwise.
    pub const fn new() -> Self {
        Self {
            priority_tip: 5 * GWEI,
            priority_premium: 10 * GWEI,
            standard_tip: 15 * GWEI,
            standard_premium: 20 * GWEI,
        }
    }

    /// Set the tip and base fee premium used for high-priority senders.
    pub const fn with_priority_fees(mut self, tip: u128, premium: u128) -> Self {
        self.priority_tip = tip;
        self.priority_premium = premium;
        self
    }

    /// Set the tip and base fee premium used for other senders.
    pub const fn with_standard_fees(mut self, tip: u128, premium: u128) -> Self {
        self.standard_tip = tip;
        self.standard_premium = premium;
        self
    }

    /// Compute the fee fields for the given base fee.
    pub fn levels(&self, base_fee: u128, high_priority: bool) -> Result<FeeLevels, BuildError> {
        let (tip, premium) = if high_priority {
            (self.priority_tip, self.priority_premium)
        } else {
            (self.standard_tip, self.standard_premium)
        };
        let max_fee = base_fee.saturating_add(premium);

        if max_fee < tip {
            return Err(BuildError::InvalidFeeConfiguration { max_fee, max_priority_fee: tip });
        }
        Ok(FeeLevels { max_fee_per_gas: max_fee, max_priority_fee_per_gas: tip })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn high_priority_levels() {
        let levels = FeePolicy::new().levels(30 * GWEI, true).unwrap();
        assert_eq!(levels.max_priority_fee_per_gas, 5 * GWEI);
        assert_eq!(levels.max_fee_per_gas, 40 * GWEI);
    }

    #[test]
    fn standard_levels() {
        let levels = FeePolicy::new().levels(30 * GWEI, false).unwrap();
        assert_eq!(levels.max_priority_fee_per_gas, 15 * GWEI);
        assert_eq!(levels.max_fee_per_gas, 50 * GWEI);
    }

    #[test]
    fn misconfigured_policy_is_rejected() {
        let policy = FeePolicy::new().with_standard_fees(30 * GWEI, GWEI);
        let err = policy.levels(0, false).unwrap_err();
        assert!(matches!(
            err,
            BuildError::InvalidFeeConfiguration { max_fee, max_priority_fee }
                if max_fee == GWEI && max_priority_fee == 30 * GWEI
        ));
        // A high enough base fee covers the tip again.
        assert!(policy.levels(29 * GWEI, false).is_ok());
    }

    proptest! {
        #[test]
        fn default_policy_never_inverts_fees(base_fee in 0u128..10_000 * GWEI, high_priority: bool) {
            let levels = FeePolicy::new().levels(base_fee, high_priority).unwrap();
            prop_assert!(levels.max_fee_per_gas >= levels.max_priority_fee_per_gas);
        }
    }
}

//! Target block selection.

use std::num::NonZeroU64;

/// The block spacing used by [`TargetPolicy::HundredBoundary`].
const BOUNDARY: u64 = 100;

/// Policy deciding which future block a bundle targets.
///
/// Every policy returns a block strictly greater than the current block.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum TargetPolicy {
    /// Target the block right after the current head.
    #[default]
    Next,
    /// Target the block `k` blocks after the current head.
    Ahead(NonZeroU64),
    /// Target the next block number divisible by 100.
    ///
    /// A head that already sits on a boundary targets the following
    /// boundary, never itself.
    HundredBoundary,
}

impl TargetPolicy {
    /// Create an [`TargetPolicy::Ahead`] policy. Returns `None` if `k` is 0.
    pub const fn ahead(k: u64) -> Option<Self> {
        match NonZeroU64::new(k) {
            Some(k) => Some(Self::Ahead(k)),
            None => None,
        }
    }

    /// Calculates the block to target given the current block.
    pub const fn target_after(&self, current: u64) -> u64 {
        match self {
            Self::Next => current + 1,
            Self::Ahead(k) => current + k.get(),
            Self::HundredBoundary => current + (BOUNDARY - current % BOUNDARY),
        }
    }

    /// Number of blocks between `current` and the block this policy would
    /// target.
    pub const fn blocks_until_target(&self, current: u64) -> u64 {
        self.target_after(current) - current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn next_block() {
        assert_eq!(TargetPolicy::Next.target_after(0), 1);
        assert_eq!(TargetPolicy::Next.target_after(12_345), 12_346);
    }

    #[test]
    fn hundred_boundary() {
        let policy = TargetPolicy::HundredBoundary;
        assert_eq!(policy.target_after(12_345), 12_400);
        assert_eq!(policy.target_after(12_399), 12_400);
        assert_eq!(policy.target_after(12_401), 12_500);
    }

    #[test]
    fn hundred_boundary_on_boundary_skips_ahead() {
        let policy = TargetPolicy::HundredBoundary;
        assert_eq!(policy.target_after(12_400), 12_500);
        assert_eq!(policy.target_after(0), 100);
        assert_eq!(policy.blocks_until_target(12_400), 100);
    }

    #[test]
    fn ahead_rejects_zero() {
        assert!(TargetPolicy::ahead(0).is_none());
        assert_eq!(TargetPolicy::ahead(3).unwrap().target_after(10), 13);
    }

    proptest! {
        #[test]
        fn hundred_boundary_is_future_and_aligned(current in 0u64..u64::MAX / 2) {
            let target = TargetPolicy::HundredBoundary.target_after(current);
            prop_assert!(target > current);
            prop_assert_eq!(target % 100, 0);
            prop_assert!(target - current <= 100);
        }

        #[test]
        fn ahead_is_exact(current in 0u64..u64::MAX / 2, k in 1u64..10_000) {
            let policy = TargetPolicy::ahead(k).unwrap();
            prop_assert_eq!(policy.target_after(current), current + k);
        }
    }
}

use std::time::Duration;
use zkarnage_types::TargetPolicy;

/// Options for configuring the [`AttackOrchestrator`].
///
/// [`AttackOrchestrator`]: crate::AttackOrchestrator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackOptions {
    policy: TargetPolicy,
    max_attempts: usize,
    continuous: bool,
    max_windows: Option<usize>,
    tolerate_simulation_errors: bool,
    cancel_abandoned: bool,
    bundle_validity: Duration,
    poll_interval: Duration,
    status_interval: Duration,
    block_time: Duration,
}

impl Default for AttackOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl AttackOptions {
    /// Create a new [`AttackOptions`] with default values.
    pub const fn new() -> Self {
        Self {
            policy: TargetPolicy::Next,
            max_attempts: 3,
            continuous: false,
            max_windows: None,
            tolerate_simulation_errors: true,
            cancel_abandoned: false,
            bundle_validity: Duration::from_secs(420),
            poll_interval: Duration::from_secs(5),
            status_interval: Duration::from_secs(15),
            block_time: Duration::from_secs(12),
        }
    }

    /// Set the target block policy.
    pub const fn with_policy(mut self, policy: TargetPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the number of attempts per window. Zero is treated as one.
    pub const fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = if max_attempts == 0 { 1 } else { max_attempts };
        self
    }

    /// Keep starting new windows after one is exhausted.
    pub const fn with_continuous(mut self, continuous: bool) -> Self {
        self.continuous = continuous;
        self
    }

    /// Stop continuous mode after this many windows.
    pub const fn with_max_windows(mut self, max_windows: usize) -> Self {
        self.max_windows = Some(max_windows);
        self
    }

    /// Submit even when simulation reports errors, as long as the relay
    /// returned a bundle hash.
    pub const fn with_tolerate_simulation_errors(mut self, tolerate: bool) -> Self {
        self.tolerate_simulation_errors = tolerate;
        self
    }

    /// Cancel a bundle once it is known not to have landed.
    pub const fn with_cancel_abandoned(mut self, cancel: bool) -> Self {
        self.cancel_abandoned = cancel;
        self
    }

    /// Set how long a submitted bundle stays valid past its expected target
    /// block time.
    pub const fn with_bundle_validity(mut self, validity: Duration) -> Self {
        self.bundle_validity = validity;
        self
    }

    /// Set the chain head polling interval.
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the relay status polling interval.
    pub const fn with_status_interval(mut self, interval: Duration) -> Self {
        self.status_interval = interval;
        self
    }

    /// Set the expected block time.
    pub const fn with_block_time(mut self, block_time: Duration) -> Self {
        self.block_time = block_time;
        self
    }

    /// Get the target block policy.
    pub const fn policy(&self) -> TargetPolicy {
        self.policy
    }

    /// Get the number of attempts per window.
    pub const fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// True if the orchestrator keeps going after a window is exhausted.
    pub const fn continuous(&self) -> bool {
        self.continuous
    }

    /// Get the window limit for continuous mode.
    pub const fn max_windows(&self) -> Option<usize> {
        self.max_windows
    }

    /// True if simulation errors are tolerated when a bundle hash exists.
    pub const fn tolerate_simulation_errors(&self) -> bool {
        self.tolerate_simulation_errors
    }

    /// True if abandoned bundles are cancelled.
    pub const fn cancel_abandoned(&self) -> bool {
        self.cancel_abandoned
    }

    /// Get the validity margin past the expected target block time.
    pub const fn bundle_validity(&self) -> Duration {
        self.bundle_validity
    }

    /// Get the chain head polling interval.
    pub const fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Get the relay status polling interval.
    pub const fn status_interval(&self) -> Duration {
        self.status_interval
    }

    /// Get the expected block time.
    pub const fn block_time(&self) -> Duration {
        self.block_time
    }

    /// How long a bundle for `target_block` stays valid when submitted at
    /// `head`: the expected wait for the target block plus the validity
    /// margin.
    pub fn bundle_lifetime(&self, head: u64, target_block: u64) -> Duration {
        let blocks = u32::try_from(target_block.saturating_sub(head)).unwrap_or(u32::MAX);
        self.block_time.saturating_mul(blocks).saturating_add(self.bundle_validity)
    }

    /// How long to wait before a new window, given the current head.
    ///
    /// Half the blocks remaining until the next hundred-block boundary, at
    /// the expected block time.
    pub fn window_wait(&self, head: u64) -> Duration {
        let remaining = TargetPolicy::HundredBoundary.blocks_until_target(head);
        let blocks = u32::try_from(remaining / 2).unwrap_or(u32::MAX);
        self.block_time.saturating_mul(blocks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = AttackOptions::default();
        assert_eq!(options.max_attempts(), 3);
        assert!(options.tolerate_simulation_errors());
        assert!(!options.cancel_abandoned());
        assert_eq!(options.bundle_validity(), Duration::from_secs(420));
        assert_eq!(options.poll_interval(), Duration::from_secs(5));
        assert_eq!(options.status_interval(), Duration::from_secs(15));
    }

    #[test]
    fn window_wait_is_half_the_remaining_blocks() {
        let options = AttackOptions::new();
        // 60 blocks to 12_400, wait for 30 of them.
        assert_eq!(options.window_wait(12_340), Duration::from_secs(30 * 12));
        // On a boundary the next one is a full window away.
        assert_eq!(options.window_wait(12_400), Duration::from_secs(50 * 12));
        assert_eq!(options.window_wait(12_399), Duration::ZERO);
    }

    #[test]
    fn lifetime_covers_the_wait_for_the_target() {
        let options = AttackOptions::new();
        // 55 blocks to 12_400 at 12s, plus the 420s margin.
        assert_eq!(options.bundle_lifetime(12_345, 12_400), Duration::from_secs(55 * 12 + 420));
        assert_eq!(options.bundle_lifetime(100, 101), Duration::from_secs(12 + 420));
        assert_eq!(options.bundle_lifetime(101, 100), Duration::from_secs(420));
    }

    #[test]
    fn zero_attempts_still_tries_once() {
        assert_eq!(AttackOptions::new().with_max_attempts(0).max_attempts(), 1);
    }
}

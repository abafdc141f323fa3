use alloy::primitives::B256;
use std::time::Duration;
use zkarnage_attack::{AttackOptions, InclusionTracker, Resolution, TrackedBundle, TrackerState};
use zkarnage_test_utils::{chain::MockChain, relay::MockRelay, users::TEST_USERS};
use zkarnage_types::{BundleStatus, TxStatus};

fn tracked(target_block: u64) -> TrackedBundle {
    TrackedBundle {
        bundle_hash: B256::repeat_byte(0xab),
        tx_hash: B256::repeat_byte(0xcd),
        sender: TEST_USERS[0],
        target_block,
        valid_for: Duration::from_secs(420),
    }
}

#[tokio::test(start_paused = true)]
async fn included_when_receipt_succeeds() {
    let chain = MockChain::new(100);
    chain.include_from(110, TEST_USERS[0], true);
    let relay = MockRelay::new();
    let options = AttackOptions::new();

    let mut tracker = InclusionTracker::new(&chain, &relay, &options);
    assert_eq!(tracker.state(), &TrackerState::WaitingForBlock);

    let resolution = tracker.track(&tracked(110)).await;
    assert_eq!(resolution, Resolution::Included { block: 110 });
    assert_eq!(tracker.state(), &TrackerState::Resolved(resolution));
}

#[tokio::test(start_paused = true)]
async fn reverted_transaction_is_not_included() {
    let chain = MockChain::new(100);
    chain.include_from(101, TEST_USERS[0], false);
    let relay = MockRelay::new().with_tx_status(TxStatus::Included);
    let options = AttackOptions::new();

    let resolution = InclusionTracker::new(&chain, &relay, &options).track(&tracked(101)).await;
    assert_eq!(resolution, Resolution::Reverted { block: 101 });
    assert!(!resolution.is_included());
}

#[tokio::test(start_paused = true)]
async fn other_senders_are_ignored() {
    let chain = MockChain::new(100);
    chain.include_from(101, TEST_USERS[1], true);
    let relay = MockRelay::new();
    let options = AttackOptions::new();

    let resolution = InclusionTracker::new(&chain, &relay, &options).track(&tracked(101)).await;
    assert_eq!(resolution, Resolution::Missing);
}

#[tokio::test(start_paused = true)]
async fn status_api_fallback() {
    let chain = MockChain::new(100);
    let relay = MockRelay::new().with_tx_status(TxStatus::Included);
    let options = AttackOptions::new();

    let resolution = InclusionTracker::new(&chain, &relay, &options).track(&tracked(101)).await;
    assert_eq!(resolution, Resolution::IncludedPerStatusApi);
    assert!(resolution.is_included());
}

#[tokio::test(start_paused = true)]
async fn sealed_but_missing_is_an_anomaly() {
    let chain = MockChain::new(100);
    let mut status = BundleStatus::default();
    status.sealed_by.insert("0xbuilder".to_string());
    let relay = MockRelay::new().with_bundle_status(status);
    let options = AttackOptions::new();

    let resolution = InclusionTracker::new(&chain, &relay, &options).track(&tracked(101)).await;
    assert!(matches!(
        &resolution,
        Resolution::SealedButMissing { builders } if builders.contains("0xbuilder")
    ));
    assert!(!resolution.is_included());
}

#[tokio::test(start_paused = true)]
async fn status_is_polled_on_its_own_cadence() {
    let chain = MockChain::new(100);
    chain.include_from(110, TEST_USERS[0], true);
    let relay = MockRelay::new();
    let options = AttackOptions::new();

    InclusionTracker::new(&chain, &relay, &options).track(&tracked(110)).await;

    // Head polls at 0s, 5s, ... 50s; status checks at 15s, 30s and 45s.
    assert_eq!(chain.head_queries(), 11);
    assert_eq!(relay.status_queries(), 3);
}

#[tokio::test(start_paused = true)]
async fn chain_errors_do_not_abort_tracking() {
    let chain = MockChain::new(100);
    chain.include_from(102, TEST_USERS[0], true);
    chain.fail_next(3);
    let relay = MockRelay::new().with_unreachable();
    let options = AttackOptions::new();

    let resolution = InclusionTracker::new(&chain, &relay, &options).track(&tracked(102)).await;
    assert_eq!(resolution, Resolution::Included { block: 102 });
}

#[tokio::test(start_paused = true)]
async fn expires_when_the_target_never_arrives() {
    let chain = MockChain::new(100).with_step(0);
    let relay = MockRelay::new();
    let options = AttackOptions::new();
    let bundle = TrackedBundle { valid_for: Duration::from_secs(60), ..tracked(101) };

    let start = tokio::time::Instant::now();
    let mut tracker = InclusionTracker::new(&chain, &relay, &options);
    let resolution = tracker.track(&bundle).await;

    assert_eq!(resolution, Resolution::Expired);
    assert_eq!(tracker.state(), &TrackerState::Resolved(Resolution::Expired));
    assert!(start.elapsed() >= Duration::from_secs(60));
}

#[tokio::test(start_paused = true)]
async fn waits_out_a_distant_target() {
    // 55 blocks at 12s is well past the 420s margin alone.
    let chain = MockChain::new(12_345).with_block_time(Duration::from_secs(12));
    chain.include_from(12_400, TEST_USERS[0], true);
    let relay = MockRelay::new();
    let options = AttackOptions::new();
    let bundle = TrackedBundle {
        valid_for: options.bundle_lifetime(12_345, 12_400),
        ..tracked(12_400)
    };

    let resolution = InclusionTracker::new(&chain, &relay, &options).track(&bundle).await;
    assert_eq!(resolution, Resolution::Included { block: 12_400 });
    assert!(chain.head() >= 12_400);
}

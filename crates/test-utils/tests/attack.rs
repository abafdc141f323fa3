use alloy::primitives::B256;
use serde_json::json;
use std::time::Duration;
use zkarnage_attack::{AttackOptions, AttackOrchestrator, AttemptOutcome, Resolution};
use zkarnage_relay::{
    types::{CALL_BUNDLE, GET_USER_STATS, SEND_BUNDLE},
    RelayClient,
};
use zkarnage_test_utils::{
    chain::MockChain,
    init_tracing,
    server::MockRelayServer,
    test_builder,
    users::{TEST_SIGNERS, TEST_USERS},
};

fn fast_options() -> AttackOptions {
    AttackOptions::new()
        .with_poll_interval(Duration::from_millis(10))
        .with_status_interval(Duration::from_millis(50))
        .with_bundle_validity(Duration::from_secs(5))
}

#[tokio::test]
async fn attack_over_http() {
    init_tracing();

    let server = MockRelayServer::spawn().await;
    server.respond_with(GET_USER_STATS, json!({ "isHighPriority": true }));
    server.respond_with(
        CALL_BUNDLE,
        json!({ "bundleHash": B256::repeat_byte(0x42), "results": [{ "gasUsed": 912_345 }] }),
    );
    server.respond_with(SEND_BUNDLE, json!({ "bundleHash": B256::repeat_byte(0x42) }));

    let chain = MockChain::new(100);
    chain.include_from(101, TEST_USERS[0], true);
    let relay = RelayClient::new(server.url(), server.url(), TEST_SIGNERS[1].clone());

    let report = AttackOrchestrator::new(
        chain,
        relay,
        test_builder(),
        TEST_SIGNERS[0].clone(),
        fast_options().with_max_attempts(1),
    )
    .run()
    .await
    .unwrap();

    let attempt = report.included().unwrap();
    assert_eq!(attempt.bundle_hash, Some(B256::repeat_byte(0x42)));
    assert!(matches!(attempt.outcome, AttemptOutcome::Included(Resolution::Included { block: 101 })));

    let requests = server.requests();
    let methods: Vec<_> = requests.iter().map(|r| r.method.as_str()).collect();
    assert_eq!(methods, vec![GET_USER_STATS, CALL_BUNDLE, SEND_BUNDLE]);
    assert!(requests.iter().all(|r| r.signer == Some(TEST_SIGNERS[1].address())));

    let sent = &requests[2].params;
    assert_eq!(sent["blockNumber"], "0x65");
    assert_eq!(sent["txs"].as_array().unwrap().len(), 1);
    assert_eq!(sent["replacementUuid"], json!(attempt.bundle.as_ref().unwrap().replacement_uuid()));
}

#[tokio::test]
async fn relay_rejection_consumes_the_attempt() {
    let server = MockRelayServer::spawn().await;
    server.respond_with(
        CALL_BUNDLE,
        json!({ "bundleHash": B256::repeat_byte(0x42), "results": [] }),
    );

    let chain = MockChain::new(100);
    let relay = RelayClient::new(server.url(), server.url(), TEST_SIGNERS[1].clone());

    let report = AttackOrchestrator::new(
        chain,
        relay,
        test_builder(),
        TEST_SIGNERS[0].clone(),
        fast_options().with_max_attempts(2),
    )
    .run()
    .await
    .unwrap();

    // Without a configured response, eth_sendBundle gets "method not found".
    assert!(!report.is_success());
    assert_eq!(report.attempts().len(), 2);
    assert!(report.attempts().iter().all(|a| matches!(a.outcome, AttemptOutcome::Failed(_))));
    let targets: Vec<_> = report.attempts().iter().map(|a| a.target_block).collect();
    assert_eq!(targets, vec![101, 102]);
}

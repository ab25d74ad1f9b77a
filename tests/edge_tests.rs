//! Edge-case tests: timeout policies, background cache warming, event-log
//! bounds and response serialization shapes.

use async_trait::async_trait;
use inverstra::{
    Result,
    chain::{
        CardanoTransactionService, ChainProbe, EVENT_LOG_CAPACITY, EventLog, WalletClient,
        WalletConnector,
    },
    config::CardanoConfig,
    types::{CreatePredictionRequest, Network, OperationStatus, VoteRequest},
};
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use uuid::Uuid;

/// Connector that succeeds after a fixed delay
struct DelayedConnector {
    delay: Duration,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl WalletConnector for DelayedConnector {
    async fn connect(&self) -> Result<WalletClient> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        Ok(WalletClient::new(Network::Preview, "https://example.test"))
    }
}

struct SilentProbe;

#[async_trait]
impl ChainProbe for SilentProbe {
    async fn health(&self) -> Result<serde_json::Value> {
        Ok(json!("ok"))
    }

    async fn latest_block(&self) -> Result<serde_json::Value> {
        Ok(json!({ "height": 1 }))
    }

    async fn latest_epoch(&self) -> Result<serde_json::Value> {
        Ok(json!({ "epoch": 1 }))
    }
}

fn delayed_service(
    delay: Duration,
    init_timeout: Duration,
    create_wait: Duration,
) -> (CardanoTransactionService, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let service = CardanoTransactionService::new(
        CardanoConfig::for_testing(),
        Arc::new(SilentProbe),
        Arc::new(DelayedConnector {
            delay,
            calls: Arc::clone(&calls),
        }),
    )
    .with_timeouts(init_timeout, create_wait);
    (service, calls)
}

#[tokio::test]
async fn test_create_uses_wallet_when_init_is_fast_enough() {
    let (service, calls) = delayed_service(
        Duration::from_millis(20),
        Duration::from_millis(500),
        Duration::from_millis(200),
    );

    let response = service
        .create_prediction(CreatePredictionRequest {
            wallet_address: "addr_test1xyz".to_string(),
            datum: json!({ "question": "fast init" }),
            script_ref: Some("script_ref_1".to_string()),
        })
        .await;

    assert_eq!(response.status, OperationStatus::PendingImplementation);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_abandoned_create_wait_warms_cache_in_background() {
    let (service, calls) = delayed_service(
        Duration::from_millis(120),
        Duration::from_millis(500),
        Duration::from_millis(30),
    );

    // The caller gives up before construction finishes
    let response = service
        .create_prediction(CreatePredictionRequest {
            wallet_address: "addr_test1xyz".to_string(),
            datum: json!({}),
            script_ref: None,
        })
        .await;
    assert_eq!(response.status, OperationStatus::Pending);
    assert!(service.wallet_if_ready().is_none());

    // Construction was not cancelled; the late success is cached
    tokio::time::sleep(Duration::from_millis(250)).await;
    assert!(service.wallet_if_ready().is_some());

    // Follow-up operations reuse the cached handle, no new construction
    let vote = service
        .vote(VoteRequest {
            wallet_address: "addr_test1xyz".to_string(),
            support: true,
            prediction_id: Uuid::new_v4(),
        })
        .await;
    assert_eq!(vote.status, OperationStatus::PendingImplementation);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_init_timeout_is_logged_and_retryable() {
    let (service, calls) = delayed_service(
        Duration::from_millis(300),
        Duration::from_millis(40),
        Duration::from_millis(20),
    );

    let first = service.ensure_wallet().await;
    match first {
        Err(err) => assert!(err.to_string().contains("timed out")),
        Ok(_) => panic!("expected a timeout failure"),
    }

    let events: Vec<_> = service
        .recent_events(25)
        .into_iter()
        .map(|e| e.event)
        .collect();
    assert!(events.contains(&"wallet_initialization_failed".to_string()));

    // The cell reset to idle, so the next call starts attempt number two
    let _ = service.ensure_wallet().await;
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_event_log_window_bounds() {
    let log = EventLog::new(false);
    for i in 1..=105 {
        log.record("tick", json!({ "seq": i }));
    }

    let window = log.recent(100);
    assert_eq!(window.len(), EVENT_LOG_CAPACITY);
    assert_eq!(window.first().unwrap().payload["seq"], 6);
    assert_eq!(window.last().unwrap().payload["seq"], 105);

    // A limit beyond the stored count returns everything, oldest first
    let all = log.recent(10_000);
    assert_eq!(all.len(), EVENT_LOG_CAPACITY);
    assert_eq!(all.first().unwrap().payload["seq"], 6);
}

#[tokio::test]
async fn test_oversized_recent_limit_through_service() {
    let (service, _calls) = delayed_service(
        Duration::from_millis(1),
        Duration::from_millis(200),
        Duration::from_millis(100),
    );

    let _ = service.ensure_wallet().await;
    let events = service.recent_events(10_000);
    assert!(!events.is_empty());
    assert!(events.len() <= EVENT_LOG_CAPACITY);
}

#[tokio::test]
async fn test_error_response_serialization_shape() {
    let (service, _calls) = delayed_service(
        Duration::from_millis(300),
        Duration::from_millis(20),
        Duration::from_millis(10),
    );

    let vote = service
        .vote(VoteRequest {
            wallet_address: "addr_test1xyz".to_string(),
            support: false,
            prediction_id: Uuid::new_v4(),
        })
        .await;

    let serialized = serde_json::to_value(&vote).unwrap();
    assert_eq!(serialized["status"], "error");
    assert_eq!(serialized["network"], "preview");
    assert!(!serialized["error"].as_str().unwrap().is_empty());
    // The pending-only `note` field is omitted from error responses
    assert!(serialized.get("note").is_none());
}

#[tokio::test]
async fn test_dropped_subscriber_never_disturbs_operations() {
    let (service, _calls) = delayed_service(
        Duration::from_millis(1),
        Duration::from_millis(200),
        Duration::from_millis(100),
    );

    let receiver = service.subscribe_events(2);
    drop(receiver);

    let response = service
        .create_prediction(CreatePredictionRequest {
            wallet_address: "addr_test1xyz".to_string(),
            datum: json!({}),
            script_ref: None,
        })
        .await;
    assert_eq!(response.status, OperationStatus::PendingImplementation);
}

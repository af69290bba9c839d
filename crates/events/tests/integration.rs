//! Integration tests for the event channel

use hashscan_errors::AnalysisError;
use hashscan_events::*;

#[tokio::test]
async fn test_failure_context_from_error() {
    let (tx, mut rx) = channel();
    let failure = FailureContext::from_error(&AnalysisError::UnexpectedStatus { status: 429 });
    tx.emit_analysis(AnalysisEvent::LookupFailed {
        hash: "abc".into(),
        failure,
    });

    let message = rx.recv().await.unwrap();
    match message.event {
        AppEvent::Analysis(AnalysisEvent::LookupFailed { hash, failure }) => {
            assert_eq!(hash, "abc");
            assert_eq!(failure.code.as_deref(), Some("analysis.unexpected_status"));
            assert!(failure.retryable);
            assert!(failure.hint.is_some());
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[test]
fn test_event_json_shape() {
    let message = EventMessage::from_event(AppEvent::Analysis(AnalysisEvent::BatchStarted {
        batch_id: "b1".into(),
        total: 3,
        lanes: 2,
    }));
    let json = serde_json::to_value(&message).unwrap();
    assert_eq!(json["event"]["domain"], "analysis");
    assert_eq!(json["event"]["event"]["type"], "batch_started");
    assert_eq!(json["meta"]["source"], "analysis");
    assert_eq!(json["meta"]["level"], "info");
}

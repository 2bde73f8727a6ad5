//! End-to-end demo flows: input store → state machine → HTTP analyzer →
//! local analysis service → presenter.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::routing::post;
use axum::{Json, Router};
use credcheck_client::{HttpAnalyzer, HttpAnalyzerConfig};
use credcheck_core::{ErrorKind, InputStore, RequestState, present};
use credcheck_demo::{RequestStateMachine, SubmitRejected};
use serde_json::{Value, json};

const HOSPITAL: &str = "Local community raises funds for new children's hospital wing";
const MICROCHIP: &str =
    "BREAKING: Government announces mandatory microchip implants for all citizens by 2025";

/// A stand-in analysis service with canned answers keyed on the submitted text.
fn fake_service(calls: Arc<AtomicUsize>) -> Router {
    Router::new().route(
        "/api/analyze",
        post(move |Json(body): Json<Value>| {
            let calls = calls.clone();
            async move {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                let text = body["text"].as_str().unwrap_or_default().to_string();
                if text.contains("slow") && n == 0 {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                }
                let reply = if text == HOSPITAL || text.contains("slow") {
                    json!({
                        "verdict": "real",
                        "confidence": 94,
                        "explanation": "This content follows factual reporting patterns.",
                        "redFlags": []
                    })
                } else if text == MICROCHIP {
                    json!({
                        "verdict": "fake",
                        "confidence": 87,
                        "explanation": "This content contains sensationalist language patterns.",
                        "redFlags": [
                            "Sensationalist headline",
                            "Unverified claims",
                            "Emotional manipulation patterns"
                        ]
                    })
                } else {
                    json!({"error": "rate limited"})
                };
                Json(reply)
            }
        }),
    )
}

struct Harness {
    machine: RequestStateMachine,
    calls: Arc<AtomicUsize>,
}

async fn harness() -> Harness {
    let calls = Arc::new(AtomicUsize::new(0));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = fake_service(calls.clone());
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let analyzer = HttpAnalyzer::new(HttpAnalyzerConfig {
        endpoint: format!("http://{addr}/api/analyze"),
        timeout: Some(Duration::from_millis(300)),
    })
    .unwrap();
    Harness {
        machine: RequestStateMachine::new(Arc::new(analyzer)),
        calls,
    }
}

fn input(text: &str) -> InputStore {
    let mut input = InputStore::new();
    input.set_text(text);
    input
}

#[tokio::test]
async fn authentic_headline() {
    let h = harness().await;

    let state = h.machine.run(&input(HOSPITAL)).await.unwrap();

    let result = state.result().expect("succeeded");
    assert_eq!(result.confidence.get(), 94);
    let shown = present(result);
    assert_eq!(shown.label, "Likely Authentic");
    assert_eq!(shown.confidence_bar_width, 94);
    assert!(shown.red_flags.is_empty());
    assert!(!shown.show_red_flags());
}

#[tokio::test]
async fn misinformation_headline() {
    let h = harness().await;

    let state = h.machine.run(&input(MICROCHIP)).await.unwrap();

    let result = state.result().expect("succeeded");
    let shown = present(result);
    assert_eq!(shown.label, "Likely Misinformation");
    assert_eq!(shown.confidence_bar_width, 87);
    assert_eq!(
        shown.red_flags,
        [
            "Sensationalist headline",
            "Unverified claims",
            "Emotional manipulation patterns"
        ]
    );
}

#[tokio::test]
async fn empty_text_makes_no_call() {
    let h = harness().await;

    let err = h.machine.submit(&input("")).err();

    assert_eq!(err, Some(SubmitRejected::EmptyText));
    assert_eq!(h.machine.state(), RequestState::Idle);
    assert_eq!(h.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn service_error_is_reported() {
    let h = harness().await;

    let state = h.machine.run(&input("anything else")).await.unwrap();

    assert_eq!(
        state,
        RequestState::Failed {
            kind: ErrorKind::ServiceError,
            message: "rate limited".into(),
        }
    );
    assert!(h.machine.state().result().is_none());
}

#[tokio::test]
async fn timeout_then_resubmit() {
    let h = harness().await;
    let text = input("slow news day");

    let first = h.machine.run(&text).await.unwrap();
    assert!(
        matches!(
            first,
            RequestState::Failed {
                kind: ErrorKind::TransportError,
                ..
            }
        ),
        "got {first:?}"
    );

    let second = h.machine.submit(&text).expect("resubmit accepted");
    assert_eq!(h.machine.state(), RequestState::Pending);
    let settled = second.settled().await;
    assert_eq!(settled.result().map(|r| r.confidence.get()), Some(94));
}

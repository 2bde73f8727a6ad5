//! Request state machine.
//!
//! Owns the single [`RequestState`] and moves it through
//! `Idle → Pending → Succeeded | Failed`. At most one analysis is in flight:
//! submitting while `Pending` is rejected without touching the analyzer.
//! Every transition is broadcast to subscribers in the order it happened.

use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use credcheck_client::Analyzer;
use credcheck_core::{ErrorKind, InputStore, RequestState};
use futures::FutureExt;
use thiserror::Error;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

const TRANSITION_CAPACITY: usize = 16;

/// Why a submit did not start a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    #[error("nothing to analyze: the text is empty")]
    EmptyText,
    #[error("an analysis is already in progress")]
    AlreadyPending,
}

/// One state change, as seen by subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub from: RequestState,
    pub to: RequestState,
    pub at: DateTime<Utc>,
}

struct Shared {
    state: Mutex<RequestState>,
    transitions: broadcast::Sender<Transition>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, RequestState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the state and notify while still holding the lock, so
    /// subscribers never see transitions out of order.
    fn transition(&self, state: &mut RequestState, to: RequestState) {
        let from = std::mem::replace(state, to.clone());
        // No subscribers is fine.
        let _ = self.transitions.send(Transition {
            from,
            to,
            at: Utc::now(),
        });
    }

    fn settle(&self, to: RequestState) {
        let mut state = self.lock();
        self.transition(&mut state, to);
    }
}

/// Handle to a running analysis.
///
/// Dropping it does not cancel anything: the request still runs to
/// settlement and the machine still records the outcome.
pub struct Submission {
    handle: JoinHandle<RequestState>,
}

impl Submission {
    /// Wait for the request to settle and return the resulting state.
    pub async fn settled(self) -> RequestState {
        match self.handle.await {
            Ok(state) => state,
            Err(e) => RequestState::Failed {
                kind: ErrorKind::TransportError,
                message: format!("analysis task did not complete: {e}"),
            },
        }
    }
}

pub struct RequestStateMachine {
    analyzer: Arc<dyn Analyzer>,
    shared: Arc<Shared>,
}

impl RequestStateMachine {
    pub fn new(analyzer: Arc<dyn Analyzer>) -> Self {
        let (transitions, _) = broadcast::channel(TRANSITION_CAPACITY);
        Self {
            analyzer,
            shared: Arc::new(Shared {
                state: Mutex::new(RequestState::Idle),
                transitions,
            }),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> RequestState {
        self.shared.lock().clone()
    }

    /// Receive every transition from now on.
    ///
    /// A receiver that falls more than a few transitions behind gets
    /// `RecvError::Lagged`; the machine itself never waits on observers.
    pub fn subscribe(&self) -> broadcast::Receiver<Transition> {
        self.shared.transitions.subscribe()
    }

    /// Start analysing the current text of `input`.
    ///
    /// On success the machine is already `Pending` when this returns, any
    /// previous result is gone, and the text has been snapshotted: later
    /// edits to `input` don't affect this request. The analysis runs on a
    /// spawned Tokio task, so this must be called from within a runtime.
    pub fn submit(&self, input: &InputStore) -> Result<Submission, SubmitRejected> {
        let mut state = self.shared.lock();
        if !input.can_submit(&state) {
            let reason = if state.is_pending() {
                SubmitRejected::AlreadyPending
            } else {
                SubmitRejected::EmptyText
            };
            debug!(state = state.name(), %reason, "submit rejected");
            return Err(reason);
        }
        let request = input.request().ok_or(SubmitRejected::EmptyText)?;
        self.shared.transition(&mut state, RequestState::Pending);
        drop(state);

        info!(chars = request.text().chars().count(), "analysis submitted");

        let analyzer = Arc::clone(&self.analyzer);
        let shared = Arc::clone(&self.shared);
        let handle = tokio::spawn(async move {
            let outcome = AssertUnwindSafe(analyzer.analyze(&request))
                .catch_unwind()
                .await;
            let settled = match outcome {
                Ok(Ok(result)) => {
                    info!(
                        verdict = %result.verdict,
                        confidence = result.confidence.get(),
                        "analysis succeeded"
                    );
                    RequestState::Succeeded(result)
                }
                Ok(Err(e)) => {
                    warn!(kind = %e.kind(), error = %e, "analysis failed");
                    RequestState::Failed {
                        kind: e.kind(),
                        message: e.to_string(),
                    }
                }
                Err(_) => {
                    warn!("analyzer panicked");
                    RequestState::Failed {
                        kind: ErrorKind::TransportError,
                        message: "analysis aborted unexpectedly".to_string(),
                    }
                }
            };
            shared.settle(settled.clone());
            settled
        });

        Ok(Submission { handle })
    }

    /// Submit and wait for settlement.
    pub async fn run(&self, input: &InputStore) -> Result<RequestState, SubmitRejected> {
        Ok(self.submit(input)?.settled().await)
    }
}

//! Analysis request lifecycle tests.
//!
//! Drives the controller state machine against a mock transport, with no
//! network and no rendering surface.
//!
//! Covered:
//!   1. Single-flight       -- a second trigger while in flight is dropped
//!   2. Guaranteed cleanup  -- the flag clears on success and failure alike
//!   3. Response shape      -- malformed payloads never reach presentation
//!   4. End-to-end          -- a valid payload yields the dashboard values

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use datalens_gui::api::{AnalysisError, AnalysisResult, AnalysisTransport, RawAnalysis};
use datalens_gui::controller::{transition, ControllerState, Effect, Event};
use datalens_gui::dashboard::build_view_model;
use datalens_gui::validate::CandidateFile;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

type Outcome = Result<AnalysisResult, AnalysisError>;

/// Scripted transport: hands out pre-canned outcomes (last first) and
/// counts calls.
struct MockTransport {
    responses: Mutex<Vec<Outcome>>,
    calls: AtomicUsize,
}

impl MockTransport {
    fn scripted(responses: Vec<Outcome>) -> Self {
        Self {
            responses: Mutex::new(responses),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl AnalysisTransport for MockTransport {
    fn analyze(&self, _file: &CandidateFile) -> Outcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .expect("mock lock poisoned")
            .pop()
            .unwrap_or(Err(AnalysisError::Transport {
                message: "no scripted response".to_string(),
            }))
    }
}

/// Executes controller effects the way the app shell does, except that
/// `StartRequest` is held pending until `settle_one` — modeling the gap
/// between dispatch and the worker's outcome.
struct Harness {
    state: ControllerState,
    transport: MockTransport,
    pending: Vec<CandidateFile>,
    presented: Vec<AnalysisResult>,
    errors: Vec<String>,
    requests_started: usize,
}

impl Harness {
    fn new(transport: MockTransport) -> Self {
        Self {
            state: ControllerState::default(),
            transport,
            pending: Vec::new(),
            presented: Vec::new(),
            errors: Vec::new(),
            requests_started: 0,
        }
    }

    fn dispatch(&mut self, event: Event) {
        let effects = transition(&mut self.state, event);
        for effect in effects {
            match effect {
                Effect::ClearError => {}
                Effect::ShowError(message) => self.errors.push(message),
                Effect::Present(result) => self.presented.push(result),
                Effect::StartRequest(file) => {
                    self.requests_started += 1;
                    self.pending.push(file);
                }
            }
        }
    }

    /// Resolve one pending request through the transport.
    fn settle_one(&mut self) {
        if let Some(file) = self.pending.pop() {
            let outcome = self.transport.analyze(&file);
            self.dispatch(Event::Outcome(outcome));
        }
    }
}

fn csv(name: &str) -> CandidateFile {
    CandidateFile::new(name, 2048, format!("/tmp/{name}"))
}

/// The sample success payload from the service contract, run through the
/// same decode-and-validate path the HTTP transport uses.
fn sample_outcome() -> Outcome {
    let raw: RawAnalysis = serde_json::from_str(
        r#"{
            "shape": [100, 3],
            "columns": ["a", "b", "c"],
            "eda": {"missing_values": {"a": 1, "b": 0, "c": 2}},
            "data_types": {"a": "integer"},
            "ai_insights": "ok"
        }"#,
    )
    .expect("sample payload decodes");
    raw.into_validated()
}

fn outcome_missing(field: &str) -> Outcome {
    let mut value: serde_json::Value = serde_json::from_str(
        r#"{
            "shape": [100, 3],
            "columns": ["a", "b", "c"],
            "eda": {},
            "ai_insights": "ok"
        }"#,
    )
    .expect("payload decodes");
    value.as_object_mut().expect("object").remove(field);
    let raw: RawAnalysis = serde_json::from_value(value).expect("still decodes");
    raw.into_validated()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn second_trigger_while_in_flight_is_dropped() {
    let mut h = Harness::new(MockTransport::scripted(vec![sample_outcome()]));
    h.dispatch(Event::FileSelected(csv("data.csv")));
    h.dispatch(Event::Trigger);
    assert!(h.state.in_flight);

    h.dispatch(Event::Trigger);
    h.dispatch(Event::Trigger);
    assert_eq!(h.requests_started, 1, "extra triggers must not start requests");

    h.settle_one();
    assert_eq!(h.transport.calls(), 1);
    assert_eq!(h.presented.len(), 1);
}

#[test]
fn cleanup_runs_on_failure_and_allows_retrigger() {
    let transport = MockTransport::scripted(vec![
        sample_outcome(),
        Err(AnalysisError::Transport {
            message: "HTTP 500: Internal Server Error".to_string(),
        }),
    ]);
    let mut h = Harness::new(transport);
    h.dispatch(Event::FileSelected(csv("data.csv")));

    h.dispatch(Event::Trigger);
    h.settle_one();
    assert!(!h.state.in_flight);
    assert!(h.state.trigger_enabled(), "valid file still held after failure");
    assert_eq!(h.errors, vec!["HTTP 500: Internal Server Error".to_string()]);
    assert!(h.presented.is_empty());

    // No automatic retry: a fresh user trigger is required, and it works.
    h.dispatch(Event::Trigger);
    h.settle_one();
    assert_eq!(h.requests_started, 2);
    assert_eq!(h.presented.len(), 1);
}

#[test]
fn malformed_payloads_never_reach_presentation() {
    for field in ["shape", "columns", "eda", "ai_insights"] {
        let mut h = Harness::new(MockTransport::scripted(vec![outcome_missing(field)]));
        h.dispatch(Event::FileSelected(csv("data.csv")));
        h.dispatch(Event::Trigger);
        h.settle_one();

        assert!(
            h.presented.is_empty(),
            "payload without {field} must not be presented",
        );
        assert_eq!(
            h.errors,
            vec![AnalysisError::MalformedResponse.to_string()],
            "payload without {field} must surface a malformed-response error",
        );
        assert!(!h.state.in_flight);
    }
}

#[test]
fn end_to_end_success_produces_dashboard_values() {
    let mut h = Harness::new(MockTransport::scripted(vec![sample_outcome()]));
    h.dispatch(Event::FileSelected(csv("data.csv")));
    assert!(h.state.trigger_enabled());

    h.dispatch(Event::Trigger);
    h.settle_one();

    assert_eq!(h.presented.len(), 1, "dashboard toggled on exactly once");
    let vm = build_view_model(&h.presented[0]);
    assert_eq!(vm.shape_display, "100 × 3");
    assert_eq!(vm.column_count, 3);
    assert_eq!(vm.missing_total, 3);
    assert_eq!(vm.type_tally, "1 integer");
    assert!(vm.missing_chart.is_some());
    assert!(vm.correlation_chart.is_none());
    assert!(h.errors.is_empty());
    assert!(h.state.trigger_enabled(), "ready for the next analysis");
}

#[test]
fn selection_failure_reaches_the_error_channel_not_the_network() {
    let mut h = Harness::new(MockTransport::scripted(Vec::new()));
    h.dispatch(Event::FileSelected(csv("report.pdf")));
    h.dispatch(Event::Trigger);

    assert_eq!(h.transport.calls(), 0);
    assert_eq!(h.requests_started, 0);
    assert_eq!(h.errors.len(), 2, "selection and trigger each surface an error");
}

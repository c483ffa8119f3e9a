// src/controller/mod.rs
//
// The analysis request lifecycle as a pure state machine: each input event
// maps to a state update plus a list of effects for the shell to execute.
// The `in_flight` flag is the entire synchronization mechanism; it gates
// re-entry and is cleared on every outcome, success or failure.

use crate::api::{AnalysisError, AnalysisResult};
use crate::validate::{validate_file, CandidateFile, ValidationError};

/// Perceived-latency floor applied before the request is dispatched.
pub const MIN_PERCEIVED_LATENCY: std::time::Duration = std::time::Duration::from_millis(500);

/// Discrete inputs to the controller.
#[derive(Debug, Clone)]
pub enum Event {
    FileSelected(CandidateFile),
    FileCleared,
    Trigger,
    /// The worker thread's single, guaranteed report back.
    Outcome(Result<AnalysisResult, AnalysisError>),
    DismissError,
}

/// Work the shell performs after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    ClearError,
    ShowError(String),
    StartRequest(CandidateFile),
    Present(AnalysisResult),
}

#[derive(Debug, Clone, Default)]
pub struct ControllerState {
    pub in_flight: bool,
    pub selected: Option<CandidateFile>,
}

impl ControllerState {
    /// The trigger control is usable only when a valid file is held and no
    /// request is outstanding.
    pub fn trigger_enabled(&self) -> bool {
        !self.in_flight && self.selected.is_some()
    }
}

pub fn transition(state: &mut ControllerState, event: Event) -> Vec<Effect> {
    match event {
        Event::FileSelected(file) => match validate_file(Some(&file)) {
            Ok(()) => {
                state.selected = Some(file);
                vec![Effect::ClearError]
            }
            Err(e) => {
                state.selected = None;
                vec![Effect::ShowError(e.to_string())]
            }
        },
        Event::FileCleared => {
            state.selected = None;
            vec![Effect::ClearError]
        }
        Event::Trigger => {
            if state.in_flight {
                // Single-flight: a trigger during an outstanding request is
                // dropped, not queued.
                return Vec::new();
            }
            // Defensive re-check of the held file before dispatch.
            if let Err(e) = validate_file(state.selected.as_ref()) {
                return vec![Effect::ShowError(e.to_string())];
            }
            let Some(file) = state.selected.clone() else {
                return vec![Effect::ShowError(ValidationError::NoFile.to_string())];
            };
            state.in_flight = true;
            vec![Effect::ClearError, Effect::StartRequest(file)]
        }
        Event::Outcome(result) => {
            // Guaranteed cleanup: runs for success and every failure mode.
            state.in_flight = false;
            match result {
                Ok(payload) => vec![Effect::Present(payload)],
                Err(e) => vec![Effect::ShowError(e.to_string())],
            }
        }
        Event::DismissError => vec![Effect::ClearError],
    }
}

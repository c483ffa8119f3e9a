// src/api/mod.rs
use indexmap::IndexMap;
use serde::Deserialize;

use crate::validate::ValidationError;

pub mod client;

pub use client::{AnalysisTransport, HttpTransport};

/// Everything that can go wrong between trigger and dashboard. All variants
/// funnel into the one error banner; none are fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{message}")]
    Transport { message: String },
    #[error("Invalid response from server")]
    MalformedResponse,
}

/// EDA block of the server payload. Both fields are optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EdaSummary {
    pub missing_values: Option<IndexMap<String, u64>>,
    pub correlation_matrix: Option<Vec<Vec<f64>>>,
}

/// Decoded `/analyze` body before shape acceptance. Every top-level field is
/// optional here so the presence check below, not serde, decides whether the
/// response is usable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAnalysis {
    pub shape: Option<[u64; 2]>,
    pub columns: Option<Vec<String>>,
    pub eda: Option<EdaSummary>,
    pub data_types: Option<IndexMap<String, String>>,
    pub ai_insights: Option<String>,
}

/// An accepted analysis payload.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub shape: [u64; 2],
    pub columns: Vec<String>,
    pub eda: EdaSummary,
    /// Insertion order is preserved so the type tally reads first-seen.
    pub data_types: IndexMap<String, String>,
    pub ai_insights: String,
}

impl RawAnalysis {
    /// Presence check only: `shape`, `columns`, `eda` and `ai_insights` must
    /// all be there. No type, range or matrix-squareness validation, and
    /// present-but-empty passes. `data_types` defaults to empty.
    pub fn into_validated(self) -> Result<AnalysisResult, AnalysisError> {
        match (self.shape, self.columns, self.eda, self.ai_insights) {
            (Some(shape), Some(columns), Some(eda), Some(ai_insights)) => Ok(AnalysisResult {
                shape,
                columns,
                eda,
                data_types: self.data_types.unwrap_or_default(),
                ai_insights,
            }),
            _ => Err(AnalysisError::MalformedResponse),
        }
    }
}

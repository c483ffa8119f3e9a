// src/validate/mod.rs
use std::path::PathBuf;

/// Hard upload limit: 50 MiB, inclusive.
pub const MAX_UPLOAD_BYTES: u64 = 52_428_800;

/// A file picked by the user, held between selection and submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub name: String,
    pub byte_size: u64,
    pub path: PathBuf,
}

impl CandidateFile {
    pub fn new(name: impl Into<String>, byte_size: u64, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            byte_size,
            path: path.into(),
        }
    }

    /// Lowercased suffix after the last `.`, if any.
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please select a file first")]
    NoFile,
    #[error("Only CSV files are supported")]
    UnsupportedType,
    #[error("File exceeds the 50 MB upload limit")]
    TooLarge,
}

/// Acceptance check run both at selection time and again right before
/// submission. Pure and deterministic.
pub fn validate_file(file: Option<&CandidateFile>) -> Result<(), ValidationError> {
    let file = file.ok_or(ValidationError::NoFile)?;
    if file.extension().as_deref() != Some("csv") {
        return Err(ValidationError::UnsupportedType);
    }
    if file.byte_size > MAX_UPLOAD_BYTES {
        return Err(ValidationError::TooLarge);
    }
    Ok(())
}

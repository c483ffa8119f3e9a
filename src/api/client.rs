// src/api/client.rs
use std::time::Duration;

use serde::Deserialize;

use crate::api::{AnalysisError, AnalysisResult, RawAnalysis};
use crate::validate::CandidateFile;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Seam between the controller and the network, so the request lifecycle can
/// be exercised without a server. Blocking by design: calls run on the
/// request worker thread, never on the UI thread.
pub trait AnalysisTransport: Send + Sync {
    fn analyze(&self, file: &CandidateFile) -> Result<AnalysisResult, AnalysisError>;
}

/// Production transport: one multipart POST to `{base_url}/analyze`.
pub struct HttpTransport {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Result<Self, AnalysisError> {
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AnalysisError::Transport {
                message: format!("Could not initialize HTTP client: {e}"),
            })?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/analyze", self.base_url)
    }
}

impl AnalysisTransport for HttpTransport {
    fn analyze(&self, file: &CandidateFile) -> Result<AnalysisResult, AnalysisError> {
        let bytes = std::fs::read(&file.path).map_err(|e| AnalysisError::Transport {
            message: format!("Could not read {}: {e}", file.name),
        })?;
        let part = reqwest::blocking::multipart::Part::bytes(bytes).file_name(file.name.clone());
        let form = reqwest::blocking::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.endpoint())
            .multipart(form)
            .send()
            .map_err(|e| AnalysisError::Transport {
                message: format!("Network error: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().map(|b| b.to_vec()).unwrap_or_default();
            return Err(AnalysisError::Transport {
                message: error_message(
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown Error"),
                    &body,
                ),
            });
        }

        let raw: RawAnalysis = response
            .json()
            .map_err(|_| AnalysisError::MalformedResponse)?;
        raw.into_validated()
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Best-available message for a non-2xx response: the JSON `error` field if
/// the body decodes, else a synthesized status line.
fn error_message(status: u16, reason: &str, body: &[u8]) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .unwrap_or_else(|| format!("HTTP {status}: {reason}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_field_from_json_body_wins() {
        let body = br#"{"error": "Uploaded CSV file is empty"}"#;
        assert_eq!(error_message(400, "Bad Request", body), "Uploaded CSV file is empty");
    }

    #[test]
    fn undecodable_body_falls_back_to_status_line() {
        assert_eq!(
            error_message(500, "Internal Server Error", b"<html>boom</html>"),
            "HTTP 500: Internal Server Error",
        );
    }

    #[test]
    fn json_body_without_error_field_falls_back_too() {
        assert_eq!(
            error_message(502, "Bad Gateway", br#"{"details": "upstream"}"#),
            "HTTP 502: Bad Gateway",
        );
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let transport = HttpTransport::new("http://localhost:5000/").unwrap();
        assert_eq!(transport.endpoint(), "http://localhost:5000/analyze");
    }
}

// src/config/mod.rs
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

/// Startup configuration, read once in `main`.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the analysis service (`DATALENS_SERVER_URL`).
    pub server_url: String,
    /// `--demo`: skip the network and seed the dashboard with a fixture.
    pub demo: bool,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::build(
            std::env::var("DATALENS_SERVER_URL").ok(),
            std::env::args().skip(1),
        )
    }

    fn build(server_url: Option<String>, args: impl Iterator<Item = String>) -> Self {
        Self {
            server_url: server_url
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string()),
            demo: args.into_iter().any(|a| a == "--demo"),
        }
    }
}

// src/main.rs
use anyhow::Result;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use datalens_gui::app::DataLensApp;
use datalens_gui::config::ClientConfig;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ClientConfig::from_env();
    tracing::info!(server = %config.server_url, demo = config.demo, "starting DataLens client");

    let app = DataLensApp::new(&config)?;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 820.0])
            .with_title("DataLens"),
        ..Default::default()
    };

    eframe::run_native("DataLens", options, Box::new(move |_cc| Box::new(app)))
        .map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))
}

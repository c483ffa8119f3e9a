// src/app.rs
use eframe::egui;
use rfd::FileDialog;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::api::{AnalysisError, AnalysisResult, AnalysisTransport, HttpTransport};
use crate::config::ClientConfig;
use crate::controller::{self, Effect, Event, MIN_PERCEIVED_LATENCY};
use crate::dashboard::build_view_model;
use crate::demo;
use crate::state::{AppState, ErrorBanner};
use crate::ui;
use crate::validate::CandidateFile;

type Outcome = Result<AnalysisResult, AnalysisError>;

pub struct DataLensApp {
    state: AppState,
    transport: Arc<dyn AnalysisTransport>,
    outcome_tx: Sender<Outcome>,
    outcome_rx: Receiver<Outcome>,
}

impl DataLensApp {
    pub fn new(config: &ClientConfig) -> anyhow::Result<Self> {
        let transport: Arc<dyn AnalysisTransport> =
            Arc::new(HttpTransport::new(config.server_url.clone())?);
        let (outcome_tx, outcome_rx) = mpsc::channel();

        let mut state = AppState::new();
        if config.demo {
            state.dashboard = Some(build_view_model(&demo::seed_result()));
        }

        Ok(Self {
            state,
            transport,
            outcome_tx,
            outcome_rx,
        })
    }

    fn handle_event(&mut self, event: Event, ctx: &egui::Context) {
        let effects = controller::transition(&mut self.state.controller, event);
        for effect in effects {
            self.run_effect(effect, ctx);
        }
    }

    fn run_effect(&mut self, effect: Effect, ctx: &egui::Context) {
        match effect {
            Effect::ClearError => self.state.banner = None,
            Effect::ShowError(message) => {
                tracing::warn!(%message, "analysis failed");
                self.state.banner = Some(ErrorBanner::new(message));
            }
            Effect::StartRequest(file) => self.start_request(file, ctx),
            Effect::Present(result) => {
                tracing::info!(
                    rows = result.shape[0],
                    cols = result.shape[1],
                    "analysis complete"
                );
                self.state.dashboard = Some(build_view_model(&result));
                self.state.scroll_to_dashboard = true;
            }
        }
    }

    fn start_request(&self, file: CandidateFile, ctx: &egui::Context) {
        tracing::info!(file = %file.name, bytes = file.byte_size, "dispatching analysis request");
        let transport = Arc::clone(&self.transport);
        let tx = self.outcome_tx.clone();
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            // Perceived-latency floor runs before the network call, not
            // overlapping it.
            std::thread::sleep(MIN_PERCEIVED_LATENCY);
            let outcome = transport.analyze(&file);
            // A dead receiver just means the app is shutting down.
            let _ = tx.send(outcome);
            ctx.request_repaint();
        });
    }

    fn pick_file(&mut self, ctx: &egui::Context) {
        let file_dialog = FileDialog::new()
            .add_filter("CSV files", &["csv"])
            .set_title("Select a dataset");

        if let Some(path) = file_dialog.pick_file() {
            self.select_path(path, ctx);
        }
    }

    fn select_path(&mut self, path: PathBuf, ctx: &egui::Context) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match std::fs::metadata(&path) {
            Ok(meta) => {
                let file = CandidateFile::new(name, meta.len(), path);
                self.handle_event(Event::FileSelected(file), ctx);
            }
            Err(e) => {
                self.run_effect(
                    Effect::ShowError(format!("Could not read {name}: {e}")),
                    ctx,
                );
            }
        }
    }

    fn show_menu(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Open CSV...").clicked() {
                    self.pick_file(ctx);
                    ui.close_menu();
                }
                if ui.button("Clear Selection").clicked() {
                    self.handle_event(Event::FileCleared, ctx);
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Quit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });
        });
    }

    fn show_upload_section(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.heading("DataLens");
        ui.label("Upload a CSV file and explore its EDA summary.");
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            if ui.button("📂 Open CSV...").clicked() {
                self.pick_file(ctx);
            }
            match &self.state.controller.selected {
                Some(file) => {
                    ui.label(format!(
                        "{} ({})",
                        file.name,
                        ui::format_bytes(file.byte_size)
                    ));
                }
                None => {
                    ui.weak("No file selected — drop a CSV here or open one");
                }
            }
        });
        ui.add_space(4.0);

        ui.horizontal(|ui| {
            let enabled = self.state.controller.trigger_enabled();
            let analyze = ui
                .add_enabled(enabled, egui::Button::new("▶ Analyze"))
                .on_hover_text("Ctrl+Enter");
            if analyze.clicked() {
                self.handle_event(Event::Trigger, ctx);
            }
            if self.state.controller.in_flight {
                ui.spinner();
                ui.label("Analyzing…");
            }
        });
    }

    fn show_error_banner(&mut self, ctx: &egui::Context) {
        let mut dismissed = false;
        if let Some(banner) = &self.state.banner {
            egui::TopBottomPanel::top("error_banner")
                .frame(
                    egui::Frame::none()
                        .fill(egui::Color32::from_rgb(102, 31, 31))
                        .inner_margin(egui::Margin::symmetric(12.0, 8.0)),
                )
                .show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        ui.colored_label(
                            egui::Color32::from_rgb(255, 205, 205),
                            &banner.message,
                        );
                        ui.with_layout(
                            egui::Layout::right_to_left(egui::Align::Center),
                            |ui| {
                                if ui.button("✖").clicked() {
                                    dismissed = true;
                                }
                            },
                        );
                    });
                });
        }
        if dismissed {
            self.handle_event(Event::DismissError, ctx);
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let (trigger, dismiss) = ctx.input(|i| {
            (
                i.modifiers.command && i.key_pressed(egui::Key::Enter),
                i.key_pressed(egui::Key::Escape),
            )
        });
        if trigger && self.state.controller.trigger_enabled() {
            self.handle_event(Event::Trigger, ctx);
        }
        if dismiss && self.state.banner.is_some() {
            self.handle_event(Event::DismissError, ctx);
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .collect()
        });
        for path in dropped {
            self.select_path(path, ctx);
        }
    }
}

impl eframe::App for DataLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // The worker thread reports back through the channel; each outcome
        // re-enables the trigger via the controller's cleanup transition.
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.handle_event(Event::Outcome(outcome), ctx);
        }

        // Auto-dismiss; keep repainting while the banner is up so the
        // timeout fires without user input.
        if let Some(banner) = &self.state.banner {
            if banner.expired(Instant::now()) {
                self.state.banner = None;
            } else {
                ctx.request_repaint_after(Duration::from_millis(250));
            }
        }

        self.handle_shortcuts(ctx);
        self.handle_dropped_files(ctx);

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            self.show_menu(ui, ctx);
        });

        if self.state.banner.is_some() {
            self.show_error_banner(ctx);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    self.show_upload_section(ui, ctx);
                    ui.add_space(12.0);
                    ui.separator();
                    ui.add_space(12.0);
                    ui::dashboard::draw_dashboard(ui, &mut self.state);
                });
        });
    }
}

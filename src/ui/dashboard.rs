// src/ui/dashboard.rs
use eframe::egui;

use crate::insights::{Block, Inline};
use crate::state::AppState;
use crate::ui::charts;

pub fn draw_dashboard(ui: &mut egui::Ui, state: &mut AppState) {
    let Some(vm) = &state.dashboard else {
        return;
    };

    let heading = ui.heading("Analysis Dashboard");
    if state.scroll_to_dashboard {
        heading.scroll_to_me(Some(egui::Align::TOP));
        state.scroll_to_dashboard = false;
    }
    ui.weak(format!("Last refreshed: {}", vm.refreshed_at));
    ui.add_space(8.0);

    egui::Grid::new("summary_grid")
        .num_columns(4)
        .spacing([24.0, 4.0])
        .show(ui, |ui| {
            summary_card(ui, "Shape", &vm.shape_display);
            summary_card(ui, "Columns", &vm.column_count.to_string());
            summary_card(ui, "Missing Values", &vm.missing_total.to_string());
            summary_card(ui, "Data Types", &vm.type_tally);
            ui.end_row();
        });

    if let Some(spec) = &vm.missing_chart {
        ui.add_space(12.0);
        ui.separator();
        ui.strong("Missing Values per Column");
        charts::draw_missing_values(ui, spec);
    }

    if let Some(spec) = &vm.correlation_chart {
        ui.add_space(12.0);
        ui.separator();
        ui.strong("Correlation Heatmap");
        ui.add_space(4.0);
        charts::draw_correlation(ui, spec);
    }

    ui.add_space(12.0);
    ui.separator();
    ui.strong("AI Insights");
    ui.add_space(4.0);
    draw_insights(ui, &vm.insight_blocks);
}

fn summary_card(ui: &mut egui::Ui, title: &str, value: &str) {
    ui.group(|ui| {
        ui.vertical(|ui| {
            ui.label(egui::RichText::new(title).small().weak());
            ui.label(egui::RichText::new(value).strong().size(18.0));
        });
    });
}

fn draw_insights(ui: &mut egui::Ui, blocks: &[Block]) {
    if blocks.is_empty() {
        ui.weak("No insights available.");
        return;
    }
    for block in blocks {
        match block {
            Block::Heading { level: 3, spans } => {
                ui.add_space(6.0);
                ui.label(egui::RichText::new(flatten(spans)).strong().size(15.0));
            }
            Block::Heading { spans, .. } => {
                ui.add_space(8.0);
                ui.label(egui::RichText::new(flatten(spans)).strong().size(17.0));
            }
            Block::Paragraph(spans) => {
                let job = inline_job(ui.style(), spans);
                ui.label(job);
            }
            Block::List(items) => {
                for item in items {
                    let job = inline_job(ui.style(), item);
                    ui.horizontal_wrapped(|ui| {
                        ui.label("•");
                        ui.label(job);
                    });
                }
            }
        }
    }
}

/// Headings render flattened: span markup inside a heading is dropped.
fn flatten(spans: &[Inline]) -> String {
    let mut out = String::new();
    for span in spans {
        match span {
            Inline::Text(t) | Inline::Strong(t) | Inline::Emphasis(t) => out.push_str(t),
            Inline::Break => out.push(' '),
        }
    }
    out
}

fn inline_job(style: &egui::Style, spans: &[Inline]) -> egui::text::LayoutJob {
    let font_id = egui::TextStyle::Body.resolve(style);
    let text_color = style.visuals.text_color();
    let strong_color = style.visuals.strong_text_color();
    let format = |color: egui::Color32, italics: bool| egui::TextFormat {
        font_id: font_id.clone(),
        color,
        italics,
        ..Default::default()
    };

    let mut job = egui::text::LayoutJob::default();
    for span in spans {
        match span {
            Inline::Text(t) => job.append(t, 0.0, format(text_color, false)),
            Inline::Strong(t) => job.append(t, 0.0, format(strong_color, false)),
            Inline::Emphasis(t) => job.append(t, 0.0, format(text_color, true)),
            Inline::Break => job.append("\n", 0.0, format(text_color, false)),
        }
    }
    job
}

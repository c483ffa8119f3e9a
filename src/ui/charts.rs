// src/ui/charts.rs
use eframe::egui;

use crate::dashboard::{correlation_color, BarChartSpec, HeatmapSpec};

/// One bar per column, in the spec's label order. Hovering a bar shows its
/// column name. A spec with no bars draws nothing.
pub fn draw_missing_values(ui: &mut egui::Ui, spec: &BarChartSpec) {
    if spec.labels.is_empty() {
        return;
    }
    let bars: Vec<egui_plot::Bar> = spec
        .values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let label = spec.labels.get(i).map(String::as_str).unwrap_or("");
            egui_plot::Bar::new(i as f64, value).width(0.6).name(label)
        })
        .collect();

    egui_plot::Plot::new("missing_values_plot")
        .height(220.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(egui_plot::BarChart::new(bars).name("Missing values"));
        });

    ui.horizontal_wrapped(|ui| {
        for (i, label) in spec.labels.iter().enumerate() {
            ui.weak(format!("{i}: {label}"));
        }
    });
}

/// Painted correlation heatmap. Cell size comes from the available plotting
/// area divided by the column count; hovering a cell shows its pair label
/// and coefficient. Empty specs draw nothing.
pub fn draw_correlation(ui: &mut egui::Ui, spec: &HeatmapSpec) {
    if spec.side == 0 || spec.cells.is_empty() {
        return;
    }
    let n = spec.side as f32;
    let cell = (ui.available_width().min(420.0) / n).max(14.0);
    let (rect, response) =
        ui.allocate_exact_size(egui::vec2(cell * n, cell * n), egui::Sense::hover());
    if !ui.is_rect_visible(rect) {
        return;
    }

    let painter = ui.painter_at(rect);
    for c in &spec.cells {
        let min = rect.min + egui::vec2(c.col as f32 * cell, c.row as f32 * cell);
        let cell_rect = egui::Rect::from_min_size(min, egui::vec2(cell, cell)).shrink(1.0);
        let (r, g, b) = correlation_color(c.value);
        painter.rect_filled(cell_rect, 2.0, egui::Color32::from_rgb(r, g, b));
        if cell >= 34.0 {
            painter.text(
                cell_rect.center(),
                egui::Align2::CENTER_CENTER,
                format!("{:.2}", c.value),
                egui::FontId::proportional(11.0),
                egui::Color32::DARK_GRAY,
            );
        }
    }

    if let Some(pos) = response.hover_pos() {
        let col = ((pos.x - rect.min.x) / cell).floor() as usize;
        let row = ((pos.y - rect.min.y) / cell).floor() as usize;
        if let Some(c) = spec.cells.iter().find(|c| c.row == row && c.col == col) {
            response.on_hover_text(format!("{}: {:.2}", c.tooltip, c.value));
        }
    }
}

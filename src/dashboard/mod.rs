// src/dashboard/mod.rs
use indexmap::IndexMap;

use crate::api::AnalysisResult;
use crate::insights::{self, Block};

/// Shown in the type tally slot when the payload carried no type info.
pub const NO_TYPES_PLACEHOLDER: &str = "No type information";

/// Missing-values bar chart: one bar per column, in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChartSpec {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapCell {
    pub row: usize,
    pub col: usize,
    pub value: f64,
    pub tooltip: String,
}

/// Correlation heatmap: cell (i, j) carries `matrix[i][j]`.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapSpec {
    pub labels: Vec<String>,
    pub side: usize,
    pub cells: Vec<HeatmapCell>,
}

/// Everything the dashboard surface needs, recomputed wholesale on every
/// successful analysis. Building it is pure apart from the refresh clock.
#[derive(Debug, Clone)]
pub struct DashboardViewModel {
    pub shape_display: String,
    pub column_count: usize,
    pub missing_total: u64,
    pub type_tally: String,
    pub insight_blocks: Vec<Block>,
    pub missing_chart: Option<BarChartSpec>,
    pub correlation_chart: Option<HeatmapSpec>,
    pub refreshed_at: String,
}

pub fn build_view_model(result: &AnalysisResult) -> DashboardViewModel {
    DashboardViewModel {
        shape_display: format!("{} × {}", result.shape[0], result.shape[1]),
        column_count: result.columns.len(),
        missing_total: missing_total(result),
        type_tally: type_tally(&result.data_types),
        insight_blocks: insights::parse(&result.ai_insights),
        missing_chart: result
            .eda
            .missing_values
            .as_ref()
            .map(|mv| missing_values_chart(mv, &result.columns)),
        correlation_chart: result
            .eda
            .correlation_matrix
            .as_ref()
            .map(|m| correlation_chart(m, &result.columns)),
        refreshed_at: chrono::Local::now().format("%H:%M:%S").to_string(),
    }
}

/// Sum over all missing-value counts; an absent mapping contributes zero.
pub fn missing_total(result: &AnalysisResult) -> u64 {
    result
        .eda
        .missing_values
        .as_ref()
        .map(|mv| mv.values().sum())
        .unwrap_or(0)
}

/// `"<count> <type>"` pairs, lowercased, counted in first-seen order.
pub fn type_tally(data_types: &IndexMap<String, String>) -> String {
    if data_types.is_empty() {
        return NO_TYPES_PLACEHOLDER.to_string();
    }
    let mut counts: IndexMap<String, u64> = IndexMap::new();
    for label in data_types.values() {
        *counts.entry(label.to_lowercase()).or_insert(0) += 1;
    }
    counts
        .iter()
        .map(|(label, count)| format!("{count} {label}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// One bar per column in the supplied column order, zero when the column is
/// absent from the mapping. Falls back to the mapping's own order only when
/// no column list was supplied alongside it.
pub fn missing_values_chart(
    missing_values: &IndexMap<String, u64>,
    columns: &[String],
) -> BarChartSpec {
    if columns.is_empty() {
        return BarChartSpec {
            labels: missing_values.keys().cloned().collect(),
            values: missing_values.values().map(|&v| v as f64).collect(),
        };
    }
    BarChartSpec {
        labels: columns.to_vec(),
        values: columns
            .iter()
            .map(|c| missing_values.get(c).copied().unwrap_or(0) as f64)
            .collect(),
    }
}

pub fn correlation_chart(matrix: &[Vec<f64>], columns: &[String]) -> HeatmapSpec {
    let label = |i: usize| {
        columns
            .get(i)
            .cloned()
            .unwrap_or_else(|| format!("col {i}"))
    };
    let mut cells = Vec::new();
    for (i, row) in matrix.iter().enumerate() {
        for (j, &value) in row.iter().enumerate() {
            cells.push(HeatmapCell {
                row: i,
                col: j,
                value,
                tooltip: format!("{} vs {}", label(i), label(j)),
            });
        }
    }
    HeatmapSpec {
        labels: columns.to_vec(),
        side: matrix.len(),
        cells,
    }
}

/// Heatmap cell color: hue encodes sign (zero counts as positive), intensity
/// is the absolute value blended from white toward the hue.
pub fn correlation_color(value: f64) -> (u8, u8, u8) {
    let (base_r, base_g, base_b) = if value < 0.0 {
        (217u16, 83u16, 79u16) // red for negative
    } else {
        (66u16, 133u16, 244u16) // blue for non-negative
    };
    let t = value.abs().clamp(0.0, 1.0);
    let blend = |base: u16| (255.0 - t * (255.0 - base as f64)).round() as u8;
    (blend(base_r), blend(base_g), blend(base_b))
}

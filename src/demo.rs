// src/demo.rs
//
// Fixed payload for `--demo`: feeds the presenter without touching the
// network. A visual-testing fixture, not part of the analysis contract.

use indexmap::indexmap;

use crate::api::{AnalysisResult, EdaSummary};

pub fn seed_result() -> AnalysisResult {
    AnalysisResult {
        shape: [1470, 5],
        columns: vec![
            "age".to_string(),
            "salary".to_string(),
            "job_level".to_string(),
            "department".to_string(),
            "years_at_company".to_string(),
        ],
        eda: EdaSummary {
            missing_values: Some(indexmap! {
                "age".to_string() => 5,
                "salary".to_string() => 2,
                "job_level".to_string() => 0,
                "department".to_string() => 12,
                "years_at_company".to_string() => 0,
            }),
            correlation_matrix: Some(vec![
                vec![1.0, 0.42, 0.51, 0.08, 0.68],
                vec![0.42, 1.0, 0.87, 0.11, 0.35],
                vec![0.51, 0.87, 1.0, 0.05, 0.46],
                vec![0.08, 0.11, 0.05, 1.0, -0.13],
                vec![0.68, 0.35, 0.46, -0.13, 1.0],
            ]),
        },
        data_types: indexmap! {
            "age".to_string() => "integer".to_string(),
            "salary".to_string() => "float".to_string(),
            "job_level".to_string() => "integer".to_string(),
            "department".to_string() => "object".to_string(),
            "years_at_company".to_string() => "integer".to_string(),
        },
        ai_insights: "## Key Trends\n\
            **Salary** and **job_level** are strongly correlated (0.87).\n\n\
            ### Recommendations\n\
            - Review the 12 missing department entries\n\
            - Consider scaling salary before modeling\n\
            1. Check categorical columns for imbalance"
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_matrix_is_square_over_all_columns() {
        let seed = seed_result();
        let matrix = seed.eda.correlation_matrix.unwrap();
        assert_eq!(matrix.len(), seed.columns.len());
        assert!(matrix.iter().all(|row| row.len() == seed.columns.len()));
    }
}

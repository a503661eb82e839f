use crate::domain::{card::Trackable, lanes::Lanes};
use serde::Serialize;

/// Header figures for one lane
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageMetrics {
    pub stage: String,
    pub total: usize,
    /// Mean days in stage; 0 for an empty lane
    pub avg_time_in_stage: f64,
}

impl StageMetrics {
    /// Metrics per lane, in stage order
    pub fn for_lanes<T: Trackable>(lanes: &Lanes<'_, T>) -> Vec<StageMetrics> {
        lanes
            .iter()
            .map(|(stage, cards)| {
                let total = cards.len();
                let days: u64 = cards.iter().map(|c| u64::from(c.time_in_stage())).sum();
                let avg_time_in_stage = if total == 0 {
                    0.0
                } else {
                    days as f64 / total as f64
                };
                StageMetrics {
                    stage: stage.to_string(),
                    total,
                    avg_time_in_stage,
                }
            })
            .collect()
    }
}

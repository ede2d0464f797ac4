use crate::core::Event;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const DAY_MS: f64 = 86_400_000.0;

/// Classification of a merge by its parent count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeComplexity {
    /// Exactly two parents
    Simple,
    /// More than two parents
    Octopus,
    /// Reserved; no parent-count rule currently produces it
    Complex,
}

impl MergeComplexity {
    pub fn from_parent_count(parent_count: usize) -> Self {
        if parent_count > 2 {
            MergeComplexity::Octopus
        } else {
            MergeComplexity::Simple
        }
    }
}

/// What a single merge brought together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeAnalysis {
    pub merge_event: Event,
    /// Resolved non-first parents
    pub source_events: Vec<Event>,
    pub target_branch: String,
    /// Whole days between the oldest source event and the merge
    pub branch_lifetime_days: u64,
    pub complexity: MergeComplexity,
}

/// Days between the earliest source event and the merge, rounded, never negative
pub fn branch_lifetime_days(merged_at: DateTime<Utc>, sources: &[Event]) -> u64 {
    let Some(earliest) = sources.iter().map(|e| e.timestamp).min() else {
        return 0;
    };

    let elapsed_ms = (merged_at - earliest).num_milliseconds() as f64;
    (elapsed_ms / DAY_MS).round().max(0.0) as u64
}

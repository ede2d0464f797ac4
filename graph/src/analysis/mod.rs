pub mod analyzer;
pub mod hints;
pub mod merge;

pub use analyzer::{AnalysisStatistics, RelationshipAnalyzer};
pub use merge::{MergeAnalysis, MergeComplexity};

//! Relationship inference and connection geometry for version-history timelines.
//!
//! ```text
//! events -> EventIndex -> RelationshipAnalyzer -> relationships
//!                                                     | + positions (layout engine)
//!                                                     v
//!                                             ConnectionMapper -> connection lines
//! ```
//!
//! Nothing here performs I/O or keeps state between calls.

pub mod analysis;
pub mod config;
pub mod core;
pub mod error;
pub mod render;

pub use analysis::{AnalysisStatistics, MergeAnalysis, MergeComplexity, RelationshipAnalyzer};
pub use config::{AnalyzerConfig, GraphConfig, MapperConfig};
pub use crate::core::{
    Event, EventImpact, EventIndex, EventType, LineStyle, Relationship, RelationshipMetadata,
    RelationshipType,
};
pub use error::ConfigError;
pub use render::{
    ConnectionLine, ConnectionMapper, ConnectionStatistics, ConnectionStyle, CurveClass,
    PathCommand, PathDescriptor, Point, Position,
};

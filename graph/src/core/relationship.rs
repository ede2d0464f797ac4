use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of edge between two events
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationshipType {
    /// Regular parent-child relationship
    ParentChild,
    /// Non-first parent flowing into a merge
    MergeSource,
    /// First parent of a merge (the receiving branch)
    MergeTarget,
    BranchCreation,
    TagReference,
}

impl RelationshipType {
    pub const ALL: [RelationshipType; 5] = [
        RelationshipType::ParentChild,
        RelationshipType::MergeSource,
        RelationshipType::MergeTarget,
        RelationshipType::BranchCreation,
        RelationshipType::TagReference,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipType::ParentChild => "parent-child",
            RelationshipType::MergeSource => "merge-source",
            RelationshipType::MergeTarget => "merge-target",
            RelationshipType::BranchCreation => "branch-creation",
            RelationshipType::TagReference => "tag-reference",
        }
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Line style hint attached by the analyzer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
}

/// Advisory rendering hints for a relationship
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<LineStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A directed, typed edge between two events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub id: String,
    /// Source event ID (the older side: parent)
    pub source: String,
    /// Target event ID (the newer side: child or merge)
    pub target: String,
    #[serde(rename = "type")]
    pub relationship_type: RelationshipType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<RelationshipMetadata>,
}

impl Relationship {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        relationship_type: RelationshipType,
    ) -> Self {
        let source = source.into();
        let target = target.into();
        Self {
            id: Self::derive_id(&source, &target, relationship_type),
            source,
            target,
            relationship_type,
            metadata: None,
        }
    }

    /// Stable ID: identical endpoints and type always give the same ID
    pub fn derive_id(source: &str, target: &str, relationship_type: RelationshipType) -> String {
        format!("{}-{}-{}", source, target, relationship_type)
    }

    pub fn with_metadata(mut self, metadata: RelationshipMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

use crate::core::RelationshipType;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Options for relationship inference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Analyze merges with more than two parents
    pub include_octopus_merges: bool,
    /// Upper bound for descendant searches
    pub max_parent_depth: usize,
    /// Attach color/style hints to inferred relationships
    pub generate_visual_hints: bool,
    /// Also emit branch-creation and tag-reference edges (off by default)
    pub infer_lifecycle_relationships: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            include_octopus_merges: true,
            max_parent_depth: 5,
            generate_visual_hints: true,
            infer_lifecycle_relationships: false,
        }
    }
}

/// Runtime options for turning relationships into connection lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    pub enabled_relationship_types: BTreeSet<RelationshipType>,
    /// 0.0 (straight) to 1.0 (strongly bowed)
    pub curve_intensity: f64,
    pub minimum_line_opacity: f64,
    pub maximum_line_width: f64,
    /// Collapse connections sharing the same endpoints
    pub group_similar_connections: bool,
    /// Fade lines as the connection count grows
    pub adaptive_opacity: bool,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            enabled_relationship_types: RelationshipType::ALL.into_iter().collect(),
            curve_intensity: 0.3,
            minimum_line_opacity: 0.1,
            maximum_line_width: 4.0,
            group_similar_connections: true,
            adaptive_opacity: true,
        }
    }
}

impl MapperConfig {
    pub fn is_enabled(&self, relationship_type: RelationshipType) -> bool {
        self.enabled_relationship_types.contains(&relationship_type)
    }
}

/// Combined configuration, typically loaded from a TOML file:
///
/// ```toml
/// [analyzer]
/// max_parent_depth = 8
///
/// [mapper]
/// curve_intensity = 0.5
/// enabled_relationship_types = ["parent-child", "merge-target"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub analyzer: AnalyzerConfig,
    pub mapper: MapperConfig,
}

impl GraphConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_file_gives_defaults() {
        let config = GraphConfig::from_toml_str("").unwrap();
        assert_eq!(config, GraphConfig::default());
        assert_eq!(config.mapper.enabled_relationship_types.len(), 5);
        assert_eq!(config.analyzer.max_parent_depth, 5);
        assert!(!config.analyzer.infer_lifecycle_relationships);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = GraphConfig::from_toml_str(
            r#"
            [analyzer]
            include_octopus_merges = false

            [mapper]
            curve_intensity = 0.5
            enabled_relationship_types = ["parent-child", "merge-target"]
            "#,
        )
        .unwrap();

        assert!(!config.analyzer.include_octopus_merges);
        assert!(config.analyzer.generate_visual_hints);
        assert_eq!(config.mapper.curve_intensity, 0.5);
        assert!(config.mapper.is_enabled(RelationshipType::MergeTarget));
        assert!(!config.mapper.is_enabled(RelationshipType::MergeSource));
        assert!(config.mapper.adaptive_opacity);
    }

    #[test]
    fn unknown_relationship_type_is_rejected() {
        let err = GraphConfig::from_toml_str("[mapper]\nenabled_relationship_types = [\"sibling\"]")
            .unwrap_err();
        assert!(err.to_string().starts_with("invalid configuration"));
    }
}

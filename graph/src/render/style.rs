use super::path::CurveClass;
use crate::config::MapperConfig;
use crate::core::{LineStyle, Relationship, RelationshipType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const DASHED: [f64; 2] = [6.0, 4.0];
pub const DOTTED: [f64; 2] = [2.0, 3.0];

/// Base look of one relationship type
#[derive(Debug, Clone, PartialEq)]
pub struct StyleTemplate {
    pub color: String,
    pub width: f64,
    pub opacity: f64,
    pub curve: CurveClass,
    pub dash: Option<[f64; 2]>,
}

/// Resolved stroke for a connection line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionStyle {
    pub color: String,
    pub width: f64,
    pub opacity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dash_array: Option<[f64; 2]>,
}

/// Style templates keyed by relationship type
#[derive(Debug, Clone)]
pub struct StyleTable {
    templates: HashMap<RelationshipType, StyleTemplate>,
}

impl Default for StyleTable {
    fn default() -> Self {
        let mut table = Self {
            templates: HashMap::new(),
        };
        table.build_defaults();
        table
    }
}

impl StyleTable {
    fn build_defaults(&mut self) {
        use CurveClass::{Gentle, Strong};
        use RelationshipType::*;

        self.insert(ParentChild, "#6b7280", 2.0, 0.6, Gentle, None);
        self.insert(MergeSource, "#f59e0b", 2.5, 0.8, Strong, None);
        self.insert(MergeTarget, "#3b82f6", 3.0, 0.9, Strong, None);
        self.insert(BranchCreation, "#10b981", 2.0, 0.7, Gentle, Some(DASHED));
        self.insert(TagReference, "#8b5cf6", 1.5, 0.5, Gentle, Some(DOTTED));
    }

    fn insert(
        &mut self,
        relationship_type: RelationshipType,
        color: &str,
        width: f64,
        opacity: f64,
        curve: CurveClass,
        dash: Option<[f64; 2]>,
    ) {
        self.templates.insert(
            relationship_type,
            StyleTemplate {
                color: color.to_string(),
                width,
                opacity,
                curve,
                dash,
            },
        );
    }

    /// Replace one template, e.g. to draw tag references straight
    pub fn with_template(
        mut self,
        relationship_type: RelationshipType,
        template: StyleTemplate,
    ) -> Self {
        self.templates.insert(relationship_type, template);
        self
    }

    pub fn template(&self, relationship_type: RelationshipType) -> &StyleTemplate {
        // build_defaults covers every variant, with_template only replaces
        &self.templates[&relationship_type]
    }

    /// Template plus relationship hints, clamped to the configured limits
    pub fn resolve(
        &self,
        relationship: &Relationship,
        config: &MapperConfig,
    ) -> (ConnectionStyle, CurveClass) {
        let template = self.template(relationship.relationship_type);
        let mut style = ConnectionStyle {
            color: template.color.clone(),
            width: template.width,
            opacity: template.opacity,
            dash_array: template.dash,
        };

        if let Some(meta) = &relationship.metadata {
            if let Some(color) = &meta.color {
                style.color = color.clone();
            }
            if let Some(opacity) = meta.opacity {
                style.opacity = opacity.max(config.minimum_line_opacity);
            }
            match meta.style {
                Some(LineStyle::Dashed) => style.dash_array = Some(DASHED),
                Some(LineStyle::Dotted) => style.dash_array = Some(DOTTED),
                Some(LineStyle::Solid) | None => {}
            }
        }

        style.width = style.width.min(config.maximum_line_width);
        style.opacity = style.opacity.max(config.minimum_line_opacity);

        (style, template.curve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RelationshipMetadata;

    #[test]
    fn every_type_has_a_template() {
        let table = StyleTable::default();
        for kind in RelationshipType::ALL {
            assert!(table.template(kind).width > 0.0);
        }
        assert_ne!(
            table.template(RelationshipType::MergeSource).color,
            table.template(RelationshipType::MergeTarget).color
        );
    }

    #[test]
    fn metadata_overrides_are_clamped() {
        let table = StyleTable::default();
        let config = MapperConfig {
            minimum_line_opacity: 0.25,
            maximum_line_width: 2.0,
            ..Default::default()
        };
        let rel = Relationship::new("a", "b", RelationshipType::MergeTarget).with_metadata(
            RelationshipMetadata {
                color: Some("#000000".into()),
                opacity: Some(0.05),
                style: Some(LineStyle::Dotted),
                description: None,
            },
        );

        let (style, curve) = table.resolve(&rel, &config);
        assert_eq!(style.color, "#000000");
        assert_eq!(style.opacity, 0.25);
        assert_eq!(style.width, 2.0);
        assert_eq!(style.dash_array, Some(DOTTED));
        assert_eq!(curve, CurveClass::Strong);
    }

    #[test]
    fn no_metadata_uses_template() {
        let table = StyleTable::default();
        let rel = Relationship::new("a", "b", RelationshipType::BranchCreation);
        let (style, _) = table.resolve(&rel, &MapperConfig::default());
        assert_eq!(style.color, "#10b981");
        assert_eq!(style.opacity, 0.7);
        assert_eq!(style.dash_array, Some(DASHED));
    }
}

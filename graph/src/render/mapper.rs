use super::grouping::collapse_duplicates;
use super::path::{connection_path, PathDescriptor, Point};
use super::style::{ConnectionStyle, StyleTable};
use crate::config::MapperConfig;
use crate::core::{Relationship, RelationshipType};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Connection count at which adaptive fading stops increasing
pub const DENSITY_SATURATION: usize = 50;

/// Placement of one event, produced by the layout engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub event_id: String,
    /// Temporal coordinate
    pub x: f64,
    /// Lane coordinate
    pub y: f64,
    #[serde(default)]
    pub branch: String,
    #[serde(default)]
    pub importance: f64,
}

impl Position {
    pub fn new(event_id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            event_id: event_id.into(),
            x,
            y,
            branch: String::new(),
            importance: 1.0,
        }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A relationship with resolved geometry and stroke
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionLine {
    pub id: String,
    pub source: Position,
    pub target: Position,
    pub relationship: Relationship,
    pub path: PathDescriptor,
    pub style: ConnectionStyle,
}

/// Turns relationships into styled, curved connection lines.
///
/// Style templates are fixed at construction; [`update_config`](Self::update_config)
/// only swaps the runtime options.
#[derive(Debug, Clone, Default)]
pub struct ConnectionMapper {
    config: MapperConfig,
    styles: StyleTable,
}

impl ConnectionMapper {
    pub fn new(config: MapperConfig) -> Self {
        Self::with_styles(config, StyleTable::default())
    }

    pub fn with_styles(config: MapperConfig, styles: StyleTable) -> Self {
        Self { config, styles }
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    pub fn update_config(&mut self, config: MapperConfig) {
        self.config = config;
    }

    pub fn map_relationships_to_connections(
        &self,
        relationships: &[Relationship],
        positions: &HashMap<String, Position>,
    ) -> Vec<ConnectionLine> {
        let enabled: Vec<&Relationship> = relationships
            .iter()
            .filter(|r| self.config.is_enabled(r.relationship_type))
            .collect();
        let disabled = relationships.len() - enabled.len();

        let mut connections: Vec<ConnectionLine> = enabled
            .into_iter()
            .filter_map(|rel| self.build_connection(rel, positions))
            .collect();
        let unresolved = relationships.len() - disabled - connections.len();

        if self.config.adaptive_opacity {
            let factor = density_factor(connections.len());
            let floor = self.config.minimum_line_opacity;
            for conn in &mut connections {
                conn.style.opacity = (conn.style.opacity * factor).max(floor);
            }
        }

        if self.config.group_similar_connections {
            connections = collapse_duplicates(connections);
        }

        debug!(
            relationships = relationships.len(),
            disabled,
            unresolved,
            connections = connections.len(),
            "mapped connections"
        );
        connections
    }

    pub fn connection_statistics(&self, connections: &[ConnectionLine]) -> ConnectionStatistics {
        ConnectionStatistics::from_connections(connections)
    }

    fn build_connection(
        &self,
        relationship: &Relationship,
        positions: &HashMap<String, Position>,
    ) -> Option<ConnectionLine> {
        let source = positions.get(&relationship.source)?;
        let target = positions.get(&relationship.target)?;

        let (style, curve) = self.styles.resolve(relationship, &self.config);
        let path = connection_path(
            source.point(),
            target.point(),
            relationship.relationship_type,
            curve,
            self.config.curve_intensity,
        );

        Some(ConnectionLine {
            id: format!("conn-{}", relationship.id),
            source: source.clone(),
            target: target.clone(),
            relationship: relationship.clone(),
            path,
            style,
        })
    }
}

/// Opacity multiplier for `count` simultaneous connections, in [0.5, 1.0]
pub fn density_factor(count: usize) -> f64 {
    let density = (count as f64 / DENSITY_SATURATION as f64).min(1.0);
    1.0 - density * 0.5
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionStatistics {
    pub total: usize,
    pub by_type: BTreeMap<RelationshipType, usize>,
    pub average_opacity: f64,
    /// Connections whose path contains a curve command
    pub curved: usize,
}

impl ConnectionStatistics {
    pub fn from_connections(connections: &[ConnectionLine]) -> Self {
        let mut stats = Self {
            total: connections.len(),
            ..Default::default()
        };

        let mut opacity_sum = 0.0;
        for conn in connections {
            *stats.by_type.entry(conn.relationship.relationship_type).or_insert(0) += 1;
            opacity_sum += conn.style.opacity;
            if conn.path.is_curved() {
                stats.curved += 1;
            }
        }
        if !connections.is_empty() {
            stats.average_opacity = opacity_sum / connections.len() as f64;
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RelationshipMetadata;
    use crate::render::path::CurveClass;
    use crate::render::style::StyleTemplate;
    use proptest::prelude::*;

    fn positions(entries: &[(&str, f64, f64)]) -> HashMap<String, Position> {
        entries
            .iter()
            .map(|&(id, x, y)| (id.to_string(), Position::new(id, x, y)))
            .collect()
    }

    fn plain() -> MapperConfig {
        MapperConfig {
            group_similar_connections: false,
            adaptive_opacity: false,
            ..Default::default()
        }
    }

    #[test]
    fn disabled_types_and_missing_positions_are_dropped() {
        let pos = positions(&[("a", 0.0, 0.0), ("b", 1.0, 0.0), ("c", 2.0, 1.0)]);
        let rels = vec![
            Relationship::new("a", "b", RelationshipType::ParentChild),
            Relationship::new("b", "c", RelationshipType::TagReference),
            Relationship::new("b", "ghost", RelationshipType::ParentChild),
        ];

        let mut config = plain();
        config.enabled_relationship_types.remove(&RelationshipType::TagReference);
        let mapper = ConnectionMapper::new(config);

        let lines = mapper.map_relationships_to_connections(&rels, &pos);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].id, "conn-a-b-parent-child");
        assert_eq!(lines[0].source.event_id, "a");
    }

    #[test]
    fn adaptive_opacity_fades_dense_graphs() {
        let mut entries = Vec::new();
        for i in 0..=100 {
            entries.push((format!("e{}", i), i as f64, 0.0));
        }
        let pos: HashMap<String, Position> = entries
            .iter()
            .map(|(id, x, y)| (id.clone(), Position::new(id.as_str(), *x, *y)))
            .collect();
        let rels: Vec<Relationship> = (0..100)
            .map(|i| {
                let (from, to) = (format!("e{}", i), format!("e{}", i + 1));
                Relationship::new(from, to, RelationshipType::MergeTarget)
            })
            .collect();

        let mapper = ConnectionMapper::new(MapperConfig {
            group_similar_connections: false,
            ..Default::default()
        });
        let lines = mapper.map_relationships_to_connections(&rels, &pos);
        assert_eq!(lines.len(), 100);
        // 0.9 template opacity, halved at saturation
        assert!(lines.iter().all(|l| (l.style.opacity - 0.45).abs() < 1e-9));
    }

    #[test]
    fn faded_opacity_respects_floor() {
        let pos = positions(&[("a", 0.0, 0.0), ("b", 1.0, 0.0)]);
        let rels: Vec<Relationship> = (0..60)
            .map(|_| {
                let faint = RelationshipMetadata {
                    opacity: Some(0.12),
                    ..Default::default()
                };
                Relationship::new("a", "b", RelationshipType::TagReference).with_metadata(faint)
            })
            .collect();
        let mapper = ConnectionMapper::new(MapperConfig {
            group_similar_connections: false,
            ..Default::default()
        });
        let lines = mapper.map_relationships_to_connections(&rels, &pos);
        assert!(lines.iter().all(|l| l.style.opacity == 0.1));
    }

    #[test]
    fn grouping_keeps_highest_priority() {
        let pos = positions(&[("a", 0.0, 0.0), ("b", 3.0, 1.0), ("c", 5.0, 1.0)]);
        let rels = vec![
            Relationship::new("a", "b", RelationshipType::TagReference),
            Relationship::new("b", "c", RelationshipType::ParentChild),
            Relationship::new("a", "b", RelationshipType::ParentChild),
            Relationship::new("a", "b", RelationshipType::MergeSource),
            Relationship::new("a", "b", RelationshipType::BranchCreation),
        ];
        let mapper = ConnectionMapper::new(MapperConfig {
            adaptive_opacity: false,
            ..Default::default()
        });

        let lines = mapper.map_relationships_to_connections(&rels, &pos);
        let kinds: Vec<_> = lines.iter().map(|l| l.relationship.relationship_type).collect();
        assert_eq!(kinds, vec![RelationshipType::MergeSource, RelationshipType::ParentChild]);
    }

    #[test]
    fn grouping_ties_keep_first_seen() {
        let pos = positions(&[("a", 0.0, 0.0), ("b", 3.0, 1.0)]);
        let colored = |color: &str| {
            let hint = RelationshipMetadata {
                color: Some(color.to_string()),
                ..Default::default()
            };
            Relationship::new("a", "b", RelationshipType::MergeSource).with_metadata(hint)
        };
        let rels = vec![colored("#ef4444"), colored("#06b6d4"), colored("#ec4899")];
        let mapper = ConnectionMapper::new(MapperConfig {
            adaptive_opacity: false,
            ..Default::default()
        });

        let lines = mapper.map_relationships_to_connections(&rels, &pos);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].style.color, "#ef4444");
    }

    #[test]
    fn update_config_keeps_templates() {
        let straight_tags = StyleTable::default().with_template(
            RelationshipType::TagReference,
            StyleTemplate {
                color: "#111111".into(),
                width: 1.0,
                opacity: 1.0,
                curve: CurveClass::None,
                dash: None,
            },
        );
        let mut mapper = ConnectionMapper::with_styles(plain(), straight_tags);
        mapper.update_config(MapperConfig {
            curve_intensity: 0.9,
            ..plain()
        });

        let pos = positions(&[("a", 0.0, 0.0), ("t", 2.0, 3.0)]);
        let rels = vec![Relationship::new("a", "t", RelationshipType::TagReference)];
        let lines = mapper.map_relationships_to_connections(&rels, &pos);

        assert_eq!(mapper.config().curve_intensity, 0.9);
        assert_eq!(lines[0].style.color, "#111111");
        assert!(!lines[0].path.is_curved());
    }

    #[test]
    fn statistics_over_connections() {
        let pos = positions(&[("a", 0.0, 0.0), ("b", 0.0, 2.0), ("c", 4.0, 0.0)]);
        let rels = vec![
            // vertical, so straight
            Relationship::new("a", "b", RelationshipType::ParentChild),
            Relationship::new("a", "c", RelationshipType::MergeTarget),
            Relationship::new("b", "c", RelationshipType::MergeSource),
        ];
        let mapper = ConnectionMapper::new(plain());
        let lines = mapper.map_relationships_to_connections(&rels, &pos);
        let stats = mapper.connection_statistics(&lines);

        assert_eq!(stats.total, 3);
        assert_eq!(stats.curved, 2);
        assert_eq!(stats.by_type[&RelationshipType::MergeSource], 1);
        assert!((stats.average_opacity - (0.6 + 0.9 + 0.8) / 3.0).abs() < 1e-9);

        assert_eq!(ConnectionStatistics::from_connections(&[]).average_opacity, 0.0);
    }

    proptest! {
        #[test]
        fn density_factor_is_non_increasing(a in 0usize..500, b in 0usize..500) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(density_factor(hi) <= density_factor(lo));
            prop_assert!(density_factor(hi) >= 0.5);
            if lo >= DENSITY_SATURATION {
                prop_assert_eq!(density_factor(lo), density_factor(hi));
            }
        }

        #[test]
        fn output_never_exceeds_input(
            edges in proptest::collection::vec((0usize..6, 0usize..6, 0usize..5), 0..40),
            grouping in any::<bool>(),
        ) {
            let pos = positions(&[
                ("n0", 0.0, 0.0), ("n1", 1.0, 1.0), ("n2", 2.0, 0.0), ("n3", 3.0, 2.0),
            ]);
            let rels: Vec<Relationship> = edges
                .iter()
                .map(|&(s, t, k)| {
                    let kind = RelationshipType::ALL[k];
                    Relationship::new(format!("n{}", s), format!("n{}", t), kind)
                })
                .collect();
            let mapper = ConnectionMapper::new(MapperConfig {
                group_similar_connections: grouping,
                ..Default::default()
            });

            let lines = mapper.map_relationships_to_connections(&rels, &pos);
            prop_assert!(lines.len() <= rels.len());

            let resolvable = rels
                .iter()
                .filter(|r| pos.contains_key(&r.source) && pos.contains_key(&r.target))
                .count();
            if !grouping {
                prop_assert_eq!(lines.len(), resolvable);
            }
        }
    }
}

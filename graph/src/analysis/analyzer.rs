use super::hints;
use super::merge::{branch_lifetime_days, MergeAnalysis, MergeComplexity};
use crate::config::AnalyzerConfig;
use crate::core::{Event, EventIndex, EventType, Relationship, RelationshipType};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Infers typed relationships from parent references.
///
/// Holds only configuration: every operation takes the events it works on,
/// builds its own [`EventIndex`], and drops it before returning. Repeated
/// parent IDs are read once, in first-occurrence order.
#[derive(Debug, Clone, Default)]
pub struct RelationshipAnalyzer {
    config: AnalyzerConfig,
}

impl RelationshipAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Parent-child edges followed by merge edges.
    ///
    /// Branch-creation and tag-reference edges are appended only when
    /// `infer_lifecycle_relationships` is set.
    pub fn analyze_relationships(&self, events: &[Event]) -> Vec<Relationship> {
        let index = EventIndex::build(events);

        let mut relationships = self.parent_child_relationships(&index);
        let parent_child = relationships.len();

        for merge in index.events().filter(|e| e.is_merge() && self.includes_merge(e)) {
            relationships.extend(self.merge_relationships(merge, &index));
        }
        let merge_edges = relationships.len() - parent_child;

        if self.config.infer_lifecycle_relationships {
            relationships.extend(self.lifecycle_relationships(&index));
        }

        debug!(
            events = index.len(),
            parent_child,
            merge_edges,
            total = relationships.len(),
            "analyzed relationships"
        );
        relationships
    }

    /// One result per merge with at least two resolvable parents
    pub fn analyze_merge_commits(&self, events: &[Event]) -> Vec<MergeAnalysis> {
        let index = EventIndex::build(events);

        let results: Vec<MergeAnalysis> = index
            .events()
            .filter(|e| e.is_merge() && self.includes_merge(e))
            .filter_map(|merge| self.analyze_merge(merge, &index))
            .collect();

        debug!(merges = results.len(), "analyzed merge commits");
        results
    }

    /// Events reachable by following parent references backwards from `event_id`.
    ///
    /// The effective depth is `min(depth, max_parent_depth)`: a larger request
    /// is silently capped at the configured bound. Each event appears at most
    /// once regardless of how many paths reach it, and `event_id` itself is
    /// never returned.
    pub fn find_descendants(&self, events: &[Event], event_id: &str, depth: usize) -> Vec<Event> {
        let index = EventIndex::build(events);
        let depth = depth.min(self.config.max_parent_depth);

        let mut visited = HashSet::new();
        let mut emitted = HashSet::from([event_id]);
        let mut found = Vec::new();
        collect_descendants(&index, event_id, depth, &mut visited, &mut emitted, &mut found);

        found.into_iter().cloned().collect()
    }

    pub fn analysis_statistics(&self, events: &[Event]) -> AnalysisStatistics {
        let index = EventIndex::build(events);
        let mut stats = AnalysisStatistics {
            total_events: index.len(),
            ..Default::default()
        };

        for event in index.events() {
            if event.is_orphan() {
                stats.orphan_events += 1;
            }
            if event.is_merge() {
                stats.merge_events += 1;
                match event.distinct_parents().len() {
                    2 => stats.simple_merges += 1,
                    n if n > 2 => stats.octopus_merges += 1,
                    _ => {}
                }
            }
        }

        stats
    }

    fn includes_merge(&self, merge: &Event) -> bool {
        self.config.include_octopus_merges || merge.distinct_parents().len() <= 2
    }

    fn parent_child_relationships(&self, index: &EventIndex<'_>) -> Vec<Relationship> {
        let mut relationships = Vec::new();

        for event in index.events() {
            for parent_id in event.distinct_parents() {
                let Some(parent) = index.get(parent_id) else {
                    continue;
                };

                let mut rel =
                    Relationship::new(parent_id, event.id.as_str(), RelationshipType::ParentChild);
                if self.config.generate_visual_hints {
                    rel = rel.with_metadata(hints::parent_child(parent, event));
                }
                relationships.push(rel);
            }
        }

        relationships
    }

    /// First parent receives the merge; every other parent is a source
    fn merge_relationships(&self, merge: &Event, index: &EventIndex<'_>) -> Vec<Relationship> {
        let parents = merge.distinct_parents();
        let Some((&target_parent, source_parents)) = parents.split_first() else {
            return Vec::new();
        };
        if source_parents.is_empty() {
            return Vec::new();
        }

        let mut relationships = Vec::with_capacity(parents.len());

        if index.contains(target_parent) {
            let mut rel =
                Relationship::new(target_parent, merge.id.as_str(), RelationshipType::MergeTarget);
            if self.config.generate_visual_hints {
                rel = rel.with_metadata(hints::merge_target(merge));
            }
            relationships.push(rel);
        }

        for (i, &source_id) in source_parents.iter().enumerate() {
            let Some(source) = index.get(source_id) else {
                continue;
            };
            let mut rel =
                Relationship::new(source_id, merge.id.as_str(), RelationshipType::MergeSource);
            if self.config.generate_visual_hints {
                rel = rel.with_metadata(hints::merge_source(source, i, source_parents.len()));
            }
            relationships.push(rel);
        }

        relationships
    }

    fn analyze_merge(&self, merge: &Event, index: &EventIndex<'_>) -> Option<MergeAnalysis> {
        let parents = merge.distinct_parents();
        if index.resolve_all(&parents).count() < 2 {
            return None;
        }

        let source_events: Vec<Event> = index.resolve_all(&parents[1..]).cloned().collect();
        let branch_lifetime_days = branch_lifetime_days(merge.timestamp, &source_events);

        Some(MergeAnalysis {
            merge_event: merge.clone(),
            source_events,
            target_branch: merge.branch.clone(),
            branch_lifetime_days,
            complexity: MergeComplexity::from_parent_count(parents.len()),
        })
    }

    /// Branch-creation and tag-reference edges from event type plus first parent
    fn lifecycle_relationships(&self, index: &EventIndex<'_>) -> Vec<Relationship> {
        index
            .events()
            .filter_map(|event| {
                let relationship_type = match event.event_type {
                    EventType::BranchCreated => RelationshipType::BranchCreation,
                    EventType::Tag | EventType::Release => RelationshipType::TagReference,
                    _ => return None,
                };
                let parent_id = event.first_parent().filter(|p| index.contains(p))?;

                let mut rel = Relationship::new(parent_id, event.id.as_str(), relationship_type);
                if self.config.generate_visual_hints {
                    let metadata = match relationship_type {
                        RelationshipType::BranchCreation => hints::branch_creation(event),
                        _ => hints::tag_reference(event),
                    };
                    rel = rel.with_metadata(metadata);
                }
                Some(rel)
            })
            .collect()
    }
}

fn collect_descendants<'s>(
    index: &EventIndex<'s>,
    event_id: &'s str,
    depth: usize,
    visited: &mut HashSet<&'s str>,
    emitted: &mut HashSet<&'s str>,
    found: &mut Vec<&'s Event>,
) {
    if depth == 0 || !visited.insert(event_id) {
        return;
    }

    for &child_id in index.children_of(event_id) {
        let Some(child) = index.get(child_id) else {
            continue;
        };
        if emitted.insert(child_id) {
            found.push(child);
        }
        collect_descendants(index, child_id, depth - 1, visited, emitted, found);
    }
}

/// Counts over one event set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisStatistics {
    pub total_events: usize,
    pub merge_events: usize,
    pub simple_merges: usize,
    pub octopus_merges: usize,
    /// Events with no parents at all
    pub orphan_events: usize,
}

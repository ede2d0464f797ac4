use chrono::{Duration, TimeZone, Utc};
use gitweave_graph::{
    ConnectionMapper, Event, EventType, MapperConfig, Position, RelationshipAnalyzer,
};
use std::collections::HashMap;

fn synthetic_history() -> Vec<Event> {
    let start = Utc.timestamp_opt(1_717_405_200, 0).single().unwrap_or_else(Utc::now);
    let at = |day: i64| start + Duration::days(day);
    let parents = |ids: &[&str]| ids.iter().map(|s| s.to_string()).collect::<Vec<_>>();

    vec![
        Event::new("a1", EventType::Commit, at(0), "main", vec![]).with_title("Initial commit"),
        Event::new("b1", EventType::BranchCreated, at(1), "feature/api", parents(&["a1"]))
            .with_title("feature/api"),
        Event::new("b2", EventType::Commit, at(2), "feature/api", parents(&["b1"]))
            .with_title("Add endpoints"),
        Event::new("c1", EventType::Commit, at(2), "feature/ui", parents(&["a1"]))
            .with_title("Sketch UI"),
        Event::new("d1", EventType::Commit, at(3), "fix/typo", parents(&["a1"]))
            .with_title("Fix typo"),
        Event::new("a2", EventType::Commit, at(4), "main", parents(&["a1"]))
            .with_title("Bump deps"),
        Event::new("m1", EventType::Merge, at(6), "main", parents(&["a2", "b2", "c1", "d1"]))
            .with_title("Merge feature branches"),
        Event::new("v1", EventType::Release, at(7), "main", parents(&["m1"])).with_title("v1.0.0"),
    ]
}

/// Time on x, one lane per branch in order of first appearance
fn lane_positions(events: &[Event]) -> HashMap<String, Position> {
    let start = events.iter().map(|e| e.timestamp).min().unwrap_or_else(Utc::now);
    let mut lanes: Vec<&str> = Vec::new();
    let mut positions = HashMap::new();

    for event in events {
        let lane = match lanes.iter().position(|b| *b == event.branch) {
            Some(idx) => idx,
            None => {
                lanes.push(&event.branch);
                lanes.len() - 1
            }
        };
        let x = (event.timestamp - start).num_hours() as f64 / 24.0 * 40.0;
        let mut pos = Position::new(event.id.as_str(), x, lane as f64 * 30.0);
        pos.branch = event.branch.clone();
        positions.insert(event.id.clone(), pos);
    }

    positions
}

fn main() {
    println!("gitweave graph demo");
    println!("===================\n");

    let events = synthetic_history();
    let analyzer = RelationshipAnalyzer::default();

    let stats = analyzer.analysis_statistics(&events);
    println!("History statistics:");
    println!("  Total events:   {}", stats.total_events);
    println!("  Merge events:   {}", stats.merge_events);
    println!("  Octopus merges: {}", stats.octopus_merges);
    println!("  Orphan events:  {}", stats.orphan_events);
    println!();

    for merge in analyzer.analyze_merge_commits(&events) {
        let sources: Vec<&str> = merge.source_events.iter().map(|e| e.branch.as_str()).collect();
        println!(
            "Merge {} into {} ({:?}, {} days): {}",
            merge.merge_event.id,
            merge.target_branch,
            merge.complexity,
            merge.branch_lifetime_days,
            sources.join(", ")
        );
    }
    println!();

    let relationships = analyzer.analyze_relationships(&events);
    let positions = lane_positions(&events);
    let mapper = ConnectionMapper::new(MapperConfig::default());
    let connections = mapper.map_relationships_to_connections(&relationships, &positions);

    println!("Connections:");
    println!("────────────");
    for conn in &connections {
        println!(
            "{:<16} {:>3} -> {:<3} {} {:.2}  {}",
            conn.relationship.relationship_type,
            conn.relationship.source,
            conn.relationship.target,
            conn.style.color,
            conn.style.opacity,
            conn.path
        );
    }

    let conn_stats = mapper.connection_statistics(&connections);
    println!();
    println!(
        "{} connections from {} relationships, {} curved, mean opacity {:.2}",
        conn_stats.total,
        relationships.len(),
        conn_stats.curved,
        conn_stats.average_opacity
    );
}

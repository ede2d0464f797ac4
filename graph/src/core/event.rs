use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of version-history action an event records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventType {
    Commit,
    Merge,
    BranchCreated,
    BranchDeleted,
    BranchCheckout,
    Tag,
    Release,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Commit => "commit",
            EventType::Merge => "merge",
            EventType::BranchCreated => "branch-created",
            EventType::BranchDeleted => "branch-deleted",
            EventType::BranchCheckout => "branch-checkout",
            EventType::Tag => "tag",
            EventType::Release => "release",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Size of the change an event carries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventImpact {
    pub files_changed: u32,
    pub lines_added: u32,
    pub lines_removed: u32,
}

/// A single entry on the history timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique event ID (commit SHA for commits and merges)
    pub id: String,
    #[serde(rename = "type", alias = "eventType")]
    pub event_type: EventType,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub title: String,
    /// Primary branch the event happened on
    #[serde(default)]
    pub branch: String,
    /// Every branch containing the event, when the source knows it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branches: Option<Vec<String>>,
    /// Parent event IDs, first parent first
    #[serde(default)]
    pub parent_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<EventImpact>,
}

impl Event {
    pub fn new(
        id: impl Into<String>,
        event_type: EventType,
        timestamp: DateTime<Utc>,
        branch: impl Into<String>,
        parent_ids: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            event_type,
            timestamp,
            title: String::new(),
            branch: branch.into(),
            branches: None,
            parent_ids,
            impact: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_branches(mut self, branches: Vec<String>) -> Self {
        self.branches = Some(branches);
        self
    }

    pub fn with_impact(mut self, impact: EventImpact) -> Self {
        self.impact = Some(impact);
        self
    }

    /// Check if this is a root event (no parents)
    pub fn is_orphan(&self) -> bool {
        self.parent_ids.is_empty()
    }

    pub fn is_merge(&self) -> bool {
        self.event_type == EventType::Merge
    }

    pub fn first_parent(&self) -> Option<&str> {
        self.parent_ids.first().map(String::as_str)
    }

    /// Parent IDs in order with repeats removed
    pub fn distinct_parents(&self) -> Vec<&str> {
        let mut parents: Vec<&str> = Vec::with_capacity(self.parent_ids.len());
        for parent_id in &self.parent_ids {
            if !parents.contains(&parent_id.as_str()) {
                parents.push(parent_id);
            }
        }
        parents
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_source_json() {
        let json = r#"{
            "id": "c1",
            "type": "branch-created",
            "timestamp": "2024-03-01T12:00:00Z",
            "title": "feature/login",
            "branch": "feature/login",
            "parentIds": ["c0"],
            "impact": { "filesChanged": 2, "linesAdded": 10, "linesRemoved": 1 }
        }"#;

        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.event_type, EventType::BranchCreated);
        assert_eq!(event.first_parent(), Some("c0"));
        assert_eq!(event.impact.unwrap().lines_added, 10);
        assert!(event.branches.is_none());
    }

    #[test]
    fn builders_fill_optional_fields() {
        let parents = vec!["a".into(), "b".into()];
        let event = Event::new("m", EventType::Merge, Utc::now(), "main", parents)
            .with_title("Merge topic")
            .with_branches(vec!["main".into(), "release".into()])
            .with_impact(EventImpact {
                files_changed: 3,
                ..Default::default()
            });

        assert!(event.is_merge());
        assert_eq!(event.branches.as_deref().map(<[String]>::len), Some(2));

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "merge");
        assert_eq!(json["parentIds"][1], "b");
        assert_eq!(json["impact"]["filesChanged"], 3);
    }

    #[test]
    fn missing_parents_means_orphan() {
        let json = r#"{"id":"root","type":"commit","timestamp":"2024-03-01T12:00:00Z"}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert!(event.is_orphan());
        assert!(!event.is_merge());
        assert!(event.distinct_parents().is_empty());
    }

    #[test]
    fn distinct_parents_keeps_first_occurrence() {
        let parents = ["a", "b", "b", "c", "a"].iter().map(|p| p.to_string()).collect();
        let event = Event::new("m", EventType::Merge, Utc::now(), "main", parents);
        assert_eq!(event.distinct_parents(), vec!["a", "b", "c"]);
        assert_eq!(event.first_parent(), Some("a"));
    }
}

//! Advisory color and line-style hints attached to inferred relationships.

use crate::core::{Event, LineStyle, RelationshipMetadata};

/// Colors cycled across the source branches of a merge
pub const MERGE_SOURCE_PALETTE: [&str; 6] = [
    "#f59e0b", // amber
    "#10b981", // emerald
    "#8b5cf6", // violet
    "#ef4444", // red
    "#06b6d4", // cyan
    "#ec4899", // pink
];

pub const MERGE_TARGET_COLOR: &str = "#3b82f6";

pub fn merge_source_color(source_index: usize) -> &'static str {
    MERGE_SOURCE_PALETTE[source_index % MERGE_SOURCE_PALETTE.len()]
}

pub fn parent_child(parent: &Event, child: &Event) -> RelationshipMetadata {
    if parent.branch == child.branch {
        RelationshipMetadata {
            color: None,
            opacity: Some(0.3),
            style: Some(LineStyle::Solid),
            description: Some(format!("Continues {}", child.branch)),
        }
    } else {
        RelationshipMetadata {
            color: None,
            opacity: Some(0.6),
            style: Some(LineStyle::Dashed),
            description: Some(format!("{} -> {}", parent.branch, child.branch)),
        }
    }
}

pub fn merge_target(merge: &Event) -> RelationshipMetadata {
    RelationshipMetadata {
        color: Some(MERGE_TARGET_COLOR.to_string()),
        opacity: Some(0.9),
        style: Some(LineStyle::Solid),
        description: Some(format!("Merged into {}", merge.branch)),
    }
}

/// `source_index` is zero-based over the non-first parents
pub fn merge_source(
    source: &Event,
    source_index: usize,
    source_count: usize,
) -> RelationshipMetadata {
    RelationshipMetadata {
        color: Some(merge_source_color(source_index).to_string()),
        opacity: Some(0.8),
        style: Some(LineStyle::Solid),
        description: Some(format!(
            "Merge source {} of {} from {}",
            source_index + 1,
            source_count,
            source.branch
        )),
    }
}

pub fn branch_creation(branch_event: &Event) -> RelationshipMetadata {
    RelationshipMetadata {
        color: None,
        opacity: None,
        style: Some(LineStyle::Dashed),
        description: Some(format!("Branch {} created", branch_event.branch)),
    }
}

pub fn tag_reference(tag_event: &Event) -> RelationshipMetadata {
    let label = if tag_event.title.is_empty() { &tag_event.id } else { &tag_event.title };
    RelationshipMetadata {
        color: None,
        opacity: None,
        style: Some(LineStyle::Dotted),
        description: Some(format!("Tagged {}", label)),
    }
}

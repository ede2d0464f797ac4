use super::mapper::ConnectionLine;
use crate::core::RelationshipType;
use indexmap::map::Entry;
use indexmap::IndexMap;

/// Rank used when several connections share the same endpoints
pub fn priority(relationship_type: RelationshipType) -> u8 {
    match relationship_type {
        RelationshipType::MergeTarget => 5,
        RelationshipType::MergeSource => 4,
        RelationshipType::ParentChild => 3,
        RelationshipType::BranchCreation => 2,
        RelationshipType::TagReference => 1,
    }
}

/// Keep one connection per (source, target) pair.
///
/// The highest-priority type wins; on a tie the first one seen stays. Groups
/// are emitted in the order their first member appeared.
pub fn collapse_duplicates(connections: Vec<ConnectionLine>) -> Vec<ConnectionLine> {
    let mut groups: IndexMap<(String, String), ConnectionLine> =
        IndexMap::with_capacity(connections.len());

    for conn in connections {
        let key = (conn.relationship.source.clone(), conn.relationship.target.clone());
        match groups.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(conn);
            }
            Entry::Occupied(mut slot) => {
                let incumbent = slot.get().relationship.relationship_type;
                if priority(conn.relationship.relationship_type) > priority(incumbent) {
                    slot.insert(conn);
                }
            }
        }
    }

    groups.into_values().collect()
}

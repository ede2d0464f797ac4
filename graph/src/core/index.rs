use super::event::Event;
use indexmap::IndexMap;
use std::collections::HashMap;

/// Per-run lookup from event ID to event.
///
/// Built fresh for every analysis call. Duplicate IDs are not an error: the
/// last occurrence wins but keeps the slot of the first, so iteration order is
/// the order in which IDs were first seen.
#[derive(Debug, Clone, Default)]
pub struct EventIndex<'a> {
    events: IndexMap<&'a str, &'a Event>,
    /// Quick lookup: parent ID -> child IDs, in index order
    children: HashMap<&'a str, Vec<&'a str>>,
}

impl<'a> EventIndex<'a> {
    pub fn build(events: &'a [Event]) -> Self {
        let mut index: IndexMap<&'a str, &'a Event> = IndexMap::with_capacity(events.len());
        for event in events {
            index.insert(event.id.as_str(), event);
        }

        // Children are derived after overwrites so they reflect the surviving records
        let mut children: HashMap<&'a str, Vec<&'a str>> = HashMap::new();
        for event in index.values() {
            for parent_id in event.distinct_parents() {
                children.entry(parent_id).or_default().push(event.id.as_str());
            }
        }

        Self { events: index, children }
    }

    pub fn get(&self, id: &str) -> Option<&'a Event> {
        self.events.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.events.contains_key(id)
    }

    /// Events whose parent list names `id`, whether or not `id` itself is indexed
    pub fn children_of(&self, id: &str) -> &[&'a str] {
        self.children.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Resolve a parent list, silently dropping IDs that are not indexed
    pub fn resolve_all<'s>(&'s self, ids: &'s [&'s str]) -> impl Iterator<Item = &'a Event> + 's {
        ids.iter().filter_map(move |id| self.get(id))
    }

    pub fn events(&self) -> impl Iterator<Item = &'a Event> + '_ {
        self.events.values().copied()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

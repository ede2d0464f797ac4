pub mod event;
pub mod relationship;
pub mod index;

pub use event::{Event, EventImpact, EventType};
pub use relationship::{LineStyle, Relationship, RelationshipMetadata, RelationshipType};
pub use index::EventIndex;

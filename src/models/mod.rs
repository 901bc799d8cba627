pub mod entity;
pub mod grounding;
pub mod relation;

pub use entity::{Entity, EntityKind, LexicalEntry, Synonym, Xref};
pub use grounding::{GroundRequest, GroundResponse, GroundingResult, GroundingResults};
pub use relation::{
    FullPredicate, FullRelationResponse, Predicate, RelationDirection, RelationQuery,
    RelationResponse,
};

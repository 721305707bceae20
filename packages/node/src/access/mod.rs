//! Entity access layer.
//!
//! One accessor per entity, each bound to its collection in the shared
//! [`Storage`]. Accessors turn stored documents into wire responses and do
//! the eager expansion of relationship fields: each relation named in a
//! `with` slice has its stored ids replaced by the referenced documents.
//! Relations an entity does not have are ignored.
//!
//! Nothing here is transactional. An operation that writes two documents
//! issues two independent store calls.
//!
//! [`Storage`]: crate::storage::Storage

mod reactions;
mod thoughts;
mod users;

pub use reactions::Reactions;
pub use thoughts::Thoughts;
pub use users::Users;

use thoughtnet::Relation;

/// Relations expanded when users are read over HTTP.
pub const USER_RELATIONS: &[Relation] = &[Relation::Thoughts, Relation::Friends];

/// Relations expanded when thoughts are read over HTTP.
pub const THOUGHT_RELATIONS: &[Relation] = &[Relation::Reactions];

fn wants(with: &[Relation], relation: Relation) -> bool {
    with.contains(&relation)
}

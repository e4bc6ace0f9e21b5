//! Path resolution over globally registered, possibly self-referential
//! object types.
//!
//! Unlike `schema::traverse`, which walks a local schema list, this module
//! resolves against an arena of *named* types where nesting is expressed by
//! id reference. The arena plus an explicit visited set is what makes
//! cyclic type graphs safe to enumerate.

pub mod arena;
pub mod path;

pub use arena::{ObjectType, ObjectTypeArena};
pub use path::{CollectedField, ResolvedSegment};

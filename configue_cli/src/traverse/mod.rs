//! Skeleton synthesis from structured types and concrete instances.
//!
//! [`traverse_type`] walks a [`TypeDescriptor`](crate::TypeDescriptor) field by
//! field, resolving defaults against an optional override tree.
//! [`traverse_instance`] does the same for values a factory already built.
//! Both return the skeleton alongside the instance seen by later
//! self-referential factories.

mod instance;
mod record;

pub use instance::traverse_instance;
pub use record::traverse_type;

/// Deepest chain of nested structured types a traversal follows.
pub(crate) const MAX_DEPTH: usize = 64;

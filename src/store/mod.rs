//! Namespace store
//!
//! Persistence and the atomic query/mutate primitives over the flat
//! path-keyed namespace.

pub mod namespace;
pub mod snapshot;

pub use namespace::NamespaceStore;
pub use snapshot::{DirectoryEntry, OwnerRecord, Snapshot};

//! # Core Error Types
//!
//! All errors that can occur in the storage and query kernel.
//!
//! Every failure is reported as a value; nothing in this crate aborts the
//! process. The only fatal condition is an allocation failure inside the
//! backing buffers themselves, which surfaces through the global allocator.

use thiserror::Error;

use crate::ecs::{ComponentId, EntityId};

/// Errors that can occur in the storage and query kernel.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EcsError {
    /// The key is already present in an index table.
    #[error("key already present in index table")]
    DuplicateKey,

    /// An index table probe wrapped without finding a reusable bucket.
    #[error("index table full: {buckets} buckets, no reusable slot")]
    TableFull {
        /// Bucket count of the table at the time of the failure.
        buckets: usize,
    },

    /// An index table cannot be created with zero buckets.
    #[error("index table needs at least one bucket")]
    ZeroBuckets,

    /// The chosen tombstone key matches the all-zero empty-bucket pattern.
    #[error("tombstone key must differ from the empty-bucket pattern")]
    InvalidTombstone,

    /// A component type id was registered twice.
    #[error("component {0} is already registered")]
    AlreadyRegistered(ComponentId),

    /// The component type id is reserved for internal bucket bookkeeping.
    #[error("component id {0} is reserved and cannot be registered")]
    ReservedComponentId(ComponentId),

    /// No pool is registered under the requested component type id.
    #[error("unknown component type {0}")]
    UnknownComponent(ComponentId),

    /// The entity does not carry the requested component.
    #[error("entity {0} does not carry the requested component")]
    MissingComponent(EntityId),

    /// The entity already carries the component being added.
    #[error("entity {0} already carries the requested component")]
    AlreadyAttached(EntityId),

    /// The entity id lies at or beyond the pool's sparse capacity.
    #[error("entity {entity} out of range: sparse capacity is {capacity}")]
    EntityOutOfRange {
        /// The offending entity id.
        entity: EntityId,
        /// The pool's sparse capacity.
        capacity: usize,
    },

    /// The pool's dense storage is full and no growth was requested.
    #[error("component pool exhausted: capacity {capacity}")]
    PoolExhausted {
        /// The pool's dense capacity.
        capacity: usize,
    },

    /// The monotonic entity counter reached the reserved sentinel.
    #[error("entity id space exhausted")]
    IdSpaceExhausted,

    /// A typed accessor named a component type that does not match the pool.
    #[error("component type mismatch: expected {expected}, pool holds {actual}")]
    TypeMismatch {
        /// Type name the caller asked for.
        expected: &'static str,
        /// Type name the pool was registered with.
        actual: &'static str,
    },

    /// Invalid configuration file.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

//! # TYPHON Core Engine
//!
//! An embeddable in-memory component store: typed, variable-schema records
//! ("components") keyed by a growing set of numeric ids ("entities"), with
//! efficient iteration over every entity carrying a chosen set of
//! component types.
//!
//! ## Architecture Rules
//!
//! 1. **Sparse-set pools** - O(1) add/lookup/remove, densely packed iteration
//! 2. **One index, many pools** - an open-addressing table maps type ids to
//!    monomorphic pools; type erasure stops at that boundary
//! 3. **Single-threaded by contract** - exclusive ownership, no internal
//!    locking; the borrow checker scopes every reference to its pool borrow
//!
//! ## Example
//!
//! ```rust,ignore
//! use typhon_core::{ComponentId, Registry};
//!
//! let mut registry = Registry::new();
//! let position = registry.register_component_named::<Position>("Position", 64)?;
//! let velocity = registry.register_component_named::<Velocity>("Velocity", 64)?;
//!
//! let entity = registry.new_entity()?;
//! registry.insert_component(entity, position, Position::new(1.0, 2.0, 3.0))?;
//!
//! registry.system(&[position, velocity], |entity, _ids| {
//!     // entities carrying both components
//! })?;
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod ecs;
pub mod error;
pub mod hash;
pub mod index;

pub use config::RegistryConfig;
pub use ecs::{Component, ComponentId, ComponentPool, EntityId, ErasedPool, Registry};
pub use error::EcsError;
pub use index::IndexTable;

//! # Entity Component Store
//!
//! Entities are bare numeric ids; components are fixed-size typed records
//! attached to them. Each component type lives in its own sparse-set pool,
//! the registry owns the pools behind a type-id index, and queries
//! intersect pools by driving the smallest one.
//!
//! ## Design Philosophy
//!
//! - Pools are monomorphic; type erasure exists only at the index boundary
//! - Storage is allocated at registration time, not per operation
//! - Absence is a value (`Option`/`Result`), sentinels stay internal
//! - Nothing grows implicitly; growth is an explicit, caller-driven step

mod component;
mod entity;
mod pool;
mod query;
mod registry;

pub use component::{Component, ComponentId, ErasedPool};
pub use entity::EntityId;
pub use pool::ComponentPool;
pub use registry::Registry;

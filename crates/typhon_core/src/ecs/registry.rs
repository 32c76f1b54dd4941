//! # Component Registry
//!
//! The registry owns every component pool, indexed by type id, and mints
//! entity ids from a monotonic counter. All per-entity component CRUD goes
//! through it; the query side lives in [`crate::ecs::query`].
//!
//! Dropping the registry drops the index and, transitively, every pool.

use std::any::type_name;

use crate::config::RegistryConfig;
use crate::ecs::component::{Component, ComponentId, ErasedPool};
use crate::ecs::entity::EntityId;
use crate::ecs::pool::ComponentPool;
use crate::error::EcsError;
use crate::index::IndexTable;

/// Deleted-bucket sentinel for the pool index. Rejected at registration,
/// so no real pool can ever be keyed by it.
const POOL_INDEX_TOMBSTONE: ComponentId = ComponentId::from_raw(u32::MAX);

/// Hash capability for the pool index: ids hash by value.
fn id_hash(key: &ComponentId) -> u64 {
    u64::from(key.raw())
}

/// Equality capability for the pool index.
fn id_eq(a: &ComponentId, b: &ComponentId) -> bool {
    a == b
}

/// Owner of all component pools and the entity id counter.
///
/// One registry is one store: single-threaded, exclusively owned by
/// whichever host context currently drives it. References returned from
/// component accessors are valid only until the next mutating call on the
/// same pool; the borrow checker enforces the scoping that the storage
/// layout (swap-pop, rehash) demands.
///
/// # Example
///
/// ```rust,ignore
/// let mut registry = Registry::new();
/// let position = registry.register_component_named::<Position>("Position", 64)?;
/// let entity = registry.new_entity()?;
/// registry.insert_component(entity, position, Position::new(1.0, 2.0, 3.0))?;
/// ```
pub struct Registry {
    /// Type id -> pool. The index owns the pools; each value is a
    /// fixed-width handle to one monomorphic pool.
    pools: IndexTable<ComponentId, Box<dyn ErasedPool>>,
    /// Next entity id to mint. Never decreases, never wraps.
    next_entity: u32,
    /// Startup configuration.
    config: RegistryConfig,
}

impl Registry {
    /// Creates a registry with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        match Self::with_config(RegistryConfig::default()) {
            Ok(registry) => registry,
            // The default configuration has a non-zero bucket count
            Err(_) => unreachable!("default registry configuration is valid"),
        }
    }

    /// Creates a registry from a host-supplied configuration.
    ///
    /// # Errors
    ///
    /// [`EcsError::ZeroBuckets`] if the configured index bucket count is
    /// zero.
    pub fn with_config(config: RegistryConfig) -> Result<Self, EcsError> {
        let pools = IndexTable::new(id_hash, id_eq, config.index_buckets, POOL_INDEX_TOMBSTONE)?;
        Ok(Self {
            pools,
            next_entity: 0,
            config,
        })
    }

    /// The configuration this registry was created with.
    #[must_use]
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Number of registered component types.
    #[must_use]
    pub fn registered_count(&self) -> usize {
        self.pools.len()
    }

    /// Number of entity ids minted so far.
    #[must_use]
    pub fn entities_created(&self) -> u32 {
        self.next_entity
    }

    /// Rehashes the pool index ahead of a registration that would push it
    /// past the configured load factor.
    fn maybe_grow_index(&mut self) {
        if !self.config.auto_grow_index {
            return;
        }
        let next = self.pools.len() + 1;
        if next as f32 / self.pools.bucket_count() as f32 > self.config.growth_load_factor {
            self.pools.resize(self.pools.bucket_count() * 2 + 1);
        }
    }

    /// Registers a component type under `id`, creating its pool with equal
    /// sparse and dense capacity.
    ///
    /// # Errors
    ///
    /// [`EcsError::ReservedComponentId`] for the two internally reserved
    /// ids, [`EcsError::AlreadyRegistered`] for a duplicate id (existing
    /// pools are never replaced), [`EcsError::TableFull`] when the index is
    /// saturated and auto-growth is disabled.
    pub fn register_component<C: Component>(
        &mut self,
        id: ComponentId,
        capacity: usize,
    ) -> Result<(), EcsError> {
        if id.is_reserved() {
            return Err(EcsError::ReservedComponentId(id));
        }
        self.maybe_grow_index();
        let pool: Box<dyn ErasedPool> = Box::new(ComponentPool::<C>::with_capacity(capacity));
        self.pools.insert(id, pool).map_err(|err| match err {
            EcsError::DuplicateKey => EcsError::AlreadyRegistered(id),
            other => other,
        })?;
        tracing::debug!(
            "registered component {} ({}, capacity {})",
            id,
            type_name::<C>(),
            capacity
        );
        Ok(())
    }

    /// Registers a component type by name, returning the derived id.
    ///
    /// # Errors
    ///
    /// Same failure contract as [`Registry::register_component`].
    pub fn register_component_named<C: Component>(
        &mut self,
        name: &str,
        capacity: usize,
    ) -> Result<ComponentId, EcsError> {
        let id = ComponentId::from_name(name);
        self.register_component::<C>(id, capacity)?;
        tracing::debug!("component name {:?} -> {}", name, id);
        Ok(id)
    }

    /// Mints the next entity id.
    ///
    /// Ids are strictly increasing and never recycled.
    ///
    /// # Errors
    ///
    /// [`EcsError::IdSpaceExhausted`] once the counter reaches the reserved
    /// null value.
    pub fn new_entity(&mut self) -> Result<EntityId, EcsError> {
        if self.next_entity == EntityId::NULL.raw() {
            return Err(EcsError::IdSpaceExhausted);
        }
        let id = EntityId::from_raw(self.next_entity);
        self.next_entity += 1;
        tracing::trace!("new entity {}", id);
        Ok(id)
    }

    /// Resolves a type id to its pool, downcast to the concrete element
    /// type.
    pub(crate) fn typed_pool<C: Component>(
        &self,
        id: ComponentId,
    ) -> Result<&ComponentPool<C>, EcsError> {
        let erased = self.pools.find(&id).ok_or(EcsError::UnknownComponent(id))?;
        let actual = erased.element_type_name();
        erased
            .as_any()
            .downcast_ref::<ComponentPool<C>>()
            .ok_or(EcsError::TypeMismatch {
                expected: type_name::<C>(),
                actual,
            })
    }

    /// Mutable variant of [`Registry::typed_pool`].
    pub(crate) fn typed_pool_mut<C: Component>(
        &mut self,
        id: ComponentId,
    ) -> Result<&mut ComponentPool<C>, EcsError> {
        let erased = self
            .pools
            .find_mut(&id)
            .ok_or(EcsError::UnknownComponent(id))?;
        let actual = erased.element_type_name();
        erased
            .as_any_mut()
            .downcast_mut::<ComponentPool<C>>()
            .ok_or(EcsError::TypeMismatch {
                expected: type_name::<C>(),
                actual,
            })
    }

    /// Attaches a fresh, zero-initialized component to the entity and
    /// returns its slot for caller initialization.
    ///
    /// The reference is valid only until the next mutating call on the
    /// same pool.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnknownComponent`], [`EcsError::TypeMismatch`],
    /// [`EcsError::AlreadyAttached`] if the entity already carries the
    /// component, plus the pool's range/capacity failures.
    pub fn add_component<C: Component>(
        &mut self,
        entity: EntityId,
        id: ComponentId,
    ) -> Result<&mut C, EcsError> {
        let pool = self.typed_pool_mut::<C>(id)?;
        let (slot, created) = pool.emplace(entity)?;
        if !created {
            return Err(EcsError::AlreadyAttached(entity));
        }
        Ok(slot)
    }

    /// Writes a component value for the entity, attaching it first if
    /// needed (upsert).
    ///
    /// # Errors
    ///
    /// [`EcsError::UnknownComponent`], [`EcsError::TypeMismatch`], plus the
    /// pool's range/capacity failures.
    pub fn insert_component<C: Component>(
        &mut self,
        entity: EntityId,
        id: ComponentId,
        value: C,
    ) -> Result<(), EcsError> {
        self.typed_pool_mut::<C>(id)?.insert(entity, value)
    }

    /// Checks whether the entity carries the component.
    ///
    /// Unregistered type ids simply report `false`.
    #[must_use]
    pub fn has_component(&self, entity: EntityId, id: ComponentId) -> bool {
        self.pools
            .find(&id)
            .is_some_and(|pool| pool.has(entity))
    }

    /// Reads the entity's component.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnknownComponent`], [`EcsError::TypeMismatch`],
    /// [`EcsError::MissingComponent`].
    pub fn get_component<C: Component>(
        &self,
        entity: EntityId,
        id: ComponentId,
    ) -> Result<&C, EcsError> {
        self.typed_pool::<C>(id)?
            .get(entity)
            .ok_or(EcsError::MissingComponent(entity))
    }

    /// Reads the entity's component, mutably.
    ///
    /// # Errors
    ///
    /// Same failure contract as [`Registry::get_component`].
    pub fn get_component_mut<C: Component>(
        &mut self,
        entity: EntityId,
        id: ComponentId,
    ) -> Result<&mut C, EcsError> {
        self.typed_pool_mut::<C>(id)?
            .get_mut(entity)
            .ok_or(EcsError::MissingComponent(entity))
    }

    /// Detaches the entity's component, discarding the payload.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnknownComponent`], [`EcsError::MissingComponent`],
    /// [`EcsError::EntityOutOfRange`].
    pub fn remove_component(&mut self, entity: EntityId, id: ComponentId) -> Result<(), EcsError> {
        let pool = self
            .pools
            .find_mut(&id)
            .ok_or(EcsError::UnknownComponent(id))?;
        pool.remove_erased(entity)
    }

    /// Detaches the entity's component and returns the payload (copy-out
    /// removal).
    ///
    /// # Errors
    ///
    /// Same failure contract as [`Registry::remove_component`], plus
    /// [`EcsError::TypeMismatch`].
    pub fn take_component<C: Component>(
        &mut self,
        entity: EntityId,
        id: ComponentId,
    ) -> Result<C, EcsError> {
        self.typed_pool_mut::<C>(id)?.remove(entity)
    }

    /// Type-erased view of a pool's backing storage, for external consumers
    /// that treat payloads as opaque bytes.
    #[must_use]
    pub fn component_storage(&self, id: ComponentId) -> Option<&dyn ErasedPool> {
        self.pools.find(&id).map(|pool| &**pool)
    }

    /// Mutable variant of [`Registry::component_storage`].
    #[must_use]
    pub fn component_storage_mut(&mut self, id: ComponentId) -> Option<&mut (dyn ErasedPool + 'static)> {
        self.pools.find_mut(&id).map(|pool| &mut **pool)
    }

    /// Stored slot width for the type: id width plus payload width, the
    /// figure external consumers size raw slot regions with.
    #[must_use]
    pub fn component_size(&self, id: ComponentId) -> Option<usize> {
        self.component_storage(id).map(ErasedPool::slot_size)
    }

    /// Iterates over every registered `(type id, pool)` pair, in index
    /// storage order.
    pub fn registered_components(&self) -> impl Iterator<Item = (ComponentId, &dyn ErasedPool)> {
        self.pools.iter().map(|(id, pool)| (*id, &**pool))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

//! # Queries
//!
//! Iteration over one pool, and the multi-component intersection query:
//! pick the smallest requested pool as the driver, scan its dense range,
//! and filter each entity by membership in every other requested pool.
//!
//! The driver choice bounds probe work by the smallest candidate set. It is
//! not globally optimal for every selectivity distribution, but it is
//! correct and costs one length comparison per requested type.

use crate::ecs::component::{Component, ComponentId};
use crate::ecs::entity::EntityId;
use crate::ecs::registry::Registry;
use crate::error::EcsError;

impl Registry {
    /// Invokes `callback` for every live entity in one component pool, in
    /// dense order.
    ///
    /// The `&self` receiver means the callback cannot add or remove
    /// components on the pool being scanned; relocation mid-scan is ruled
    /// out structurally.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnknownComponent`], [`EcsError::TypeMismatch`].
    pub fn iterate_component<C: Component>(
        &self,
        id: ComponentId,
        mut callback: impl FnMut(EntityId, &C),
    ) -> Result<(), EcsError> {
        for (entity, value) in self.typed_pool::<C>(id)?.iter() {
            callback(entity, value);
        }
        Ok(())
    }

    /// Like [`Registry::iterate_component`], with mutable payload access.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnknownComponent`], [`EcsError::TypeMismatch`].
    pub fn iterate_component_mut<C: Component>(
        &mut self,
        id: ComponentId,
        mut callback: impl FnMut(EntityId, &mut C),
    ) -> Result<(), EcsError> {
        for (entity, value) in self.typed_pool_mut::<C>(id)?.iter_mut() {
            callback(entity, value);
        }
        Ok(())
    }

    /// Invokes `callback` for every entity carrying all of the requested
    /// component types.
    ///
    /// The scan is driven by the pool with the smallest live count (ties
    /// broken by first occurrence in `ids`); entities absent from any other
    /// requested pool are skipped. Order follows the driver pool's current
    /// dense order, which reflects its removal history — no ordering
    /// guarantee holds across pool mutations between calls.
    ///
    /// The callback receives the requested id set, not payload references;
    /// it re-fetches component data through the registry when it needs
    /// payloads (the caller's closure may capture `&Registry` alongside
    /// this `&self` borrow). An empty id set matches nothing.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnknownComponent`] if any requested type is
    /// unregistered; no callbacks have been invoked in that case.
    pub fn system(
        &self,
        ids: &[ComponentId],
        mut callback: impl FnMut(EntityId, &[ComponentId]),
    ) -> Result<(), EcsError> {
        if ids.is_empty() {
            return Ok(());
        }

        let mut pools = Vec::with_capacity(ids.len());
        let mut driver = 0usize;
        let mut driver_len = usize::MAX;
        for (position, &id) in ids.iter().enumerate() {
            let pool = self
                .component_storage(id)
                .ok_or(EcsError::UnknownComponent(id))?;
            if pool.len() < driver_len {
                driver = position;
                driver_len = pool.len();
            }
            pools.push(pool);
        }

        if driver_len == 0 {
            return Ok(());
        }

        for slot in 0..driver_len {
            let Some(entity) = pools[driver].entity_at(slot) else {
                break;
            };
            let qualifies = pools
                .iter()
                .enumerate()
                .all(|(position, pool)| position == driver || pool.has(entity));
            if qualifies {
                callback(entity, ids);
            }
        }
        Ok(())
    }

    /// Intersection query with exclusive registry access in the callback.
    ///
    /// Matching entities are collected in driver order first, then the
    /// callback runs once per entity with `&mut Registry`, free to mutate
    /// any pool. Membership is re-verified immediately before each
    /// invocation, so a callback that detaches a requested component from a
    /// not-yet-visited entity makes that entity drop out.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnknownComponent`] if any requested type is
    /// unregistered.
    pub fn system_mut(
        &mut self,
        ids: &[ComponentId],
        mut callback: impl FnMut(&mut Registry, EntityId),
    ) -> Result<(), EcsError> {
        let mut matches = Vec::new();
        self.system(ids, |entity, _| matches.push(entity))?;

        for entity in matches {
            let still_qualifies = ids.iter().all(|&id| self.has_component(entity, id));
            if still_qualifies {
                callback(self, entity);
            }
        }
        Ok(())
    }
}

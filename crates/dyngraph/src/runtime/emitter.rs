// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! On-demand type synthesis with structural caching.
//!
//! # Thread Safety
//!
//! - Cache: `DashMap` from [`StructuralKey`] to a per-key `OnceCell` slot.
//!   A shard lock is held only while the slot is fetched or inserted.
//! - Create path: the slot's `get_or_try_init` lets exactly one caller run
//!   the synthesis; concurrent callers for the same key block on that slot
//!   only, callers for other keys never wait.
//! - Cached reads: one shard read lock plus an initialized `OnceCell` read.
//!
//! # Recursive descriptors
//!
//! A typed synthesis reserves its `TypeId` and records it in `pending`
//! before resolving its property types. A property type whose key is
//! pending (the type itself, or a key another synthesis is building) is
//! answered with the reserved id instead of waiting on the slot. Only
//! callers already inside a synthesis take that path: a reserved id is only
//! ever handed out as a property type, and syntheses never wait on each
//! other in a cycle.
//!
//! A failed synthesis leaves the slot empty so a later call retries. Its
//! reserved id stays behind as an inert placeholder.

use crate::error::{Error, Result};
use crate::runtime::{PropertyDef, TypeId, TypeRegistry};
use crate::types::{PropertyList, StructuralKey, TypeRef, TypeWithPropertyList};
use dashmap::DashMap;
use once_cell::sync::OnceCell;
use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

thread_local! {
    /// Typed syntheses resolving property types on this thread.
    static DEPTH: Cell<usize> = Cell::new(0);
}

/// Marks the current thread as resolving property types for a synthesis.
struct SynthesisScope;

impl SynthesisScope {
    fn enter() -> Self {
        DEPTH.with(|d| d.set(d.get() + 1));
        SynthesisScope
    }

    fn active() -> bool {
        DEPTH.with(|d| d.get() > 0)
    }
}

impl Drop for SynthesisScope {
    fn drop(&mut self) {
        DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

/// Append-only cache of synthesized types.
#[derive(Debug, Default)]
pub(crate) struct TypeEmitter {
    cache: DashMap<StructuralKey, Arc<OnceCell<TypeId>>>,
    /// Typed keys under construction -> reserved id.
    pending: DashMap<StructuralKey, TypeId>,
    sequence: AtomicU64,
}

impl TypeEmitter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Number of structural keys with a synthesized type.
    pub(crate) fn len(&self) -> usize {
        self.cache
            .iter()
            .filter(|entry| entry.value().get().is_some())
            .count()
    }

    /// Type with one `object` property per name, in order.
    pub(crate) fn emit_from_names(
        &self,
        registry: &TypeRegistry,
        names: &[String],
    ) -> Result<TypeId> {
        let key = StructuralKey::Names(PropertyList::new(names.iter().cloned()));
        self.get_or_create(key, || {
            let n = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
            let config = registry.config();
            let properties = names
                .iter()
                .map(|p| PropertyDef::new(p.clone(), TypeId::OBJECT))
                .collect();
            registry.define_emitted(
                registry.reserve()?,
                Some(config.emitted_namespace.clone()),
                format!("{}{}", config.synthesized_name_prefix, n),
                properties,
                false,
            )
        })
    }

    /// Type shaped after a described type and its typed properties.
    pub(crate) fn emit_from_type_ref(
        &self,
        registry: &TypeRegistry,
        type_ref: &TypeRef,
    ) -> Result<TypeId> {
        let typed = TypeWithPropertyList::new(type_ref)?;
        let described = typed.properties().to_vec();
        let key = StructuralKey::Typed(typed);
        let pending_key = key.clone();
        self.get_or_create(key, || {
            let id = registry.reserve()?;
            self.pending.insert(pending_key.clone(), id);
            let built = define_typed(registry, id, type_ref, &described);
            self.pending.remove(&pending_key);
            built
        })
    }

    fn get_or_create<F>(&self, key: StructuralKey, create: F) -> Result<TypeId>
    where
        F: FnOnce() -> Result<TypeId>,
    {
        if let Some(slot) = self.cache.get(&key) {
            if let Some(id) = slot.value().get() {
                log::trace!("[emitter] cache hit {:?} -> {}", key, id);
                return Ok(*id);
            }
        }

        if SynthesisScope::active() {
            let reserved = self.pending.get(&key).map(|id| *id);
            if let Some(id) = reserved {
                log::trace!("[emitter] {:?} under construction, reserved {}", key, id);
                return Ok(id);
            }
        }

        let slot = Arc::clone(
            self.cache
                .entry(key)
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .value(),
        );
        slot.get_or_try_init(create).copied()
    }
}

/// Resolve the property types of `type_ref` and publish the type into `id`.
fn define_typed(
    registry: &TypeRegistry,
    id: TypeId,
    type_ref: &TypeRef,
    described: &[(String, TypeRef)],
) -> Result<TypeId> {
    let _scope = SynthesisScope::enter();
    let mut properties = Vec::with_capacity(described.len());
    for (name, property_type) in described {
        let type_id = resolve_property_type(registry, name, property_type)?;
        properties.push(PropertyDef::new(name.clone(), type_id));
    }
    registry.define_emitted(
        id,
        type_ref.namespace().map(str::to_string),
        type_ref.name().to_string(),
        properties,
        type_ref.is_value_type(),
    )
}

/// Resolve a declared property type for synthesis.
///
/// A bare reference (no property list) to an unknown type becomes `object`:
/// values assigned to it keep whatever type their own node describes.
fn resolve_property_type(
    registry: &TypeRegistry,
    property: &str,
    property_type: &TypeRef,
) -> Result<TypeId> {
    match registry.resolve(property_type) {
        Ok(id) => Ok(id),
        Err(Error::TypeResolutionFailed { type_name, reason })
            if property_type.properties().is_none() =>
        {
            log::debug!(
                "[emitter] property '{}' typed as object ({}: {})",
                property,
                type_name,
                reason
            );
            Ok(TypeId::OBJECT)
        }
        Err(err) => Err(err),
    }
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Generic graph to native graph.

use super::coerce;
use crate::config::{CollectionShape, MapperConfig};
use crate::dynamic::{DynamicObject, DynamicValue, Values};
use crate::error::{Error, Result};
use crate::runtime::{
    Instance, MemberAccess, Sequence, SetterAccess, TypeDef, TypeId, TypeKind, TypeRegistry, Value,
};
use crate::types::TypeRef;
use std::collections::HashMap;

/// Construction state of a node already reached in this call.
struct Built {
    instance: Instance,
    complete: bool,
    is_value_type: bool,
}

/// One `from_generic` call: nodes already turned into instances.
pub(super) struct FromGeneric<'a> {
    registry: &'a TypeRegistry,
    config: &'a MapperConfig,
    shape: CollectionShape,
    /// Node address -> instance built for it.
    built: HashMap<usize, Built>,
}

impl<'a> FromGeneric<'a> {
    pub(super) fn new(
        registry: &'a TypeRegistry,
        config: &'a MapperConfig,
        shape: CollectionShape,
    ) -> Self {
        Self {
            registry,
            config,
            shape,
            built: HashMap::new(),
        }
    }

    /// Convert `value` into a native value of type `target`.
    pub(super) fn value(
        &mut self,
        value: &DynamicValue,
        target: TypeId,
        depth: usize,
    ) -> Result<Value> {
        super::check_depth(self.config, depth)?;

        let def = self.registry.get(target)?;
        let mismatch = || Error::mismatch(None, def.qualified_name(), value.describe());

        match def.kind() {
            TypeKind::Object => self.untyped(value, depth),
            TypeKind::Nullable(inner) => {
                if value.is_null() {
                    Ok(Value::Null)
                } else {
                    self.value(value, *inner, depth)
                }
            }
            TypeKind::Primitive(kind) => coerce::primitive(value, *kind).ok_or_else(mismatch),
            TypeKind::Enum(e) => {
                // A payload tagged with another known enum is not re-tagged.
                if let DynamicValue::Enum { type_ref, .. } = value {
                    if let Some(described) = self.try_resolve(type_ref)? {
                        if described != target {
                            return Err(mismatch());
                        }
                    }
                }
                coerce::enumeration(value, target, e).ok_or_else(mismatch)
            }
            TypeKind::Struct(s) => match value {
                DynamicValue::Null if !s.is_value_type => Ok(Value::Null),
                DynamicValue::Object(node) => self.object(node, Some(target), depth),
                _ => Err(mismatch()),
            },
            TypeKind::Array(element) | TypeKind::List(element) => match value {
                DynamicValue::Null => Ok(Value::Null),
                DynamicValue::Values(values) => self.sequence(values, target, *element, depth),
                _ => Err(mismatch()),
            },
        }
    }

    /// Convert a value whose declared type is `object`: the value describes
    /// its own type. An enum whose type cannot be resolved degrades to its
    /// underlying integer.
    fn untyped(&mut self, value: &DynamicValue, depth: usize) -> Result<Value> {
        match value {
            DynamicValue::Object(node) => self.object(node, None, depth),
            DynamicValue::Values(values) => {
                let element = match values.element_type() {
                    Some(hint) => self.try_resolve(hint)?.unwrap_or(TypeId::OBJECT),
                    None => TypeId::OBJECT,
                };
                let sequence_type = match self.shape {
                    CollectionShape::Array => self.registry.array_of(element)?,
                    CollectionShape::List => self.registry.list_of(element)?,
                };
                self.sequence(values, sequence_type, element, depth)
            }
            DynamicValue::Enum { type_ref, value: raw } => match self.try_resolve(type_ref)? {
                Some(target) => self.value(value, target, depth),
                None => Ok(Value::I64(*raw)),
            },
            primitive => coerce::from_dynamic(primitive).ok_or_else(|| {
                Error::ArgumentInvalid(format!("unsupported value {}", primitive.describe()))
            }),
        }
    }

    fn sequence(
        &mut self,
        values: &Values,
        sequence_type: TypeId,
        element: TypeId,
        depth: usize,
    ) -> Result<Value> {
        let items = values
            .iter()
            .enumerate()
            .map(|(i, item)| {
                self.value(item, element, depth + 1)
                    .map_err(|err| err.at_member(&format!("[{}]", i)))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Value::Sequence(Sequence {
            type_id: sequence_type,
            items,
        }))
    }

    /// Build (or reuse) the instance for a node.
    pub(super) fn object(
        &mut self,
        node: &DynamicObject,
        target: Option<TypeId>,
        depth: usize,
    ) -> Result<Value> {
        if let Some(built) = self.built.get(&node.addr()) {
            return match (built.complete, built.is_value_type) {
                (_, false) => Ok(Value::Object(built.instance.clone())),
                (true, true) => Ok(Value::Object(copy_value_type(&built.instance))),
                (false, true) => Err(Error::mismatch(
                    None,
                    built.instance.type_name(),
                    "cyclic reference to a value-type instance under construction",
                )),
            };
        }

        let type_id = match target {
            Some(id) => id,
            None => self.resolve_node(node)?,
        };
        let instance = self.registry.instantiate(type_id)?;
        let def = instance.type_def();
        self.built.insert(
            node.addr(),
            Built {
                instance: instance.clone(),
                complete: false,
                is_value_type: def.is_value_type(),
            },
        );

        for (name, value) in node.properties().iter() {
            self.assign(&instance, &def, name, value, depth)?;
        }

        if let Some(built) = self.built.get_mut(&node.addr()) {
            built.complete = true;
        }
        Ok(Value::Object(instance))
    }

    fn assign(
        &mut self,
        instance: &Instance,
        def: &TypeDef,
        name: &str,
        value: &DynamicValue,
        depth: usize,
    ) -> Result<()> {
        let Some(property) = def.as_struct().and_then(|s| s.property(name)) else {
            log::trace!(
                "[mapper] {} has no property '{}', ignored",
                def.qualified_name(),
                name
            );
            return Ok(());
        };
        if !property.is_writable() {
            log::trace!(
                "[mapper] {}.{} has no setter, skipped",
                def.qualified_name(),
                name
            );
            return Ok(());
        }

        let native = self
            .value(value, property.type_id, depth + 1)
            .map_err(|err| err.at_member(name))?;
        self.registry
            .set_value(instance, name, native, SetterAccess::NonPublic)
    }

    /// Resolve a type hint; `None` when no type satisfies it.
    fn try_resolve(&self, type_ref: &TypeRef) -> Result<Option<TypeId>> {
        match self.registry.resolve(type_ref) {
            Ok(id) => Ok(Some(id)),
            Err(Error::TypeResolutionFailed { type_name, reason }) => {
                log::debug!("[mapper] {} unresolved ({})", type_name, reason);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Type for a node reached without a declared target.
    ///
    /// The node's own type reference wins; a node without one, or whose
    /// reference cannot be resolved, gets a type synthesized from its
    /// property names.
    fn resolve_node(&self, node: &DynamicObject) -> Result<TypeId> {
        if let Some(type_ref) = node.type_ref() {
            if let Some(id) = self.try_resolve(&type_ref)? {
                return Ok(id);
            }
        }
        self.registry.resolve_names(&node.property_names())
    }
}

/// Copy of a value-type instance; nested value-type instances are copied
/// too, references to reference types are shared.
fn copy_value_type(instance: &Instance) -> Instance {
    let copy = instance.shallow_copy();
    for (slot, value) in copy.slots().into_iter().enumerate() {
        if let Value::Object(nested) = value {
            if nested.type_def().is_value_type() {
                copy.set_slot(slot, Value::Object(copy_value_type(&nested)));
            }
        }
    }
    copy
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Native graph to generic graph.

use super::coerce;
use crate::config::MapperConfig;
use crate::dynamic::{DynamicObject, DynamicValue, Values};
use crate::error::{Error, Result};
use crate::runtime::{Instance, MemberAccess, Sequence, TypeId, TypeKind, TypeRegistry, Value};
use crate::types::TypeRef;
use std::collections::HashMap;
use std::sync::Arc;

/// One `to_generic` call: visited instances and per-type lookups.
pub(super) struct ToGeneric<'a> {
    registry: &'a TypeRegistry,
    config: &'a MapperConfig,
    /// Instance address -> node produced for it.
    visited: HashMap<usize, DynamicObject>,
    members: HashMap<TypeId, Arc<[String]>>,
    type_refs: HashMap<TypeId, TypeRef>,
}

impl<'a> ToGeneric<'a> {
    pub(super) fn new(registry: &'a TypeRegistry, config: &'a MapperConfig) -> Self {
        Self {
            registry,
            config,
            visited: HashMap::new(),
            members: HashMap::new(),
            type_refs: HashMap::new(),
        }
    }

    pub(super) fn value(&mut self, value: &Value, depth: usize) -> Result<DynamicValue> {
        super::check_depth(self.config, depth)?;

        match value {
            Value::Enum(e) => Ok(DynamicValue::Enum {
                type_ref: self.type_ref(e.type_id)?,
                value: e.value,
            }),
            Value::Sequence(seq) => self.sequence(seq, depth),
            Value::Object(instance) => self.object(instance, depth).map(DynamicValue::Object),
            other => {
                if self.config.format_native_values_as_string {
                    if let Some(text) = coerce::format(other) {
                        return Ok(DynamicValue::String(text));
                    }
                }
                coerce::to_dynamic(other).ok_or_else(|| {
                    Error::ArgumentInvalid(format!("unsupported value {}", other.describe()))
                })
            }
        }
    }

    pub(super) fn object(&mut self, instance: &Instance, depth: usize) -> Result<DynamicObject> {
        if let Some(node) = self.visited.get(&instance.addr()) {
            return Ok(node.clone());
        }

        let type_id = instance.type_id();
        let node = DynamicObject::new();
        if !self.config.suppress_type_information {
            node.set_type_ref(Some(self.type_ref(type_id)?));
        }
        self.visited.insert(instance.addr(), node.clone());

        for member in self.members(type_id)?.iter() {
            let native = self.registry.get_value(instance, member)?;
            let generic = self
                .value(&native, depth + 1)
                .map_err(|err| err.at_member(member))?;
            node.set(member.clone(), generic);
        }
        Ok(node)
    }

    fn sequence(&mut self, seq: &Sequence, depth: usize) -> Result<DynamicValue> {
        let element_type = match self.registry.get(seq.type_id)?.kind() {
            TypeKind::Array(element) | TypeKind::List(element) => *element,
            _ => {
                return Err(Error::ArgumentInvalid(format!(
                    "sequence typed {} is neither an array nor a list",
                    seq.type_id
                )))
            }
        };
        let hint = if self.config.suppress_type_information {
            None
        } else {
            Some(self.registry.type_ref(element_type)?)
        };

        let items = seq
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                self.value(item, depth + 1)
                    .map_err(|err| err.at_member(&format!("[{}]", i)))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(DynamicValue::Values(Values::new(hint, items)))
    }

    fn members(&mut self, type_id: TypeId) -> Result<Arc<[String]>> {
        if let Some(names) = self.members.get(&type_id) {
            return Ok(Arc::clone(names));
        }
        let names: Arc<[String]> = self
            .registry
            .list_members(type_id)?
            .iter()
            .map(|m| m.name().to_string())
            .collect();
        self.members.insert(type_id, Arc::clone(&names));
        Ok(names)
    }

    fn type_ref(&mut self, type_id: TypeId) -> Result<TypeRef> {
        if let Some(type_ref) = self.type_refs.get(&type_id) {
            return Ok(type_ref.clone());
        }
        let type_ref = if self.config.include_property_types {
            self.registry.type_ref_with_properties(type_id)?
        } else {
            self.registry.type_ref(type_id)?
        };
        self.type_refs.insert(type_id, type_ref.clone());
        Ok(type_ref)
    }
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Bidirectional graph mapper.
//!
//! [`GraphMapper`] turns native values (instances of registered or
//! synthesized types) into generic [`DynamicValue`] graphs and back.
//!
//! # Identity
//!
//! Each call keeps an identity map from source address to produced node or
//! instance. A source object reached twice yields the same target object, so
//! shared references and cycles survive the trip in both directions. The
//! maps live only for the duration of one call.
//!
//! Value-type instances are the exception: a completed one reached again is
//! copied, and a cycle back into one still under construction is a
//! [`Error::TypeMismatch`].
//!
//! # Example
//!
//! ```rust
//! use dyngraph::{GraphMapper, TypeBuilder, TypeId, TypeRegistry, Value};
//! use dyngraph::runtime::{MemberAccess, SetterAccess};
//!
//! let registry = TypeRegistry::new();
//! let node = registry
//!     .register(
//!         TypeBuilder::new("Graph", "Node")
//!             .string_property("Name")
//!             .property("Next", TypeId::OBJECT),
//!     )
//!     .unwrap();
//!
//! let a = registry.instantiate(node).unwrap();
//! registry.set_value(&a, "Name", "a".into(), SetterAccess::PublicOnly).unwrap();
//! registry.set_value(&a, "Next", Value::Object(a.clone()), SetterAccess::PublicOnly).unwrap();
//!
//! let mapper = GraphMapper::new(&registry);
//! let generic = mapper.to_dynamic_object(&Value::Object(a.clone())).unwrap();
//! let back = mapper.create_object(&generic, node).unwrap();
//!
//! let next = back.get("Next").unwrap();
//! assert!(dyngraph::Instance::ptr_eq(next.as_instance().unwrap(), &back));
//! # a.clear();
//! # back.clear();
//! # generic.clear();
//! ```

mod coerce;
mod generic;
mod native;

use crate::config::{CollectionShape, MapperConfig};
use crate::dynamic::{DynamicObject, DynamicValue};
use crate::error::{Error, Result};
use crate::runtime::{Instance, TypeId, TypeRegistry, Value};
use generic::ToGeneric;
use native::FromGeneric;

/// Converter between native and generic object graphs.
///
/// Holds no per-call state; one mapper may serve concurrent calls.
#[derive(Debug, Clone)]
pub struct GraphMapper<'r> {
    registry: &'r TypeRegistry,
    config: MapperConfig,
}

impl<'r> GraphMapper<'r> {
    /// Mapper with the default configuration.
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self::with_config(registry, MapperConfig::default())
    }

    pub fn with_config(registry: &'r TypeRegistry, config: MapperConfig) -> Self {
        Self { registry, config }
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    pub fn registry(&self) -> &'r TypeRegistry {
        self.registry
    }

    /// Native value to generic value.
    pub fn to_generic(&self, value: &Value) -> Result<DynamicValue> {
        ToGeneric::new(self.registry, &self.config).value(value, 0)
    }

    /// Native instance to generic object node.
    ///
    /// Fails with [`Error::ArgumentInvalid`] unless `value` is an instance.
    pub fn to_dynamic_object(&self, value: &Value) -> Result<DynamicObject> {
        match value {
            Value::Object(instance) => {
                check_depth(&self.config, 0)?;
                ToGeneric::new(self.registry, &self.config).object(instance, 0)
            }
            Value::Null => Err(Error::ArgumentInvalid("root object is null".into())),
            other => Err(Error::ArgumentInvalid(format!(
                "root is not an object: {}",
                other.describe()
            ))),
        }
    }

    /// Generic value to native value.
    ///
    /// With `target` set, the value is converted to that type. Without one
    /// (or with [`TypeId::OBJECT`]) objects are typed by their own type
    /// reference, falling back to a type synthesized from property names.
    pub fn from_generic(&self, value: &DynamicValue, target: Option<TypeId>) -> Result<Value> {
        self.from_generic_as(value, target, self.config.sequence_shape)
    }

    /// Like [`from_generic`](Self::from_generic), building untyped
    /// sequences in the given shape.
    pub fn from_generic_as(
        &self,
        value: &DynamicValue,
        target: Option<TypeId>,
        shape: CollectionShape,
    ) -> Result<Value> {
        let target = target.unwrap_or(TypeId::OBJECT);
        log::trace!("[mapper] from_generic {} into {}", value.describe(), target);
        FromGeneric::new(self.registry, &self.config, shape).value(value, target, 0)
    }

    /// Instance of `target` populated from a node.
    pub fn create_object(&self, node: &DynamicObject, target: TypeId) -> Result<Instance> {
        check_depth(&self.config, 0)?;
        let value = FromGeneric::new(self.registry, &self.config, self.config.sequence_shape)
            .object(node, Some(target), 0)?;
        match value {
            Value::Object(instance) => Ok(instance),
            other => Err(Error::mismatch(
                None,
                self.registry.get(target)?.qualified_name(),
                other.describe(),
            )),
        }
    }
}

pub(crate) fn check_depth(config: &MapperConfig, depth: usize) -> Result<()> {
    match config.max_depth {
        Some(max) if depth > max => Err(Error::ArgumentInvalid(format!(
            "graph nesting exceeds the maximum depth of {}",
            max
        ))),
        _ => Ok(()),
    }
}

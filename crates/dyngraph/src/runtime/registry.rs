// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type registry: loaded types, constructed types and synthesized types.
//!
//! # Architecture
//!
//! ```text
//! TypeRegistry (explicit, share with Arc<TypeRegistry>)
//! +-- types: RwLock<Vec<Arc<TypeDef>>>          arena, append-only, TypeId = index
//! +-- by_name: DashMap<String, TypeId>          loaded types by qualified name
//! +-- constructed: DashMap<Constructed, TypeId> interned T[], List<T>, T?
//! +-- emitter: TypeEmitter                      StructuralKey -> synthesized TypeId
//! ```
//!
//! # Resolution
//!
//! 1. Validate the descriptor.
//! 2. Arrays, `Nullable<T>` and `List<T>` resolve their arguments and return
//!    the interned constructed type.
//! 3. A loaded type with the same qualified name wins if arity and the
//!    enum/array flags agree.
//! 4. Otherwise a struct type is synthesized from the described properties.
//!
//! # Thread Safety
//!
//! Lock order is a `by_name` or `constructed` entry, then the arena. The
//! arena lock is never held while a map or emitter lock is taken, and no map
//! guard is held across a call back into the registry.

use crate::config::{
    RegistryConfig, LIST_NAMESPACE, LIST_TYPE_NAME, NULLABLE_TYPE_NAME, SYSTEM_NAMESPACE,
};
use crate::error::{Error, Result};
use crate::runtime::emitter::TypeEmitter;
use crate::runtime::instance::default_value;
use crate::runtime::{
    Accessibility, Instance, IntoTypeDef, MemberAccess, PrimitiveKind, PropertyDef, SetterAccess,
    StructDef, TypeDef, TypeId, TypeKind, Value,
};
use crate::types::{MemberDescriptor, MemberKind, TypeRef, TypeRefBuilder};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;

/// Constructed generic or array type, interned by argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Constructed {
    Array(TypeId),
    List(TypeId),
    Nullable(TypeId),
}

/// Member of a native type resolved from a portable descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMember {
    pub declaring_type: TypeId,
    pub kind: MemberKind,
    /// Slot index for fields and properties.
    pub slot: Option<usize>,
    pub value_type: TypeId,
}

/// Registry of native types.
pub struct TypeRegistry {
    config: RegistryConfig,
    types: RwLock<Vec<Arc<TypeDef>>>,
    by_name: DashMap<String, TypeId>,
    constructed: DashMap<Constructed, TypeId>,
    emitter: TypeEmitter,
}

impl TypeRegistry {
    /// Registry holding only the builtin types.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        let mut types = Vec::with_capacity(TypeId::BUILTIN_COUNT as usize);
        types.push(Arc::new(TypeDef::builtin(
            TypeId::OBJECT,
            "Object",
            TypeKind::Object,
        )));
        for kind in PrimitiveKind::ALL {
            types.push(Arc::new(TypeDef::builtin(
                TypeId::of_primitive(kind),
                kind.type_name(),
                TypeKind::Primitive(kind),
            )));
        }

        let by_name = DashMap::new();
        for def in &types {
            by_name.insert(def.qualified_name(), def.id());
        }

        Self {
            config,
            types: RwLock::new(types),
            by_name,
            constructed: DashMap::new(),
            emitter: TypeEmitter::new(),
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub(crate) fn emitter(&self) -> &TypeEmitter {
        &self.emitter
    }

    /// Register a type that does not refer to itself.
    pub fn register<B: IntoTypeDef>(&self, builder: B) -> Result<TypeId> {
        self.register_with(|_| builder)
    }

    /// Register a type whose definition needs its own id.
    ///
    /// The id is reserved before `build` runs, so `build` may construct
    /// types over it (`registry.array_of(id)`, `registry.list_of(id)`) for
    /// self-referencing properties.
    pub fn register_with<B, F>(&self, build: F) -> Result<TypeId>
    where
        B: IntoTypeDef,
        F: FnOnce(TypeId) -> B,
    {
        let id = self.reserve()?;
        let def = build(id).into_type_def(id);
        self.validate_def(&def)?;

        // The name entry stays locked while the definition is published, so
        // a name is only ever indexed to a complete type.
        let qualified = def.qualified_name();
        match self.by_name.entry(qualified.clone()) {
            Entry::Occupied(_) => Err(Error::ArgumentInvalid(format!(
                "type '{}' is already registered",
                qualified
            ))),
            Entry::Vacant(slot) => {
                self.types.write()[id.index()] = Arc::new(def);
                slot.insert(id);
                log::debug!("[registry] registered {} as {}", qualified, id);
                Ok(id)
            }
        }
    }

    /// Append an inert placeholder and return its id. The caller publishes
    /// the real definition into the slot once it is complete.
    pub(crate) fn reserve(&self) -> Result<TypeId> {
        self.push_def(|id| TypeDef {
            id,
            name: "<reserved>".to_string(),
            namespace: None,
            kind: TypeKind::Object,
            emitted: false,
        })
    }

    fn push_def<F>(&self, make: F) -> Result<TypeId>
    where
        F: FnOnce(TypeId) -> TypeDef,
    {
        let mut types = self.types.write();
        let index = u32::try_from(types.len())
            .map_err(|_| Error::ArgumentInvalid("type arena is full".into()))?;
        let id = TypeId(index);
        types.push(Arc::new(make(id)));
        Ok(id)
    }

    fn validate_def(&self, def: &TypeDef) -> Result<()> {
        if def.name().is_empty() {
            return Err(Error::ArgumentInvalid("type name missing".into()));
        }
        let known = self.len();
        match def.kind() {
            TypeKind::Struct(s) => {
                let mut seen = HashSet::new();
                for property in &s.properties {
                    if property.name.is_empty() {
                        return Err(Error::ArgumentInvalid(format!(
                            "property name missing on '{}'",
                            def.qualified_name()
                        )));
                    }
                    if !seen.insert(property.name.as_str()) {
                        return Err(Error::ArgumentInvalid(format!(
                            "duplicate property '{}' on '{}'",
                            property.name,
                            def.qualified_name()
                        )));
                    }
                    if property.type_id.index() >= known {
                        return Err(Error::ArgumentInvalid(format!(
                            "property '{}' refers to unknown type {}",
                            property.name, property.type_id
                        )));
                    }
                }
            }
            TypeKind::Enum(e) => {
                if !e.underlying.is_integer() {
                    return Err(Error::ArgumentInvalid(format!(
                        "enum '{}' needs an integer underlying type",
                        def.qualified_name()
                    )));
                }
                let mut seen = HashSet::new();
                if let Some(dup) = e.variants.iter().find(|v| !seen.insert(v.name.as_str())) {
                    return Err(Error::ArgumentInvalid(format!(
                        "duplicate variant '{}' on '{}'",
                        dup.name,
                        def.qualified_name()
                    )));
                }
            }
            _ => {
                return Err(Error::ArgumentInvalid(format!(
                    "only struct and enum types can be registered, got '{}'",
                    def.qualified_name()
                )))
            }
        }
        Ok(())
    }

    /// Publish a synthesized struct type into the reserved slot `id`. Not
    /// entered in the name index.
    pub(crate) fn define_emitted(
        &self,
        id: TypeId,
        namespace: Option<String>,
        name: String,
        properties: Vec<PropertyDef>,
        is_value_type: bool,
    ) -> Result<TypeId> {
        let count = properties.len();
        let display = match namespace.as_deref() {
            Some(ns) if !ns.is_empty() => format!("{}.{}", ns, name),
            _ => name.clone(),
        };
        let def = TypeDef {
            id,
            name,
            namespace,
            kind: TypeKind::Struct(StructDef {
                properties,
                is_value_type,
            }),
            emitted: true,
        };
        match self.types.write().get_mut(id.index()) {
            Some(slot) => *slot = Arc::new(def),
            None => return Err(Error::ArgumentInvalid(format!("unknown type {}", id))),
        }
        log::debug!(
            "[emitter] synthesized {} with {} properties as {}",
            display,
            count,
            id
        );
        Ok(id)
    }

    /// Definition of a type.
    pub fn get(&self, id: TypeId) -> Result<Arc<TypeDef>> {
        self.types
            .read()
            .get(id.index())
            .cloned()
            .ok_or_else(|| Error::ArgumentInvalid(format!("unknown type {}", id)))
    }

    /// Loaded type by qualified name (synthesized types are not listed).
    pub fn find(&self, qualified_name: &str) -> Option<TypeId> {
        self.by_name.get(qualified_name).map(|id| *id)
    }

    /// Number of types in the arena, builtins included.
    pub fn len(&self) -> usize {
        self.types.read().len()
    }

    /// Never true: builtins are always present.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of types synthesized so far.
    pub fn synthesized_count(&self) -> usize {
        self.emitter.len()
    }

    // ========================================================================
    // Constructed types
    // ========================================================================

    /// Array of `element`.
    pub fn array_of(&self, element: TypeId) -> Result<TypeId> {
        self.constructed(Constructed::Array(element))
    }

    /// Growable list of `element`.
    pub fn list_of(&self, element: TypeId) -> Result<TypeId> {
        self.constructed(Constructed::List(element))
    }

    /// Nullable wrapper of a value type.
    pub fn nullable_of(&self, inner: TypeId) -> Result<TypeId> {
        self.constructed(Constructed::Nullable(inner))
    }

    fn constructed(&self, key: Constructed) -> Result<TypeId> {
        if let Some(id) = self.constructed.get(&key) {
            return Ok(*id);
        }

        let (argument, kind) = match key {
            Constructed::Array(t) => (t, TypeKind::Array(t)),
            Constructed::List(t) => (t, TypeKind::List(t)),
            Constructed::Nullable(t) => (t, TypeKind::Nullable(t)),
        };
        let argument_def = self.get(argument)?;
        if let Constructed::Nullable(_) = key {
            if !argument_def.is_value_type() || matches!(argument_def.kind(), TypeKind::Nullable(_))
            {
                return Err(Error::ArgumentInvalid(format!(
                    "'{}' cannot be made nullable",
                    argument_def.qualified_name()
                )));
            }
        }
        let (namespace, name) = match key {
            Constructed::Array(_) => (
                argument_def.namespace().map(str::to_string),
                format!("{}[]", argument_def.name()),
            ),
            Constructed::List(_) => (Some(LIST_NAMESPACE.to_string()), LIST_TYPE_NAME.to_string()),
            Constructed::Nullable(_) => (
                Some(SYSTEM_NAMESPACE.to_string()),
                NULLABLE_TYPE_NAME.to_string(),
            ),
        };

        match self.constructed.entry(key) {
            Entry::Occupied(existing) => Ok(*existing.get()),
            Entry::Vacant(slot) => {
                let id = self.push_def(|id| TypeDef {
                    id,
                    name,
                    namespace,
                    kind,
                    emitted: false,
                })?;
                slot.insert(id);
                log::trace!("[registry] constructed {:?} as {}", key, id);
                Ok(id)
            }
        }
    }

    /// Inner type of a nullable wrapper, or the type itself.
    pub fn as_non_nullable(&self, id: TypeId) -> Result<TypeId> {
        match self.get(id)?.kind() {
            TypeKind::Nullable(inner) => Ok(*inner),
            _ => Ok(id),
        }
    }

    /// Enum type, looking through a nullable wrapper.
    pub fn is_enum(&self, id: TypeId) -> Result<bool> {
        let id = self.as_non_nullable(id)?;
        Ok(self.get(id)?.as_enum().is_some())
    }

    /// Created by the synthesizer.
    pub fn is_emitted(&self, id: TypeId) -> Result<bool> {
        Ok(self.get(id)?.is_emitted())
    }

    /// Synthesized types have no source-level name.
    pub fn is_anonymous(&self, id: TypeId) -> Result<bool> {
        self.is_emitted(id)
    }

    /// Can `value` be stored in a slot of type `target` without coercion.
    pub fn is_assignable(&self, target: TypeId, value: &Value) -> Result<bool> {
        let def = self.get(target)?;
        Ok(match def.kind() {
            TypeKind::Object => true,
            TypeKind::Primitive(kind) => primitive_matches(*kind, value),
            TypeKind::Enum(_) => matches!(value, Value::Enum(e) if e.type_id == target),
            TypeKind::Struct(s) => match value {
                Value::Null => !s.is_value_type,
                Value::Object(inst) => inst.type_id() == target,
                _ => false,
            },
            TypeKind::Array(_) | TypeKind::List(_) => match value {
                Value::Null => true,
                Value::Sequence(seq) => seq.type_id == target,
                _ => false,
            },
            TypeKind::Nullable(inner) => value.is_null() || self.is_assignable(*inner, value)?,
        })
    }

    /// Runtime type of a native value (`None` for null).
    pub fn type_of(&self, value: &Value) -> Option<TypeId> {
        Some(match value {
            Value::Null => return None,
            Value::Bool(_) => TypeId::BOOL,
            Value::Char(_) => TypeId::CHAR,
            Value::I8(_) => TypeId::I8,
            Value::I16(_) => TypeId::I16,
            Value::I32(_) => TypeId::I32,
            Value::I64(_) => TypeId::I64,
            Value::U8(_) => TypeId::U8,
            Value::U16(_) => TypeId::U16,
            Value::U32(_) => TypeId::U32,
            Value::U64(_) => TypeId::U64,
            Value::F32(_) => TypeId::F32,
            Value::F64(_) => TypeId::F64,
            Value::String(_) => TypeId::STRING,
            Value::Enum(e) => e.type_id,
            Value::Sequence(seq) => seq.type_id,
            Value::Object(inst) => inst.type_id(),
        })
    }

    // ========================================================================
    // Portable descriptors
    // ========================================================================

    /// Portable descriptor of a type, without properties.
    pub fn type_ref(&self, id: TypeId) -> Result<TypeRef> {
        self.describe(id, false)
    }

    /// Portable descriptor including the publicly readable properties.
    pub fn type_ref_with_properties(&self, id: TypeId) -> Result<TypeRef> {
        self.describe(id, true)
    }

    fn describe(&self, id: TypeId, with_properties: bool) -> Result<TypeRef> {
        let def = self.get(id)?;
        let base = || {
            let builder = TypeRefBuilder::new(def.name());
            match def.namespace() {
                Some(ns) => builder.namespace(ns),
                None => builder,
            }
        };

        Ok(match def.kind() {
            TypeKind::Array(element) => TypeRef::array_of(self.describe(*element, false)?),
            TypeKind::List(element) | TypeKind::Nullable(element) => {
                let builder = base().generic_argument(self.describe(*element, false)?);
                if def.is_value_type() {
                    builder.value_type().build()
                } else {
                    builder.build()
                }
            }
            TypeKind::Enum(_) => base().enum_type().build(),
            TypeKind::Primitive(kind) if kind.is_value_type() => base().value_type().build(),
            TypeKind::Primitive(_) | TypeKind::Object => base().build(),
            TypeKind::Struct(s) => {
                let mut builder = base();
                if s.is_value_type {
                    builder = builder.value_type();
                }
                if with_properties {
                    builder = builder.no_properties();
                    for property in s.properties.iter().filter(|p| p.is_readable()) {
                        builder =
                            builder.property(property.name.clone(), self.describe(property.type_id, false)?);
                    }
                }
                builder.build()
            }
        })
    }

    /// Member of a given kind.
    ///
    /// `Constructor` finds the default constructor of struct types. Methods
    /// are not modelled and never found.
    pub fn member(&self, id: TypeId, name: &str, kind: MemberKind) -> Result<MemberDescriptor> {
        let def = self.get(id)?;
        let not_found = || Error::MemberNotFound {
            type_name: def.qualified_name(),
            member: name.to_string(),
        };
        match kind {
            MemberKind::Constructor => {
                if def.as_struct().is_none() {
                    return Err(not_found());
                }
                MemberDescriptor::constructor(self.type_ref(id)?)
            }
            MemberKind::Method => Err(not_found()),
            MemberKind::Field | MemberKind::Property => {
                let property = def
                    .properties()
                    .iter()
                    .find(|p| p.name == name && p.kind == kind)
                    .ok_or_else(not_found)?;
                self.property_descriptor(id, property)
            }
        }
    }

    /// Field or property by name, whichever kind it is.
    pub fn member_descriptor(&self, id: TypeId, name: &str) -> Result<MemberDescriptor> {
        let def = self.get(id)?;
        let property = def
            .properties()
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| Error::MemberNotFound {
                type_name: def.qualified_name(),
                member: name.to_string(),
            })?;
        self.property_descriptor(id, property)
    }

    fn property_descriptor(&self, id: TypeId, property: &PropertyDef) -> Result<MemberDescriptor> {
        MemberDescriptor::new(
            property.kind,
            property.name.clone(),
            self.type_ref(id)?,
            self.type_ref(property.type_id)?,
        )
    }

    /// Resolve a portable member descriptor back onto a native type.
    ///
    /// The declared value type must resolve to the member's actual type.
    pub fn resolve_member(&self, member: &MemberDescriptor) -> Result<ResolvedMember> {
        let declaring_type = self.resolve(member.declaring_type())?;
        let def = self.get(declaring_type)?;

        match member.kind() {
            MemberKind::Constructor => {
                if def.as_struct().is_none() {
                    return Err(Error::MemberNotFound {
                        type_name: def.qualified_name(),
                        member: member.name().to_string(),
                    });
                }
                Ok(ResolvedMember {
                    declaring_type,
                    kind: MemberKind::Constructor,
                    slot: None,
                    value_type: declaring_type,
                })
            }
            MemberKind::Method => Err(Error::MemberNotFound {
                type_name: def.qualified_name(),
                member: member.name().to_string(),
            }),
            MemberKind::Field | MemberKind::Property => {
                let (slot, property) = def
                    .properties()
                    .iter()
                    .enumerate()
                    .find(|(_, p)| p.name == member.name() && p.kind == member.kind())
                    .ok_or_else(|| Error::MemberNotFound {
                        type_name: def.qualified_name(),
                        member: member.name().to_string(),
                    })?;
                let declared = self.resolve(member.value_type())?;
                if declared != property.type_id {
                    return Err(Error::mismatch(
                        Some(member.name()),
                        self.get(property.type_id)?.qualified_name(),
                        member.value_type().full_name(),
                    ));
                }
                Ok(ResolvedMember {
                    declaring_type,
                    kind: member.kind(),
                    slot: Some(slot),
                    value_type: property.type_id,
                })
            }
        }
    }

    // ========================================================================
    // Resolution
    // ========================================================================

    /// Native type for a portable descriptor, synthesizing one if needed.
    pub fn resolve(&self, type_ref: &TypeRef) -> Result<TypeId> {
        type_ref.validate()?;
        self.resolve_validated(type_ref)
    }

    /// Type with one `object` property per name, in order.
    ///
    /// The same ordered list always yields the same type; a reordered list
    /// yields a different one.
    pub fn resolve_names<S: AsRef<str>>(&self, names: &[S]) -> Result<TypeId> {
        let mut seen = HashSet::new();
        let mut owned = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            if name.is_empty() {
                return Err(Error::DescriptorInvalid("property name missing".into()));
            }
            if !seen.insert(name) {
                return Err(Error::DescriptorInvalid(format!(
                    "duplicate property name '{}'",
                    name
                )));
            }
            owned.push(name.to_string());
        }
        self.emitter.emit_from_names(self, &owned)
    }

    fn resolve_validated(&self, type_ref: &TypeRef) -> Result<TypeId> {
        if type_ref.is_array() {
            let element = type_ref.element_type().ok_or_else(|| {
                Error::DescriptorInvalid(format!(
                    "array type '{}' has no element type",
                    type_ref.qualified_name()
                ))
            })?;
            let element = self.resolve_validated(element)?;
            return self.array_of(element);
        }

        if type_ref.is_generic() {
            if let Some(id) = self.resolve_constructed(type_ref)? {
                return Ok(id);
            }
        }

        if let Some(id) = self.find(&type_ref.qualified_name()) {
            let def = self.get(id)?;
            if is_compatible(&def, type_ref) {
                log::trace!("[registry] resolved {} to loaded {}", type_ref, id);
                return Ok(id);
            }
            if type_ref.properties().is_none() {
                return Err(Error::unresolved(
                    type_ref.full_name(),
                    "conflicts with the loaded type of the same name",
                ));
            }
        }

        if type_ref.is_enum() {
            return Err(Error::unresolved(
                type_ref.full_name(),
                "enum types cannot be synthesized",
            ));
        }
        if type_ref.properties().is_none() {
            return Err(Error::unresolved(
                type_ref.full_name(),
                "not loaded and no property list to synthesize from",
            ));
        }
        self.emitter.emit_from_type_ref(self, type_ref)
    }

    fn resolve_constructed(&self, type_ref: &TypeRef) -> Result<Option<TypeId>> {
        let [argument] = type_ref.generic_arguments() else {
            return Ok(None);
        };
        let qualified = type_ref.qualified_name();
        let nullable = format!("{}.{}", SYSTEM_NAMESPACE, NULLABLE_TYPE_NAME);
        let list = format!("{}.{}", LIST_NAMESPACE, LIST_TYPE_NAME);

        if qualified == nullable {
            let inner = self.resolve_validated(argument)?;
            return self.nullable_of(inner).map(Some);
        }
        if qualified == list {
            let element = self.resolve_validated(argument)?;
            return self.list_of(element).map(Some);
        }
        Ok(None)
    }

    fn property_of(&self, type_id: TypeId, member: &str) -> Result<(Arc<TypeDef>, usize)> {
        let def = self.get(type_id)?;
        let slot = def
            .as_struct()
            .and_then(|s| s.slot(member))
            .ok_or_else(|| Error::MemberNotFound {
                type_name: def.qualified_name(),
                member: member.to_string(),
            })?;
        Ok((def, slot))
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("types", &self.len())
            .field("synthesized", &self.synthesized_count())
            .finish()
    }
}

impl MemberAccess for TypeRegistry {
    fn list_members(&self, type_id: TypeId) -> Result<Vec<MemberDescriptor>> {
        let def = self.get(type_id)?;
        def.properties()
            .iter()
            .filter(|p| p.is_readable())
            .map(|p| self.property_descriptor(type_id, p))
            .collect()
    }

    fn get_value(&self, instance: &Instance, member: &str) -> Result<Value> {
        instance.get(member)
    }

    fn set_value(
        &self,
        instance: &Instance,
        member: &str,
        value: Value,
        access: SetterAccess,
    ) -> Result<()> {
        let (def, slot) = self.property_of(instance.type_id(), member)?;
        let property = &def.properties()[slot];
        let allowed = match access {
            SetterAccess::PublicOnly => property.setter == Accessibility::Public,
            SetterAccess::NonPublic => property.is_writable(),
        };
        if !allowed {
            return Err(Error::MemberNotWritable {
                type_name: def.qualified_name(),
                member: member.to_string(),
            });
        }
        if !self.is_assignable(property.type_id, &value)? {
            return Err(Error::mismatch(
                Some(member),
                self.get(property.type_id)?.qualified_name(),
                value.describe(),
            ));
        }
        instance.set_slot(slot, value);
        Ok(())
    }

    fn instantiate(&self, type_id: TypeId) -> Result<Instance> {
        self.instantiate_nested(type_id, &mut Vec::new())
    }
}

impl TypeRegistry {
    /// Instance with every slot at its default. `in_progress` holds the
    /// value types being populated on this path.
    fn instantiate_nested(
        &self,
        type_id: TypeId,
        in_progress: &mut Vec<TypeId>,
    ) -> Result<Instance> {
        let def = self.get(type_id)?;
        if def.as_struct().is_none() {
            return Err(Error::ArgumentInvalid(format!(
                "'{}' is not an instantiable struct type",
                def.qualified_name()
            )));
        }
        in_progress.push(type_id);
        let slots = def
            .properties()
            .iter()
            .map(|p| self.default_slot(p.type_id, in_progress))
            .collect::<Result<Vec<_>>>();
        in_progress.pop();
        Ok(Instance::new(def, slots?))
    }

    /// Default for a slot of type `type_id`.
    ///
    /// A value-type struct gets a default-populated instance of its own. A
    /// value type that contains itself has no finite default and stays null.
    fn default_slot(&self, type_id: TypeId, in_progress: &mut Vec<TypeId>) -> Result<Value> {
        let def = self.get(type_id)?;
        let by_value = matches!(def.kind(), TypeKind::Struct(s) if s.is_value_type);
        if by_value && !in_progress.contains(&type_id) {
            return self.instantiate_nested(type_id, in_progress).map(Value::Object);
        }
        Ok(default_value(&def))
    }
}

fn is_compatible(def: &TypeDef, type_ref: &TypeRef) -> bool {
    !type_ref.is_generic() && !type_ref.is_array() && type_ref.is_enum() == def.as_enum().is_some()
}

fn primitive_matches(kind: PrimitiveKind, value: &Value) -> bool {
    use PrimitiveKind as P;
    matches!(
        (kind, value),
        (P::Bool, Value::Bool(_))
            | (P::Char, Value::Char(_))
            | (P::I8, Value::I8(_))
            | (P::I16, Value::I16(_))
            | (P::I32, Value::I32(_))
            | (P::I64, Value::I64(_))
            | (P::U8, Value::U8(_))
            | (P::U16, Value::U16(_))
            | (P::U32, Value::U32(_))
            | (P::U64, Value::U64(_))
            | (P::F32, Value::F32(_))
            | (P::F64, Value::F64(_))
            | (P::String, Value::String(_))
            | (P::String, Value::Null)
    )
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fluent builders for native type definitions.

use crate::runtime::{
    Accessibility, EnumDef, EnumVariant, PrimitiveKind, PropertyDef, StructDef, TypeDef, TypeId,
    TypeKind,
};

/// Anything the registry can turn into a [`TypeDef`] once it has an id.
pub trait IntoTypeDef {
    fn into_type_def(self, id: TypeId) -> TypeDef;
}

/// Builder for struct types.
#[derive(Debug, Clone)]
pub struct TypeBuilder {
    name: String,
    namespace: Option<String>,
    properties: Vec<PropertyDef>,
    is_value_type: bool,
}

impl TypeBuilder {
    /// Create a new builder for a struct type.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: Some(namespace.into()),
            properties: Vec::new(),
            is_value_type: false,
        }
    }

    /// Builder for a type without namespace.
    pub fn unqualified(name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            ..Self::new("", name)
        }
    }

    /// Add a public read/write property.
    pub fn property(mut self, name: impl Into<String>, type_id: TypeId) -> Self {
        self.properties.push(PropertyDef::new(name, type_id));
        self
    }

    /// Add a primitive property.
    pub fn primitive(self, name: impl Into<String>, kind: PrimitiveKind) -> Self {
        self.property(name, TypeId::of_primitive(kind))
    }

    /// Add a string property.
    pub fn string_property(self, name: impl Into<String>) -> Self {
        self.property(name, TypeId::STRING)
    }

    /// Add a property with a public getter and a non-public setter.
    pub fn private_set_property(mut self, name: impl Into<String>, type_id: TypeId) -> Self {
        self.properties
            .push(PropertyDef::new(name, type_id).with_setter(Accessibility::NonPublic));
        self
    }

    /// Add a get-only property.
    pub fn read_only_property(mut self, name: impl Into<String>, type_id: TypeId) -> Self {
        self.properties
            .push(PropertyDef::new(name, type_id).with_setter(Accessibility::None));
        self
    }

    /// Add a public field.
    pub fn field(mut self, name: impl Into<String>, type_id: TypeId) -> Self {
        self.properties.push(PropertyDef::field(name, type_id));
        self
    }

    /// Add a fully specified property.
    pub fn property_def(mut self, property: PropertyDef) -> Self {
        self.properties.push(property);
        self
    }

    /// Mark as a value type (copied, never shared).
    pub fn value_type(mut self) -> Self {
        self.is_value_type = true;
        self
    }
}

impl IntoTypeDef for TypeBuilder {
    fn into_type_def(self, id: TypeId) -> TypeDef {
        TypeDef {
            id,
            name: self.name,
            namespace: self.namespace,
            kind: TypeKind::Struct(StructDef {
                properties: self.properties,
                is_value_type: self.is_value_type,
            }),
            emitted: false,
        }
    }
}

/// Builder for enum types.
#[derive(Debug, Clone)]
pub struct EnumBuilder {
    name: String,
    namespace: Option<String>,
    variants: Vec<EnumVariant>,
    next_value: i64,
    underlying: PrimitiveKind,
}

impl EnumBuilder {
    /// Create a new enum builder.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: Some(namespace.into()),
            variants: Vec::new(),
            next_value: 0,
            underlying: PrimitiveKind::I32,
        }
    }

    /// Add variant with auto-incremented value.
    pub fn variant(mut self, name: impl Into<String>) -> Self {
        let value = self.next_value;
        self.variants.push(EnumVariant::new(name, value));
        self.next_value = value.wrapping_add(1);
        self
    }

    /// Add variant with explicit value.
    pub fn variant_with_value(mut self, name: impl Into<String>, value: i64) -> Self {
        self.variants.push(EnumVariant::new(name, value));
        self.next_value = value.wrapping_add(1);
        self
    }

    /// Set underlying integer type.
    pub fn underlying(mut self, kind: PrimitiveKind) -> Self {
        self.underlying = kind;
        self
    }
}

impl IntoTypeDef for EnumBuilder {
    fn into_type_def(self, id: TypeId) -> TypeDef {
        TypeDef {
            id,
            name: self.name,
            namespace: self.namespace,
            kind: TypeKind::Enum(EnumDef {
                underlying: self.underlying,
                variants: self.variants,
            }),
            emitted: false,
        }
    }
}

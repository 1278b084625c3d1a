// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Native type definitions held by the registry arena.

use crate::config::SYSTEM_NAMESPACE;
use crate::types::MemberKind;
use std::fmt;

/// Handle of a type in a [`TypeRegistry`](crate::TypeRegistry) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub(crate) u32);

impl TypeId {
    /// `System.Object`: accepts any value.
    pub const OBJECT: TypeId = TypeId(0);
    pub const BOOL: TypeId = TypeId(1);
    pub const CHAR: TypeId = TypeId(2);
    pub const I8: TypeId = TypeId(3);
    pub const I16: TypeId = TypeId(4);
    pub const I32: TypeId = TypeId(5);
    pub const I64: TypeId = TypeId(6);
    pub const U8: TypeId = TypeId(7);
    pub const U16: TypeId = TypeId(8);
    pub const U32: TypeId = TypeId(9);
    pub const U64: TypeId = TypeId(10);
    pub const F32: TypeId = TypeId(11);
    pub const F64: TypeId = TypeId(12);
    pub const STRING: TypeId = TypeId(13);

    /// Number of builtin types seeded in every registry.
    pub(crate) const BUILTIN_COUNT: u32 = 14;

    /// Builtin id of a primitive kind.
    pub const fn of_primitive(kind: PrimitiveKind) -> TypeId {
        TypeId(kind as u32)
    }

    /// Arena index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Primitive type kinds.
///
/// Discriminants double as builtin [`TypeId`] indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PrimitiveKind {
    Bool = 1,
    Char = 2,
    I8 = 3,
    I16 = 4,
    I32 = 5,
    I64 = 6,
    U8 = 7,
    U16 = 8,
    U32 = 9,
    U64 = 10,
    F32 = 11,
    F64 = 12,
    String = 13,
}

impl PrimitiveKind {
    /// All kinds, in builtin id order.
    pub const ALL: [PrimitiveKind; 13] = [
        Self::Bool,
        Self::Char,
        Self::I8,
        Self::I16,
        Self::I32,
        Self::I64,
        Self::U8,
        Self::U16,
        Self::U32,
        Self::U64,
        Self::F32,
        Self::F64,
        Self::String,
    ];

    /// Portable name in the `System` namespace.
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Bool => "Boolean",
            Self::Char => "Char",
            Self::I8 => "SByte",
            Self::I16 => "Int16",
            Self::I32 => "Int32",
            Self::I64 => "Int64",
            Self::U8 => "Byte",
            Self::U16 => "UInt16",
            Self::U32 => "UInt32",
            Self::U64 => "UInt64",
            Self::F32 => "Single",
            Self::F64 => "Double",
            Self::String => "String",
        }
    }

    /// Integer kinds usable as enum underlying types.
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            Self::I8 | Self::I16 | Self::I32 | Self::I64 | Self::U8 | Self::U16 | Self::U32 | Self::U64
        )
    }

    pub fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    /// Everything but `String` is a value type.
    pub fn is_value_type(self) -> bool {
        !matches!(self, Self::String)
    }
}

/// Visibility of a property accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accessibility {
    Public,
    NonPublic,
    /// Accessor does not exist.
    None,
}

/// Property or field of a struct type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDef {
    pub name: String,
    pub type_id: TypeId,
    /// `Field` or `Property`.
    pub kind: MemberKind,
    pub getter: Accessibility,
    pub setter: Accessibility,
}

impl PropertyDef {
    /// Public read/write property.
    pub fn new(name: impl Into<String>, type_id: TypeId) -> Self {
        Self {
            name: name.into(),
            type_id,
            kind: MemberKind::Property,
            getter: Accessibility::Public,
            setter: Accessibility::Public,
        }
    }

    /// Public field.
    pub fn field(name: impl Into<String>, type_id: TypeId) -> Self {
        Self {
            kind: MemberKind::Field,
            ..Self::new(name, type_id)
        }
    }

    /// Set the setter visibility.
    #[must_use]
    pub fn with_setter(mut self, setter: Accessibility) -> Self {
        self.setter = setter;
        self
    }

    /// Set the getter visibility.
    #[must_use]
    pub fn with_getter(mut self, getter: Accessibility) -> Self {
        self.getter = getter;
        self
    }

    pub fn is_readable(&self) -> bool {
        self.getter == Accessibility::Public
    }

    /// Writable through any setter, public or not.
    pub fn is_writable(&self) -> bool {
        self.setter != Accessibility::None
    }
}

/// Named enum variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumVariant {
    pub name: String,
    pub value: i64,
}

impl EnumVariant {
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Enumeration definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDef {
    pub underlying: PrimitiveKind,
    pub variants: Vec<EnumVariant>,
}

impl EnumDef {
    pub fn variant(&self, name: &str) -> Option<&EnumVariant> {
        self.variants.iter().find(|v| v.name == name)
    }

    pub fn variant_by_value(&self, value: i64) -> Option<&EnumVariant> {
        self.variants.iter().find(|v| v.value == value)
    }
}

/// Struct definition: ordered properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDef {
    pub properties: Vec<PropertyDef>,
    /// Copied on assignment, never shared.
    pub is_value_type: bool,
}

impl StructDef {
    pub fn property(&self, name: &str) -> Option<&PropertyDef> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn slot(&self, name: &str) -> Option<usize> {
        self.properties.iter().position(|p| p.name == name)
    }
}

/// Type kind enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    /// Root type, holds anything.
    Object,
    Primitive(PrimitiveKind),
    Enum(EnumDef),
    Struct(StructDef),
    /// Fixed-size array of an element type.
    Array(TypeId),
    /// Growable list of an element type.
    List(TypeId),
    /// Optional value-type wrapper.
    Nullable(TypeId),
}

/// A registered type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDef {
    pub(crate) id: TypeId,
    pub(crate) name: String,
    pub(crate) namespace: Option<String>,
    pub(crate) kind: TypeKind,
    pub(crate) emitted: bool,
}

impl TypeDef {
    pub(crate) fn builtin(id: TypeId, name: &str, kind: TypeKind) -> Self {
        Self {
            id,
            name: name.to_string(),
            namespace: Some(SYSTEM_NAMESPACE.to_string()),
            kind,
            emitted: false,
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// `namespace.name`, or the bare name without a namespace.
    pub fn qualified_name(&self) -> String {
        match self.namespace() {
            Some(ns) if !ns.is_empty() => format!("{}.{}", ns, self.name),
            _ => self.name.clone(),
        }
    }

    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    /// Created by the synthesizer rather than registered by a caller.
    pub fn is_emitted(&self) -> bool {
        self.emitted
    }

    pub fn as_struct(&self) -> Option<&StructDef> {
        match &self.kind {
            TypeKind::Struct(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumDef> {
        match &self.kind {
            TypeKind::Enum(e) => Some(e),
            _ => None,
        }
    }

    /// Values of this type are copied rather than shared.
    pub fn is_value_type(&self) -> bool {
        match &self.kind {
            TypeKind::Primitive(p) => p.is_value_type(),
            TypeKind::Enum(_) | TypeKind::Nullable(_) => true,
            TypeKind::Struct(s) => s.is_value_type,
            TypeKind::Object | TypeKind::Array(_) | TypeKind::List(_) => false,
        }
    }

    /// Properties (empty for non-struct types).
    pub fn properties(&self) -> &[PropertyDef] {
        self.as_struct().map_or(&[], |s| s.properties.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_ids_are_stable() {
        for (i, kind) in PrimitiveKind::ALL.iter().enumerate() {
            assert_eq!(TypeId::of_primitive(*kind).index(), i + 1);
        }
        assert_eq!(TypeId::of_primitive(PrimitiveKind::String), TypeId::STRING);
        assert_eq!(TypeId::BUILTIN_COUNT as usize, PrimitiveKind::ALL.len() + 1);
    }

    #[test]
    fn test_primitive_kinds() {
        assert!(PrimitiveKind::U16.is_integer());
        assert!(!PrimitiveKind::F32.is_integer());
        assert!(PrimitiveKind::F64.is_float());
        assert!(!PrimitiveKind::String.is_value_type());
        assert_eq!(PrimitiveKind::I32.type_name(), "Int32");
    }

    #[test]
    fn test_property_accessors() {
        let prop = PropertyDef::new("Total", TypeId::F64).with_setter(Accessibility::NonPublic);
        assert!(prop.is_readable());
        assert!(prop.is_writable());
        let read_only = PropertyDef::new("Id", TypeId::I32).with_setter(Accessibility::None);
        assert!(!read_only.is_writable());
    }
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Portable type references.
//!
//! A [`TypeRef`] stands in for a native type on the far side of a
//! serialization boundary. Two references describing the same shape are
//! interchangeable, whichever native type produced them.

use crate::error::{Error, Result};
use crate::types::member::{MemberDescriptor, MemberKind};
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Portable, immutable description of a type.
///
/// Cloning is cheap (shared inner). Equality and hashing look at the
/// qualified name, the generic arguments, the enum/array flags and the
/// element type; the optional property list is descriptive only.
#[derive(Clone)]
pub struct TypeRef {
    inner: Arc<TypeRefInner>,
}

struct TypeRefInner {
    name: String,
    namespace: Option<String>,
    is_generic: bool,
    generic_arguments: Vec<TypeRef>,
    is_enum: bool,
    is_array: bool,
    is_value_type: bool,
    element_type: Option<TypeRef>,
    properties: Option<Vec<PropertyRef>>,
    hash: u64,
}

/// A declared property inside a [`TypeRef`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyRef {
    /// Property name.
    pub name: String,
    /// Declared type (`None` only for malformed descriptors).
    pub property_type: Option<TypeRef>,
}

impl PropertyRef {
    /// Create a typed property reference.
    pub fn new(name: impl Into<String>, property_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            property_type: Some(property_type),
        }
    }

    /// Create a property reference with no type.
    ///
    /// Such a reference is rejected by [`TypeRef::validate`]; it exists so
    /// that descriptors received from a codec can be represented as-is.
    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            property_type: None,
        }
    }
}

impl TypeRef {
    /// Create a plain, non-generic reference.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        TypeRefBuilder::new(name).namespace(namespace).build()
    }

    /// Start a builder for the named type.
    pub fn builder(name: impl Into<String>) -> TypeRefBuilder {
        TypeRefBuilder::new(name)
    }

    /// Reference to an array of `element`.
    pub fn array_of(element: TypeRef) -> Self {
        let mut builder = TypeRefBuilder::new(format!("{}[]", element.name()));
        builder.namespace = element.namespace().map(str::to_string);
        builder.is_array = true;
        builder.element_type = Some(element);
        builder.build()
    }

    /// Simple name (without namespace or generic arguments).
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Namespace / module qualifier.
    pub fn namespace(&self) -> Option<&str> {
        self.inner.namespace.as_deref()
    }

    /// Namespace-qualified name without generic arguments.
    pub fn qualified_name(&self) -> String {
        match self.namespace() {
            Some(ns) if !ns.is_empty() => format!("{}.{}", ns, self.name()),
            _ => self.name().to_string(),
        }
    }

    /// Qualified name including generic arguments, e.g.
    /// `System.Nullable`1[System.Int32]`.
    pub fn full_name(&self) -> String {
        self.to_string()
    }

    /// Is a constructed generic type.
    pub fn is_generic(&self) -> bool {
        self.inner.is_generic
    }

    /// Generic arguments, in declaration order.
    pub fn generic_arguments(&self) -> &[TypeRef] {
        &self.inner.generic_arguments
    }

    /// Describes an enumeration.
    pub fn is_enum(&self) -> bool {
        self.inner.is_enum
    }

    /// Describes an array.
    pub fn is_array(&self) -> bool {
        self.inner.is_array
    }

    /// Describes a value type (copied, never shared).
    pub fn is_value_type(&self) -> bool {
        self.inner.is_value_type
    }

    /// Element type of an array.
    pub fn element_type(&self) -> Option<&TypeRef> {
        self.inner.element_type.as_ref()
    }

    /// Declared properties, when the producer included them.
    pub fn properties(&self) -> Option<&[PropertyRef]> {
        self.inner.properties.as_deref()
    }

    /// Declared property by name.
    pub fn property(&self, name: &str) -> Option<&PropertyRef> {
        self.properties()?.iter().find(|p| p.name == name)
    }

    /// Copy of this reference carrying the given property list.
    #[must_use]
    pub fn with_properties(&self, properties: Vec<PropertyRef>) -> Self {
        let mut builder = TypeRefBuilder::from_ref(self);
        builder.properties = Some(properties);
        builder.build()
    }

    /// Copy of this reference without a property list.
    #[must_use]
    pub fn without_properties(&self) -> Self {
        if self.inner.properties.is_none() {
            return self.clone();
        }
        let mut builder = TypeRefBuilder::from_ref(self);
        builder.properties = None;
        builder.build()
    }

    /// Declared properties as portable member descriptors.
    pub fn members(&self) -> Result<Vec<MemberDescriptor>> {
        let declaring = self.without_properties();
        self.properties()
            .unwrap_or_default()
            .iter()
            .map(|p| {
                let value_type = p.property_type.clone().ok_or_else(|| {
                    Error::DescriptorInvalid(format!(
                        "property '{}' of '{}' has no type",
                        p.name,
                        self.full_name()
                    ))
                })?;
                MemberDescriptor::new(MemberKind::Property, p.name.clone(), declaring.clone(), value_type)
            })
            .collect()
    }

    /// Check structural well-formedness.
    ///
    /// Fails with [`Error::DescriptorInvalid`] on an empty name, an array
    /// without element type, generic arguments on a non-generic reference,
    /// or a property that lacks a name or a type.
    pub fn validate(&self) -> Result<()> {
        if self.name().is_empty() {
            return Err(Error::DescriptorInvalid("type name missing".into()));
        }
        if !self.is_generic() && !self.generic_arguments().is_empty() {
            return Err(Error::DescriptorInvalid(format!(
                "'{}' carries generic arguments but is not generic",
                self.qualified_name()
            )));
        }
        for arg in self.generic_arguments() {
            arg.validate()?;
        }
        if self.is_array() {
            match self.element_type() {
                Some(element) => element.validate()?,
                None => {
                    return Err(Error::DescriptorInvalid(format!(
                        "array type '{}' has no element type",
                        self.qualified_name()
                    )))
                }
            }
        }
        for property in self.properties().unwrap_or_default() {
            if property.name.is_empty() {
                return Err(Error::DescriptorInvalid(format!(
                    "property name missing on '{}'",
                    self.qualified_name()
                )));
            }
            match &property.property_type {
                Some(ty) => ty.validate()?,
                None => {
                    return Err(Error::DescriptorInvalid(format!(
                        "property type missing for property '{}'",
                        property.name
                    )))
                }
            }
        }
        Ok(())
    }

    fn structural_eq(&self, other: &Self) -> bool {
        let (a, b) = (&*self.inner, &*other.inner);
        a.hash == b.hash
            && a.name == b.name
            && a.namespace == b.namespace
            && a.is_generic == b.is_generic
            && a.is_enum == b.is_enum
            && a.is_array == b.is_array
            && a.generic_arguments == b.generic_arguments
            && a.element_type == b.element_type
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner) || self.structural_eq(other)
    }
}

impl Eq for TypeRef {}

impl Hash for TypeRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.inner.hash);
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.qualified_name())?;
        if !self.generic_arguments().is_empty() {
            write!(f, "[")?;
            for (i, arg) in self.generic_arguments().iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{}", arg)?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeRef({})", self)
    }
}

/// Builder for [`TypeRef`].
#[derive(Debug, Clone)]
pub struct TypeRefBuilder {
    name: String,
    namespace: Option<String>,
    is_generic: bool,
    generic_arguments: Vec<TypeRef>,
    is_enum: bool,
    is_array: bool,
    is_value_type: bool,
    element_type: Option<TypeRef>,
    properties: Option<Vec<PropertyRef>>,
}

impl TypeRefBuilder {
    /// Create a builder for the named type.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            is_generic: false,
            generic_arguments: Vec::new(),
            is_enum: false,
            is_array: false,
            is_value_type: false,
            element_type: None,
            properties: None,
        }
    }

    fn from_ref(source: &TypeRef) -> Self {
        let inner = &source.inner;
        Self {
            name: inner.name.clone(),
            namespace: inner.namespace.clone(),
            is_generic: inner.is_generic,
            generic_arguments: inner.generic_arguments.clone(),
            is_enum: inner.is_enum,
            is_array: inner.is_array,
            is_value_type: inner.is_value_type,
            element_type: inner.element_type.clone(),
            properties: inner.properties.clone(),
        }
    }

    /// Set the namespace.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Append a generic argument (marks the reference generic).
    pub fn generic_argument(mut self, argument: TypeRef) -> Self {
        self.is_generic = true;
        self.generic_arguments.push(argument);
        self
    }

    /// Force the generic flag.
    pub fn generic(mut self, is_generic: bool) -> Self {
        self.is_generic = is_generic;
        self
    }

    /// Mark as an enumeration (enums are value types).
    pub fn enum_type(mut self) -> Self {
        self.is_enum = true;
        self.is_value_type = true;
        self
    }

    /// Mark as a value type.
    pub fn value_type(mut self) -> Self {
        self.is_value_type = true;
        self
    }

    /// Set the array flag without an element type.
    pub fn array(mut self, is_array: bool) -> Self {
        self.is_array = is_array;
        self
    }

    /// Append a typed property.
    pub fn property(mut self, name: impl Into<String>, property_type: TypeRef) -> Self {
        self.properties
            .get_or_insert_with(Vec::new)
            .push(PropertyRef::new(name, property_type));
        self
    }

    /// Append a property reference as-is.
    pub fn property_ref(mut self, property: PropertyRef) -> Self {
        self.properties.get_or_insert_with(Vec::new).push(property);
        self
    }

    /// Declare an explicitly empty property list.
    pub fn no_properties(mut self) -> Self {
        self.properties.get_or_insert_with(Vec::new);
        self
    }

    /// Build the immutable reference.
    pub fn build(self) -> TypeRef {
        let mut hasher = DefaultHasher::new();
        self.name.hash(&mut hasher);
        self.namespace.hash(&mut hasher);
        self.is_generic.hash(&mut hasher);
        self.is_enum.hash(&mut hasher);
        self.is_array.hash(&mut hasher);
        self.generic_arguments.hash(&mut hasher);
        self.element_type.hash(&mut hasher);
        let hash = hasher.finish();

        TypeRef {
            inner: Arc::new(TypeRefInner {
                name: self.name,
                namespace: self.namespace,
                is_generic: self.is_generic,
                generic_arguments: self.generic_arguments,
                is_enum: self.is_enum,
                is_array: self.is_array,
                is_value_type: self.is_value_type,
                element_type: self.element_type,
                properties: self.properties,
                hash,
            }),
        }
    }
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Structural cache keys.
//!
//! Keys are immutable once built, compare by value (ordinal, order
//! sensitive) and carry a hash computed at construction so that lookups in
//! the shared synthesis cache never rehash the entry lists.

use crate::error::{Error, Result};
use crate::types::TypeRef;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

fn memo_hash<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Ordered list of property names.
#[derive(Debug, Clone)]
pub struct PropertyList {
    properties: Vec<String>,
    hash: u64,
}

impl PropertyList {
    /// Build from property names, keeping their order.
    pub fn new<I, S>(properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let properties: Vec<String> = properties.into_iter().map(Into::into).collect();
        let hash = memo_hash(&properties);
        Self { properties, hash }
    }

    pub fn properties(&self) -> &[String] {
        &self.properties
    }
}

impl PartialEq for PropertyList {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.properties == other.properties
    }
}

impl Eq for PropertyList {}

impl Hash for PropertyList {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

/// Type identity plus its ordered `(name, type)` property list.
#[derive(Debug, Clone)]
pub struct TypeWithPropertyList {
    type_ref: TypeRef,
    properties: Vec<(String, TypeRef)>,
    hash: u64,
}

impl TypeWithPropertyList {
    /// Build from a described type.
    ///
    /// A missing property list counts as empty. A property without a name or
    /// without a type is rejected with [`Error::DescriptorInvalid`].
    pub fn new(type_ref: &TypeRef) -> Result<Self> {
        let properties = type_ref
            .properties()
            .unwrap_or_default()
            .iter()
            .map(|p| {
                if p.name.is_empty() {
                    return Err(Error::DescriptorInvalid("property name missing".into()));
                }
                let ty = p.property_type.clone().ok_or_else(|| {
                    Error::DescriptorInvalid(format!(
                        "property type missing for property '{}'",
                        p.name
                    ))
                })?;
                Ok((p.name.clone(), ty))
            })
            .collect::<Result<Vec<_>>>()?;

        let type_ref = type_ref.without_properties();
        let hash = memo_hash(&(&type_ref, &properties));
        Ok(Self {
            type_ref,
            properties,
            hash,
        })
    }

    pub fn type_ref(&self) -> &TypeRef {
        &self.type_ref
    }

    pub fn type_full_name(&self) -> String {
        self.type_ref.full_name()
    }

    pub fn properties(&self) -> &[(String, TypeRef)] {
        &self.properties
    }
}

impl PartialEq for TypeWithPropertyList {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
            && self.type_ref == other.type_ref
            && self.properties == other.properties
    }
}

impl Eq for TypeWithPropertyList {}

impl Hash for TypeWithPropertyList {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

/// Key of the synthesized-type cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StructuralKey {
    /// Shape known only by property names.
    Names(PropertyList),
    /// Shape known by type identity and typed properties.
    Typed(TypeWithPropertyList),
}

impl StructuralKey {
    /// Number of properties described by the key.
    pub fn len(&self) -> usize {
        match self {
            Self::Names(list) => list.properties().len(),
            Self::Typed(list) => list.properties().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn string_ref() -> TypeRef {
        TypeRef::new("System", "String")
    }

    fn int_ref() -> TypeRef {
        TypeRef::new("System", "Int32")
    }

    #[test]
    fn test_property_list_is_order_sensitive() {
        let a = PropertyList::new(["Name", "Age"]);
        let b = PropertyList::new(vec!["Name".to_string(), "Age".to_string()]);
        let c = PropertyList::new(["Age", "Name"]);
        assert_eq!(a, b);
        assert_ne!(a, c);

        let mut set = HashSet::new();
        set.insert(StructuralKey::Names(a));
        assert!(set.contains(&StructuralKey::Names(b)));
        assert!(!set.contains(&StructuralKey::Names(c)));
    }

    #[test]
    fn test_property_list_is_ordinal() {
        assert_ne!(PropertyList::new(["name"]), PropertyList::new(["Name"]));
    }

    #[test]
    fn test_typed_key_equality() {
        let person = TypeRef::builder("Person")
            .namespace("Crm")
            .property("Name", string_ref())
            .property("Age", int_ref())
            .build();
        let same = TypeRef::builder("Person")
            .namespace("Crm")
            .property("Name", string_ref())
            .property("Age", int_ref())
            .build();
        let retyped = TypeRef::builder("Person")
            .namespace("Crm")
            .property("Name", string_ref())
            .property("Age", TypeRef::new("System", "Int64"))
            .build();

        let a = TypeWithPropertyList::new(&person).expect("key");
        let b = TypeWithPropertyList::new(&same).expect("key");
        let c = TypeWithPropertyList::new(&retyped).expect("key");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.type_full_name(), "Crm.Person");
        assert_eq!(a.properties().len(), 2);
    }

    #[test]
    fn test_typed_key_rejects_untyped_property() {
        let broken = TypeRef::builder("Person")
            .property_ref(crate::types::PropertyRef::untyped("Name"))
            .build();
        assert!(matches!(
            TypeWithPropertyList::new(&broken),
            Err(Error::DescriptorInvalid(_))
        ));
    }

    #[test]
    fn test_names_and_typed_keys_differ() {
        let names = StructuralKey::Names(PropertyList::new(["Name"]));
        let typed = StructuralKey::Typed(
            TypeWithPropertyList::new(
                &TypeRef::builder("X").property("Name", string_ref()).build(),
            )
            .expect("key"),
        );
        assert_ne!(names, typed);
        assert_eq!(names.len(), 1);
        assert_eq!(typed.len(), 1);
    }
}

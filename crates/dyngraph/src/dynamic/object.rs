// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Generic object nodes.

use crate::dynamic::{DynamicValue, FromDynamicValue};
use crate::error::{Error, Result};
use crate::types::TypeRef;
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Insertion-ordered map of property name to value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PropertySet {
    entries: IndexMap<String, DynamicValue>,
}

impl PropertySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property; an existing name keeps its position.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<DynamicValue>) {
        self.entries.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&DynamicValue> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Remove a property, keeping the order of the others.
    pub fn remove(&mut self, name: &str) -> Option<DynamicValue> {
        self.entries.shift_remove(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DynamicValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>, V: Into<DynamicValue>> FromIterator<(S, V)> for PropertySet {
    fn from_iter<I: IntoIterator<Item = (S, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (name, value) in iter {
            set.set(name, value);
        }
        set
    }
}

struct ObjectNode {
    type_ref: Option<TypeRef>,
    properties: PropertySet,
}

/// Shared handle to a generic object node.
///
/// Cloning the handle does not copy the node: clones are the same node,
/// which is how back-references and cycles are expressed. Equality is node
/// identity.
#[derive(Clone)]
pub struct DynamicObject {
    inner: Arc<RwLock<ObjectNode>>,
}

impl DynamicObject {
    /// Create an empty, untyped node.
    pub fn new() -> Self {
        Self::from_parts(None, PropertySet::new())
    }

    /// Create an empty node describing `type_ref`.
    pub fn with_type(type_ref: TypeRef) -> Self {
        Self::from_parts(Some(type_ref), PropertySet::new())
    }

    /// Create a node from an optional type and its properties.
    pub fn from_parts(type_ref: Option<TypeRef>, properties: PropertySet) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ObjectNode {
                type_ref,
                properties,
            })),
        }
    }

    /// Attached type reference.
    pub fn type_ref(&self) -> Option<TypeRef> {
        self.inner.read().type_ref.clone()
    }

    pub fn set_type_ref(&self, type_ref: Option<TypeRef>) {
        self.inner.write().type_ref = type_ref;
    }

    /// Value of a property (cloned; objects clone as handles).
    pub fn get(&self, name: &str) -> Option<DynamicValue> {
        self.inner.read().properties.get(name).cloned()
    }

    /// Typed value of a property.
    pub fn get_as<T: FromDynamicValue>(&self, name: &str) -> Result<T> {
        let value = self.get(name).ok_or_else(|| Error::MemberNotFound {
            type_name: self.type_name(),
            member: name.to_string(),
        })?;
        T::from_dynamic(&value).map_err(|err| err.at_member(name))
    }

    /// Set a property.
    pub fn set(&self, name: impl Into<String>, value: impl Into<DynamicValue>) {
        self.inner.write().properties.set(name, value);
    }

    pub fn remove(&self, name: &str) -> Option<DynamicValue> {
        self.inner.write().properties.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.read().properties.contains(name)
    }

    /// Property names in insertion order.
    pub fn property_names(&self) -> Vec<String> {
        self.inner
            .read()
            .properties
            .names()
            .map(str::to_string)
            .collect()
    }

    /// Snapshot of the property set.
    pub fn properties(&self) -> PropertySet {
        self.inner.read().properties.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.read().properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().properties.is_empty()
    }

    /// Drop all properties.
    ///
    /// Cyclic graphs keep themselves alive; clearing one node of the cycle
    /// releases it.
    pub fn clear(&self) {
        self.inner.write().properties = PropertySet::new();
    }

    /// Same node?
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    /// Address of the node, stable for its lifetime.
    pub(crate) fn addr(&self) -> usize {
        Arc::as_ptr(&self.inner) as *const () as usize
    }

    fn type_name(&self) -> String {
        self.type_ref()
            .map_or_else(|| "<untyped>".to_string(), |t| t.full_name())
    }
}

impl Default for DynamicObject {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for DynamicObject {
    fn eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other)
    }
}

// Nodes may be cyclic, so only the shallow shape is printed.
impl fmt::Debug for DynamicObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.inner.read();
        let names: Vec<&str> = node.properties.names().collect();
        f.debug_struct("DynamicObject")
            .field("type", &node.type_ref)
            .field("properties", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_preserved() {
        let obj = DynamicObject::new();
        obj.set("b", 1i32);
        obj.set("a", 2i32);
        obj.set("c", 3i32);
        obj.set("a", 4i32);
        assert_eq!(obj.property_names(), vec!["b", "a", "c"]);
        assert_eq!(obj.get_as::<i32>("a"), Ok(4));
    }

    #[test]
    fn test_identity_not_structure() {
        let a = DynamicObject::new();
        let b = DynamicObject::new();
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_self_reference() {
        let obj = DynamicObject::with_type(TypeRef::new("Tests", "Node"));
        obj.set("Self", obj.clone());
        let back = obj.get("Self").expect("self");
        assert!(DynamicObject::ptr_eq(back.as_object().expect("object"), &obj));
        // Debug must terminate on cycles.
        assert!(format!("{:?}", obj).contains("Self"));
        obj.clear();
        assert!(obj.is_empty());
    }

    #[test]
    fn test_property_set_from_iter() {
        let set: PropertySet = [("Int32Property", DynamicValue::I32(11)), ("Name", "x".into())]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
        let obj = DynamicObject::from_parts(None, set);
        assert_eq!(obj.get_as::<String>("Name"), Ok("x".to_string()));
        assert!(matches!(obj.get_as::<i32>("Missing"), Err(Error::MemberNotFound { .. })));
        assert!(matches!(
            obj.get_as::<i32>("Name"),
            Err(Error::TypeMismatch { member: Some(_), .. })
        ));
    }
}

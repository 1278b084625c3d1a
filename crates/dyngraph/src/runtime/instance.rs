// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Native values and property-bag instances.

use crate::error::{Error, Result};
use crate::runtime::{TypeDef, TypeId, TypeKind};
use parking_lot::RwLock;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Enum value: enum type plus underlying integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumValue {
    pub type_id: TypeId,
    pub value: i64,
}

/// Array or list value.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    /// The array or list type (not the element type).
    pub type_id: TypeId,
    pub items: Vec<Value>,
}

/// A native value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Char(char),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    String(String),
    Enum(EnumValue),
    Sequence(Sequence),
    Object(Instance),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_instance(&self) -> Option<&Instance> {
        match self {
            Self::Object(inst) => Some(inst),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Self::Sequence(seq) => Some(seq),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::I32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::F64(v) => Some(*v),
            _ => None,
        }
    }

    /// Short description for diagnostics.
    pub fn describe(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::String(s) => format!("{:?} (String)", s),
            Self::Enum(e) => format!("{} (enum {})", e.value, e.type_id),
            Self::Sequence(seq) => format!("sequence of {}", seq.items.len()),
            Self::Object(inst) => format!("instance of {}", inst.type_name()),
            other => format!("{:?}", other),
        }
    }
}

macro_rules! impl_value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                Self::$variant(v)
            }
        })*
    };
}

impl_value_from!(
    bool => Bool, char => Char, i8 => I8, i16 => I16, i32 => I32, i64 => I64,
    u8 => U8, u16 => U16, u32 => U32, u64 => U64, f32 => F32, f64 => F64,
    String => String, EnumValue => Enum, Sequence => Sequence, Instance => Object,
);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

struct InstanceData {
    def: Arc<TypeDef>,
    slots: Vec<Value>,
}

/// Shared handle to an instance of a struct type.
///
/// Slots follow the declaration order of the type's properties. Clones are
/// the same instance; equality is identity (see [`graph_eq`] for deep
/// comparison).
#[derive(Clone)]
pub struct Instance {
    inner: Arc<RwLock<InstanceData>>,
}

impl Instance {
    pub(crate) fn new(def: Arc<TypeDef>, slots: Vec<Value>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(InstanceData { def, slots })),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.inner.read().def.id()
    }

    pub fn type_def(&self) -> Arc<TypeDef> {
        Arc::clone(&self.inner.read().def)
    }

    pub fn type_name(&self) -> String {
        self.inner.read().def.qualified_name()
    }

    /// Value of a property by name, ignoring getter visibility.
    pub fn get(&self, name: &str) -> Result<Value> {
        let data = self.inner.read();
        let slot = data
            .def
            .as_struct()
            .and_then(|s| s.slot(name))
            .ok_or_else(|| Error::MemberNotFound {
                type_name: data.def.qualified_name(),
                member: name.to_string(),
            })?;
        Ok(data.slots[slot].clone())
    }

    /// Snapshot of all slots.
    pub fn slots(&self) -> Vec<Value> {
        self.inner.read().slots.clone()
    }

    pub(crate) fn slot(&self, index: usize) -> Option<Value> {
        self.inner.read().slots.get(index).cloned()
    }

    pub(crate) fn set_slot(&self, index: usize, value: Value) {
        let mut data = self.inner.write();
        if let Some(slot) = data.slots.get_mut(index) {
            *slot = value;
        }
    }

    /// Shallow copy: new instance, same slot values.
    pub fn shallow_copy(&self) -> Instance {
        let data = self.inner.read();
        Instance::new(Arc::clone(&data.def), data.slots.clone())
    }

    /// Reset every slot to `Null`, releasing references held by this
    /// instance (breaks reference cycles).
    pub fn clear(&self) {
        let mut data = self.inner.write();
        for slot in &mut data.slots {
            *slot = Value::Null;
        }
    }

    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    pub(crate) fn addr(&self) -> usize {
        Arc::as_ptr(&self.inner) as *const () as usize
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other)
    }
}

// Instances may be cyclic, so only the type is printed.
impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.inner.read();
        f.debug_struct("Instance")
            .field("type", &data.def.qualified_name())
            .field("slots", &data.slots.len())
            .finish()
    }
}

/// Default slot value for a property of the given kind. Value-type structs
/// are populated by the registry, which can reach their property types.
pub(crate) fn default_value(def: &TypeDef) -> Value {
    use crate::runtime::PrimitiveKind as P;
    match def.kind() {
        TypeKind::Primitive(kind) => match kind {
            P::Bool => Value::Bool(false),
            P::Char => Value::Char('\0'),
            P::I8 => Value::I8(0),
            P::I16 => Value::I16(0),
            P::I32 => Value::I32(0),
            P::I64 => Value::I64(0),
            P::U8 => Value::U8(0),
            P::U16 => Value::U16(0),
            P::U32 => Value::U32(0),
            P::U64 => Value::U64(0),
            P::F32 => Value::F32(0.0),
            P::F64 => Value::F64(0.0),
            P::String => Value::Null,
        },
        TypeKind::Enum(e) => Value::Enum(EnumValue {
            type_id: def.id(),
            value: e.variants.first().map_or(0, |v| v.value),
        }),
        TypeKind::Object
        | TypeKind::Struct(_)
        | TypeKind::Array(_)
        | TypeKind::List(_)
        | TypeKind::Nullable(_) => Value::Null,
    }
}

/// Deep structural comparison of two native graphs.
///
/// Instances compare by type and slot values; a pair of instances already
/// under comparison is assumed equal, so cyclic graphs terminate.
pub fn graph_eq(a: &Value, b: &Value) -> bool {
    let mut visiting = HashSet::new();
    graph_eq_inner(a, b, &mut visiting)
}

fn graph_eq_inner(a: &Value, b: &Value, visiting: &mut HashSet<(usize, usize)>) -> bool {
    match (a, b) {
        (Value::Object(x), Value::Object(y)) => {
            if Instance::ptr_eq(x, y) || !visiting.insert((x.addr(), y.addr())) {
                return true;
            }
            if x.type_id() != y.type_id() {
                return false;
            }
            let (xs, ys) = (x.slots(), y.slots());
            xs.len() == ys.len()
                && xs
                    .iter()
                    .zip(ys.iter())
                    .all(|(l, r)| graph_eq_inner(l, r, visiting))
        }
        (Value::Sequence(x), Value::Sequence(y)) => {
            x.type_id == y.type_id
                && x.items.len() == y.items.len()
                && x
                    .items
                    .iter()
                    .zip(y.items.iter())
                    .all(|(l, r)| graph_eq_inner(l, r, visiting))
        }
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{IntoTypeDef, TypeBuilder};

    fn node_def() -> Arc<TypeDef> {
        Arc::new(
            TypeBuilder::new("Tests", "Node")
                .property("Value", TypeId::I32)
                .property("Next", TypeId(100))
                .into_type_def(TypeId(100)),
        )
    }

    #[test]
    fn test_get_by_name() {
        let inst = Instance::new(node_def(), vec![Value::I32(7), Value::Null]);
        assert_eq!(inst.get("Value"), Ok(Value::I32(7)));
        assert!(matches!(inst.get("Nope"), Err(Error::MemberNotFound { .. })));
    }

    #[test]
    fn test_graph_eq_on_cycles() {
        let a = Instance::new(node_def(), vec![Value::I32(1), Value::Null]);
        a.set_slot(1, Value::Object(a.clone()));
        let b = Instance::new(node_def(), vec![Value::I32(1), Value::Null]);
        b.set_slot(1, Value::Object(b.clone()));

        assert!(graph_eq(&Value::Object(a.clone()), &Value::Object(b.clone())));
        assert_ne!(Value::Object(a.clone()), Value::Object(b.clone()));

        b.set_slot(0, Value::I32(2));
        assert!(!graph_eq(&Value::Object(a.clone()), &Value::Object(b.clone())));
        a.clear();
        b.clear();
    }

    #[test]
    fn test_shallow_copy_is_distinct() {
        let a = Instance::new(node_def(), vec![Value::I32(1), Value::Null]);
        let copy = a.shallow_copy();
        assert!(!Instance::ptr_eq(&a, &copy));
        assert!(graph_eq(&Value::Object(a), &Value::Object(copy)));
    }
}

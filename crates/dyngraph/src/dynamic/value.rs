// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Generic values carried by dynamic object nodes.

use crate::dynamic::{DynamicObject, Values};
use crate::error::{Error, Result};
use crate::types::TypeRef;

/// A value inside a generic object graph.
///
/// Objects compare by node identity, everything else by value.
#[derive(Debug, Clone, PartialEq)]
pub enum DynamicValue {
    Null,

    // Primitives
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

    /// Enum value: underlying integer plus the enum's type reference.
    Enum { type_ref: TypeRef, value: i64 },

    // Composites
    Object(DynamicObject),
    Values(Values),
}

impl DynamicValue {
    /// Check if value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short name of the variant, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Bool(_) => "Bool",
            Self::Char(_) => "Char",
            Self::I8(_) => "I8",
            Self::I16(_) => "I16",
            Self::I32(_) => "I32",
            Self::I64(_) => "I64",
            Self::U8(_) => "U8",
            Self::U16(_) => "U16",
            Self::U32(_) => "U32",
            Self::U64(_) => "U64",
            Self::F32(_) => "F32",
            Self::F64(_) => "F64",
            Self::String(_) => "String",
            Self::Enum { .. } => "Enum",
            Self::Object(_) => "Object",
            Self::Values(_) => "Values",
        }
    }

    /// Value plus kind, e.g. `"abc" (String)`.
    pub fn describe(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Bool(v) => format!("{} (Bool)", v),
            Self::Char(v) => format!("{:?} (Char)", v),
            Self::I8(v) => format!("{} (I8)", v),
            Self::I16(v) => format!("{} (I16)", v),
            Self::I32(v) => format!("{} (I32)", v),
            Self::I64(v) => format!("{} (I64)", v),
            Self::U8(v) => format!("{} (U8)", v),
            Self::U16(v) => format!("{} (U16)", v),
            Self::U32(v) => format!("{} (U32)", v),
            Self::U64(v) => format!("{} (U64)", v),
            Self::F32(v) => format!("{} (F32)", v),
            Self::F64(v) => format!("{} (F64)", v),
            Self::String(v) => format!("{:?} (String)", v),
            Self::Enum { type_ref, value } => format!("{} ({})", value, type_ref),
            Self::Object(obj) => match obj.type_ref() {
                Some(ty) => format!("object ({})", ty),
                None => "object".to_string(),
            },
            Self::Values(values) => format!("sequence of {}", values.len()),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Any integer variant that fits in `i64` (enums included).
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I8(v) => Some(i64::from(*v)),
            Self::I16(v) => Some(i64::from(*v)),
            Self::I32(v) => Some(i64::from(*v)),
            Self::I64(v) => Some(*v),
            Self::U8(v) => Some(i64::from(*v)),
            Self::U16(v) => Some(i64::from(*v)),
            Self::U32(v) => Some(i64::from(*v)),
            Self::U64(v) => i64::try_from(*v).ok(),
            Self::Enum { value, .. } => Some(*value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::F64(v) => Some(*v),
            Self::F32(v) => Some(f64::from(*v)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&DynamicObject> {
        match self {
            Self::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_values(&self) -> Option<&Values> {
        match self {
            Self::Values(values) => Some(values),
            _ => None,
        }
    }

    /// Get enum value and its type.
    pub fn as_enum(&self) -> Option<(&TypeRef, i64)> {
        match self {
            Self::Enum { type_ref, value } => Some((type_ref, *value)),
            _ => None,
        }
    }
}

impl From<DynamicObject> for DynamicValue {
    fn from(v: DynamicObject) -> Self {
        Self::Object(v)
    }
}

impl From<Values> for DynamicValue {
    fn from(v: Values) -> Self {
        Self::Values(v)
    }
}

impl From<&str> for DynamicValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl<T: Into<DynamicValue>> From<Option<T>> for DynamicValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// Conversion out of a [`DynamicValue`].
pub trait FromDynamicValue: Sized {
    fn from_dynamic(value: &DynamicValue) -> Result<Self>;
}

macro_rules! impl_primitive {
    ($ty:ty, $variant:ident, $name:expr) => {
        impl From<$ty> for DynamicValue {
            fn from(v: $ty) -> Self {
                Self::$variant(v)
            }
        }

        impl FromDynamicValue for $ty {
            fn from_dynamic(value: &DynamicValue) -> Result<Self> {
                match value {
                    DynamicValue::$variant(v) => Ok(v.clone()),
                    other => Err(Error::mismatch(None, $name, other.describe())),
                }
            }
        }
    };
}

impl_primitive!(bool, Bool, "bool");
impl_primitive!(char, Char, "char");
impl_primitive!(i8, I8, "i8");
impl_primitive!(i16, I16, "i16");
impl_primitive!(i32, I32, "i32");
impl_primitive!(i64, I64, "i64");
impl_primitive!(u8, U8, "u8");
impl_primitive!(u16, U16, "u16");
impl_primitive!(u32, U32, "u32");
impl_primitive!(u64, U64, "u64");
impl_primitive!(f32, F32, "f32");
impl_primitive!(f64, F64, "f64");
impl_primitive!(String, String, "string");

impl FromDynamicValue for DynamicValue {
    fn from_dynamic(value: &DynamicValue) -> Result<Self> {
        Ok(value.clone())
    }
}

impl FromDynamicValue for DynamicObject {
    fn from_dynamic(value: &DynamicValue) -> Result<Self> {
        value
            .as_object()
            .cloned()
            .ok_or_else(|| Error::mismatch(None, "object", value.describe()))
    }
}

impl<T: FromDynamicValue> FromDynamicValue for Option<T> {
    fn from_dynamic(value: &DynamicValue) -> Result<Self> {
        match value {
            DynamicValue::Null => Ok(None),
            other => T::from_dynamic(other).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_values() {
        let v = DynamicValue::from(42u32);
        assert_eq!(u32::from_dynamic(&v), Ok(42));
        assert!(i32::from_dynamic(&v).is_err());
        assert_eq!(v.as_i64(), Some(42));

        let v = DynamicValue::from(std::f64::consts::PI);
        assert_eq!(v.as_f64(), Some(std::f64::consts::PI));

        let v = DynamicValue::from("hello");
        assert_eq!(v.as_str(), Some("hello"));
    }

    #[test]
    fn test_option_maps_to_null() {
        let none: Option<i32> = None;
        assert!(DynamicValue::from(none).is_null());
        assert_eq!(DynamicValue::from(Some(5i32)), DynamicValue::I32(5));
        assert_eq!(Option::<i32>::from_dynamic(&DynamicValue::Null), Ok(None));
    }

    #[test]
    fn test_enum_value() {
        let color = TypeRef::builder("Color").namespace("Paint").enum_type().build();
        let v = DynamicValue::Enum {
            type_ref: color.clone(),
            value: 2,
        };
        assert_eq!(v.as_enum(), Some((&color, 2)));
        assert_eq!(v.as_i64(), Some(2));
        assert_eq!(v.describe(), "2 (Paint.Color)");
    }

    #[test]
    fn test_describe_string() {
        assert_eq!(DynamicValue::from("abc").describe(), "\"abc\" (String)");
        assert_eq!(DynamicValue::Null.describe(), "null");
    }

    #[test]
    fn test_u64_out_of_i64_range() {
        assert_eq!(DynamicValue::U64(u64::MAX).as_i64(), None);
    }
}

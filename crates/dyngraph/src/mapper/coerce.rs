// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Best-effort value coercion between generic and native values.
//!
//! Accepted conversions:
//! - any integer into any integer type that holds it exactly
//! - integer into float, float into float
//! - char into a one-character string and back
//! - integer, enum value or variant name into an enum
//! - string into any primitive by parsing
//!
//! Everything else is rejected; callers turn `None` into a type mismatch.

use crate::dynamic::DynamicValue;
use crate::runtime::{EnumDef, EnumValue, PrimitiveKind, TypeId, Value};

/// Integer payload of a generic value, widened without loss.
fn integer(value: &DynamicValue) -> Option<i128> {
    match value {
        DynamicValue::I8(v) => Some(i128::from(*v)),
        DynamicValue::I16(v) => Some(i128::from(*v)),
        DynamicValue::I32(v) => Some(i128::from(*v)),
        DynamicValue::I64(v) => Some(i128::from(*v)),
        DynamicValue::U8(v) => Some(i128::from(*v)),
        DynamicValue::U16(v) => Some(i128::from(*v)),
        DynamicValue::U32(v) => Some(i128::from(*v)),
        DynamicValue::U64(v) => Some(i128::from(*v)),
        _ => None,
    }
}

/// Coerce a generic value into a primitive of `kind`.
pub(crate) fn primitive(value: &DynamicValue, kind: PrimitiveKind) -> Option<Value> {
    use PrimitiveKind as P;

    if let Some(n) = integer(value) {
        return match kind {
            P::I8 => i8::try_from(n).ok().map(Value::I8),
            P::I16 => i16::try_from(n).ok().map(Value::I16),
            P::I32 => i32::try_from(n).ok().map(Value::I32),
            P::I64 => i64::try_from(n).ok().map(Value::I64),
            P::U8 => u8::try_from(n).ok().map(Value::U8),
            P::U16 => u16::try_from(n).ok().map(Value::U16),
            P::U32 => u32::try_from(n).ok().map(Value::U32),
            P::U64 => u64::try_from(n).ok().map(Value::U64),
            P::F32 => Some(Value::F32(n as f32)),
            P::F64 => Some(Value::F64(n as f64)),
            P::Bool | P::Char | P::String => None,
        };
    }

    match (value, kind) {
        (DynamicValue::Bool(b), P::Bool) => Some(Value::Bool(*b)),
        (DynamicValue::F32(f), P::F32) => Some(Value::F32(*f)),
        (DynamicValue::F32(f), P::F64) => Some(Value::F64(f64::from(*f))),
        (DynamicValue::F64(f), P::F64) => Some(Value::F64(*f)),
        (DynamicValue::F64(f), P::F32) => Some(Value::F32(*f as f32)),
        (DynamicValue::Char(c), P::Char) => Some(Value::Char(*c)),
        (DynamicValue::Char(c), P::String) => Some(Value::String(c.to_string())),
        (DynamicValue::Null, P::String) => Some(Value::Null),
        (DynamicValue::String(s), _) => parse(s, kind),
        _ => None,
    }
}

/// Parse the string form of a primitive.
pub(crate) fn parse(text: &str, kind: PrimitiveKind) -> Option<Value> {
    use PrimitiveKind as P;
    match kind {
        P::String => Some(Value::String(text.to_string())),
        P::Char => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(Value::Char(c)),
                _ => None,
            }
        }
        P::Bool => {
            if text.eq_ignore_ascii_case("true") {
                Some(Value::Bool(true))
            } else if text.eq_ignore_ascii_case("false") {
                Some(Value::Bool(false))
            } else {
                None
            }
        }
        P::I8 => text.parse().ok().map(Value::I8),
        P::I16 => text.parse().ok().map(Value::I16),
        P::I32 => text.parse().ok().map(Value::I32),
        P::I64 => text.parse().ok().map(Value::I64),
        P::U8 => text.parse().ok().map(Value::U8),
        P::U16 => text.parse().ok().map(Value::U16),
        P::U32 => text.parse().ok().map(Value::U32),
        P::U64 => text.parse().ok().map(Value::U64),
        P::F32 => text.parse().ok().map(Value::F32),
        P::F64 => text.parse().ok().map(Value::F64),
    }
}

/// String form of a native primitive, `None` for anything else.
pub(crate) fn format(value: &Value) -> Option<String> {
    Some(match value {
        Value::Bool(v) => v.to_string(),
        Value::Char(v) => v.to_string(),
        Value::I8(v) => v.to_string(),
        Value::I16(v) => v.to_string(),
        Value::I32(v) => v.to_string(),
        Value::I64(v) => v.to_string(),
        Value::U8(v) => v.to_string(),
        Value::U16(v) => v.to_string(),
        Value::U32(v) => v.to_string(),
        Value::U64(v) => v.to_string(),
        Value::F32(v) => v.to_string(),
        Value::F64(v) => v.to_string(),
        _ => return None,
    })
}

/// Coerce a generic value into a value of enum `type_id`.
///
/// Integers outside the declared variants are kept as-is.
pub(crate) fn enumeration(value: &DynamicValue, type_id: TypeId, def: &EnumDef) -> Option<Value> {
    let raw = match value {
        DynamicValue::String(name) => def
            .variant(name)
            .map(|v| v.value)
            .or_else(|| name.parse().ok())?,
        other => other.as_i64()?,
    };
    Some(Value::Enum(EnumValue {
        type_id,
        value: raw,
    }))
}

/// Native primitive back to its generic variant.
pub(crate) fn to_dynamic(value: &Value) -> Option<DynamicValue> {
    Some(match value {
        Value::Null => DynamicValue::Null,
        Value::Bool(v) => DynamicValue::Bool(*v),
        Value::Char(v) => DynamicValue::Char(*v),
        Value::I8(v) => DynamicValue::I8(*v),
        Value::I16(v) => DynamicValue::I16(*v),
        Value::I32(v) => DynamicValue::I32(*v),
        Value::I64(v) => DynamicValue::I64(*v),
        Value::U8(v) => DynamicValue::U8(*v),
        Value::U16(v) => DynamicValue::U16(*v),
        Value::U32(v) => DynamicValue::U32(*v),
        Value::U64(v) => DynamicValue::U64(*v),
        Value::F32(v) => DynamicValue::F32(*v),
        Value::F64(v) => DynamicValue::F64(*v),
        Value::String(v) => DynamicValue::String(v.clone()),
        Value::Enum(_) | Value::Sequence(_) | Value::Object(_) => return None,
    })
}

/// Generic primitive into its native variant, no coercion.
pub(crate) fn from_dynamic(value: &DynamicValue) -> Option<Value> {
    Some(match value {
        DynamicValue::Null => Value::Null,
        DynamicValue::Bool(v) => Value::Bool(*v),
        DynamicValue::Char(v) => Value::Char(*v),
        DynamicValue::I8(v) => Value::I8(*v),
        DynamicValue::I16(v) => Value::I16(*v),
        DynamicValue::I32(v) => Value::I32(*v),
        DynamicValue::I64(v) => Value::I64(*v),
        DynamicValue::U8(v) => Value::U8(*v),
        DynamicValue::U16(v) => Value::U16(*v),
        DynamicValue::U32(v) => Value::U32(*v),
        DynamicValue::U64(v) => Value::U64(*v),
        DynamicValue::F32(v) => Value::F32(*v),
        DynamicValue::F64(v) => Value::F64(*v),
        DynamicValue::String(v) => Value::String(v.clone()),
        DynamicValue::Enum { .. } | DynamicValue::Object(_) | DynamicValue::Values(_) => {
            return None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::EnumVariant;

    #[test]
    fn test_lossless_integers() {
        assert_eq!(
            primitive(&DynamicValue::U8(200), PrimitiveKind::I16),
            Some(Value::I16(200))
        );
        assert_eq!(
            primitive(&DynamicValue::I64(-1), PrimitiveKind::I32),
            Some(Value::I32(-1))
        );
        assert_eq!(primitive(&DynamicValue::I32(-1), PrimitiveKind::U32), None);
        assert_eq!(primitive(&DynamicValue::I64(300), PrimitiveKind::U8), None);
        assert_eq!(
            primitive(&DynamicValue::I32(3), PrimitiveKind::F64),
            Some(Value::F64(3.0))
        );
    }

    #[test]
    fn test_floats_never_become_integers() {
        assert_eq!(primitive(&DynamicValue::F64(1.0), PrimitiveKind::I32), None);
        assert_eq!(
            primitive(&DynamicValue::F32(1.5), PrimitiveKind::F64),
            Some(Value::F64(1.5))
        );
    }

    #[test]
    fn test_char_and_string() {
        assert_eq!(
            primitive(&DynamicValue::Char('x'), PrimitiveKind::String),
            Some(Value::String("x".into()))
        );
        assert_eq!(
            primitive(&DynamicValue::String("y".into()), PrimitiveKind::Char),
            Some(Value::Char('y'))
        );
        assert_eq!(
            primitive(&DynamicValue::String("yz".into()), PrimitiveKind::Char),
            None
        );
        assert_eq!(
            primitive(&DynamicValue::Null, PrimitiveKind::String),
            Some(Value::Null)
        );
        assert_eq!(primitive(&DynamicValue::Null, PrimitiveKind::I32), None);
    }

    #[test]
    fn test_string_parsing() {
        assert_eq!(parse("42", PrimitiveKind::I32), Some(Value::I32(42)));
        assert_eq!(parse("abc", PrimitiveKind::I32), None);
        assert_eq!(parse("True", PrimitiveKind::Bool), Some(Value::Bool(true)));
        assert_eq!(parse("2.5", PrimitiveKind::F32), Some(Value::F32(2.5)));
        assert_eq!(format(&Value::F64(2.5)).as_deref(), Some("2.5"));
        assert_eq!(format(&Value::from("s")), None);
    }

    #[test]
    fn test_enumeration() {
        let def = EnumDef {
            underlying: PrimitiveKind::I32,
            variants: vec![EnumVariant::new("Red", 0), EnumVariant::new("Green", 5)],
        };
        let id = TypeId(30);
        let expect = |value| Some(Value::Enum(EnumValue { type_id: id, value }));

        assert_eq!(enumeration(&DynamicValue::I32(5), id, &def), expect(5));
        assert_eq!(
            enumeration(&DynamicValue::String("Green".into()), id, &def),
            expect(5)
        );
        assert_eq!(enumeration(&DynamicValue::String("7".into()), id, &def), expect(7));
        assert_eq!(
            enumeration(&DynamicValue::String("Blue".into()), id, &def),
            None
        );
        assert_eq!(enumeration(&DynamicValue::F64(1.0), id, &def), None);
    }
}

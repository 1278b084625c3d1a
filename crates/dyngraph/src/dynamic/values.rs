// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Sequence nodes.

use crate::dynamic::{DynamicValue, FromDynamicValue};
use crate::error::{Error, Result};
use crate::types::TypeRef;

/// An ordered, materialized sequence of generic values.
///
/// Items may be homogeneous or not; the optional element type is a hint
/// for reconstruction.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Values {
    element_type: Option<TypeRef>,
    items: Vec<DynamicValue>,
}

impl Values {
    /// Create a sequence.
    pub fn new(element_type: Option<TypeRef>, items: Vec<DynamicValue>) -> Self {
        Self {
            element_type,
            items,
        }
    }

    /// Build an untyped sequence from anything convertible to values.
    pub fn from_items<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<DynamicValue>,
    {
        Self::new(None, items.into_iter().map(Into::into).collect())
    }

    /// Same items, different element hint.
    #[must_use]
    pub fn with_element_type(mut self, element_type: TypeRef) -> Self {
        self.element_type = Some(element_type);
        self
    }

    pub fn element_type(&self) -> Option<&TypeRef> {
        self.element_type.as_ref()
    }

    pub fn items(&self) -> &[DynamicValue] {
        &self.items
    }

    pub fn into_items(self) -> Vec<DynamicValue> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&DynamicValue> {
        self.items.get(index)
    }

    pub fn push(&mut self, value: impl Into<DynamicValue>) {
        self.items.push(value.into());
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DynamicValue> {
        self.items.iter()
    }

    /// Convert every item to `T`.
    ///
    /// The failing index is reported in the error.
    pub fn typed<T: FromDynamicValue>(&self) -> Result<Vec<T>> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                T::from_dynamic(item).map_err(|err| match err {
                    Error::TypeMismatch {
                        expected, actual, ..
                    } => Error::TypeMismatch {
                        member: Some(format!("[{}]", i)),
                        expected,
                        actual,
                    },
                    other => other,
                })
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a Values {
    type Item = &'a DynamicValue;
    type IntoIter = std::slice::Iter<'a, DynamicValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for Values {
    type Item = DynamicValue;
    type IntoIter = std::vec::IntoIter<DynamicValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl FromIterator<DynamicValue> for Values {
    fn from_iter<I: IntoIterator<Item = DynamicValue>>(iter: I) -> Self {
        Self::new(None, iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_is_restartable() {
        let values = Values::from_items([1i32, 2, 3]);
        let first: Vec<_> = values.iter().cloned().collect();
        let second: Vec<_> = values.iter().cloned().collect();
        assert_eq!(first, second);
        assert_eq!(values.len(), 3);
    }

    #[test]
    fn test_typed_view() {
        let values = Values::from_items(["a", "b"]);
        assert_eq!(values.typed::<String>().expect("typed"), vec!["a", "b"]);
        assert!(Values::default().typed::<i32>().expect("empty").is_empty());
    }

    #[test]
    fn test_typed_view_reports_index() {
        let values = Values::from_items([DynamicValue::I32(1), DynamicValue::from("x")]);
        match values.typed::<i32>() {
            Err(Error::TypeMismatch { member, .. }) => assert_eq!(member.as_deref(), Some("[1]")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_element_hint() {
        let hint = TypeRef::new("System", "Int32");
        let values = Values::from_items([7i32]).with_element_type(hint.clone());
        assert_eq!(values.element_type(), Some(&hint));
    }
}

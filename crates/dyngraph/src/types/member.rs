// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Portable member descriptors.

use crate::error::{Error, Result};
use crate::types::TypeRef;
use std::fmt;

/// Kind of a type member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Field,
    Property,
    Constructor,
    Method,
}

impl MemberKind {
    /// Lower-case label used in messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Field => "field",
            Self::Property => "property",
            Self::Constructor => "constructor",
            Self::Method => "method",
        }
    }

    /// Fields and properties carry data.
    pub fn is_data(self) -> bool {
        matches!(self, Self::Field | Self::Property)
    }
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Portable reference to one member of a type.
///
/// The value type is the member type for fields and properties, the
/// declaring type for constructors and the return type for methods.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemberDescriptor {
    kind: MemberKind,
    name: String,
    declaring_type: TypeRef,
    value_type: TypeRef,
}

impl MemberDescriptor {
    /// Create a validated member descriptor.
    pub fn new(
        kind: MemberKind,
        name: impl Into<String>,
        declaring_type: TypeRef,
        value_type: TypeRef,
    ) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::DescriptorInvalid(format!(
                "{} name missing on '{}'",
                kind,
                declaring_type.full_name()
            )));
        }
        if declaring_type.name().is_empty() {
            return Err(Error::DescriptorInvalid(format!(
                "declaring type missing for {} '{}'",
                kind, name
            )));
        }
        if value_type.name().is_empty() {
            return Err(Error::DescriptorInvalid(format!(
                "value type missing for {} '{}'",
                kind, name
            )));
        }
        Ok(Self {
            kind,
            name,
            declaring_type,
            value_type,
        })
    }

    /// Property member.
    pub fn property(
        declaring_type: TypeRef,
        name: impl Into<String>,
        value_type: TypeRef,
    ) -> Result<Self> {
        Self::new(MemberKind::Property, name, declaring_type, value_type)
    }

    /// Field member.
    pub fn field(
        declaring_type: TypeRef,
        name: impl Into<String>,
        value_type: TypeRef,
    ) -> Result<Self> {
        Self::new(MemberKind::Field, name, declaring_type, value_type)
    }

    /// Default constructor of `declaring_type`.
    pub fn constructor(declaring_type: TypeRef) -> Result<Self> {
        let value_type = declaring_type.clone();
        Self::new(MemberKind::Constructor, ".ctor", declaring_type, value_type)
    }

    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declaring_type(&self) -> &TypeRef {
        &self.declaring_type
    }

    pub fn value_type(&self) -> &TypeRef {
        &self.value_type
    }
}

impl fmt::Display for MemberDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}.{}: {}",
            self.kind, self.declaring_type, self.name, self.value_type
        )
    }
}

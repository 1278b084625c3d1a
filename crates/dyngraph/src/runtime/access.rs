// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Reflection-like member access over native types.

use crate::error::Result;
use crate::runtime::{Instance, TypeId, Value};
use crate::types::MemberDescriptor;

/// Which setters a write may go through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetterAccess {
    /// Public setters only (caller-facing writes).
    PublicOnly,
    /// Public or non-public setters (reconstruction).
    NonPublic,
}

/// Member enumeration, reads, writes and instantiation.
///
/// This is the seam between the graph mapper and whatever runtime holds
/// the native types.
pub trait MemberAccess {
    /// Publicly readable data members of a type, in declaration order.
    fn list_members(&self, type_id: TypeId) -> Result<Vec<MemberDescriptor>>;

    /// Read a member by name.
    fn get_value(&self, instance: &Instance, member: &str) -> Result<Value>;

    /// Write a member by name, checking the value against the member type.
    fn set_value(
        &self,
        instance: &Instance,
        member: &str,
        value: Value,
        access: SetterAccess,
    ) -> Result<()>;

    /// New instance with every member at its default.
    fn instantiate(&self, type_id: TypeId) -> Result<Instance>;
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Portable type model: type references, member descriptors and the
//! structural keys used to cache synthesized types.

mod key;
mod member;
mod type_ref;

pub use key::{PropertyList, StructuralKey, TypeWithPropertyList};
pub use member::{MemberDescriptor, MemberKind};
pub use type_ref::{PropertyRef, TypeRef, TypeRefBuilder};

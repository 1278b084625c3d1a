// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Native runtime: type arena, instances and member access.
//!
//! Native types are [`TypeDef`]s owned by a [`TypeRegistry`] and addressed by
//! [`TypeId`]. Instances are property bags whose slots follow the declaration
//! order of their type. The registry implements [`MemberAccess`], the seam
//! the graph mapper reads and writes through.
//!
//! # Example
//!
//! ```rust
//! use dyngraph::runtime::{MemberAccess, SetterAccess, TypeBuilder, TypeId, TypeRegistry, Value};
//!
//! let registry = TypeRegistry::new();
//! let point = registry
//!     .register(
//!         TypeBuilder::new("Geometry", "Point")
//!             .property("X", TypeId::I32)
//!             .property("Y", TypeId::I32),
//!     )
//!     .unwrap();
//!
//! let p = registry.instantiate(point).unwrap();
//! registry.set_value(&p, "X", Value::I32(3), SetterAccess::PublicOnly).unwrap();
//! assert_eq!(registry.get_value(&p, "X").unwrap(), Value::I32(3));
//! ```

mod access;
mod builder;
mod emitter;
mod instance;
mod registry;
mod type_def;

pub use access::{MemberAccess, SetterAccess};
pub use builder::{EnumBuilder, IntoTypeDef, TypeBuilder};
pub use instance::{graph_eq, EnumValue, Instance, Sequence, Value};
pub use registry::{ResolvedMember, TypeRegistry};
pub use type_def::{
    Accessibility, EnumDef, EnumVariant, PrimitiveKind, PropertyDef, StructDef, TypeDef, TypeId,
    TypeKind,
};

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # dyngraph - Self-describing object graphs
//!
//! Moves strongly-typed object graphs across a serialization boundary
//! without the receiving side knowing the original types in advance.
//!
//! ## Quick Start
//!
//! ```rust
//! use dyngraph::{GraphMapper, Result, TypeBuilder, TypeId, TypeRegistry, Value};
//! use dyngraph::runtime::{MemberAccess, SetterAccess};
//!
//! fn main() -> Result<()> {
//!     let registry = TypeRegistry::new();
//!     let person = registry.register(
//!         TypeBuilder::new("People", "Person")
//!             .string_property("Name")
//!             .property("Age", TypeId::I32),
//!     )?;
//!
//!     let ada = registry.instantiate(person)?;
//!     registry.set_value(&ada, "Name", "Ada".into(), SetterAccess::PublicOnly)?;
//!     registry.set_value(&ada, "Age", Value::I32(36), SetterAccess::PublicOnly)?;
//!
//!     // Native -> generic: hand this to any codec.
//!     let mapper = GraphMapper::new(&registry);
//!     let generic = mapper.to_generic(&Value::Object(ada.clone()))?;
//!
//!     // Generic -> native, on a side that only knows the property names.
//!     let remote = TypeRegistry::new();
//!     generic.as_object().unwrap().set_type_ref(None);
//!     let copy = GraphMapper::new(&remote).from_generic(&generic, None)?;
//!     assert_eq!(copy.as_instance().unwrap().get("Name")?, Value::from("Ada"));
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------------+
//! |                         GraphMapper                                 |
//! |   to_generic / to_dynamic_object  <->  from_generic / create_object |
//! +---------------------------------------------------------------------+
//! |   dynamic: DynamicObject, Values     |   runtime: TypeRegistry      |
//! |   (generic graph, codec-facing)      |   TypeDef arena, Instances,  |
//! |                                      |   MemberAccess, TypeEmitter  |
//! +---------------------------------------------------------------------+
//! |   types: TypeRef, MemberDescriptor, StructuralKey                   |
//! +---------------------------------------------------------------------+
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`TypeRegistry`] | Loaded, constructed and synthesized native types |
//! | [`GraphMapper`] | Native <-> generic conversion with cycle handling |
//! | [`DynamicObject`] | Generic object node (shared handle) |
//! | [`TypeRef`] | Portable type descriptor |
//! | [`Value`] / [`Instance`] | Native values and instances |

pub mod config;
pub mod dynamic;
pub mod error;
pub mod mapper;
pub mod runtime;
pub mod types;

pub use config::{CollectionShape, MapperConfig, RegistryConfig};
pub use dynamic::{DynamicObject, DynamicValue, FromDynamicValue, PropertySet, Values};
pub use error::{Error, Result};
pub use mapper::GraphMapper;
pub use runtime::{
    graph_eq, EnumBuilder, EnumValue, Instance, Sequence, TypeBuilder, TypeId, TypeRegistry, Value,
};
pub use types::{MemberDescriptor, MemberKind, PropertyRef, TypeRef};

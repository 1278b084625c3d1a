// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Generic object graph
//!
//! Schema-light stand-ins for native objects while they cross a
//! serialization boundary.
//!
//! - **DynamicObject**: shared node with an optional [`TypeRef`] and an
//!   insertion-ordered [`PropertySet`]
//! - **Values**: ordered sequence node with an optional element type hint
//! - **DynamicValue**: anything a property or a sequence item can hold
//!
//! # Example
//!
//! ```rust
//! use dyngraph::dynamic::{DynamicObject, DynamicValue, Values};
//!
//! let node = DynamicObject::new();
//! node.set("Name", "Ada");
//! node.set("Tags", Values::from_items(["math", "engines"]));
//! node.set("Self", node.clone());
//!
//! assert_eq!(node.get_as::<String>("Name").unwrap(), "Ada");
//! let back = node.get("Self").unwrap();
//! assert!(DynamicObject::ptr_eq(back.as_object().unwrap(), &node));
//! # node.clear();
//! ```
//!
//! [`TypeRef`]: crate::types::TypeRef

mod object;
mod value;
mod values;

pub use object::{DynamicObject, PropertySet};
pub use value::{DynamicValue, FromDynamicValue};
pub use values::Values;

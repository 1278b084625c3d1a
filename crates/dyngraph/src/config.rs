// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Crate constants and runtime configuration.
//!
//! # Architecture
//!
//! - **Level 1 (Static)**: names of builtin types and of the namespace that
//!   receives synthesized types.
//! - **Level 2 (Dynamic)**: [`MapperConfig`] for one [`GraphMapper`] and
//!   [`RegistryConfig`] for one [`TypeRegistry`].
//!
//! [`GraphMapper`]: crate::GraphMapper
//! [`TypeRegistry`]: crate::TypeRegistry

/// Namespace of builtin types (`System.Int32`, `System.String`, ...).
pub const SYSTEM_NAMESPACE: &str = "System";

/// Namespace given to synthesized types unless overridden.
pub const EMITTED_NAMESPACE: &str = "Dyngraph.Emitted";

/// Prefix of the names given to types synthesized from bare property lists.
pub const SYNTHESIZED_NAME_PREFIX: &str = "<>f__SynthesizedType";

/// Name of the generic array-like list type definition.
pub const LIST_TYPE_NAME: &str = "List`1";

/// Namespace of the list type definition.
pub const LIST_NAMESPACE: &str = "System.Collections.Generic";

/// Name of the nullable wrapper type definition.
pub const NULLABLE_TYPE_NAME: &str = "Nullable`1";

/// Shape requested for reconstructed sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollectionShape {
    /// Fixed array of the resolved element type.
    #[default]
    Array,
    /// Growable list of the resolved element type.
    List,
}

/// Options for one [`GraphMapper`](crate::GraphMapper).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MapperConfig {
    /// Do not attach type references to produced nodes.
    pub suppress_type_information: bool,
    /// Attach declared property types to node type references.
    pub include_property_types: bool,
    /// Emit primitives as their string form; parse them back on the way in.
    pub format_native_values_as_string: bool,
    /// Shape of sequences whose target type does not dictate one.
    pub sequence_shape: CollectionShape,
    /// Maximum nesting depth before a conversion is rejected.
    pub max_depth: Option<usize>,
}

impl MapperConfig {
    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Omit type references on produced nodes.
    #[must_use]
    pub fn suppress_type_information(mut self, value: bool) -> Self {
        self.suppress_type_information = value;
        self
    }

    /// Include property descriptors in produced type references.
    #[must_use]
    pub fn include_property_types(mut self, value: bool) -> Self {
        self.include_property_types = value;
        self
    }

    /// Format primitives as strings.
    #[must_use]
    pub fn format_native_values_as_string(mut self, value: bool) -> Self {
        self.format_native_values_as_string = value;
        self
    }

    /// Preferred collection shape for untyped sequences.
    #[must_use]
    pub fn sequence_shape(mut self, shape: CollectionShape) -> Self {
        self.sequence_shape = shape;
        self
    }

    /// Limit nesting depth.
    #[must_use]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }
}

/// Options for one [`TypeRegistry`](crate::TypeRegistry).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Namespace assigned to types synthesized from bare property lists.
    pub emitted_namespace: String,
    /// Name prefix for types synthesized from bare property lists.
    pub synthesized_name_prefix: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            emitted_namespace: EMITTED_NAMESPACE.to_string(),
            synthesized_name_prefix: SYNTHESIZED_NAME_PREFIX.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapper_config_builder() {
        let config = MapperConfig::new()
            .include_property_types(true)
            .sequence_shape(CollectionShape::List)
            .max_depth(8);
        assert!(config.include_property_types);
        assert!(!config.suppress_type_information);
        assert_eq!(config.sequence_shape, CollectionShape::List);
        assert_eq!(config.max_depth, Some(8));
    }

    #[test]
    fn test_registry_config_defaults() {
        let config = RegistryConfig::default();
        assert_eq!(config.emitted_namespace, EMITTED_NAMESPACE);
        assert!(config.synthesized_name_prefix.starts_with("<>"));
    }
}

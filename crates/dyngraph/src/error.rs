// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error type shared by the descriptor model, the registry and the mapper.
//!
//! Every variant describes a contract violation in a graph or a descriptor,
//! never a transient condition, so callers get them immediately and nothing
//! is retried internally.

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while describing, resolving or converting object graphs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A required input was null or empty.
    #[error("invalid argument: {0}")]
    ArgumentInvalid(String),

    /// A type or member descriptor is structurally malformed.
    #[error("invalid descriptor: {0}")]
    DescriptorInvalid(String),

    /// A value could not be coerced into the declared type of its target.
    #[error("type mismatch{}: expected {expected}, got {actual}", member_suffix(.member))]
    TypeMismatch {
        /// Member being assigned (`None` at the root of a conversion).
        member: Option<String>,
        /// Declared type of the target.
        expected: String,
        /// Description of the value that was offered.
        actual: String,
    },

    /// Neither a loaded type nor a synthesized one satisfies a descriptor.
    #[error("cannot resolve type '{type_name}': {reason}")]
    TypeResolutionFailed {
        /// Qualified name of the described type.
        type_name: String,
        /// Why resolution gave up.
        reason: String,
    },

    /// The named member does not exist on the type.
    #[error("type '{type_name}' has no member '{member}'")]
    MemberNotFound {
        /// Qualified name of the searched type.
        type_name: String,
        /// Requested member name.
        member: String,
    },

    /// The member exists but has no public setter.
    #[error("member '{member}' of type '{type_name}' is not publicly writable")]
    MemberNotWritable {
        /// Qualified name of the declaring type.
        type_name: String,
        /// Member name.
        member: String,
    },
}

fn member_suffix(member: &Option<String>) -> String {
    match member {
        Some(name) => format!(" for member '{}'", name),
        None => String::new(),
    }
}

impl Error {
    /// Build a [`Error::TypeMismatch`] for a named member.
    pub fn mismatch(
        member: Option<&str>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            member: member.map(str::to_string),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Build a [`Error::TypeResolutionFailed`].
    pub fn unresolved(type_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::TypeResolutionFailed {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }

    /// Attach a member name to a root-level type mismatch.
    ///
    /// Mismatches that already name a member (raised deeper in the graph)
    /// are returned unchanged.
    pub(crate) fn at_member(self, name: &str) -> Self {
        match self {
            Self::TypeMismatch {
                member: None,
                expected,
                actual,
            } => Self::TypeMismatch {
                member: Some(name.to_string()),
                expected,
                actual,
            },
            other => other,
        }
    }
}

// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Resolution errors.
//!
//! Every error describes a static metadata defect. Nothing here is retried
//! and nothing is cached: a failed build leaves the cache slot empty so a
//! corrected declaration can be picked up by the next call.
//!
//! | Variant | Raised when |
//! |---------|-------------|
//! | [`Error::Configuration`] | Unknown naming style, malformed property or order |
//! | [`Error::DuplicateColumn`] | Two fields resolve to one column name |
//! | [`Error::AmbiguousKeyStrategy`] | Several key strategies in strict mode |
//! | [`Error::UnresolvedReference`] | Registry cannot locate a generator/handler |
//! | [`Error::UnknownType`] | A type or ancestor is missing from the arena |

use std::fmt;

use thiserror::Error;

use crate::types::MappedType;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Kind of external reference carried by a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReferenceKind {
    /// Application-side primary key generator.
    KeyGenerator,

    /// Value conversion handler.
    TypeHandler
}

impl ReferenceKind {
    /// Human readable name used in error messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::KeyGenerator => "key generator",
            Self::TypeHandler => "type handler"
        }
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised while resolving an entity descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// Invalid declared or global configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Two fields of one entity resolve to the same column name.
    #[error("duplicate column `{column}` in `{entity}`: fields `{first}` and `{second}`")]
    DuplicateColumn {
        /// Entity being built.
        entity: MappedType,
        /// Colliding column name.
        column: String,
        /// Field that claimed the column first.
        first:  String,
        /// Field that collided with it.
        second: String
    },

    /// More than one key generation strategy configured on one field.
    ///
    /// Only raised when strict key validation is enabled in
    /// [`GlobalDefaults`](crate::GlobalDefaults); otherwise the priority
    /// ladder picks a winner.
    #[error("ambiguous key strategy on `{entity}.{field}`")]
    AmbiguousKeyStrategy {
        /// Entity being built.
        entity: MappedType,
        /// Primary key field.
        field:  String
    },

    /// A referenced key generator or type handler is unknown to the registry.
    #[error("unresolved {kind} `{reference}` on `{entity}.{field}`")]
    UnresolvedReference {
        /// What was looked up.
        kind:      ReferenceKind,
        /// Reference as declared.
        reference: String,
        /// Entity being built.
        entity:    MappedType,
        /// Field carrying the reference.
        field:     String
    },

    /// The type (or one of its ancestors) was never declared.
    #[error("type `{0}` is not declared")]
    UnknownType(MappedType)
}

impl Error {
    /// Build a configuration error from any displayable message.
    pub fn configuration(message: impl fmt::Display) -> Self {
        Self::Configuration(message.to_string())
    }

    /// Check if this error reports a missing key generator.
    #[must_use]
    pub fn is_missing_key_generator(&self) -> bool {
        matches!(
            self,
            Self::UnresolvedReference {
                kind: ReferenceKind::KeyGenerator,
                ..
            }
        )
    }
}

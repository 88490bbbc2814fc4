// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Lookup of key generators and type handlers.
//!
//! The resolver only carries references. Whether a reference points at
//! something executable is answered by the embedding system through
//! [`Registry`].

use std::collections::HashSet;

use crate::error::ReferenceKind;

/// Outcome of a registry lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The reference names a known capability.
    Found,

    /// Nothing is registered under the reference.
    NotFound
}

impl Resolution {
    /// Check if the reference was found.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found)
    }
}

impl From<bool> for Resolution {
    fn from(found: bool) -> Self {
        if found { Self::Found } else { Self::NotFound }
    }
}

/// Capability lookup injected into the builder.
pub trait Registry: Send + Sync {
    /// Resolve a reference of the given kind.
    fn resolve(&self, kind: ReferenceKind, reference: &str) -> Resolution;
}

/// Registry that accepts every reference.
///
/// For embedders that validate generators and handlers elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unchecked;

impl Registry for Unchecked {
    fn resolve(&self, _kind: ReferenceKind, _reference: &str) -> Resolution {
        Resolution::Found
    }
}

/// Registry backed by explicit sets of known references.
#[derive(Debug, Clone, Default)]
pub struct ReferenceSet {
    key_generators: HashSet<String>,
    type_handlers:  HashSet<String>
}

impl ReferenceSet {
    /// Create an empty set; every lookup fails.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a key generator reference.
    #[must_use]
    pub fn with_key_generator(mut self, reference: impl Into<String>) -> Self {
        self.key_generators.insert(reference.into());
        self
    }

    /// Register a type handler reference.
    #[must_use]
    pub fn with_type_handler(mut self, reference: impl Into<String>) -> Self {
        self.type_handlers.insert(reference.into());
        self
    }
}

impl Registry for ReferenceSet {
    fn resolve(&self, kind: ReferenceKind, reference: &str) -> Resolution {
        let known = match kind {
            ReferenceKind::KeyGenerator => &self.key_generators,
            ReferenceKind::TypeHandler => &self.type_handlers
        };
        known.contains(reference).into()
    }
}

// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Convenient re-exports for common usage.
//!
//! # Usage
//!
//! ```rust
//! use entity_meta_core::prelude::*;
//! ```

pub use crate::{
    ColumnDescriptor, DescriptorCache, EntityBuilder, EntityDescriptor, Error, ExclusionRule,
    FieldDecl, FieldRules, GlobalDefaults, KeyStrategy, Mapped, MappedType, NamingStyle, OrderBy,
    ReferenceSet, Registry, TypeArena, TypeDecl, TypeRules, Unchecked
};

// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity metadata resolution for entity-meta.
//!
//! Turns declared record types and their mapping rules into immutable
//! descriptors: table identity, ordered columns, primary keys, key
//! generation strategies and default ordering. Descriptors are built once per
//! type and shared through a thread-safe cache.
//!
//! # Overview
//!
//! | Item | Role |
//! |------|------|
//! | [`TypeArena`] | Declared types, filled by `#[derive(Mapped)]` or by hand |
//! | [`GlobalDefaults`] | Style, catalog and schema used when an entity is silent |
//! | [`Registry`] | Answers whether key generators and type handlers exist |
//! | [`EntityBuilder`] | Resolves one [`EntityDescriptor`] |
//! | [`DescriptorCache`] | Memoizes descriptors with single-flight builds |
//!
//! # Usage
//!
//! Most users should use `entity-meta`, which re-exports this crate together
//! with the derive macro. Manual declarations look like this:
//!
//! ```rust
//! use entity_meta_core::prelude::*;
//!
//! let mut types = TypeArena::new();
//! types.insert(
//!     TypeDecl::new(MappedType::new("blog::BlogPost"))
//!         .field(FieldDecl::new("id", MappedType::of::<i64>()).rules(FieldRules::primary_key()))
//!         .field(
//!             FieldDecl::new("publishedAt", MappedType::new("Timestamp"))
//!                 .rules(FieldRules::default().order(OrderBy::Descending, 0))
//!         )
//! );
//!
//! let defaults = GlobalDefaults::default().with_schema("content");
//! let cache = DescriptorCache::new();
//! let builder = EntityBuilder::new(&types, &defaults, &Unchecked);
//! let post = cache
//!     .get_or_build(&builder, &MappedType::new("blog::BlogPost"))
//!     .unwrap();
//!
//! assert_eq!(post.qualified_table(), "content.blog_post");
//! assert_eq!(post.order_by_clause().as_deref(), Some("published_at DESC"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cache;
pub mod collect;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod key;
pub mod naming;
pub mod prelude;
pub mod registry;
pub mod rules;
pub mod types;

pub use cache::DescriptorCache;
pub use collect::CollectedField;
pub use config::GlobalDefaults;
pub use descriptor::{ColumnDescriptor, EntityBuilder, EntityDescriptor};
pub use error::{Error, ReferenceKind, Result};
pub use key::KeyStrategy;
pub use naming::NamingStyle;
pub use registry::{ReferenceSet, Registry, Resolution, Unchecked};
pub use rules::{ExclusionRule, FieldRules, OrderBy, TypeRules};
pub use types::{FieldDecl, Mapped, MappedType, TypeArena, TypeDecl};

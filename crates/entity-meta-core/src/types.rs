// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Type identities and the type arena.
//!
//! The resolver never inspects live types. Every mapped type is declared once
//! as a [`TypeDecl`] and stored in a [`TypeArena`] keyed by its
//! [`MappedType`]. Inheritance is an explicit `parent` link between
//! declarations, which keeps building pure and lets tests describe synthetic
//! hierarchies.
//!
//! ```text
//! TypeArena
//! ├── app::Order      parent: app::Audited
//! │   └── fields: id, customer_id, total
//! ├── app::Audited    parent: app::Base
//! │   └── fields: created_at, updated_at
//! └── app::Base       parent: none
//!     └── fields: version
//! ```

use std::{any, collections::HashMap, fmt, sync::Arc};

use crate::{
    error::{Error, Result},
    rules::{FieldRules, TypeRules}
};

/// Stable identity of a mapped type: its fully qualified name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct MappedType(Arc<str>);

impl MappedType {
    /// Create an identity from a fully qualified name.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// Identity of a Rust type, based on [`std::any::type_name`].
    #[must_use]
    pub fn of<T: ?Sized>() -> Self {
        Self::new(any::type_name::<T>())
    }

    /// Fully qualified name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Name without module path and generic arguments.
    ///
    /// ```rust
    /// use entity_meta_core::MappedType;
    ///
    /// assert_eq!(MappedType::new("app::model::OrderItem").simple_name(), "OrderItem");
    /// assert_eq!(MappedType::new("com.shop.Order").simple_name(), "Order");
    /// assert_eq!(MappedType::new("app::Page<app::Order>").simple_name(), "Page");
    /// ```
    #[must_use]
    pub fn simple_name(&self) -> &str {
        let base = self.0.split('<').next().unwrap_or(&self.0);
        base.rsplit([':', '.']).next().unwrap_or(base)
    }
}

impl fmt::Display for MappedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MappedType {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// One declared field of a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    /// Field name as declared.
    pub name: String,

    /// Declared value type.
    pub ty: MappedType,

    /// Field is never persisted.
    pub transient: bool,

    /// Column rules.
    pub rules: FieldRules
}

impl FieldDecl {
    /// Declare a field with default rules.
    pub fn new(name: impl Into<String>, ty: MappedType) -> Self {
        Self {
            name: name.into(),
            ty,
            transient: false,
            rules: FieldRules::default()
        }
    }

    /// Replace the field rules.
    #[must_use]
    pub fn rules(mut self, rules: FieldRules) -> Self {
        self.rules = rules;
        self
    }

    /// Mark the field as never persisted.
    #[must_use]
    pub fn transient(mut self) -> Self {
        self.transient = true;
        self
    }
}

/// Declaration of one type: its rules, fields and direct ancestor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    /// Identity of the declared type.
    pub ty: MappedType,

    /// Direct ancestor, if any.
    pub parent: Option<MappedType>,

    /// Type-level rules.
    pub rules: TypeRules,

    /// Fields in declaration order.
    pub fields: Vec<FieldDecl>
}

impl TypeDecl {
    /// Start a declaration with no parent, no fields and default rules.
    pub fn new(ty: MappedType) -> Self {
        Self {
            ty,
            parent: None,
            rules: TypeRules::default(),
            fields: Vec::new()
        }
    }

    /// Set the direct ancestor.
    #[must_use]
    pub fn extends(mut self, parent: MappedType) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Replace the type rules.
    #[must_use]
    pub fn rules(mut self, rules: TypeRules) -> Self {
        self.rules = rules;
        self
    }

    /// Append a field.
    #[must_use]
    pub fn field(mut self, field: FieldDecl) -> Self {
        self.fields.push(field);
        self
    }
}

/// Types that can describe their own mapping.
///
/// Implemented by `#[derive(Mapped)]`; hand-written impls work the same way.
pub trait Mapped: 'static {
    /// Declaration of this type alone (without its ancestors).
    fn declaration() -> TypeDecl;

    /// Insert this type and its whole ancestor chain into `types`.
    fn register(types: &mut TypeArena) {
        types.insert(Self::declaration());
    }
}

/// Finite set of type declarations indexed by identity.
#[derive(Debug, Clone, Default)]
pub struct TypeArena {
    types: HashMap<MappedType, TypeDecl>
}

impl TypeArena {
    /// Create an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a declaration.
    pub fn insert(&mut self, decl: TypeDecl) -> &mut Self {
        self.types.insert(decl.ty.clone(), decl);
        self
    }

    /// Register a [`Mapped`] type together with its ancestors.
    pub fn register<T: Mapped>(&mut self) -> &mut Self {
        T::register(self);
        self
    }

    /// Look up a declaration.
    #[must_use]
    pub fn get(&self, ty: &MappedType) -> Option<&TypeDecl> {
        self.types.get(ty)
    }

    /// Check if a type is declared.
    #[must_use]
    pub fn contains(&self, ty: &MappedType) -> bool {
        self.types.contains_key(ty)
    }

    /// Number of declared types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if the arena is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Look up a declaration that must exist.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownType`] if `ty` is not declared.
    pub fn require(&self, ty: &MappedType) -> Result<&TypeDecl> {
        self.get(ty).ok_or_else(|| Error::UnknownType(ty.clone()))
    }
}

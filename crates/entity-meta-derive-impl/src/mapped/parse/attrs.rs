// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity-level attribute parsing with darling.
//!
//! # Supported Attributes
//!
//! | Attribute | Form |
//! |-----------|------|
//! | `table`, `catalog`, `schema`, `result_map`, `remark` | `= "text"` |
//! | `style` | `= "lower_underscore"` (validated) |
//! | `auto_result_map` | flag |
//! | `props` | `props(key = "value", ..)` |
//! | `extends` | `= path::Base` |
//! | `exclude_super_classes`, `exclude_field_types` | `(path::A, path::B)` |
//! | `exclude_fields` | `(name, other)` |
//!
//! Every attribute is optional; a struct without `#[entity]` is mapped with
//! defaults.

use std::collections::HashMap;

use darling::{FromDeriveInput, util::PathList};
use syn::ext::IdentExt;

use super::value::StyleName;

/// Entity-level attributes parsed from `#[entity(...)]`.
///
/// # Example
///
/// ```rust,ignore
/// #[entity(
///     table = "orders",
///     schema = "sales",
///     style = "upper_underscore",
///     extends = Audited,
///     exclude_fields(scratch)
/// )]
/// ```
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(entity), supports(struct_named))]
pub struct EntityAttrs {
    /// Explicit table name.
    pub table: Option<String>,

    /// Catalog prefix.
    pub catalog: Option<String>,

    /// Schema prefix.
    pub schema: Option<String>,

    /// Naming style for the table and its columns.
    pub style: Option<StyleName>,

    /// Referenced result map.
    pub result_map: Option<String>,

    /// Build a result map from the columns.
    #[darling(default)]
    pub auto_result_map: bool,

    /// Explicit description.
    pub remark: Option<String>,

    /// Free-form properties.
    #[darling(default)]
    pub props: HashMap<String, String>,

    /// Direct ancestor; must implement `Mapped` too.
    pub extends: Option<syn::Path>,

    /// Ancestors whose fields are not inherited.
    #[darling(default)]
    pub exclude_super_classes: PathList,

    /// Field types that are never mapped.
    #[darling(default)]
    pub exclude_field_types: PathList,

    /// Field names that are never mapped.
    #[darling(default)]
    pub exclude_fields: PathList
}

impl EntityAttrs {
    /// Names listed in `exclude_fields`.
    ///
    /// # Errors
    ///
    /// Entries that are multi-segment paths instead of plain names.
    pub fn excluded_field_names(&self) -> darling::Result<Vec<String>> {
        let mut errors = darling::Error::accumulator();
        let names = self
            .exclude_fields
            .iter()
            .filter_map(|path| {
                let ident = path.get_ident().ok_or_else(|| {
                    darling::Error::custom("expected a field name").with_span(path)
                });
                errors.handle(ident).map(|ident| ident.unraw().to_string())
            })
            .collect();
        errors.finish_with(names)
    }

    /// Sorted property pairs.
    pub fn sorted_props(&self) -> Vec<(&str, &str)> {
        sorted(&self.props)
    }
}

/// Sort a property map by key for stable output.
pub fn sorted(props: &HashMap<String, String>) -> Vec<(&str, &str)> {
    let mut pairs: Vec<(&str, &str)> = props
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    pairs.sort_unstable();
    pairs
}

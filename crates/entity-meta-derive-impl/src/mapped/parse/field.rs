// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field-level attribute parsing.
//!
//! A field carries at most one `#[column(...)]` and an optional
//! `#[transient]`. A bare `#[column]` is the same as no attribute.
//!
//! ```rust,ignore
//! #[column(id, gen_id = "snowflake")]
//! pub id: i64,
//!
//! #[column(name = "display_name", order_by = "asc", order_by_priority = 2)]
//! pub name: String,
//!
//! #[transient]
//! pub cached_total: u64,
//! ```

use std::collections::HashMap;

use darling::FromMeta;
use syn::{Attribute, Field, Ident, Meta, Type, ext::IdentExt};

use super::{attrs::sorted, value::OrderDirection};
use crate::utils::docs::doc_summary;

/// Column attributes parsed from `#[column(...)]`.
///
/// Flags that default to `true` at runtime are `Option<bool>` so an absent
/// value keeps the runtime default.
#[derive(Debug, Default, FromMeta)]
#[darling(default)]
pub struct ColumnAttrs {
    /// Primary key.
    pub id: bool,

    /// Explicit column name.
    pub name: Option<String>,

    /// Column accepts NULL.
    pub nullable: Option<bool>,

    /// Key read back from the driver.
    pub use_generated_keys: bool,

    /// Statement fetching the key after insert.
    pub after_sql: Option<String>,

    /// Registered key generator.
    pub gen_id: Option<String>,

    /// Generator runs before insert.
    pub gen_id_execute_before: Option<bool>,

    /// Default ordering direction.
    pub order_by: OrderDirection,

    /// Ordering priority; lower sorts first.
    pub order_by_priority: i32,

    /// Column appears in SELECT lists.
    pub selectable: Option<bool>,

    /// Column appears in INSERT lists.
    pub insertable: Option<bool>,

    /// Column appears in UPDATE lists.
    pub updatable: Option<bool>,

    /// Driver type hint.
    pub jdbc_type: Option<String>,

    /// Registered type handler.
    pub type_handler: Option<String>,

    /// Numeric scale hint.
    pub numeric_scale: Option<String>,

    /// Explicit description.
    pub remark: Option<String>,

    /// Free-form properties.
    pub props: HashMap<String, String>
}

impl ColumnAttrs {
    /// Parse one `#[column]` attribute.
    pub fn from_attr(attr: &Attribute) -> darling::Result<Self> {
        match &attr.meta {
            Meta::Path(_) => Ok(Self::default()),
            meta => Self::from_meta(meta)
        }
    }

    /// Sorted property pairs.
    pub fn sorted_props(&self) -> Vec<(&str, &str)> {
        sorted(&self.props)
    }
}

/// One named field of a mapped struct.
#[derive(Debug)]
pub struct FieldDef {
    /// Field identifier.
    pub ident: Ident,

    /// Declared type.
    pub ty: Type,

    /// Field is never persisted.
    pub transient: bool,

    /// Column attributes.
    pub column: ColumnAttrs,

    /// First line of the field's doc comment.
    pub doc: Option<String>
}

impl FieldDef {
    /// Parse field definition from syn's `Field`.
    ///
    /// # Errors
    ///
    /// Unnamed fields, malformed or repeated `#[column]`, and `#[transient]`
    /// with arguments.
    pub fn from_field(field: &Field) -> darling::Result<Self> {
        let ident = field.ident.clone().ok_or_else(|| {
            darling::Error::custom("Mapped fields must be named").with_span(field)
        })?;

        let mut errors = darling::Error::accumulator();
        let mut column: Option<ColumnAttrs> = None;
        let mut transient = false;

        for attr in &field.attrs {
            if attr.path().is_ident("transient") {
                if !matches!(attr.meta, Meta::Path(_)) {
                    errors.push(
                        darling::Error::custom("#[transient] takes no arguments").with_span(attr)
                    );
                }
                transient = true;
            } else if attr.path().is_ident("column") {
                if column.is_some() {
                    errors.push(
                        darling::Error::custom("duplicate #[column] attribute").with_span(attr)
                    );
                    continue;
                }
                column = errors.handle(ColumnAttrs::from_attr(attr));
            }
        }

        errors.finish_with(Self {
            ident,
            ty: field.ty.clone(),
            transient,
            column: column.unwrap_or_default(),
            doc: doc_summary(&field.attrs)
        })
    }

    /// Field name without a raw identifier prefix.
    #[must_use]
    pub fn name(&self) -> String {
        self.ident.unraw().to_string()
    }

    /// Explicit `remark`, else the doc summary.
    #[must_use]
    pub fn remark(&self) -> Option<&str> {
        self.column.remark.as_deref().or(self.doc.as_deref())
    }
}

// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Parsing of a `#[derive(Mapped)]` input.
//!
//! ```text
//! parse.rs (coordinator)
//! ├── attrs.rs  - #[entity(...)] via darling
//! ├── field.rs  - #[column(...)] and #[transient]
//! └── value.rs  - validated attribute values (style, order_by)
//! ```
//!
//! Everything that can be checked without the runtime registry is checked
//! here, so mistakes surface as compile errors on the offending attribute.

mod attrs;
mod field;
mod value;

pub use attrs::EntityAttrs;
use darling::FromDeriveInput;
pub use field::FieldDef;
use syn::{DeriveInput, Generics, Ident, parse_quote};

use crate::utils::docs::doc_summary;

/// Complete parsed definition of a mapped struct.
#[derive(Debug)]
pub struct MappedDef {
    /// Struct identifier.
    pub ident: Ident,

    /// Generics with a `'static` bound added to every type parameter.
    pub generics: Generics,

    /// Entity-level attributes.
    pub attrs: EntityAttrs,

    /// Explicit `remark`, else the first line of the struct's doc comment.
    pub remark: Option<String>,

    /// Names listed in `exclude_fields`.
    pub excluded_fields: Vec<String>,

    /// Named fields in declaration order.
    pub fields: Vec<FieldDef>
}

impl MappedDef {
    /// Parse the derive input.
    ///
    /// # Errors
    ///
    /// Returns every attribute error found, not only the first.
    pub fn from_derive_input(input: &DeriveInput) -> darling::Result<Self> {
        let attrs = EntityAttrs::from_derive_input(input)?;
        let excluded_fields = attrs.excluded_field_names()?;

        let fields = match &input.data {
            syn::Data::Struct(data) => match &data.fields {
                syn::Fields::Named(named) => named
                    .named
                    .iter()
                    .map(FieldDef::from_field)
                    .collect::<darling::Result<Vec<_>>>()?,
                _ => {
                    return Err(darling::Error::custom("Mapped requires named fields")
                        .with_span(&input.ident));
                }
            },
            _ => {
                return Err(
                    darling::Error::custom("Mapped can only be derived for structs")
                        .with_span(&input.ident)
                );
            }
        };

        let mut generics = input.generics.clone();
        let params: Vec<Ident> = generics.type_params().map(|p| p.ident.clone()).collect();
        if !params.is_empty() {
            let where_clause = generics.make_where_clause();
            for param in params {
                where_clause.predicates.push(parse_quote!(#param: 'static));
            }
        }

        let remark = attrs
            .remark
            .clone()
            .or_else(|| doc_summary(&input.attrs));

        Ok(Self {
            ident: input.ident.clone(),
            generics,
            attrs,
            remark,
            excluded_fields,
            fields
        })
    }
}

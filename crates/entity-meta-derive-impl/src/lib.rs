// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rust_2018_idioms
)]
#![deny(unsafe_code)]

mod mapped;
mod utils;

use proc_macro::TokenStream;

/// Derive macro that declares a struct's persistence mapping.
///
/// Generates an `entity_meta::Mapped` implementation. The descriptor itself
/// is resolved at runtime by `entity_meta::EntityBuilder`, so global defaults
/// and the key generator registry still apply.
///
/// # Entity Attributes
///
/// | Attribute | Default | Description |
/// |-----------|---------|-------------|
/// | `table` | style applied to the type name | Table name |
/// | `catalog` | global default | Catalog prefix |
/// | `schema` | global default | Schema prefix |
/// | `style` | global default | `normal`, `lower_underscore`, `upper_underscore`, `lower`, `upper` |
/// | `result_map` | none | Referenced result map |
/// | `auto_result_map` | `false` | Build a result map from the columns |
/// | `remark` | first doc line | Description |
/// | `props(k = "v")` | empty | Free-form properties |
/// | `extends = Base` | none | Inherit fields of another `Mapped` type |
/// | `exclude_super_classes(A, ..)` | empty | Stop inheritance at these ancestors |
/// | `exclude_field_types(T, ..)` | empty | Skip fields of these types |
/// | `exclude_fields(name, ..)` | empty | Skip fields by name |
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `#[column(id)]` | Primary key |
/// | `#[column(name = "..")]` | Explicit column name, bypasses the style |
/// | `#[column(nullable = false)]` | Column rejects NULL |
/// | `#[column(use_generated_keys)]` | Key read back from the driver |
/// | `#[column(after_sql = "..")]` | Key fetched by a query after insert |
/// | `#[column(gen_id = "..")]` | Key produced by a registered generator |
/// | `#[column(gen_id_execute_before = false)]` | Generator runs after insert |
/// | `#[column(order_by = "desc", order_by_priority = 1)]` | Default ordering |
/// | `#[column(selectable = false)]` | Left out of SELECT lists |
/// | `#[column(insertable = false)]` | Left out of INSERT lists |
/// | `#[column(updatable = false)]` | Left out of UPDATE lists |
/// | `#[column(jdbc_type = "..", type_handler = "..", numeric_scale = "..")]` | Driver hints |
/// | `#[column(remark = "..", props(k = "v"))]` | Description and properties |
/// | `#[transient]` | Never persisted |
///
/// # Example
///
/// ```rust,ignore
/// use entity_meta::Mapped;
///
/// #[derive(Mapped)]
/// pub struct Audited {
///     #[column(order_by = "desc")]
///     pub created_at: i64
/// }
///
/// /// Customer order.
/// #[derive(Mapped)]
/// #[entity(schema = "sales", extends = Audited)]
/// pub struct Order {
///     #[column(id, gen_id = "snowflake")]
///     pub id: i64,
///
///     #[column(name = "total_cents")]
///     pub total: i64,
///
///     #[transient]
///     pub dirty: bool
/// }
/// ```
///
/// # Compile Errors
///
/// Tuple structs, enums and unions are rejected, as are unknown styles and
/// `order_by` values.
#[proc_macro_derive(Mapped, attributes(entity, column, transient))]
pub fn derive_mapped(input: TokenStream) -> TokenStream {
    mapped::derive(input)
}

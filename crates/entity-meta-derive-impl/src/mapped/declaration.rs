// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `impl Mapped` generation.
//!
//! # Generated Code
//!
//! ```rust,ignore
//! impl ::entity_meta::Mapped for Order {
//!     fn declaration() -> ::entity_meta::TypeDecl {
//!         ::entity_meta::TypeDecl::new(::entity_meta::MappedType::of::<Self>())
//!             .extends(::entity_meta::MappedType::of::<Audited>())
//!             .rules(::entity_meta::TypeRules { .. })
//!             .field(::entity_meta::FieldDecl::new("id", ::entity_meta::MappedType::of::<i64>())
//!                 .rules(::entity_meta::FieldRules { .. }))
//!     }
//!
//!     fn register(types: &mut ::entity_meta::TypeArena) {
//!         <Audited as ::entity_meta::Mapped>::register(types);
//!         types.insert(<Self as ::entity_meta::Mapped>::declaration());
//!     }
//! }
//! ```
//!
//! Every rule is spelled out, so the runtime defaults only come into play
//! through `GlobalDefaults`.

use proc_macro2::TokenStream;
use quote::quote;

use super::parse::{FieldDef, MappedDef};

/// Generate the `Mapped` implementation.
pub fn generate(def: &MappedDef) -> TokenStream {
    let ident = &def.ident;
    let (impl_generics, ty_generics, where_clause) = def.generics.split_for_impl();

    let extends = def.attrs.extends.as_ref().map(|parent| {
        quote! { .extends(::entity_meta::MappedType::of::<#parent>()) }
    });
    let register_parent = def.attrs.extends.as_ref().map(|parent| {
        quote! { <#parent as ::entity_meta::Mapped>::register(types); }
    });
    let rules = type_rules(def);
    let fields = def.fields.iter().map(field_decl);

    quote! {
        impl #impl_generics ::entity_meta::Mapped for #ident #ty_generics #where_clause {
            fn declaration() -> ::entity_meta::TypeDecl {
                ::entity_meta::TypeDecl::new(::entity_meta::MappedType::of::<Self>())
                    #extends
                    .rules(#rules)
                    #(.field(#fields))*
            }

            fn register(types: &mut ::entity_meta::TypeArena) {
                #register_parent
                types.insert(<Self as ::entity_meta::Mapped>::declaration());
            }
        }
    }
}

fn type_rules(def: &MappedDef) -> TokenStream {
    let attrs = &def.attrs;
    let table = opt_string(attrs.table.as_deref());
    let catalog = opt_string(attrs.catalog.as_deref());
    let schema = opt_string(attrs.schema.as_deref());
    let style = opt_string(attrs.style.as_ref().map(|s| s.0.as_str()));
    let result_map = opt_string(attrs.result_map.as_deref());
    let auto_result_map = attrs.auto_result_map;
    let remark = opt_string(def.remark.as_deref());
    let props = props(&attrs.sorted_props());

    let super_classes = attrs.exclude_super_classes.iter();
    let field_types = attrs.exclude_field_types.iter();
    let field_names = &def.excluded_fields;

    quote! {
        ::entity_meta::TypeRules {
            table: #table,
            catalog: #catalog,
            schema: #schema,
            style: #style,
            result_map: #result_map,
            auto_result_map: #auto_result_map,
            remark: #remark,
            props: #props,
            exclusions: ::entity_meta::ExclusionRule::default()
                #(.super_class(::entity_meta::MappedType::of::<#super_classes>()))*
                #(.field_type(::entity_meta::MappedType::of::<#field_types>()))*
                #(.field(#field_names))*
        }
    }
}

fn field_decl(field: &FieldDef) -> TokenStream {
    let name = field.name();
    let ty = &field.ty;
    let column = &field.column;

    let column_name = opt_string(column.name.as_deref());
    let id = column.id;
    let nullable = column.nullable.unwrap_or(true);
    let use_generated_keys = column.use_generated_keys;
    let after_sql = opt_string(column.after_sql.as_deref());
    let gen_id = opt_string(column.gen_id.as_deref());
    let gen_id_execute_before = column.gen_id_execute_before.unwrap_or(true);
    let order_by = column.order_by.to_tokens();
    let order_by_priority = column.order_by_priority;
    let selectable = column.selectable.unwrap_or(true);
    let insertable = column.insertable.unwrap_or(true);
    let updatable = column.updatable.unwrap_or(true);
    let jdbc_type = opt_string(column.jdbc_type.as_deref());
    let type_handler = opt_string(column.type_handler.as_deref());
    let numeric_scale = opt_string(column.numeric_scale.as_deref());
    let remark = opt_string(field.remark());
    let props = props(&column.sorted_props());
    let transient = field.transient.then(|| quote! { .transient() });

    quote! {
        ::entity_meta::FieldDecl::new(#name, ::entity_meta::MappedType::of::<#ty>())
            .rules(::entity_meta::FieldRules {
                column: #column_name,
                id: #id,
                nullable: #nullable,
                use_generated_keys: #use_generated_keys,
                after_sql: #after_sql,
                gen_id: #gen_id,
                gen_id_execute_before: #gen_id_execute_before,
                order_by: #order_by,
                order_by_priority: #order_by_priority,
                selectable: #selectable,
                insertable: #insertable,
                updatable: #updatable,
                jdbc_type: #jdbc_type,
                type_handler: #type_handler,
                numeric_scale: #numeric_scale,
                remark: #remark,
                props: #props
            })
            #transient
    }
}

fn opt_string(value: Option<&str>) -> TokenStream {
    match value {
        Some(value) => quote! { ::core::option::Option::Some(::std::string::String::from(#value)) },
        None => quote! { ::core::option::Option::None }
    }
}

fn props(pairs: &[(&str, &str)]) -> TokenStream {
    let entries = pairs.iter().map(|(key, value)| {
        quote! { (::std::string::String::from(#key), ::std::string::String::from(#value)) }
    });
    quote! { ::std::collections::BTreeMap::from([#(#entries),*]) }
}

// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field collection along the inheritance chain.
//!
//! Walks from the mapped type up through its ancestors and gathers the fields
//! that become columns.
//!
//! # Rules
//!
//! | Check | Effect |
//! |-------|--------|
//! | Parent listed in `exclusions.super_classes` | Stop; nothing above is scanned |
//! | Name already declared at a more-derived level | Shadowed, dropped |
//! | `transient` | Skipped |
//! | Name in `exclusions.fields` | Skipped |
//! | Value type in `exclusions.field_types` | Skipped |
//!
//! Only the mapped type's own exclusion rules apply. Output order is
//! most-derived level first, declaration order within a level.

use std::collections::HashSet;

use tracing::trace;

use crate::{
    error::Result,
    types::{FieldDecl, MappedType, TypeArena}
};

/// A field that survived collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectedField<'a> {
    /// Type that declares the field.
    pub declaring: &'a MappedType,

    /// The field itself.
    pub field: &'a FieldDecl
}

/// Collect the mapped fields of `ty`.
///
/// Runs in time linear in the number of declared fields along the chain.
///
/// # Errors
///
/// [`Error::UnknownType`](crate::Error::UnknownType) if `ty` or a scanned
/// ancestor is not declared. Ancestors beyond an excluded one are never
/// looked up.
pub fn collect<'a>(types: &'a TypeArena, ty: &MappedType) -> Result<Vec<CollectedField<'a>>> {
    let root = types.require(ty)?;
    let exclusions = &root.rules.exclusions;

    let mut declared: HashSet<&str> = HashSet::new();
    let mut collected = Vec::new();
    let mut level = Some(root);

    while let Some(decl) = level {
        for field in &decl.fields {
            if !declared.insert(field.name.as_str()) {
                trace!(entity = %ty, declaring = %decl.ty, field = %field.name, "field shadowed");
                continue;
            }
            if field.transient
                || exclusions.fields.contains(&field.name)
                || exclusions.field_types.contains(&field.ty)
            {
                trace!(entity = %ty, declaring = %decl.ty, field = %field.name, "field excluded");
                continue;
            }
            collected.push(CollectedField {
                declaring: &decl.ty,
                field
            });
        }

        level = match &decl.parent {
            Some(parent) if exclusions.super_classes.contains(parent) => {
                trace!(entity = %ty, ancestor = %parent, "ancestor excluded, stopping");
                None
            }
            Some(parent) => Some(types.require(parent)?),
            None => None
        };
    }

    Ok(collected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::Error,
        rules::{ExclusionRule, TypeRules},
        types::TypeDecl
    };

    fn string() -> MappedType {
        MappedType::new("alloc::string::String")
    }

    fn int() -> MappedType {
        MappedType::new("i64")
    }

    fn field(name: &str) -> FieldDecl {
        FieldDecl::new(name, int())
    }

    /// `Order -> Audited -> Base`.
    fn hierarchy(exclusions: ExclusionRule) -> TypeArena {
        let mut types = TypeArena::new();
        types
            .insert(
                TypeDecl::new("app::Order".into())
                    .extends("app::Audited".into())
                    .rules(TypeRules {
                        exclusions,
                        ..TypeRules::default()
                    })
                    .field(field("id"))
                    .field(FieldDecl::new("note", string()))
                    .field(field("total"))
            )
            .insert(
                TypeDecl::new("app::Audited".into())
                    .extends("app::Base".into())
                    .field(field("createdAt"))
                    .field(field("total"))
            )
            .insert(
                TypeDecl::new("app::Base".into())
                    .field(field("version"))
                    .field(field("tenant"))
            );
        types
    }

    fn names(fields: &[CollectedField<'_>]) -> Vec<String> {
        fields.iter().map(|f| f.field.name.clone()).collect()
    }

    #[test]
    fn most_derived_fields_first() {
        let types = hierarchy(ExclusionRule::default());
        let fields = collect(&types, &"app::Order".into()).unwrap();
        assert_eq!(
            names(&fields),
            ["id", "note", "total", "createdAt", "version", "tenant"]
        );
    }

    #[test]
    fn shadowed_field_keeps_derived_declaration() {
        let types = hierarchy(ExclusionRule::default());
        let fields = collect(&types, &"app::Order".into()).unwrap();
        let total: Vec<_> = fields.iter().filter(|f| f.field.name == "total").collect();
        assert_eq!(total.len(), 1);
        assert_eq!(total[0].declaring.name(), "app::Order");
    }

    #[test]
    fn excluded_ancestor_stops_traversal() {
        let types = hierarchy(ExclusionRule::default().super_class("app::Audited".into()));
        let fields = collect(&types, &"app::Order".into()).unwrap();
        assert_eq!(names(&fields), ["id", "note", "total"]);
    }

    #[test]
    fn excluded_top_ancestor_keeps_middle() {
        let types = hierarchy(ExclusionRule::default().super_class("app::Base".into()));
        let fields = collect(&types, &"app::Order".into()).unwrap();
        assert_eq!(names(&fields), ["id", "note", "total", "createdAt"]);
    }

    #[test]
    fn excluded_ancestor_need_not_be_declared() {
        let mut types = TypeArena::new();
        types.insert(
            TypeDecl::new("app::Order".into())
                .extends("ext::Unknown".into())
                .rules(TypeRules {
                    exclusions: ExclusionRule::default().super_class("ext::Unknown".into()),
                    ..TypeRules::default()
                })
                .field(field("id"))
        );
        assert_eq!(names(&collect(&types, &"app::Order".into()).unwrap()), ["id"]);
    }

    #[test]
    fn missing_ancestor_is_an_error() {
        let mut types = TypeArena::new();
        types.insert(TypeDecl::new("app::Order".into()).extends("ext::Unknown".into()));
        assert_eq!(
            collect(&types, &"app::Order".into()).unwrap_err(),
            Error::UnknownType("ext::Unknown".into())
        );
    }

    #[test]
    fn excluded_field_names_apply_at_every_level() {
        let types = hierarchy(ExclusionRule::default().field("version").field("note"));
        let fields = collect(&types, &"app::Order".into()).unwrap();
        assert_eq!(names(&fields), ["id", "total", "createdAt", "tenant"]);
    }

    #[test]
    fn excluded_field_types() {
        let types = hierarchy(ExclusionRule::default().field_type(string()));
        let fields = collect(&types, &"app::Order".into()).unwrap();
        assert!(!names(&fields).contains(&"note".to_string()));
        assert_eq!(fields.len(), 5);
    }

    #[test]
    fn transient_fields_are_skipped() {
        let mut types = TypeArena::new();
        types.insert(
            TypeDecl::new("app::Order".into())
                .field(field("id"))
                .field(field("cached").transient())
        );
        assert_eq!(names(&collect(&types, &"app::Order".into()).unwrap()), ["id"]);
    }

    #[test]
    fn skipped_derived_field_still_shadows_inherited() {
        let mut types = TypeArena::new();
        types
            .insert(
                TypeDecl::new("app::Order".into())
                    .extends("app::Base".into())
                    .field(field("version").transient())
            )
            .insert(TypeDecl::new("app::Base".into()).field(field("version")));
        assert!(collect(&types, &"app::Order".into()).unwrap().is_empty());
    }

    #[test]
    fn empty_type_collects_nothing() {
        let mut types = TypeArena::new();
        types.insert(TypeDecl::new("app::Empty".into()));
        assert!(collect(&types, &"app::Empty".into()).unwrap().is_empty());
    }

    #[test]
    fn deep_chain_is_collected() {
        let mut types = TypeArena::new();
        for level in 0..1_000 {
            let mut decl = TypeDecl::new(MappedType::new(format!("t{level}")))
                .field(field(&format!("f{level}")));
            if level > 0 {
                decl = decl.extends(MappedType::new(format!("t{}", level - 1)));
            }
            types.insert(decl);
        }
        let fields = collect(&types, &"t999".into()).unwrap();
        assert_eq!(fields.len(), 1_000);
        assert_eq!(fields[0].field.name, "f999");
        assert_eq!(fields[999].field.name, "f0");
    }
}

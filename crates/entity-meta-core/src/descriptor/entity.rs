// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity descriptors and the builder that produces them.
//!
//! # Pipeline
//!
//! ```text
//! TypeDecl ──► collect ──► ColumnDescriptor::build (style, key ladder, registry)
//!    │                                   │
//!    └── table identity ─────────────────┴──► EntityDescriptor
//! ```
//!
//! # Table Identity
//!
//! | Part | Source |
//! |------|--------|
//! | table | explicit `table`, else style applied to the simple type name |
//! | catalog | entity `catalog`, else global default, else omitted |
//! | schema | entity `schema`, else global default, else omitted |
//!
//! The qualified name joins the present parts with `.`: `c.s.order`,
//! `s.order`, `c.order` or just `order`.

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, trace};

use super::{
    column::{ColumnContext, ColumnDescriptor},
    validate_props
};
use crate::{
    collect::collect,
    config::GlobalDefaults,
    error::{Error, Result},
    naming::NamingStyle,
    registry::Registry,
    rules::non_empty,
    types::{MappedType, TypeArena}
};

/// Resolved mapping of one type.
///
/// Built once, never mutated. Shared between threads as
/// `Arc<EntityDescriptor>` by the [`DescriptorCache`](crate::DescriptorCache).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityDescriptor {
    ty:              MappedType,
    table:           String,
    catalog:         Option<String>,
    schema:          Option<String>,
    qualified_table: String,
    style:           NamingStyle,
    result_map:      Option<String>,
    auto_result_map: bool,
    remark:          Option<String>,
    columns:         Vec<ColumnDescriptor>,
    ordering:        Vec<usize>,
    props:           BTreeMap<String, String>
}

impl EntityDescriptor {
    /// Identity of the mapped type.
    #[must_use]
    pub const fn ty(&self) -> &MappedType {
        &self.ty
    }

    /// Bare table name.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Effective catalog.
    #[must_use]
    pub fn catalog(&self) -> Option<&str> {
        self.catalog.as_deref()
    }

    /// Effective schema.
    #[must_use]
    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    /// Table name prefixed with catalog and schema, e.g. `c.s.order`.
    #[must_use]
    pub fn qualified_table(&self) -> &str {
        &self.qualified_table
    }

    /// Naming style used for this entity.
    #[must_use]
    pub const fn style(&self) -> NamingStyle {
        self.style
    }

    /// Referenced result map.
    #[must_use]
    pub fn result_map(&self) -> Option<&str> {
        self.result_map.as_deref()
    }

    /// Check if a result map should be generated from the columns.
    #[must_use]
    pub const fn auto_result_map(&self) -> bool {
        self.auto_result_map
    }

    /// Free-form description.
    #[must_use]
    pub fn remark(&self) -> Option<&str> {
        self.remark.as_deref()
    }

    /// Entity-level properties.
    #[must_use]
    pub const fn props(&self) -> &BTreeMap<String, String> {
        &self.props
    }

    /// Single entity-level property.
    #[must_use]
    pub fn prop(&self, name: &str) -> Option<&str> {
        self.props.get(name).map(String::as_str)
    }

    /// All columns in collection order.
    #[must_use]
    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// Column mapped from `field`.
    #[must_use]
    pub fn column(&self, field: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.field() == field)
    }

    /// Check if the entity maps no columns at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Primary key columns.
    pub fn id_columns(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.columns.iter().filter(|c| c.is_primary_key())
    }

    /// Columns that appear in SELECT lists.
    pub fn select_columns(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.columns.iter().filter(|c| c.is_selectable())
    }

    /// Columns that appear in INSERT lists.
    pub fn insert_columns(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.columns.iter().filter(|c| c.is_insertable())
    }

    /// Non-key columns that appear in UPDATE SET clauses.
    pub fn update_columns(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.columns
            .iter()
            .filter(|c| c.is_updatable() && !c.is_primary_key())
    }

    /// Explicitly ordered columns, by priority then collection order.
    pub fn order_by_columns(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.ordering.iter().map(|&index| &self.columns[index])
    }

    /// Default ORDER BY list, e.g. `created_at DESC, id ASC`.
    #[must_use]
    pub fn order_by_clause(&self) -> Option<String> {
        let parts: Vec<String> = self
            .order_by_columns()
            .filter_map(ColumnDescriptor::order_fragment)
            .collect();
        (!parts.is_empty()).then(|| parts.join(", "))
    }
}

/// Builds [`EntityDescriptor`]s from declared types.
///
/// Pure: the same arena, defaults and registry always give the same
/// descriptor.
///
/// # Example
///
/// ```rust
/// use entity_meta_core::{
///     EntityBuilder, FieldDecl, FieldRules, GlobalDefaults, MappedType, TypeArena, TypeDecl,
///     Unchecked
/// };
///
/// let mut types = TypeArena::new();
/// types.insert(
///     TypeDecl::new(MappedType::new("shop::OrderItem"))
///         .field(FieldDecl::new("itemId", MappedType::of::<i64>()).rules(FieldRules::primary_key()))
/// );
///
/// let defaults = GlobalDefaults::default();
/// let builder = EntityBuilder::new(&types, &defaults, &Unchecked);
/// let entity = builder.build(&MappedType::new("shop::OrderItem")).unwrap();
///
/// assert_eq!(entity.table(), "order_item");
/// assert_eq!(entity.columns()[0].column(), "item_id");
/// ```
#[derive(Clone, Copy)]
pub struct EntityBuilder<'a> {
    types:    &'a TypeArena,
    defaults: &'a GlobalDefaults,
    registry: &'a dyn Registry
}

impl<'a> EntityBuilder<'a> {
    /// Create a builder over declared types, global defaults and a registry.
    pub fn new(
        types: &'a TypeArena,
        defaults: &'a GlobalDefaults,
        registry: &'a dyn Registry
    ) -> Self {
        Self {
            types,
            defaults,
            registry
        }
    }

    /// Resolve the descriptor of `ty`.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownType`] for undeclared types or ancestors
    /// - [`Error::Configuration`] for unknown styles or malformed properties
    /// - [`Error::DuplicateColumn`] when two fields share a column name
    /// - [`Error::UnresolvedReference`] for unknown generators or handlers
    /// - [`Error::AmbiguousKeyStrategy`] in strict mode
    pub fn build(&self, ty: &MappedType) -> Result<EntityDescriptor> {
        let decl = self.types.require(ty)?;
        let rules = &decl.rules;

        let style = NamingStyle::select(rules.style.as_deref(), &self.defaults.style)?;
        let table = match non_empty(rules.table.as_deref()) {
            Some(explicit) => explicit.to_string(),
            None => style.apply(ty.simple_name())
        };
        if table.is_empty() {
            return Err(Error::configuration(format_args!(
                "type `{ty}` resolves to an empty table name"
            )));
        }
        let catalog = non_empty(rules.catalog.as_deref())
            .or_else(|| self.defaults.catalog())
            .map(str::to_string);
        let schema = non_empty(rules.schema.as_deref())
            .or_else(|| self.defaults.schema())
            .map(str::to_string);
        let qualified_table = [catalog.as_deref(), schema.as_deref(), Some(table.as_str())]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(".");

        validate_props(&rules.props, ty, None)?;

        let ctx = ColumnContext {
            entity: ty,
            style,
            entity_props: &rules.props,
            registry: self.registry,
            strict: self.defaults.strict_key_strategy
        };
        let collected = collect(self.types, ty)?;
        let mut columns = Vec::with_capacity(collected.len());
        let mut owners: HashMap<String, &str> = HashMap::with_capacity(collected.len());
        for field in &collected {
            let column = ColumnDescriptor::build(field, &ctx)?;
            let owner = field.field.name.as_str();
            if let Some(first) = owners.insert(column.column().to_string(), owner) {
                return Err(Error::DuplicateColumn {
                    entity: ty.clone(),
                    column: column.column().to_string(),
                    first:  first.to_string(),
                    second: field.field.name.clone()
                });
            }
            trace!(
                entity = %ty,
                declaring = %field.declaring,
                field = column.field(),
                column = column.column(),
                "column resolved"
            );
            columns.push(column);
        }

        let mut ordering: Vec<usize> = columns
            .iter()
            .enumerate()
            .filter(|(_, column)| column.order_by().is_ordered())
            .map(|(index, _)| index)
            .collect();
        ordering.sort_by_key(|&index| columns[index].order_priority());

        debug!(
            entity = %ty,
            table = %qualified_table,
            style = %style,
            columns = columns.len(),
            "entity descriptor built"
        );

        Ok(EntityDescriptor {
            ty: ty.clone(),
            table,
            catalog,
            schema,
            qualified_table,
            style,
            result_map: non_empty(rules.result_map.as_deref()).map(str::to_string),
            auto_result_map: rules.auto_result_map,
            remark: non_empty(rules.remark.as_deref()).map(str::to_string),
            columns,
            ordering,
            props: rules.props.clone()
        })
    }
}

// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Column descriptors.
//!
//! # Resolution
//!
//! | Attribute | Source |
//! |-----------|--------|
//! | name | explicit `column`, else entity style applied to the field name |
//! | nullable | declared value, forced `false` for primary keys |
//! | key strategy | [`key::resolve`](crate::key::resolve) ladder |
//! | props | entity props overridden by column props |
//! | type handler / generator | must resolve through the [`Registry`] |

use std::collections::BTreeMap;

use super::validate_props;
use crate::{
    collect::CollectedField,
    error::{Error, ReferenceKind, Result},
    key::{self, KeyStrategy},
    naming::NamingStyle,
    registry::Registry,
    rules::{OrderBy, non_empty},
    types::MappedType
};

/// Resolved metadata of one column. Owned by its entity descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnDescriptor {
    field:          String,
    column:         String,
    primary_key:    bool,
    nullable:       bool,
    key_strategy:   KeyStrategy,
    order_by:       OrderBy,
    order_priority: i32,
    selectable:     bool,
    insertable:     bool,
    updatable:      bool,
    jdbc_type:      Option<String>,
    type_handler:   Option<String>,
    numeric_scale:  Option<String>,
    remark:         Option<String>,
    props:          BTreeMap<String, String>
}

/// Entity-wide inputs shared by every column of one build.
pub(crate) struct ColumnContext<'a> {
    pub entity:       &'a MappedType,
    pub style:        NamingStyle,
    pub entity_props: &'a BTreeMap<String, String>,
    pub registry:     &'a dyn Registry,
    pub strict:       bool
}

impl ColumnContext<'_> {
    fn require(&self, kind: ReferenceKind, reference: &str, field: &str) -> Result<()> {
        if self.registry.resolve(kind, reference).is_found() {
            return Ok(());
        }
        Err(Error::UnresolvedReference {
            kind,
            reference: reference.to_string(),
            entity: self.entity.clone(),
            field: field.to_string()
        })
    }
}

impl ColumnDescriptor {
    /// Build the descriptor of one collected field.
    pub(crate) fn build(collected: &CollectedField<'_>, ctx: &ColumnContext<'_>) -> Result<Self> {
        let field = collected.field;
        let rules = &field.rules;
        let name = field.name.as_str();

        let column = match non_empty(rules.column.as_deref()) {
            Some(explicit) => explicit.to_string(),
            None => ctx.style.apply(name)
        };
        if column.is_empty() {
            return Err(Error::configuration(format_args!(
                "field `{name}` of `{}` resolves to an empty column name",
                ctx.entity
            )));
        }

        let key_strategy = key::resolve(ctx.entity, name, rules, ctx.strict)?;
        if let Some(generator) = key_strategy.generator() {
            ctx.require(ReferenceKind::KeyGenerator, generator, name)?;
        }

        let type_handler = non_empty(rules.type_handler.as_deref()).map(str::to_string);
        if let Some(handler) = &type_handler {
            ctx.require(ReferenceKind::TypeHandler, handler, name)?;
        }

        validate_props(&rules.props, ctx.entity, Some(name))?;
        let mut props = ctx.entity_props.clone();
        props.extend(rules.props.iter().map(|(k, v)| (k.clone(), v.clone())));

        Ok(Self {
            field: name.to_string(),
            column,
            primary_key: rules.id,
            nullable: rules.nullable && !rules.id,
            key_strategy,
            order_by: rules.order_by,
            order_priority: rules.order_by_priority,
            selectable: rules.selectable,
            insertable: rules.insertable,
            updatable: rules.updatable,
            jdbc_type: non_empty(rules.jdbc_type.as_deref()).map(str::to_string),
            type_handler,
            numeric_scale: non_empty(rules.numeric_scale.as_deref()).map(str::to_string),
            remark: non_empty(rules.remark.as_deref()).map(str::to_string),
            props
        })
    }

    /// Field name as declared.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Resolved column name.
    #[must_use]
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Check if this column is (part of) the primary key.
    #[must_use]
    pub const fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    /// Check if the column accepts NULL. Always `false` for primary keys.
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Key generation strategy, [`KeyStrategy::None`] for non-key columns.
    #[must_use]
    pub const fn key_strategy(&self) -> &KeyStrategy {
        &self.key_strategy
    }

    /// Ordering direction.
    #[must_use]
    pub const fn order_by(&self) -> OrderBy {
        self.order_by
    }

    /// Ordering priority, lower sorts first.
    #[must_use]
    pub const fn order_priority(&self) -> i32 {
        self.order_priority
    }

    /// Check if the column appears in SELECT lists.
    #[must_use]
    pub const fn is_selectable(&self) -> bool {
        self.selectable
    }

    /// Check if the column appears in INSERT lists.
    #[must_use]
    pub const fn is_insertable(&self) -> bool {
        self.insertable
    }

    /// Check if the column appears in UPDATE SET clauses.
    #[must_use]
    pub const fn is_updatable(&self) -> bool {
        self.updatable
    }

    /// Database type hint.
    #[must_use]
    pub fn jdbc_type(&self) -> Option<&str> {
        self.jdbc_type.as_deref()
    }

    /// Type handler reference.
    #[must_use]
    pub fn type_handler(&self) -> Option<&str> {
        self.type_handler.as_deref()
    }

    /// Numeric scale hint.
    #[must_use]
    pub fn numeric_scale(&self) -> Option<&str> {
        self.numeric_scale.as_deref()
    }

    /// Free-form description.
    #[must_use]
    pub fn remark(&self) -> Option<&str> {
        self.remark.as_deref()
    }

    /// Merged properties.
    #[must_use]
    pub const fn props(&self) -> &BTreeMap<String, String> {
        &self.props
    }

    /// Single property value.
    #[must_use]
    pub fn prop(&self, name: &str) -> Option<&str> {
        self.props.get(name).map(String::as_str)
    }

    /// `column ASC` / `column DESC` fragment, `None` when unordered.
    #[must_use]
    pub fn order_fragment(&self) -> Option<String> {
        self.order_by
            .as_sql()
            .map(|direction| format!("{} {direction}", self.column))
    }
}

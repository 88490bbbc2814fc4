// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Declared mapping rules.
//!
//! These are plain value objects. How they are declared (the `Mapped` derive,
//! a config file, hand-written code) does not matter to the resolver.
//!
//! | Type | Level | Carries |
//! |------|-------|---------|
//! | [`TypeRules`] | type | Table identity, style, result map, props, exclusions |
//! | [`ExclusionRule`] | type | Excluded ancestors, field types, field names |
//! | [`FieldRules`] | field | Column identity, key strategy inputs, flags, ordering |

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    str::FromStr
};

use crate::{error::Error, types::MappedType};

/// Sort direction of a column in the entity's default ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OrderBy {
    /// Ascending order.
    Ascending,

    /// Descending order.
    Descending,

    /// Column does not take part in ordering.
    #[default]
    Unordered
}

impl OrderBy {
    /// Check if the column participates in explicit ordering.
    #[must_use]
    pub const fn is_ordered(&self) -> bool {
        !matches!(self, Self::Unordered)
    }

    /// Convert to SQL keyword. `None` for unordered columns.
    #[must_use]
    pub const fn as_sql(&self) -> Option<&'static str> {
        match self {
            Self::Ascending => Some("ASC"),
            Self::Descending => Some("DESC"),
            Self::Unordered => None
        }
    }
}

impl FromStr for OrderBy {
    type Err = Error;

    /// Parse `"asc"`, `"desc"` or an empty string, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            "" => Ok(Self::Unordered),
            other => Err(Error::configuration(format_args!(
                "unknown order direction `{other}`, expected `asc` or `desc`"
            )))
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql().unwrap_or(""))
    }
}

/// Filters applied while collecting fields along the inheritance chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionRule {
    /// Ancestors at which collection stops.
    pub super_classes: BTreeSet<MappedType>,

    /// Field value types that are never mapped.
    pub field_types: BTreeSet<MappedType>,

    /// Field names that are never mapped.
    pub fields: BTreeSet<String>
}

impl ExclusionRule {
    /// Check if no exclusion is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.super_classes.is_empty() && self.field_types.is_empty() && self.fields.is_empty()
    }

    /// Stop traversal at `ty`.
    #[must_use]
    pub fn super_class(mut self, ty: MappedType) -> Self {
        self.super_classes.insert(ty);
        self
    }

    /// Skip every field whose value type is `ty`.
    #[must_use]
    pub fn field_type(mut self, ty: MappedType) -> Self {
        self.field_types.insert(ty);
        self
    }

    /// Skip every field named `name`.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.fields.insert(name.into());
        self
    }
}

/// Type-level rules: table identity and entity-wide settings.
///
/// Every `None` falls back to the global defaults or to the naming style.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeRules {
    /// Explicit table name, used verbatim.
    pub table: Option<String>,

    /// Catalog prefix.
    pub catalog: Option<String>,

    /// Schema prefix.
    pub schema: Option<String>,

    /// Naming style for the table and all its columns.
    pub style: Option<String>,

    /// Reference to an existing result map.
    pub result_map: Option<String>,

    /// Request an automatically generated result map.
    pub auto_result_map: bool,

    /// Free-form description. Carried through, never interpreted.
    pub remark: Option<String>,

    /// Entity-level properties, inherited by every column.
    pub props: BTreeMap<String, String>,

    /// Collection filters.
    pub exclusions: ExclusionRule
}

/// Field-level rules: column identity, key generation, flags.
///
/// `nullable`, `selectable`, `insertable`, `updatable` and
/// `gen_id_execute_before` default to `true`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRules {
    /// Explicit column name, used verbatim.
    pub column: Option<String>,

    /// Field is (part of) the primary key.
    pub id: bool,

    /// Column accepts NULL. Ignored for primary keys.
    pub nullable: bool,

    /// Key strategy 1: database generated keys.
    pub use_generated_keys: bool,

    /// Key strategy 2: SQL fetching the key after insert.
    pub after_sql: Option<String>,

    /// Key strategy 3: application-side generator reference.
    pub gen_id: Option<String>,

    /// Run the generator before the insert (otherwise after).
    pub gen_id_execute_before: bool,

    /// Ordering direction.
    pub order_by: OrderBy,

    /// Ordering priority, lower sorts first.
    pub order_by_priority: i32,

    /// Column appears in SELECT lists.
    pub selectable: bool,

    /// Column appears in INSERT lists.
    pub insertable: bool,

    /// Column appears in UPDATE SET clauses.
    pub updatable: bool,

    /// Database type hint, e.g. `VARCHAR`.
    pub jdbc_type: Option<String>,

    /// Type handler reference.
    pub type_handler: Option<String>,

    /// Numeric scale hint, e.g. `2`.
    pub numeric_scale: Option<String>,

    /// Free-form description.
    pub remark: Option<String>,

    /// Column-level properties, override entity-level ones.
    pub props: BTreeMap<String, String>
}

impl Default for FieldRules {
    fn default() -> Self {
        Self {
            column:                None,
            id:                    false,
            nullable:              true,
            use_generated_keys:    false,
            after_sql:             None,
            gen_id:                None,
            gen_id_execute_before: true,
            order_by:              OrderBy::Unordered,
            order_by_priority:     0,
            selectable:            true,
            insertable:            true,
            updatable:             true,
            jdbc_type:             None,
            type_handler:          None,
            numeric_scale:         None,
            remark:                None,
            props:                 BTreeMap::new()
        }
    }
}

impl FieldRules {
    /// Rules for a plain primary key column without generation.
    #[must_use]
    pub fn primary_key() -> Self {
        Self {
            id: true,
            ..Self::default()
        }
    }

    /// Set an explicit column name.
    #[must_use]
    pub fn column(mut self, name: impl Into<String>) -> Self {
        self.column = Some(name.into());
        self
    }

    /// Set ordering direction and priority.
    #[must_use]
    pub fn order(mut self, order_by: OrderBy, priority: i32) -> Self {
        self.order_by = order_by;
        self.order_by_priority = priority;
        self
    }
}

/// Treat empty strings as absent.
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

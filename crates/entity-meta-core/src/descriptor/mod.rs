// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Resolved, immutable descriptors.
//!
//! ```text
//! descriptor/
//! ├── mod.rs     - shared property validation
//! ├── column.rs  - ColumnDescriptor and the column builder
//! └── entity.rs  - EntityDescriptor and EntityBuilder
//! ```

mod column;
mod entity;

use std::collections::BTreeMap;

pub use column::ColumnDescriptor;
pub use entity::{EntityBuilder, EntityDescriptor};

use crate::{
    error::{Error, Result},
    types::MappedType
};

/// Reject properties with blank names.
fn validate_props(
    props: &BTreeMap<String, String>,
    entity: &MappedType,
    field: Option<&str>
) -> Result<()> {
    if props.keys().any(|name| name.trim().is_empty()) {
        let owner = match field {
            Some(field) => format!("{entity}.{field}"),
            None => entity.to_string()
        };
        return Err(Error::configuration(format_args!(
            "malformed property on `{owner}`: empty property name"
        )));
    }
    Ok(())
}

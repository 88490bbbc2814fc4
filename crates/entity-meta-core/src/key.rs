// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Primary key generation strategy.
//!
//! Resolved once per column at build time from a fixed priority ladder;
//! the first match wins:
//!
//! | Priority | Declared | Strategy |
//! |----------|----------|----------|
//! | 1 | `use_generated_keys` | [`KeyStrategy::UseGeneratedKeys`] |
//! | 2 | non-empty `after_sql` | [`KeyStrategy::PostInsertQuery`] |
//! | 3 | non-empty `gen_id` | [`KeyStrategy::Generated`] |
//! | 4 | nothing | [`KeyStrategy::None`] |

use tracing::{debug, warn};

use crate::{
    error::{Error, Result},
    rules::{FieldRules, non_empty},
    types::MappedType
};

/// How a primary key value is obtained on insert.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeyStrategy {
    /// The caller supplies the value.
    #[default]
    None,

    /// The database generates the key and the driver returns it.
    UseGeneratedKeys,

    /// Run this SQL after the insert to fetch the key.
    PostInsertQuery(String),

    /// Application-side generator.
    Generated {
        /// Generator reference, resolved through the registry.
        generator:      String,
        /// Run before the insert (otherwise after).
        execute_before: bool
    }
}

impl KeyStrategy {
    /// Check if no generation happens.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Generator reference, when the strategy uses one.
    #[must_use]
    pub fn generator(&self) -> Option<&str> {
        match self {
            Self::Generated {
                generator, ..
            } => Some(generator),
            _ => None
        }
    }
}

/// Resolve the key strategy of one field.
///
/// Non-key fields always resolve to [`KeyStrategy::None`]. When a key field
/// configures more than one strategy the ladder picks the winner and a
/// warning names what was ignored, unless `strict` is set.
///
/// # Errors
///
/// [`Error::AmbiguousKeyStrategy`] in strict mode when more than one
/// strategy is configured.
pub fn resolve(
    entity: &MappedType,
    field: &str,
    rules: &FieldRules,
    strict: bool
) -> Result<KeyStrategy> {
    let after_sql = non_empty(rules.after_sql.as_deref());
    let gen_id = non_empty(rules.gen_id.as_deref());

    if !rules.id {
        if rules.use_generated_keys || after_sql.is_some() || gen_id.is_some() {
            debug!(%entity, field, "key generation settings on a non-key field ignored");
        }
        return Ok(KeyStrategy::None);
    }

    let configured = [rules.use_generated_keys, after_sql.is_some(), gen_id.is_some()]
        .into_iter()
        .filter(|set| *set)
        .count();
    if configured > 1 {
        if strict {
            return Err(Error::AmbiguousKeyStrategy {
                entity: entity.clone(),
                field:  field.to_string()
            });
        }
        warn!(
            %entity,
            field,
            use_generated_keys = rules.use_generated_keys,
            after_sql,
            gen_id,
            "several key strategies configured, lower priority ones ignored"
        );
    }

    let strategy = if rules.use_generated_keys {
        KeyStrategy::UseGeneratedKeys
    } else if let Some(sql) = after_sql {
        KeyStrategy::PostInsertQuery(sql.to_string())
    } else if let Some(generator) = gen_id {
        KeyStrategy::Generated {
            generator:      generator.to_string(),
            execute_before: rules.gen_id_execute_before
        }
    } else {
        KeyStrategy::None
    };
    Ok(strategy)
}

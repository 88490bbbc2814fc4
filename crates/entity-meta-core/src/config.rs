// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Process-wide fallback values.
//!
//! The resolver never reads ambient state; callers pass [`GlobalDefaults`]
//! explicitly, typically loaded once from the application's configuration.
//!
//! # Property Keys
//!
//! | Key | Default | Field |
//! |-----|---------|-------|
//! | `entity.style` | `lower_underscore` | [`GlobalDefaults::style`] |
//! | `entity.catalog` | none | [`GlobalDefaults::catalog`] |
//! | `entity.schema` | none | [`GlobalDefaults::schema`] |
//! | `entity.strict-key-strategy` | `false` | [`GlobalDefaults::strict_key_strategy`] |

use crate::{
    error::{Error, Result},
    naming::DEFAULT_STYLE,
    rules::non_empty
};

/// Property key for the default naming style.
pub const STYLE_KEY: &str = "entity.style";
/// Property key for the default catalog.
pub const CATALOG_KEY: &str = "entity.catalog";
/// Property key for the default schema.
pub const SCHEMA_KEY: &str = "entity.schema";
/// Property key enabling strict key strategy validation.
pub const STRICT_KEY_STRATEGY_KEY: &str = "entity.strict-key-strategy";

/// Fallbacks applied when an entity leaves a setting unset.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct GlobalDefaults {
    /// Naming style name used when an entity declares none.
    pub style: String,

    /// Catalog used when an entity declares none.
    pub catalog: Option<String>,

    /// Schema used when an entity declares none.
    pub schema: Option<String>,

    /// Reject primary keys that configure more than one key strategy.
    pub strict_key_strategy: bool
}

impl Default for GlobalDefaults {
    fn default() -> Self {
        Self {
            style:               DEFAULT_STYLE.to_string(),
            catalog:             None,
            schema:              None,
            strict_key_strategy: false
        }
    }
}

impl GlobalDefaults {
    /// Set the default naming style.
    #[must_use]
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    /// Set the default catalog.
    #[must_use]
    pub fn with_catalog(mut self, catalog: impl Into<String>) -> Self {
        self.catalog = Some(catalog.into());
        self
    }

    /// Set the default schema.
    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Enable strict key strategy validation.
    #[must_use]
    pub fn strict(mut self) -> Self {
        self.strict_key_strategy = true;
        self
    }

    /// Load defaults from flat `key = value` properties.
    ///
    /// Unknown keys are ignored so the same property source can feed other
    /// components. Blank values leave the default in place.
    ///
    /// # Errors
    ///
    /// [`Error::Configuration`] if `entity.strict-key-strategy` is not a
    /// boolean.
    ///
    /// # Example
    ///
    /// ```rust
    /// use entity_meta_core::GlobalDefaults;
    ///
    /// let defaults = GlobalDefaults::from_properties([
    ///     ("entity.style", "normal"),
    ///     ("entity.schema", "sales")
    /// ])
    /// .unwrap();
    /// assert_eq!(defaults.style, "normal");
    /// assert_eq!(defaults.schema.as_deref(), Some("sales"));
    /// ```
    pub fn from_properties<I, K, V>(properties: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>
    {
        let mut defaults = Self::default();
        for (key, value) in properties {
            let Some(value) = non_empty(Some(value.as_ref())) else {
                continue;
            };
            match key.as_ref() {
                STYLE_KEY => defaults.style = value.to_string(),
                CATALOG_KEY => defaults.catalog = Some(value.to_string()),
                SCHEMA_KEY => defaults.schema = Some(value.to_string()),
                STRICT_KEY_STRATEGY_KEY => {
                    defaults.strict_key_strategy = value.parse().map_err(|_| {
                        Error::configuration(format_args!(
                            "`{STRICT_KEY_STRATEGY_KEY}` must be `true` or `false`, got `{value}`"
                        ))
                    })?;
                }
                _ => {}
            }
        }
        Ok(defaults)
    }

    /// Global catalog, ignoring blank values.
    #[must_use]
    pub fn catalog(&self) -> Option<&str> {
        non_empty(self.catalog.as_deref())
    }

    /// Global schema, ignoring blank values.
    #[must_use]
    pub fn schema(&self) -> Option<&str> {
        non_empty(self.schema.as_deref())
    }
}

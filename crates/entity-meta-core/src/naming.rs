// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Naming styles for table and column identifiers.
//!
//! # Supported Styles
//!
//! | Name | Aliases | `orderItem` becomes |
//! |------|---------|---------------------|
//! | `normal` | `identity` | `orderItem` |
//! | `lower_underscore` | `lower-with-separator`, `snake` | `order_item` |
//! | `upper_underscore` | `upper-with-separator` | `ORDER_ITEM` |
//! | `lower` | | `orderitem` |
//! | `upper` | | `ORDERITEM` |
//!
//! An explicit table or column name always bypasses the style.

use std::{fmt, str::FromStr};

use convert_case::{Boundary, Case, Casing};

use crate::{error::Error, rules::non_empty};

/// Name of the style used when nothing else is configured.
pub const DEFAULT_STYLE: &str = "lower_underscore";

/// Digit boundaries that never start a new word. Only an uppercase letter
/// after a digit does, so `address1` and `line1Text` keep their digits.
const DIGIT_BOUNDARIES: [Boundary; 3] = [
    Boundary::LowerDigit,
    Boundary::UpperDigit,
    Boundary::DigitLower
];

/// Transform from a raw type or field name to a storage identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NamingStyle {
    /// Keep the name as declared.
    Normal,

    /// Snake case: `orderItem` → `order_item`.
    #[default]
    LowerUnderscore,

    /// Screaming snake case: `orderItem` → `ORDER_ITEM`.
    UpperUnderscore,

    /// Lower case without separators.
    Lower,

    /// Upper case without separators.
    Upper
}

impl NamingStyle {
    /// Canonical style name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::LowerUnderscore => "lower_underscore",
            Self::UpperUnderscore => "upper_underscore",
            Self::Lower => "lower",
            Self::Upper => "upper"
        }
    }

    /// Apply the style to a raw identifier.
    #[must_use]
    pub fn apply(&self, raw: &str) -> String {
        match self {
            Self::Normal => raw.to_string(),
            Self::LowerUnderscore => raw
                .remove_boundaries(&DIGIT_BOUNDARIES)
                .to_case(Case::Snake),
            Self::UpperUnderscore => raw
                .remove_boundaries(&DIGIT_BOUNDARIES)
                .to_case(Case::UpperSnake),
            Self::Lower => raw.to_lowercase(),
            Self::Upper => raw.to_uppercase()
        }
    }

    /// Pick the effective style: `explicit` when non-empty, else `global`.
    ///
    /// # Errors
    ///
    /// [`Error::Configuration`] if the chosen name is not a known style.
    pub fn select(explicit: Option<&str>, global: &str) -> Result<Self, Error> {
        non_empty(explicit).unwrap_or(global).parse()
    }
}

impl FromStr for NamingStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" | "identity" => Ok(Self::Normal),
            "lower_underscore" | "lower-with-separator" | "snake" => Ok(Self::LowerUnderscore),
            "upper_underscore" | "upper-with-separator" => Ok(Self::UpperUnderscore),
            "lower" => Ok(Self::Lower),
            "upper" => Ok(Self::Upper),
            other => Err(Error::configuration(format_args!(
                "unknown naming style `{other}`"
            )))
        }
    }
}

impl fmt::Display for NamingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve a storage identifier.
///
/// `raw` is transformed by the explicit style when given, otherwise by the
/// global default style.
///
/// # Errors
///
/// [`Error::Configuration`] for an unknown style name.
///
/// # Example
///
/// ```rust
/// use entity_meta_core::naming::resolve;
///
/// assert_eq!(resolve("orderItem", None, "lower_underscore").unwrap(), "order_item");
/// assert_eq!(resolve("orderItem", Some("normal"), "lower_underscore").unwrap(), "orderItem");
/// ```
pub fn resolve(raw: &str, explicit: Option<&str>, global: &str) -> Result<String, Error> {
    Ok(NamingStyle::select(explicit, global)?.apply(raw))
}

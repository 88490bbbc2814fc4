// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Attribute values validated at compile time.
//!
//! | Attribute | Accepted (case-insensitive) |
//! |-----------|-----------------------------|
//! | `style` | `normal`, `identity`, `lower_underscore`, `lower-with-separator`, `snake`, `upper_underscore`, `upper-with-separator`, `lower`, `upper` |
//! | `order_by` | `asc`, `ascending`, `desc`, `descending`, empty |

use darling::FromMeta;
use proc_macro2::TokenStream;
use quote::quote;

const STYLES: &[&str] = &[
    "normal",
    "identity",
    "lower_underscore",
    "lower-with-separator",
    "snake",
    "upper_underscore",
    "upper-with-separator",
    "lower",
    "upper"
];

/// Naming style as written by the user, known to be valid.
///
/// Kept as text; the runtime resolves it to a naming style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleName(pub String);

impl FromMeta for StyleName {
    fn from_string(value: &str) -> darling::Result<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        if normalized.is_empty() || STYLES.contains(&normalized.as_str()) {
            Ok(Self(value.to_string()))
        } else {
            Err(darling::Error::unknown_value(value))
        }
    }
}

/// Direction of a column's default ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDirection {
    /// `ASC`.
    Ascending,

    /// `DESC`.
    Descending,

    /// Not part of the default ordering.
    #[default]
    Unordered
}

impl OrderDirection {
    /// Path of the matching runtime value.
    pub fn to_tokens(self) -> TokenStream {
        match self {
            Self::Ascending => quote!(::entity_meta::OrderBy::Ascending),
            Self::Descending => quote!(::entity_meta::OrderBy::Descending),
            Self::Unordered => quote!(::entity_meta::OrderBy::Unordered)
        }
    }
}

impl FromMeta for OrderDirection {
    fn from_string(value: &str) -> darling::Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            "" => Ok(Self::Unordered),
            _ => Err(darling::Error::unknown_value(value))
        }
    }
}

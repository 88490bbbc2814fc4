// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Doc comment summaries for the `remark` fallback.
//!
//! Doc comments (`///` and `/** */`) reach the derive as `#[doc = "..."]`
//! attributes. When a struct or field has no explicit `remark`, the first
//! non-blank doc line is used instead:
//!
//! ```rust,ignore
//! /// Customer order.
//! ///
//! /// Placed through the web shop.
//! #[derive(Mapped)]
//! pub struct Order { ... }
//!
//! // remark: "Customer order."
//! ```

use syn::{Attribute, Expr, ExprLit, Lit, Meta};

/// First non-blank doc line of an item, trimmed.
///
/// Continuation markers of block comments (` * text`) are dropped.
pub fn doc_summary(attrs: &[Attribute]) -> Option<String> {
    for attr in attrs {
        let Some(text) = doc_text(attr) else {
            continue;
        };
        if let Some(line) = text.lines().map(summary_line).find(|l| !l.is_empty()) {
            return Some(line.to_string());
        }
    }
    None
}

fn doc_text(attr: &Attribute) -> Option<String> {
    if !attr.path().is_ident("doc") {
        return None;
    }
    let Meta::NameValue(meta) = &attr.meta else {
        return None;
    };
    match &meta.value {
        Expr::Lit(ExprLit {
            lit: Lit::Str(text),
            ..
        }) => Some(text.value()),
        _ => None
    }
}

fn summary_line(line: &str) -> &str {
    let line = line.trim();
    if line == "*" {
        return "";
    }
    line.strip_prefix("* ").map_or(line, str::trim)
}

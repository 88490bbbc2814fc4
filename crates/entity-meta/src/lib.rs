// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

// `Mapped` names both the trait (types) and the derive (macros).
pub use entity_meta_core::*;
pub use entity_meta_derive_impl::Mapped;

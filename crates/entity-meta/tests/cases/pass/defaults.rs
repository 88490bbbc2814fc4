// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use entity_meta::{EntityBuilder, GlobalDefaults, Mapped, MappedType, TypeArena, Unchecked};

/// Struct without any mapping attributes.
#[derive(Mapped)]
pub struct UserAccount {
    pub id: i64,
    pub display_name: String,
}

fn main() {
    let mut types = TypeArena::new();
    types.register::<UserAccount>();

    let defaults = GlobalDefaults::default();
    let builder = EntityBuilder::new(&types, &defaults, &Unchecked);
    let entity = builder.build(&MappedType::of::<UserAccount>()).unwrap();

    assert_eq!(entity.table(), "user_account");
    assert_eq!(entity.remark(), Some("Struct without any mapping attributes."));
    assert_eq!(entity.columns().len(), 2);
    assert_eq!(entity.id_columns().count(), 0);
}

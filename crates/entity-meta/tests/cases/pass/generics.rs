// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use entity_meta::{EntityBuilder, GlobalDefaults, Mapped, MappedType, TypeArena, Unchecked};

#[derive(Mapped)]
#[entity(table = "envelopes")]
pub struct Envelope<T> {
    #[column(id)]
    pub id: i64,

    pub payload: T,
}

fn main() {
    let mut types = TypeArena::new();
    types.register::<Envelope<String>>();

    let defaults = GlobalDefaults::default();
    let builder = EntityBuilder::new(&types, &defaults, &Unchecked);
    let entity = builder.build(&MappedType::of::<Envelope<String>>()).unwrap();

    assert_eq!(entity.table(), "envelopes");
    assert_eq!(entity.columns()[1].column(), "payload");
}

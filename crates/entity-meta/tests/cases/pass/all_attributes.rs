// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use entity_meta::{
    EntityBuilder, GlobalDefaults, KeyStrategy, Mapped, MappedType, ReferenceSet, TypeArena
};

#[derive(Mapped)]
pub struct Base {
    #[column(order_by = "desc", order_by_priority = 2)]
    pub created_at: i64,
}

#[derive(Mapped)]
#[entity(
    table = "invoices",
    catalog = "erp",
    schema = "billing",
    style = "lower_underscore",
    result_map = "invoiceMap",
    auto_result_map,
    remark = "Issued invoices",
    props(owner = "finance"),
    extends = Base,
    exclude_field_types(std::path::PathBuf),
    exclude_fields(draft)
)]
pub struct Invoice {
    #[column(id, gen_id = "uuid", gen_id_execute_before = false)]
    pub id: String,

    #[column(
        name = "amount_cents",
        nullable = false,
        order_by = "asc",
        order_by_priority = 1,
        selectable = true,
        insertable = true,
        updatable = false,
        jdbc_type = "BIGINT",
        type_handler = "money",
        numeric_scale = "2",
        remark = "Amount in cents",
        props(unit = "cent")
    )]
    pub amount: i64,

    pub draft: bool,

    #[transient]
    pub cached: Option<String>,
}

fn main() {
    let mut types = TypeArena::new();
    types.register::<Invoice>();

    let defaults = GlobalDefaults::default();
    let registry = ReferenceSet::new()
        .with_key_generator("uuid")
        .with_type_handler("money");
    let builder = EntityBuilder::new(&types, &defaults, &registry);
    let invoice = builder.build(&MappedType::of::<Invoice>()).unwrap();

    assert_eq!(invoice.qualified_table(), "erp.billing.invoices");
    assert_eq!(invoice.result_map(), Some("invoiceMap"));
    assert!(invoice.auto_result_map());
    assert_eq!(
        invoice.column("id").unwrap().key_strategy(),
        &KeyStrategy::Generated {
            generator: "uuid".to_string(),
            execute_before: false,
        }
    );
    assert_eq!(invoice.column("amount").unwrap().type_handler(), Some("money"));
    assert_eq!(
        invoice.order_by_clause().as_deref(),
        Some("amount_cents ASC, created_at DESC")
    );
    assert!(invoice.column("draft").is_none());
    assert!(invoice.column("cached").is_none());
}

// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! End-to-end tests: derived declarations resolved into descriptors.

use std::{
    sync::{Arc, Barrier},
    thread
};

use chrono::{DateTime, Utc};
use entity_meta::{
    DescriptorCache, EntityBuilder, Error, GlobalDefaults, KeyStrategy, Mapped, MappedType,
    NamingStyle, ReferenceSet, TypeArena, Unchecked
};
use uuid::Uuid;

#[derive(Mapped)]
pub struct Tracked {
    pub revision: i32,

    pub tracked_by: String
}

#[derive(Mapped)]
#[entity(extends = Tracked)]
pub struct Audited {
    #[column(order_by = "desc", updatable = false)]
    pub created_at: DateTime<Utc>,

    pub updated_at: Option<DateTime<Utc>>,

    pub note: String
}

/// Customer order.
#[derive(Mapped)]
#[entity(
    schema = "sales",
    extends = Audited,
    exclude_fields(scratch),
    props(owner = "billing")
)]
pub struct PurchaseOrder {
    #[column(id, gen_id = "snowflake")]
    pub id: i64,

    #[column(name = "total_cents", order_by = "asc")]
    pub total: i64,

    /// Free-text note shown to the customer.
    pub note: String,

    pub scratch: String,

    #[transient]
    pub dirty: bool
}

#[derive(Mapped)]
#[entity(
    table = "ledger",
    style = "upper_underscore",
    extends = Audited,
    exclude_super_classes(Tracked),
    exclude_field_types(Uuid)
)]
pub struct LedgerEntry {
    #[column(id, use_generated_keys)]
    pub entry_id: i64,

    pub correlation: Uuid,

    #[column(selectable = false, props(mask = "true"))]
    pub secret: String
}

fn arena() -> TypeArena {
    let mut types = TypeArena::new();
    types.register::<PurchaseOrder>().register::<LedgerEntry>();
    types
}

fn columns(entity: &entity_meta::EntityDescriptor) -> Vec<&str> {
    entity.columns().iter().map(|c| c.column()).collect()
}

#[test]
fn register_pulls_in_ancestors() {
    let types = arena();
    assert_eq!(types.len(), 4);
    assert!(types.contains(&MappedType::of::<Tracked>()));
    assert!(types.contains(&MappedType::of::<Audited>()));
    assert_eq!(
        PurchaseOrder::declaration().parent,
        Some(MappedType::of::<Audited>())
    );
}

#[test]
fn derived_order_resolves() {
    let types = arena();
    let defaults = GlobalDefaults::default();
    let registry = ReferenceSet::new().with_key_generator("snowflake");
    let builder = EntityBuilder::new(&types, &defaults, &registry);

    let order = builder.build(&MappedType::of::<PurchaseOrder>()).unwrap();

    assert_eq!(order.table(), "purchase_order");
    assert_eq!(order.qualified_table(), "sales.purchase_order");
    assert_eq!(order.style(), NamingStyle::LowerUnderscore);
    assert_eq!(order.remark(), Some("Customer order."));
    assert_eq!(order.prop("owner"), Some("billing"));
    assert_eq!(
        columns(&order),
        vec![
            "id",
            "total_cents",
            "note",
            "created_at",
            "updated_at",
            "revision",
            "tracked_by"
        ]
    );

    let id = order.column("id").unwrap();
    assert!(id.is_primary_key());
    assert!(!id.is_nullable());
    assert_eq!(
        id.key_strategy(),
        &KeyStrategy::Generated {
            generator:      "snowflake".to_string(),
            execute_before: true
        }
    );

    let note = order.column("note").unwrap();
    assert_eq!(note.remark(), Some("Free-text note shown to the customer."));
    assert_eq!(note.prop("owner"), Some("billing"));

    assert_eq!(
        order.order_by_clause().as_deref(),
        Some("total_cents ASC, created_at DESC")
    );
    let updatable: Vec<&str> = order.update_columns().map(|c| c.column()).collect();
    assert!(!updatable.contains(&"created_at"));
    assert!(!updatable.contains(&"id"));
}

#[test]
fn exclusions_apply_to_derived_structs() {
    let types = arena();
    let defaults = GlobalDefaults::default();
    let builder = EntityBuilder::new(&types, &defaults, &Unchecked);

    let ledger = builder.build(&MappedType::of::<LedgerEntry>()).unwrap();

    assert_eq!(ledger.table(), "ledger");
    assert_eq!(ledger.style(), NamingStyle::UpperUnderscore);
    assert_eq!(
        columns(&ledger),
        vec!["ENTRY_ID", "SECRET", "CREATED_AT", "UPDATED_AT", "NOTE"]
    );
    assert_eq!(
        ledger.column("entry_id").unwrap().key_strategy(),
        &KeyStrategy::UseGeneratedKeys
    );

    let selected: Vec<&str> = ledger.select_columns().map(|c| c.column()).collect();
    assert!(!selected.contains(&"SECRET"));
    assert_eq!(ledger.column("secret").unwrap().prop("mask"), Some("true"));
}

#[test]
fn global_defaults_fill_gaps() {
    let types = arena();
    let defaults = GlobalDefaults::from_properties([
        ("entity.style", "upper"),
        ("entity.catalog", "erp"),
        ("entity.schema", "ignored_when_entity_has_one")
    ])
    .unwrap();
    let builder = EntityBuilder::new(&types, &defaults, &Unchecked);

    let order = builder.build(&MappedType::of::<PurchaseOrder>()).unwrap();
    assert_eq!(order.qualified_table(), "erp.sales.PURCHASEORDER");
    assert_eq!(order.column("tracked_by").unwrap().column(), "TRACKED_BY");

    let tracked = builder.build(&MappedType::of::<Tracked>()).unwrap();
    assert_eq!(
        tracked.qualified_table(),
        "erp.ignored_when_entity_has_one.TRACKED"
    );
}

#[test]
fn unknown_generator_is_reported() {
    let types = arena();
    let defaults = GlobalDefaults::default();
    let registry = ReferenceSet::new();
    let builder = EntityBuilder::new(&types, &defaults, &registry);

    let err = builder
        .build(&MappedType::of::<PurchaseOrder>())
        .unwrap_err();
    assert!(err.is_missing_key_generator());
    assert!(err.to_string().contains("snowflake"));
}

#[test]
fn unregistered_type_is_unknown() {
    let types = TypeArena::new();
    let defaults = GlobalDefaults::default();
    let builder = EntityBuilder::new(&types, &defaults, &Unchecked);

    let err = builder.build(&MappedType::of::<Tracked>()).unwrap_err();
    assert!(matches!(err, Error::UnknownType(_)));
}

#[test]
fn cache_shares_one_descriptor_across_threads() {
    const CALLERS: usize = 8;

    let types = arena();
    let defaults = GlobalDefaults::default();
    let registry = ReferenceSet::new().with_key_generator("snowflake");
    let builder = EntityBuilder::new(&types, &defaults, &registry);
    let cache = DescriptorCache::new();
    let ty = MappedType::of::<PurchaseOrder>();
    let barrier = Barrier::new(CALLERS);

    let results: Vec<Arc<entity_meta::EntityDescriptor>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..CALLERS)
            .map(|_| {
                scope.spawn(|| {
                    barrier.wait();
                    cache.get_or_build(&builder, &ty).unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(cache.build_count(), 1);
    assert!(results.iter().all(|d| Arc::ptr_eq(d, &results[0])));
}

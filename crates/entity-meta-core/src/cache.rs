// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Memoized descriptors with single-flight construction.
//!
//! Each type owns one slot. The map lock is held only long enough to fetch or
//! create the slot; the build itself runs under the slot's own once-cell, so:
//!
//! - callers racing on the same type block until the first build completes
//!   and then share its result;
//! - callers on different types never wait on each other;
//! - a failed build drops its empty slot and the next call retries.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering}
};

use dashmap::DashMap;
use once_cell::sync::OnceCell;
use tracing::{debug, trace};

use crate::{
    descriptor::{EntityBuilder, EntityDescriptor},
    error::Result,
    types::MappedType
};

type Slot = Arc<OnceCell<Arc<EntityDescriptor>>>;

/// Process-wide store of built descriptors.
///
/// Entries are never evicted automatically; use [`invalidate`](Self::invalidate)
/// to pick up changed metadata.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
///
/// use entity_meta_core::{
///     DescriptorCache, EntityBuilder, GlobalDefaults, MappedType, TypeArena, TypeDecl, Unchecked
/// };
///
/// let mut types = TypeArena::new();
/// types.insert(TypeDecl::new(MappedType::new("app::Order")));
/// let defaults = GlobalDefaults::default();
/// let builder = EntityBuilder::new(&types, &defaults, &Unchecked);
///
/// let cache = DescriptorCache::new();
/// let ty = MappedType::new("app::Order");
/// let first = cache.get_or_build(&builder, &ty).unwrap();
/// let second = cache.get_or_build(&builder, &ty).unwrap();
///
/// assert!(Arc::ptr_eq(&first, &second));
/// assert_eq!(cache.build_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct DescriptorCache {
    slots:  DashMap<MappedType, Slot>,
    builds: AtomicUsize
}

impl DescriptorCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached descriptor of `ty`, building it at most once.
    ///
    /// # Errors
    ///
    /// Any error of [`EntityBuilder::build`]. Errors are not cached.
    pub fn get_or_build(
        &self,
        builder: &EntityBuilder<'_>,
        ty: &MappedType
    ) -> Result<Arc<EntityDescriptor>> {
        let slot = self.slot(ty);
        if let Some(descriptor) = slot.get() {
            trace!(entity = %ty, "descriptor cache hit");
            return Ok(Arc::clone(descriptor));
        }

        let built = slot.get_or_try_init(|| {
            let descriptor = builder.build(ty)?;
            self.builds.fetch_add(1, Ordering::Relaxed);
            Ok::<_, crate::Error>(Arc::new(descriptor))
        });
        match built {
            Ok(descriptor) => Ok(Arc::clone(descriptor)),
            Err(err) => {
                self.slots.remove_if(ty, |_, slot| slot.get().is_none());
                Err(err)
            }
        }
    }

    /// Return the descriptor of `ty` if it was already built.
    #[must_use]
    pub fn get(&self, ty: &MappedType) -> Option<Arc<EntityDescriptor>> {
        self.slots
            .get(ty)
            .and_then(|slot| slot.get().map(Arc::clone))
    }

    /// Drop the entry of `ty`. Returns `true` if a descriptor was cached.
    ///
    /// Callers already holding the old descriptor keep it; the next
    /// [`get_or_build`](Self::get_or_build) builds a fresh one.
    pub fn invalidate(&self, ty: &MappedType) -> bool {
        let removed = self
            .slots
            .remove(ty)
            .is_some_and(|(_, slot)| slot.get().is_some());
        debug!(entity = %ty, removed, "descriptor invalidated");
        removed
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.slots.clear();
        debug!("descriptor cache cleared");
    }

    /// Number of built descriptors currently cached.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots
            .iter()
            .filter(|entry| entry.value().get().is_some())
            .count()
    }

    /// Check if no descriptor is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total number of successful builds since creation.
    #[must_use]
    pub fn build_count(&self) -> usize {
        self.builds.load(Ordering::Relaxed)
    }

    fn slot(&self, ty: &MappedType) -> Slot {
        if let Some(slot) = self.slots.get(ty) {
            return Arc::clone(slot.value());
        }
        Arc::clone(self.slots.entry(ty.clone()).or_default().value())
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{Barrier, Mutex},
        thread
    };

    use super::*;
    use crate::{
        config::GlobalDefaults,
        error::{Error, ReferenceKind},
        registry::{Registry, Resolution, Unchecked},
        rules::FieldRules,
        types::{FieldDecl, TypeArena, TypeDecl}
    };

    fn arena() -> TypeArena {
        let mut types = TypeArena::new();
        for name in ["app::Order", "app::Customer", "app::Invoice"] {
            types.insert(
                TypeDecl::new(name.into()).field(
                    FieldDecl::new("id", MappedType::of::<i64>()).rules(FieldRules::primary_key())
                )
            );
        }
        types
    }

    #[test]
    fn second_call_returns_same_descriptor() {
        let types = arena();
        let defaults = GlobalDefaults::default();
        let builder = EntityBuilder::new(&types, &defaults, &Unchecked);
        let cache = DescriptorCache::new();
        let ty = MappedType::new("app::Order");

        let first = cache.get_or_build(&builder, &ty).unwrap();
        let second = cache.get_or_build(&builder, &ty).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.build_count(), 1);
        assert_eq!(cache.len(), 1);
        assert!(Arc::ptr_eq(&cache.get(&ty).unwrap(), &first));
    }

    #[test]
    fn concurrent_first_access_builds_once() {
        const CALLERS: usize = 16;

        let types = arena();
        let defaults = GlobalDefaults::default();
        let builder = EntityBuilder::new(&types, &defaults, &Unchecked);
        let cache = DescriptorCache::new();
        let ty = MappedType::new("app::Order");
        let barrier = Barrier::new(CALLERS);

        let results: Vec<Arc<EntityDescriptor>> = thread::scope(|scope| {
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

    #[test]
    fn distinct_types_build_independently() {
        let types = arena();
        let defaults = GlobalDefaults::default();
        let builder = EntityBuilder::new(&types, &defaults, &Unchecked);
        let cache = DescriptorCache::new();
        let names = ["app::Order", "app::Customer", "app::Invoice"];
        let barrier = Barrier::new(names.len());

        thread::scope(|scope| {
            for name in names {
                let (cache, builder, barrier) = (&cache, &builder, &barrier);
                scope.spawn(move || {
                    barrier.wait();
                    let descriptor = cache.get_or_build(builder, &name.into()).unwrap();
                    assert_eq!(descriptor.ty().name(), name);
                });
            }
        });

        assert_eq!(cache.build_count(), 3);
        assert_eq!(cache.len(), 3);
    }

    /// Registry that fails until switched on, counting lookups.
    #[derive(Default)]
    struct Toggle {
        enabled: Mutex<bool>,
        lookups: AtomicUsize
    }

    impl Registry for Toggle {
        fn resolve(&self, _kind: ReferenceKind, _reference: &str) -> Resolution {
            self.lookups.fetch_add(1, Ordering::Relaxed);
            (*self.enabled.lock().unwrap()).into()
        }
    }

    #[test]
    fn failed_build_is_not_cached() {
        let mut types = TypeArena::new();
        types.insert(
            TypeDecl::new("app::Order".into()).field(
                FieldDecl::new("id", MappedType::of::<i64>()).rules(FieldRules {
                    gen_id: Some("snowflake".into()),
                    ..FieldRules::primary_key()
                })
            )
        );
        let defaults = GlobalDefaults::default();
        let registry = Toggle::default();
        let builder = EntityBuilder::new(&types, &defaults, &registry);
        let cache = DescriptorCache::new();
        let ty = MappedType::new("app::Order");

        let err = cache.get_or_build(&builder, &ty).unwrap_err();
        assert!(matches!(err, Error::UnresolvedReference { .. }));
        assert!(cache.get(&ty).is_none());
        assert!(cache.is_empty());
        assert_eq!(cache.build_count(), 0);

        *registry.enabled.lock().unwrap() = true;
        let descriptor = cache.get_or_build(&builder, &ty).unwrap();
        assert_eq!(descriptor.column("id").unwrap().key_strategy().generator(), Some("snowflake"));
        assert_eq!(cache.build_count(), 1);
        assert_eq!(registry.lookups.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn failed_builds_leave_no_entries() {
        let types = arena();
        let defaults = GlobalDefaults::default();
        let builder = EntityBuilder::new(&types, &defaults, &Unchecked);
        let cache = DescriptorCache::new();

        for n in 0..32 {
            let ty = MappedType::new(format!("app::Missing{n}"));
            let err = cache.get_or_build(&builder, &ty).unwrap_err();
            assert_eq!(err, Error::UnknownType(ty));
        }
        assert_eq!(cache.slots.len(), 0);

        cache
            .get_or_build(&builder, &"app::Order".into())
            .unwrap();
        assert_eq!(cache.slots.len(), 1);
    }

    #[test]
    fn invalidate_forces_rebuild() {
        let types = arena();
        let defaults = GlobalDefaults::default();
        let builder = EntityBuilder::new(&types, &defaults, &Unchecked);
        let cache = DescriptorCache::new();
        let ty = MappedType::new("app::Order");

        let first = cache.get_or_build(&builder, &ty).unwrap();
        assert!(cache.invalidate(&ty));
        assert!(!cache.invalidate(&ty));
        let second = cache.get_or_build(&builder, &ty).unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(*first, *second);
        assert_eq!(cache.build_count(), 2);
    }

    #[test]
    fn invalidate_picks_up_changed_metadata() {
        let ty = MappedType::new("app::Order");
        let cache = DescriptorCache::new();
        let defaults = GlobalDefaults::default();

        let before = arena();
        let builder = EntityBuilder::new(&before, &defaults, &Unchecked);
        assert_eq!(cache.get_or_build(&builder, &ty).unwrap().table(), "order");

        let mut after = arena();
        after.insert(TypeDecl::new(ty.clone()).rules(crate::rules::TypeRules {
            table: Some("orders_v2".into()),
            ..Default::default()
        }));
        let builder = EntityBuilder::new(&after, &defaults, &Unchecked);
        assert_eq!(cache.get_or_build(&builder, &ty).unwrap().table(), "order");

        cache.invalidate(&ty);
        assert_eq!(cache.get_or_build(&builder, &ty).unwrap().table(), "orders_v2");
    }

    #[test]
    fn invalidate_during_concurrent_builds_of_other_types() {
        let types = arena();
        let defaults = GlobalDefaults::default();
        let builder = EntityBuilder::new(&types, &defaults, &Unchecked);
        let cache = DescriptorCache::new();
        let order = MappedType::new("app::Order");
        cache.get_or_build(&builder, &order).unwrap();

        thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for name in ["app::Customer", "app::Invoice"] {
                        cache.get_or_build(&builder, &name.into()).unwrap();
                    }
                });
            }
            scope.spawn(|| {
                for _ in 0..100 {
                    cache.invalidate(&order);
                }
            });
        });

        assert!(cache.get(&order).is_none());
        assert!(cache.get(&"app::Customer".into()).is_some());
        assert!(cache.get(&"app::Invoice".into()).is_some());
    }

    #[test]
    fn clear_drops_everything() {
        let types = arena();
        let defaults = GlobalDefaults::default();
        let builder = EntityBuilder::new(&types, &defaults, &Unchecked);
        let cache = DescriptorCache::new();
        cache.get_or_build(&builder, &"app::Order".into()).unwrap();
        cache.clear();
        assert!(cache.is_empty());
    }
}

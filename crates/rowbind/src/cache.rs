use crate::{options::OptionsKey, Result};

use std::{
    any::{Any, TypeId},
    collections::HashMap,
    sync::{Arc, Mutex, OnceLock, PoisonError, RwLock},
};

type Entry = Arc<dyn Any + Send + Sync>;

type Key = (TypeId, OptionsKey);

/// Compiled plans keyed by `(plan type, options fingerprint)`.
///
/// A plan is compiled at most once per key. Concurrent first requests for
/// one key wait for that compile; requests for other keys never do.
#[derive(Debug, Default)]
pub(crate) struct PlanCache {
    slots: RwLock<HashMap<Key, Arc<Slot>>>,
}

#[derive(Debug, Default)]
struct Slot {
    plan: OnceLock<Entry>,

    /// Held while the plan for this key compiles.
    compiling: Mutex<()>,
}

impl PlanCache {
    pub(crate) fn get_or_compile<P>(
        &self,
        key: OptionsKey,
        compile: impl FnOnce() -> Result<P>,
    ) -> Result<Arc<P>>
    where
        P: Any + Send + Sync,
    {
        let key = (TypeId::of::<P>(), key);

        if let Some(plan) = self.lookup::<P>(&key) {
            tracing::trace!(plan = std::any::type_name::<P>(), "plan cache hit");
            return Ok(plan);
        }

        let slot = self
            .slots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key)
            .or_default()
            .clone();

        let _compiling = slot.compiling.lock().unwrap_or_else(PoisonError::into_inner);

        // Another caller may have compiled it while we waited.
        if let Some(plan) = slot.plan.get().cloned().and_then(downcast::<P>) {
            return Ok(plan);
        }

        let plan = Arc::new(compile()?);
        let entry: Entry = plan.clone();
        let _ = slot.plan.set(entry);
        Ok(plan)
    }

    /// Number of compiled plans.
    pub(crate) fn len(&self) -> usize {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|slot| slot.plan.get().is_some())
            .count()
    }

    fn lookup<P: Any + Send + Sync>(&self, key: &Key) -> Option<Arc<P>> {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        slots.get(key)?.plan.get().cloned().and_then(downcast::<P>)
    }
}

fn downcast<P: Any + Send + Sync>(entry: Entry) -> Option<Arc<P>> {
    entry.downcast::<P>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiles_once_per_key() {
        let cache = PlanCache::default();
        let mut compiled = 0;

        let a = cache
            .get_or_compile(OptionsKey::new("read"), || {
                compiled += 1;
                Ok(1_u32)
            })
            .unwrap();
        let b = cache
            .get_or_compile(OptionsKey::new("read"), || {
                compiled += 1;
                Ok(2_u32)
            })
            .unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(compiled, 1);
    }

    #[test]
    fn keys_are_per_plan_type() {
        let cache = PlanCache::default();

        cache.get_or_compile(OptionsKey::new("read"), || Ok(1_u32)).unwrap();
        cache.get_or_compile(OptionsKey::new("read"), || Ok(1_u64)).unwrap();

        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn failed_compiles_are_not_cached() {
        let cache = PlanCache::default();

        let err = cache
            .get_or_compile::<u32>(OptionsKey::new("read"), || Err(rowbind_core::err!("nope")))
            .unwrap_err();

        assert_eq!(err.to_string(), "nope");
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn compiling_one_key_does_not_block_others() {
        use std::sync::mpsc;

        let cache = PlanCache::default();
        cache.get_or_compile(OptionsKey::new("warm"), || Ok(1_u32)).unwrap();

        let (started_tx, started_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel::<()>();

        let cache = &cache;

        std::thread::scope(|scope| {
            let cold = scope.spawn(move || {
                cache.get_or_compile(OptionsKey::new("cold"), move || {
                    started_tx.send(()).unwrap();
                    release_rx.recv().unwrap();
                    Ok(2_u32)
                })
            });

            started_rx.recv().unwrap();

            // The cold compile is still running.
            let warm = cache
                .get_or_compile(OptionsKey::new("warm"), || Ok(3_u32))
                .unwrap();
            assert_eq!(*warm, 1);
            assert_eq!(cache.len(), 1);

            release_tx.send(()).unwrap();
            assert_eq!(*cold.join().unwrap().unwrap(), 2);
        });

        assert_eq!(cache.len(), 2);
    }
}

use rowbind_core::{
    driver::{Converter, Family, TypeConverter},
    stmt::Type,
};

use std::{
    collections::HashMap,
    sync::{Arc, OnceLock, PoisonError, RwLock},
};

/// Scalar types whose converters are resolved up front.
const SCALARS: &[Type] = &[
    Type::Bool,
    Type::Bytes,
    Type::F32,
    Type::F64,
    Type::I8,
    Type::I16,
    Type::I32,
    Type::I64,
    Type::String,
    Type::U8,
    Type::U16,
    Type::U32,
    Type::U64,
    Type::Uuid,
    Type::Unknown,
];

/// Conversion scaffolding shared by every plan of one driver family.
///
/// Built once per family and read-only afterwards.
#[derive(Debug)]
pub struct Toolbox {
    family: &'static str,
    table: Arc<dyn TypeConverter>,
    converters: HashMap<Type, Arc<dyn Converter>>,
}

static REGISTRY: OnceLock<RwLock<HashMap<&'static str, Arc<Toolbox>>>> = OnceLock::new();

impl Toolbox {
    pub fn new(family: &dyn Family) -> Toolbox {
        let table = family.type_converter();
        let converters = SCALARS
            .iter()
            .map(|ty| (ty.clone(), table.resolve(ty)))
            .collect();

        Toolbox {
            family: family.name(),
            table,
            converters,
        }
    }

    /// The process-wide toolbox of `family`, built on first use.
    ///
    /// Concurrent first calls for the same family block until one of them
    /// has built it; every later call only takes the read lock.
    pub fn for_family(family: &dyn Family) -> Arc<Toolbox> {
        let registry = REGISTRY.get_or_init(Default::default);

        if let Some(toolbox) = registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(family.name())
        {
            return toolbox.clone();
        }

        let mut registry = registry.write().unwrap_or_else(PoisonError::into_inner);

        // Another caller may have built it while we waited for the lock.
        registry
            .entry(family.name())
            .or_insert_with(|| {
                tracing::debug!(family = family.name(), "building toolbox");
                Arc::new(Toolbox::new(family))
            })
            .clone()
    }

    pub fn family(&self) -> &'static str {
        self.family
    }

    pub fn converter(&self, ty: &Type) -> Arc<dyn Converter> {
        match self.converters.get(ty) {
            Some(converter) => converter.clone(),
            None => self.table.resolve(ty),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowbind_core::driver::convert::Standard;

    #[test]
    fn one_toolbox_per_family() {
        let a = Toolbox::for_family(&Standard);
        let b = Toolbox::for_family(&Standard);

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.family(), "standard");
    }

    #[test]
    fn concurrent_first_use_builds_once() {
        use std::sync::{
            atomic::{AtomicUsize, Ordering},
            Barrier,
        };

        static BUILDS: AtomicUsize = AtomicUsize::new(0);

        #[derive(Debug)]
        struct Counting;

        impl Family for Counting {
            fn name(&self) -> &'static str {
                "counting"
            }

            fn type_converter(&self) -> Arc<dyn TypeConverter> {
                BUILDS.fetch_add(1, Ordering::SeqCst);
                Standard.type_converter()
            }
        }

        let barrier = Arc::new(Barrier::new(16));
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let barrier = barrier.clone();
                std::thread::spawn(move || {
                    barrier.wait();
                    Toolbox::for_family(&Counting)
                })
            })
            .collect();

        let toolboxes: Vec<_> = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect();

        assert!(toolboxes
            .iter()
            .all(|toolbox| Arc::ptr_eq(toolbox, &toolboxes[0])));
        assert_eq!(BUILDS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn list_converters_resolve_on_demand() {
        let toolbox = Toolbox::new(&Standard);
        let converter = toolbox.converter(&Type::list(Type::I64));

        assert_eq!(
            converter
                .from_storage_value(rowbind_core::stmt::Value::List(vec![
                    rowbind_core::stmt::Value::I8(4)
                ]))
                .unwrap(),
            rowbind_core::stmt::Value::List(vec![rowbind_core::stmt::Value::I64(4)])
        );
    }
}

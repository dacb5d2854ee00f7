mod builder;
pub use builder::Builder;

mod settings;
pub use settings::Settings;

use crate::{
    cache::PlanCache,
    engine::{self, Context},
    options::{BindOptions, ReadOptions},
    plan::{BindPlan, ReadPlan},
    result::{read_scalar, Materialized, Scalar},
    stmt::Primitive,
    toolbox::Toolbox,
    Record, Result,
};

use rowbind_core::{AsyncCursor, Cursor, NullabilitySource, ParamSink};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Compiles, caches and runs plans for one driver family.
///
/// A mapper is cheap to share; every method takes `&self`.
#[derive(Debug)]
pub struct Mapper {
    toolbox: Arc<Toolbox>,
    nullability: Arc<dyn NullabilitySource>,
    settings: Settings,
    plans: PlanCache,
}

impl Mapper {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// A mapper over the standard conversion table with default settings.
    pub fn new() -> Mapper {
        Builder::default().build()
    }

    /// The read plan for `T` under `options`, compiled on first use.
    pub fn read_plan<T: Record>(&self, options: &ReadOptions<T>) -> Result<Arc<ReadPlan<T>>> {
        if !self.settings.cache_plans {
            return engine::compile_read(&self.cx(), options).map(Arc::new);
        }

        self.plans
            .get_or_compile(options.key(), || engine::compile_read(&self.cx(), options))
    }

    /// The bind plan for `T` under `options`, compiled on first use.
    pub fn bind_plan<T: Record>(&self, options: &BindOptions<T>) -> Result<Arc<BindPlan<T>>> {
        if !self.settings.cache_plans {
            return engine::compile_bind(&self.cx(), options).map(Arc::new);
        }

        self.plans
            .get_or_compile(options.key(), || engine::compile_bind(&self.cx(), options))
    }

    /// Reads every row of `cursor` with the default options.
    pub fn read<T: Record, C: Cursor>(&self, cursor: C) -> Result<Materialized<T>> {
        self.read_plan(&ReadOptions::default())?.read(cursor)
    }

    pub async fn read_async<T: Record, C: AsyncCursor>(
        &self,
        cursor: C,
        cancel: &CancellationToken,
    ) -> Result<Materialized<T>> {
        let plan = self.read_plan(&ReadOptions::<T>::default())?;
        plan.read_async(cursor, cancel).await
    }

    /// Binds `source` into `sink` with the default options.
    pub fn bind<T: Record, S: ParamSink + ?Sized>(&self, source: &T, sink: &mut S) -> Result<usize> {
        self.bind_plan(&BindOptions::default())?.bind(source, sink)
    }

    /// Reads the first column of the first row.
    pub fn read_scalar<V: Primitive, C: Cursor>(&self, cursor: C) -> Result<Scalar<V>> {
        read_scalar(&self.toolbox, cursor)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn toolbox(&self) -> &Arc<Toolbox> {
        &self.toolbox
    }

    /// Number of plans compiled and cached so far.
    pub fn cached_plans(&self) -> usize {
        self.plans.len()
    }

    fn cx(&self) -> Context<'_> {
        Context {
            toolbox: &self.toolbox,
            nullability: &*self.nullability,
            settings: &self.settings,
        }
    }
}

impl Default for Mapper {
    fn default() -> Self {
        Mapper::new()
    }
}

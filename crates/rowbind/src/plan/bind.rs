use super::{ParamDescriptor, Source};
use crate::{toolbox::Toolbox, Result};

use rowbind_core::{
    driver::{Converter, Direction},
    stmt::Value,
    ParamHandle, ParamSink,
};

use std::sync::Arc;

/// A compiled routine binding the members of `T` as statement parameters.
pub struct BindPlan<T> {
    type_name: &'static str,
    params: Vec<ParamDescriptor<T>>,

    /// In bind order: fixed positions first, then declaration order.
    steps: Vec<BindStep<T>>,
}

struct BindStep<T> {
    name: String,
    source: Source<T>,
    nullable: bool,
    ignore_when_null: bool,
    converter: Arc<dyn Converter>,

    /// Element converter of a reduced collection.
    reduce: Option<Arc<dyn Converter>>,
}

impl<T> BindPlan<T> {
    pub(crate) fn new(
        type_name: &'static str,
        params: Vec<ParamDescriptor<T>>,
        toolbox: &Toolbox,
    ) -> BindPlan<T> {
        let mut order: Vec<_> = (0..params.len()).collect();
        // Stable: unpositioned descriptors keep declaration order.
        order.sort_by_key(|&index| match params[index].position {
            Some(position) => (0, position),
            None => (1, 0),
        });

        let steps = order
            .into_iter()
            .map(|index| {
                let param = &params[index];

                BindStep {
                    name: param.name.clone(),
                    source: param.source.clone(),
                    nullable: param.nullable,
                    ignore_when_null: param.ignore_when_null,
                    converter: toolbox.converter(&param.ty),
                    reduce: if param.reduce {
                        param.ty.element().map(|item| toolbox.converter(item))
                    } else {
                        None
                    },
                }
            })
            .collect();

        BindPlan {
            type_name,
            params,
            steps,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The validated descriptors the plan was compiled from, in declaration
    /// order.
    pub fn describe(&self) -> &[ParamDescriptor<T>] {
        &self.params
    }

    /// The `(name, value)` pairs a bind of `source` starts from, in bind
    /// order, before null handling, reduction and conversion.
    pub fn pairs(&self, source: &T) -> Vec<(String, Value)> {
        self.steps
            .iter()
            .map(|step| (step.name.clone(), step.source.get(source)))
            .collect()
    }

    /// Writes the parameters for `source` into `sink`.
    ///
    /// Every value is converted before the sink is touched, so a failed
    /// conversion leaves the sink as it was. Slots left in the sink by a
    /// previous bind are reused in place, and slots past the last one
    /// written are removed, so the sink ends up holding exactly the bound
    /// parameters. Returns their number.
    pub fn bind<S: ParamSink + ?Sized>(&self, source: &T, sink: &mut S) -> Result<usize> {
        let bound = self.convert(source)?;
        let count = bound.len();

        for (index, param) in bound.into_iter().enumerate() {
            let slot = next_slot(sink, index);
            slot.set_name(&param.name);
            slot.set_direction(Direction::Input);
            slot.set_value(param.value);
            param.converter.configure(slot, param.nullable);
        }

        while sink.count() > count {
            sink.remove_at(sink.count() - 1);
        }

        tracing::trace!(record = self.type_name, bound = count, "bind pass");
        Ok(count)
    }

    fn convert(&self, source: &T) -> Result<Vec<Bound<'_>>> {
        let mut bound = Vec::with_capacity(self.steps.len());

        for step in &self.steps {
            let value = step.source.get(source);

            if value.is_null() {
                if !step.ignore_when_null {
                    bound.push(Bound {
                        name: step.name.clone(),
                        value: Value::Null,
                        converter: &step.converter,
                        nullable: true,
                    });
                }
                continue;
            }

            match (&step.reduce, value) {
                (Some(converter), Value::List(items)) => {
                    for (i, item) in items.into_iter().enumerate() {
                        let nullable = item.is_null();
                        bound.push(Bound {
                            name: format!("{}{}", step.name, i + 1),
                            value: converter.to_storage_value(item)?,
                            converter,
                            nullable,
                        });
                    }
                }
                (_, value) => bound.push(Bound {
                    name: step.name.clone(),
                    value: step.converter.to_storage_value(value)?,
                    converter: &step.converter,
                    nullable: step.nullable,
                }),
            }
        }

        Ok(bound)
    }
}

/// A converted parameter waiting to be written.
struct Bound<'p> {
    name: String,
    value: Value,
    converter: &'p Arc<dyn Converter>,
    nullable: bool,
}

impl<T> core::fmt::Debug for BindPlan<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BindPlan")
            .field("type_name", &self.type_name)
            .field("params", &self.params)
            .finish()
    }
}

fn next_slot<S: ParamSink + ?Sized>(sink: &mut S, index: usize) -> &mut dyn ParamHandle {
    if index < sink.count() {
        sink.slot_at(index)
    } else {
        sink.create_slot()
    }
}

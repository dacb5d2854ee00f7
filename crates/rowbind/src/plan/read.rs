use super::{FieldDescriptor, Target};
use crate::{
    options::SchemaCapture,
    result::{Materialized, ResultColumn, Rows},
    schema::Args,
    toolbox::Toolbox,
    Result,
};

use rowbind_core::{stmt::Value, AsyncCursor, Cursor, Error, RowSource};
use tokio_util::sync::CancellationToken;

type ReadFn = Box<dyn Fn(&dyn RowSource, usize) -> Result<Option<Value>> + Send + Sync>;

type Setter<T> = fn(&mut T, Value) -> Result<()>;

/// A compiled routine reading rows into instances of `T`.
///
/// Compiled once per `(type, options)` pair; reading never repeats the
/// analysis. A plan holds no per-read state and may be shared freely.
pub struct ReadPlan<T> {
    type_name: &'static str,
    fields: Vec<FieldDescriptor>,
    steps: Vec<ReadStep<T>>,
    build: Build<T>,
    capture: SchemaCapture,
    capacity_hint: Option<usize>,
}

/// How instances are created.
pub(crate) enum Build<T> {
    /// Call a constructor with one argument per parameter.
    Construct {
        invoke: fn(Args) -> Result<T>,
        arity: usize,
    },

    /// Create a default instance, then set members one by one.
    Init { factory: fn(Args) -> Result<T> },
}

/// One read, bound to its column name but not yet to an ordinal.
pub(crate) struct ReadStep<T> {
    column: String,
    optional: bool,
    sink: StepSink<T>,
    read: ReadFn,
}

enum StepSink<T> {
    Arg(usize),
    Set(Setter<T>),
}

impl<T> ReadPlan<T> {
    pub(crate) fn new(
        type_name: &'static str,
        fields: Vec<FieldDescriptor>,
        build: Build<T>,
        setters: &[Option<Setter<T>>],
        toolbox: &Toolbox,
        capture: SchemaCapture,
        capacity_hint: Option<usize>,
    ) -> ReadPlan<T> {
        let steps = fields
            .iter()
            .filter(|field| !field.ignore)
            .filter_map(|field| {
                let sink = match field.target {
                    Target::Arg(slot) => StepSink::Arg(slot),
                    Target::Member(index) => StepSink::Set(setters.get(index).copied().flatten()?),
                };

                Some(ReadStep {
                    column: field.column.clone(),
                    optional: field.is_optional(),
                    sink,
                    read: compile_field(field, toolbox),
                })
            })
            .collect();

        ReadPlan {
            type_name,
            fields,
            steps,
            build,
            capture,
            capacity_hint,
        }
    }

    /// Name of the record type the plan produces.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The validated descriptors the plan was compiled from.
    pub fn describe(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn captures_schema(&self) -> bool {
        self.capture.is_enabled()
    }

    /// Reads every remaining row of `cursor`.
    pub fn read<C: Cursor>(&self, cursor: C) -> Result<Materialized<T>> {
        let mut rows = self.rows(cursor);
        let mut buffer = self.buffer();

        for row in &mut rows {
            buffer.push(row?);
        }

        tracing::trace!(record = self.type_name, rows = buffer.len(), "read pass");
        Ok(Materialized::new(rows.into_columns(), buffer))
    }

    /// Reads every remaining row of `cursor`, suspending only while the
    /// cursor advances.
    ///
    /// Cancellation is observed at the advance point only; a row being
    /// built is always finished first.
    pub async fn read_async<C: AsyncCursor>(
        &self,
        mut cursor: C,
        cancel: &CancellationToken,
    ) -> Result<Materialized<T>> {
        let mut reader = Reader::new(self, &cursor)?;
        let mut buffer = self.buffer();

        loop {
            let more = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(Error::cancelled()),
                more = cursor.advance() => more?,
            };

            if !more {
                break;
            }

            buffer.push(reader.read_row(&cursor)?);
        }

        tracing::trace!(record = self.type_name, rows = buffer.len(), "async read pass");
        Ok(Materialized::new(reader.into_columns(), buffer))
    }

    /// Streams rows one at a time.
    pub fn rows<C: Cursor>(&self, cursor: C) -> Rows<'_, T, C> {
        Rows::new(self, cursor)
    }

    fn buffer(&self) -> Vec<T> {
        Vec::with_capacity(self.capacity_hint.unwrap_or(0))
    }
}

impl<T> core::fmt::Debug for ReadPlan<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ReadPlan")
            .field("type_name", &self.type_name)
            .field("fields", &self.fields)
            .field("capture", &self.capture)
            .field("capacity_hint", &self.capacity_hint)
            .finish()
    }
}

fn compile_field(field: &FieldDescriptor, toolbox: &Toolbox) -> ReadFn {
    if let Some(mapping) = &field.mapping {
        let mapping = mapping.clone();
        return Box::new(move |row: &dyn RowSource, ordinal: usize| {
            mapping.read(row, ordinal).map(Some)
        });
    }

    let converter = toolbox.converter(&field.ty);

    if field.test_null {
        Box::new(move |row: &dyn RowSource, ordinal: usize| {
            if row.is_absent(ordinal) {
                return Ok(None);
            }

            converter.from_storage_value(row.raw_value(ordinal)?).map(Some)
        })
    } else {
        Box::new(move |row: &dyn RowSource, ordinal: usize| {
            converter.from_storage_value(row.raw_value(ordinal)?).map(Some)
        })
    }
}

/// A plan bound to the columns of one cursor.
pub(crate) struct Reader<'p, T> {
    plan: &'p ReadPlan<T>,

    /// Steps whose column exists, with the resolved ordinal.
    bound: Vec<(usize, &'p ReadStep<T>)>,

    columns: Vec<ResultColumn>,

    /// Captured columns still waiting for a native type name.
    untyped: usize,
}

impl<'p, T> Reader<'p, T> {
    /// Resolves every column ordinal once, before the first row.
    pub(crate) fn new(plan: &'p ReadPlan<T>, row: &dyn RowSource) -> Result<Reader<'p, T>> {
        let mut bound = Vec::with_capacity(plan.steps.len());

        for step in &plan.steps {
            match row.ordinal_of(&step.column) {
                Some(ordinal) => bound.push((ordinal, step)),
                None if step.optional => {}
                None => return Err(Error::column_not_found(&step.column)),
            }
        }

        let columns: Vec<_> = if plan.capture.is_enabled() {
            (0..row.column_count())
                .map(|ordinal| ResultColumn {
                    ordinal,
                    name: row.column_name(ordinal).to_string(),
                    is_consumed: bound.iter().any(|(bound, _)| *bound == ordinal),
                    type_name: None,
                })
                .collect()
        } else {
            vec![]
        };

        let untyped = match plan.capture {
            SchemaCapture::ColumnsWithTypes => columns.len(),
            _ => 0,
        };

        Ok(Reader {
            plan,
            bound,
            columns,
            untyped,
        })
    }

    pub(crate) fn read_row(&mut self, row: &dyn RowSource) -> Result<T> {
        if self.untyped > 0 {
            self.probe_types(row);
        }

        match &self.plan.build {
            Build::Construct { invoke, arity } => {
                let mut args = Args::new(*arity);

                for (ordinal, step) in &self.bound {
                    if let Some(value) = (step.read)(row, *ordinal)? {
                        if let StepSink::Arg(slot) = step.sink {
                            args.set(slot, value);
                        }
                    }
                }

                invoke(args)
            }
            Build::Init { factory } => {
                let mut record = factory(Args::default())?;

                for (ordinal, step) in &self.bound {
                    if let Some(value) = (step.read)(row, *ordinal)? {
                        if let StepSink::Set(set) = step.sink {
                            set(&mut record, value)?;
                        }
                    }
                }

                Ok(record)
            }
        }
    }

    pub(crate) fn columns(&self) -> &[ResultColumn] {
        &self.columns
    }

    pub(crate) fn into_columns(self) -> Vec<ResultColumn> {
        self.columns
    }

    // Drivers that type values rather than columns report nothing for
    // absent values, so columns are probed until each reports a name.
    fn probe_types(&mut self, row: &dyn RowSource) {
        for column in &mut self.columns {
            if column.type_name.is_none() {
                column.type_name = row.native_type_name(column.ordinal);
                if column.type_name.is_some() {
                    self.untyped -= 1;
                }
            }
        }
    }
}

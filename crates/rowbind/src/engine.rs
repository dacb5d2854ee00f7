//! Turns a record shape and an option set into a plan.
//!
//! Compiling runs in three passes: [`resolve`] picks how instances are
//! created or read, [`describe`] merges the shape with the options into one
//! descriptor per member, and [`verify`] checks the descriptors as a whole.
//! Every problem found along the way is collected and reported at once.

mod describe;
mod resolve;
mod verify;

use crate::{
    mapper::Settings,
    options::{BindOptions, ReadOptions},
    plan::{BindPlan, Build, ReadPlan},
    toolbox::Toolbox,
    Record, Result,
};

use resolve::Resolved;
use rowbind_core::{Diagnostic, Error, NullabilitySource};

/// What a compile pass depends on besides the record and its options.
pub(crate) struct Context<'a> {
    pub(crate) toolbox: &'a Toolbox,
    pub(crate) nullability: &'a dyn NullabilitySource,
    pub(crate) settings: &'a Settings,
}

/// Accumulates diagnostics for one record.
#[derive(Debug, Default)]
pub(crate) struct Compiler {
    diagnostics: Vec<Diagnostic>,
}

impl Compiler {
    pub(crate) fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    fn finish(self, type_name: &str) -> Result<()> {
        if self.diagnostics.is_empty() {
            Ok(())
        } else {
            Err(self.into_error(type_name))
        }
    }

    fn into_error(self, type_name: &str) -> Error {
        tracing::debug!(
            record = type_name,
            diagnostics = self.diagnostics.len(),
            "record rejected"
        );
        Error::invalid_record(type_name, self.diagnostics)
    }
}

pub(crate) fn compile_read<T: Record>(cx: &Context<'_>, options: &ReadOptions<T>) -> Result<ReadPlan<T>> {
    let shape = T::shape();
    let mut compiler = Compiler::default();

    let filter = options.constructor_filter.as_deref();
    let Some(resolved) = resolve::read(&shape, filter) else {
        compiler.report(Diagnostic::NoUsableShape);
        return Err(compiler.into_error(shape.name));
    };

    let always_test_null = options
        .always_test_null
        .unwrap_or(cx.settings.always_test_null);

    let fields = describe::fields(cx, &mut compiler, &shape, &resolved, options, always_test_null);
    verify::fields(&mut compiler, &fields, options.contract.as_ref());
    compiler.finish(shape.name)?;

    let build = match resolved {
        Resolved::Construct(constructor) => Build::Construct {
            invoke: constructor.invoke,
            arity: constructor.params.len(),
        },
        Resolved::Init { factory, .. } => Build::Init {
            factory: factory.invoke,
        },
    };

    let setters: Vec<_> = shape.members.iter().map(|member| member.set).collect();
    let capture = options.capture.unwrap_or(cx.settings.capture);
    let capacity_hint = options.capacity_hint.or(cx.settings.capacity_hint);

    tracing::debug!(
        record = shape.name,
        fields = fields.len(),
        family = cx.toolbox.family(),
        "compiled read plan"
    );

    Ok(ReadPlan::new(
        shape.name,
        fields,
        build,
        &setters,
        cx.toolbox,
        capture,
        capacity_hint,
    ))
}

pub(crate) fn compile_bind<T: Record>(cx: &Context<'_>, options: &BindOptions<T>) -> Result<BindPlan<T>> {
    let shape = T::shape();
    let mut compiler = Compiler::default();

    let members = resolve::bind(&shape, options);
    if members.is_empty() {
        compiler.report(Diagnostic::NoUsableShape);
    }

    let params = describe::params(cx, &mut compiler, &shape, &members, options);
    verify::params(&mut compiler, &params, options);
    compiler.finish(shape.name)?;

    tracing::debug!(
        record = shape.name,
        params = params.len(),
        family = cx.toolbox.family(),
        "compiled bind plan"
    );

    Ok(BindPlan::new(shape.name, params, cx.toolbox))
}

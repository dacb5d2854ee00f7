use crate::value::Value;

use rowbind_core::{
    driver::mem::Param,
    err, Error, ParamHandle, ParamSink, Result,
};
use rusqlite::Statement;

/// Prefixes SQLite accepts in front of a parameter name.
const PREFIXES: [&str; 3] = [":", "@", "$"];

/// Parameters collected for one SQLite statement.
#[derive(Debug, Default, Clone)]
pub struct SqliteParams {
    params: Vec<Param>,
    positional: bool,
}

impl SqliteParams {
    /// Parameters bound by name, as `:name`, `@name` or `$name`.
    pub fn named() -> SqliteParams {
        SqliteParams::default()
    }

    /// Parameters bound in order to `?1, ?2, ...`. Names are kept but not
    /// used for binding.
    pub fn positional() -> SqliteParams {
        SqliteParams {
            positional: true,
            ..SqliteParams::default()
        }
    }

    pub fn is_positional(&self) -> bool {
        self.positional
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Binds every parameter to `stmt`.
    ///
    /// Run the statement with [`Statement::raw_execute`] or
    /// [`SqliteCursor::bound`](crate::SqliteCursor::bound) afterwards.
    pub fn bind_to(&self, stmt: &mut Statement<'_>) -> Result<()> {
        stmt.clear_bindings();

        for (i, param) in self.params.iter().enumerate() {
            let index = if self.positional {
                i + 1
            } else {
                parameter_index(stmt, &param.name)?
                    .ok_or_else(|| err!("statement has no parameter named `{}`", param.name))?
            };

            stmt.raw_bind_parameter(index, Value(&param.value))
                .map_err(Error::driver)?;
        }

        tracing::trace!(
            params = self.params.len(),
            positional = self.positional,
            "bound parameters to statement"
        );
        Ok(())
    }
}

fn parameter_index(stmt: &Statement<'_>, name: &str) -> Result<Option<usize>> {
    for prefix in PREFIXES {
        let index = stmt
            .parameter_index(&format!("{prefix}{name}"))
            .map_err(Error::driver)?;

        if index.is_some() {
            return Ok(index);
        }
    }

    Ok(None)
}

impl ParamSink for SqliteParams {
    fn count(&self) -> usize {
        self.params.len()
    }

    fn create_slot(&mut self) -> &mut dyn ParamHandle {
        self.params.push(Param::default());
        let index = self.params.len() - 1;
        &mut self.params[index]
    }

    fn slot_at(&mut self, index: usize) -> &mut dyn ParamHandle {
        &mut self.params[index]
    }

    fn remove_at(&mut self, index: usize) {
        self.params.remove(index);
    }

    fn clear(&mut self) {
        self.params.clear();
    }
}

use crate::value;

use rowbind_core::{stmt::Value, Cursor, Error, Result, RowSource};
use rusqlite::{types::Value as SqlValue, Params, Rows, Statement};

/// The rows of a SQLite statement.
///
/// Each advance copies the row out of SQLite, so the accessors stay valid
/// until the next advance.
pub struct SqliteCursor<'stmt> {
    columns: Vec<String>,
    rows: Rows<'stmt>,
    current: Option<Vec<SqlValue>>,
}

impl<'stmt> SqliteCursor<'stmt> {
    /// Runs `stmt` with `params`.
    pub fn query<P: Params>(stmt: &'stmt mut Statement<'_>, params: P) -> Result<SqliteCursor<'stmt>> {
        let columns = column_names(stmt);
        let rows = stmt.query(params).map_err(Error::driver)?;

        Ok(SqliteCursor {
            columns,
            rows,
            current: None,
        })
    }

    /// Runs `stmt` with the parameters already bound to it, e.g. through
    /// [`SqliteParams::bind_to`](crate::SqliteParams::bind_to).
    pub fn bound(stmt: &'stmt mut Statement<'_>) -> SqliteCursor<'stmt> {
        let columns = column_names(stmt);

        SqliteCursor {
            columns,
            rows: stmt.raw_query(),
            current: None,
        }
    }

    #[track_caller]
    fn value(&self, ordinal: usize) -> &SqlValue {
        let Some(row) = &self.current else {
            panic!("cursor is not positioned on a row");
        };
        &row[ordinal]
    }
}

impl RowSource for SqliteCursor<'_> {
    fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn column_name(&self, ordinal: usize) -> &str {
        &self.columns[ordinal]
    }

    fn is_absent(&self, ordinal: usize) -> bool {
        matches!(self.value(ordinal), SqlValue::Null)
    }

    fn raw_value(&self, ordinal: usize) -> Result<Value> {
        value::from_sql(self.value(ordinal).into())
    }

    fn native_type_name(&self, ordinal: usize) -> Option<String> {
        value::type_name(self.value(ordinal)).map(str::to_string)
    }
}

impl Cursor for SqliteCursor<'_> {
    fn advance(&mut self) -> Result<bool> {
        let width = self.columns.len();

        let Some(row) = self.rows.next().map_err(Error::driver)? else {
            self.current = None;
            return Ok(false);
        };

        let values = (0..width)
            .map(|index| row.get_ref(index).map(SqlValue::from))
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(Error::driver)?;

        self.current = Some(values);
        Ok(true)
    }
}

impl core::fmt::Debug for SqliteCursor<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SqliteCursor")
            .field("columns", &self.columns)
            .field("current", &self.current)
            .finish()
    }
}

fn column_names(stmt: &Statement<'_>) -> Vec<String> {
    stmt.column_names()
        .into_iter()
        .map(str::to_string)
        .collect()
}

use rowbind_core::stmt::Value as CoreValue;
use rusqlite::types::{ToSql, ToSqlOutput, Value as SqlValue, ValueRef};

/// A storage value on its way into a statement.
#[derive(Debug)]
pub(crate) struct Value<'a>(pub(crate) &'a CoreValue);

impl ToSql for Value<'_> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        use CoreValue::*;

        Ok(match self.0 {
            Bool(true) => ToSqlOutput::Owned(SqlValue::Integer(1)),
            Bool(false) => ToSqlOutput::Owned(SqlValue::Integer(0)),
            I8(v) => ToSqlOutput::Owned(SqlValue::Integer(*v as i64)),
            I16(v) => ToSqlOutput::Owned(SqlValue::Integer(*v as i64)),
            I32(v) => ToSqlOutput::Owned(SqlValue::Integer(*v as i64)),
            I64(v) => ToSqlOutput::Owned(SqlValue::Integer(*v)),
            U8(v) => ToSqlOutput::Owned(SqlValue::Integer(*v as i64)),
            U16(v) => ToSqlOutput::Owned(SqlValue::Integer(*v as i64)),
            U32(v) => ToSqlOutput::Owned(SqlValue::Integer(*v as i64)),
            U64(v) => ToSqlOutput::Owned(SqlValue::Integer(
                i64::try_from(*v).map_err(|err| rusqlite::Error::ToSqlConversionFailure(err.into()))?,
            )),
            F32(v) => ToSqlOutput::Owned(SqlValue::Real(*v as f64)),
            F64(v) => ToSqlOutput::Owned(SqlValue::Real(*v)),
            String(v) => ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes())),
            Bytes(v) => ToSqlOutput::Borrowed(ValueRef::Blob(&v[..])),
            Uuid(v) => ToSqlOutput::Owned(SqlValue::Text(v.to_string())),
            Null => ToSqlOutput::Owned(SqlValue::Null),
            List(_) => {
                return Err(rusqlite::Error::ToSqlConversionFailure(
                    "a list cannot be bound as a single SQLite parameter".into(),
                ))
            }
        })
    }
}

/// Reads a column value in SQLite's own representation.
pub(crate) fn from_sql(value: ValueRef<'_>) -> rowbind_core::Result<CoreValue> {
    Ok(match value {
        ValueRef::Null => CoreValue::Null,
        ValueRef::Integer(v) => CoreValue::I64(v),
        ValueRef::Real(v) => CoreValue::F64(v),
        ValueRef::Text(v) => CoreValue::String(
            std::str::from_utf8(v)
                .map_err(rowbind_core::Error::driver)?
                .to_string(),
        ),
        ValueRef::Blob(v) => CoreValue::Bytes(v.to_vec()),
    })
}

/// SQLite's name for the storage class of a value.
pub(crate) fn type_name(value: &SqlValue) -> Option<&'static str> {
    match value {
        SqlValue::Null => None,
        SqlValue::Integer(_) => Some("INTEGER"),
        SqlValue::Real(_) => Some("REAL"),
        SqlValue::Text(_) => Some("TEXT"),
        SqlValue::Blob(_) => Some("BLOB"),
    }
}

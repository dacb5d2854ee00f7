use rowbind_core::{
    driver::{Converter, Family, ParamHandle, TypeConverter},
    stmt::{Type, Value},
    Error, Result,
};

use std::sync::Arc;

/// The SQLite driver family.
///
/// SQLite stores integers as `INTEGER`, floats as `REAL`, text and UUIDs as
/// `TEXT` and bytes as `BLOB`. Booleans are `0` or `1`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sqlite;

impl Family for Sqlite {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn type_converter(&self) -> Arc<dyn TypeConverter> {
        Arc::new(Sqlite)
    }
}

impl TypeConverter for Sqlite {
    fn resolve(&self, ty: &Type) -> Arc<dyn Converter> {
        Arc::new(Column { ty: ty.clone() })
    }
}

/// Converts between a domain type and its SQLite storage class.
#[derive(Debug)]
struct Column {
    ty: Type,
}

impl Column {
    fn storage_ty(&self) -> Type {
        match &self.ty {
            Type::Bool | Type::I8 | Type::I16 | Type::I32 | Type::I64 => Type::I64,
            Type::U8 | Type::U16 | Type::U32 | Type::U64 => Type::I64,
            Type::F32 | Type::F64 => Type::F64,
            Type::String | Type::Uuid => Type::String,
            Type::Bytes => Type::Bytes,
            Type::List(_) | Type::Unknown => Type::Unknown,
        }
    }
}

impl Converter for Column {
    fn to_storage_value(&self, value: Value) -> Result<Value> {
        match (&self.ty, value) {
            (_, Value::Null) => Ok(Value::Null),
            (Type::List(_), value) => Err(Error::type_conversion(value, "SQLite parameter")),
            (_, Value::Bool(v)) => Ok(Value::I64(v as i64)),
            (_, Value::Uuid(v)) => Ok(Value::String(v.to_string())),
            (Type::Unknown, value) => Ok(value),
            (_, value) => self.storage_ty().cast(value),
        }
    }

    fn from_storage_value(&self, value: Value) -> Result<Value> {
        self.ty.cast(value)
    }

    fn configure(&self, handle: &mut dyn ParamHandle, nullable: bool) {
        handle.set_type(self.storage_ty());
        handle.set_nullable(nullable);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(ty: Type) -> Arc<dyn Converter> {
        Sqlite.resolve(&ty)
    }

    #[test]
    fn booleans_are_integers() {
        assert_eq!(
            column(Type::Bool).to_storage_value(Value::Bool(true)).unwrap(),
            Value::I64(1)
        );
        assert_eq!(
            column(Type::Bool).from_storage_value(Value::I64(0)).unwrap(),
            Value::Bool(false)
        );
    }

    #[test]
    fn uuids_are_text() {
        let id = uuid::Uuid::new_v4();
        let stored = column(Type::Uuid).to_storage_value(Value::Uuid(id)).unwrap();

        assert_eq!(stored, Value::String(id.to_string()));
        assert_eq!(
            column(Type::Uuid).from_storage_value(stored).unwrap(),
            Value::Uuid(id)
        );
    }

    #[test]
    fn integers_narrow_with_range_checks() {
        assert_eq!(
            column(Type::U8).from_storage_value(Value::I64(200)).unwrap(),
            Value::U8(200)
        );
        assert!(column(Type::U8)
            .from_storage_value(Value::I64(256))
            .unwrap_err()
            .is_type_conversion());
        assert!(column(Type::U64)
            .to_storage_value(Value::U64(u64::MAX))
            .is_err());
    }

    #[test]
    fn lists_have_no_storage_class() {
        let err = column(Type::list(Type::I64))
            .to_storage_value(Value::List(vec![Value::I64(1)]))
            .unwrap_err();
        assert!(err.is_type_conversion());
    }
}

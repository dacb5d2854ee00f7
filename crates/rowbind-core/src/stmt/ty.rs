use super::Value;
use crate::{Error, Result};

/// The type of a value, as seen by descriptors, converters and contracts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// Boolean value
    Bool,

    /// Opaque byte blob
    Bytes,

    /// 32-bit floating point number
    F32,

    /// 64-bit floating point number
    F64,

    /// Signed 8-bit integer
    I8,

    /// Signed 16-bit integer
    I16,

    /// Signed 32-bit integer
    I32,

    /// Signed 64-bit integer
    I64,

    /// A list of a single type
    List(Box<Type>),

    /// String type
    String,

    /// Unsigned 8-bit integer
    U8,

    /// Unsigned 16-bit integer
    U16,

    /// Unsigned 32-bit integer
    U32,

    /// Unsigned 64-bit integer
    U64,

    /// UUID
    Uuid,

    /// A type that could not be inferred, or that accepts any value.
    Unknown,
}

impl Type {
    pub fn list(ty: impl Into<Self>) -> Self {
        Self::List(Box::new(ty.into()))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool)
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Self::String)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// The element type of a list type.
    pub fn element(&self) -> Option<&Type> {
        match self {
            Self::List(item) => Some(item),
            _ => None,
        }
    }

    pub fn is_signed_integer(&self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32 | Self::I64)
    }

    pub fn is_unsigned_integer(&self) -> bool {
        matches!(self, Self::U8 | Self::U16 | Self::U32 | Self::U64)
    }

    pub fn is_integer(&self) -> bool {
        self.is_signed_integer() || self.is_unsigned_integer()
    }

    /// Width in bits for numeric types.
    fn width(&self) -> Option<u8> {
        Some(match self {
            Self::I8 | Self::U8 => 8,
            Self::I16 | Self::U16 => 16,
            Self::I32 | Self::U32 | Self::F32 => 32,
            Self::I64 | Self::U64 | Self::F64 => 64,
            _ => return None,
        })
    }

    /// Returns `true` if every value of type `other` can be stored in a slot
    /// of this type without loss.
    ///
    /// Identical types, widening within the same integer signedness, unsigned
    /// into a strictly wider signed integer, `F32` into `F64` and anything
    /// into `Unknown` are assignable. Lists are compared element-wise.
    pub fn is_assignable_from(&self, other: &Type) -> bool {
        if self == other || self.is_unknown() {
            return true;
        }

        match (self, other) {
            (Self::List(lhs), Self::List(rhs)) => lhs.is_assignable_from(rhs),
            (Self::F64, Self::F32) => true,
            (lhs, rhs) if lhs.is_signed_integer() && rhs.is_signed_integer() => {
                lhs.width() >= rhs.width()
            }
            (lhs, rhs) if lhs.is_unsigned_integer() && rhs.is_unsigned_integer() => {
                lhs.width() >= rhs.width()
            }
            (lhs, rhs) if lhs.is_signed_integer() && rhs.is_unsigned_integer() => {
                lhs.width() > rhs.width()
            }
            _ => false,
        }
    }

    /// Converts `value` into this type.
    ///
    /// Null passes through unchanged. Integers convert between each other with
    /// range checks, integers convert to `Bool` (non-zero is `true`), text and
    /// 16-byte blobs convert to `Uuid`, and numbers widen to floats.
    pub fn cast(&self, value: Value) -> Result<Value> {
        if value.is_null() || value.is_a(self) {
            return Ok(value);
        }

        Ok(match (self, value) {
            (Self::I8, value) => Value::I8(value.try_into()?),
            (Self::I16, value) => Value::I16(value.try_into()?),
            (Self::I32, value) => Value::I32(value.try_into()?),
            (Self::I64, value) => Value::I64(value.try_into()?),
            (Self::U8, value) => Value::U8(value.try_into()?),
            (Self::U16, value) => Value::U16(value.try_into()?),
            (Self::U32, value) => Value::U32(value.try_into()?),
            (Self::U64, value) => Value::U64(value.try_into()?),
            (Self::Bool, value) if value.infer_ty().is_integer() => {
                Value::Bool(i64::try_from(value)? != 0)
            }
            (Self::F32, value) => Value::F32(value.try_into()?),
            (Self::F64, value) => Value::F64(value.try_into()?),
            (Self::String, Value::Uuid(v)) => Value::String(v.to_string()),
            (Self::Uuid, value) => Value::Uuid(value.try_into()?),
            (Self::List(item), Value::List(items)) => Value::List(
                items
                    .into_iter()
                    .map(|item_value| item.cast(item_value))
                    .collect::<Result<_>>()?,
            ),
            (ty, value) => return Err(Error::type_conversion(value, format!("{ty:?}"))),
        })
    }
}

impl From<&Self> for Type {
    fn from(value: &Self) -> Self {
        value.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_widening_is_assignable() {
        assert!(Type::I64.is_assignable_from(&Type::I32));
        assert!(Type::I64.is_assignable_from(&Type::U32));
        assert!(!Type::I32.is_assignable_from(&Type::I64));
        assert!(!Type::I32.is_assignable_from(&Type::U32));
        assert!(Type::U64.is_assignable_from(&Type::U8));
        assert!(!Type::U64.is_assignable_from(&Type::I8));
    }

    #[test]
    fn floats_and_unknown() {
        assert!(Type::F64.is_assignable_from(&Type::F32));
        assert!(!Type::F32.is_assignable_from(&Type::F64));
        assert!(Type::Unknown.is_assignable_from(&Type::Bytes));
        assert!(!Type::String.is_assignable_from(&Type::Bytes));
    }

    #[test]
    fn lists_compare_elements() {
        assert!(Type::list(Type::I64).is_assignable_from(&Type::list(Type::I16)));
        assert!(!Type::list(Type::I16).is_assignable_from(&Type::list(Type::I64)));
    }

    #[test]
    fn cast_integer_to_bool() {
        assert_eq!(Type::Bool.cast(Value::I64(1)).unwrap(), Value::Bool(true));
        assert_eq!(Type::Bool.cast(Value::I64(0)).unwrap(), Value::Bool(false));
    }

    #[test]
    fn cast_narrowing_checks_range() {
        assert_eq!(Type::I8.cast(Value::I64(12)).unwrap(), Value::I8(12));
        assert!(Type::I8.cast(Value::I64(300)).unwrap_err().is_type_conversion());
        assert!(Type::U32.cast(Value::I32(-1)).is_err());
    }

    #[test]
    fn cast_text_to_uuid() {
        let id = uuid::Uuid::new_v4();
        assert_eq!(
            Type::Uuid.cast(Value::String(id.to_string())).unwrap(),
            Value::Uuid(id)
        );
        assert_eq!(
            Type::String.cast(Value::Uuid(id)).unwrap(),
            Value::String(id.to_string())
        );
    }

    #[test]
    fn cast_null_passes_through() {
        assert_eq!(Type::I32.cast(Value::Null).unwrap(), Value::Null);
    }

    #[test]
    fn cast_list_elements() {
        let cast = Type::list(Type::I64)
            .cast(Value::List(vec![Value::I8(1), Value::I32(2)]))
            .unwrap();
        assert_eq!(cast, Value::List(vec![Value::I64(1), Value::I64(2)]));
    }

    #[test]
    fn cast_incompatible() {
        let err = Type::Bytes.cast(Value::Bool(true)).unwrap_err();
        assert_eq!(err.to_string(), "cannot convert Bool to Bytes");
    }
}

use super::Value;
use crate::Error;

macro_rules! impl_num {
    (
        $(
            $variant:ident($ty:ty)
        )*
    ) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }

            impl From<&$ty> for Value {
                fn from(value: &$ty) -> Self {
                    Self::$variant(*value)
                }
            }

            // Cross-width conversions use std's `try_from` for bounds checking.
            impl TryFrom<Value> for $ty {
                type Error = Error;

                fn try_from(value: Value) -> Result<Self, Self::Error> {
                    let converted = match &value {
                        Value::Bool(v) => <$ty>::try_from(*v as u8).ok(),
                        Value::I8(v) => <$ty>::try_from(*v).ok(),
                        Value::I16(v) => <$ty>::try_from(*v).ok(),
                        Value::I32(v) => <$ty>::try_from(*v).ok(),
                        Value::I64(v) => <$ty>::try_from(*v).ok(),
                        Value::U8(v) => <$ty>::try_from(*v).ok(),
                        Value::U16(v) => <$ty>::try_from(*v).ok(),
                        Value::U32(v) => <$ty>::try_from(*v).ok(),
                        Value::U64(v) => <$ty>::try_from(*v).ok(),
                        _ => None,
                    };

                    converted.ok_or_else(|| Error::type_conversion(value, stringify!($ty)))
                }
            }
        )*
    };
}

impl_num! {
    I8(i8)
    I16(i16)
    I32(i32)
    I64(i64)
    U8(u8)
    U16(u16)
    U32(u32)
    U64(u64)
}

impl TryFrom<Value> for bool {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(v) => Ok(v),
            _ => Err(Error::type_conversion(value, "bool")),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::F64(v) => Ok(v),
            Value::F32(v) => Ok(v as f64),
            Value::I8(v) => Ok(v as f64),
            Value::I16(v) => Ok(v as f64),
            Value::I32(v) => Ok(v as f64),
            Value::I64(v) => Ok(v as f64),
            Value::U8(v) => Ok(v as f64),
            Value::U16(v) => Ok(v as f64),
            Value::U32(v) => Ok(v as f64),
            Value::U64(v) => Ok(v as f64),
            _ => Err(Error::type_conversion(value, "f64")),
        }
    }
}

impl TryFrom<Value> for f32 {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::F32(v) => Ok(v),
            Value::F64(v) => Ok(v as f32),
            Value::I8(v) => Ok(v as f32),
            Value::I16(v) => Ok(v as f32),
            Value::U8(v) => Ok(v as f32),
            Value::U16(v) => Ok(v as f32),
            _ => Err(Error::type_conversion(value, "f32")),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(v) => Ok(v),
            _ => Err(Error::type_conversion(value, "String")),
        }
    }
}

impl TryFrom<Value> for Vec<u8> {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bytes(v) => Ok(v),
            _ => Err(Error::type_conversion(value, "Vec<u8>")),
        }
    }
}

impl TryFrom<Value> for uuid::Uuid {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Uuid(v) => Ok(v),
            Value::String(v) => Ok(v.parse()?),
            Value::Bytes(v) => Ok(uuid::Uuid::from_slice(&v)?),
            _ => Err(Error::type_conversion(value, "Uuid")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widen_and_narrow() {
        assert_eq!(i64::try_from(Value::I8(-4)).unwrap(), -4);
        assert_eq!(u8::try_from(Value::I64(255)).unwrap(), 255);
        assert!(u8::try_from(Value::I64(256)).is_err());
        assert!(u64::try_from(Value::I32(-1)).is_err());
    }

    #[test]
    fn bool_to_integer() {
        assert_eq!(i32::try_from(Value::Bool(true)).unwrap(), 1);
    }

    #[test]
    fn string_is_not_a_number() {
        let err = i64::try_from(Value::from("12")).unwrap_err();
        assert_eq!(err.to_string(), "cannot convert String to i64");
    }

    #[test]
    fn uuid_from_text_and_bytes() {
        let id = uuid::Uuid::new_v4();
        assert_eq!(uuid::Uuid::try_from(Value::from(id.to_string())).unwrap(), id);
        assert_eq!(
            uuid::Uuid::try_from(Value::Bytes(id.as_bytes().to_vec())).unwrap(),
            id
        );
        assert!(uuid::Uuid::try_from(Value::from("nope")).is_err());
    }
}

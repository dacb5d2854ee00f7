use crate::Result;

use rowbind_core::stmt::{Type, Value};

/// A Rust type that maps onto a single [`Value`].
///
/// Every primitive has a default, which is what a member receives when its
/// value is absent or ignored.
pub trait Primitive: Sized + Default {
    const NULLABLE: bool = false;

    /// The value type, without nullability.
    fn ty() -> Type;

    fn load(value: Value) -> Result<Self>;

    fn to_value(&self) -> Value;
}

macro_rules! impl_primitive {
    (
        $(
            $ty:ty => $variant:ident,
        )*
    ) => {
        $(
            impl Primitive for $ty {
                fn ty() -> Type {
                    Type::$variant
                }

                fn load(value: Value) -> Result<Self> {
                    value.try_into()
                }

                fn to_value(&self) -> Value {
                    Value::$variant(self.clone())
                }
            }

            // Collections of scalars are lists. `Vec<u8>` is a byte blob
            // instead, so list impls are spelled out per element type.
            impl Primitive for Vec<$ty> {
                fn ty() -> Type {
                    Type::list(Type::$variant)
                }

                fn load(value: Value) -> Result<Self> {
                    match value {
                        Value::List(items) => items.into_iter().map(<$ty>::load).collect(),
                        value => Err(rowbind_core::Error::type_conversion(
                            value,
                            concat!("Vec<", stringify!($ty), ">"),
                        )),
                    }
                }

                fn to_value(&self) -> Value {
                    Value::List(self.iter().map(Primitive::to_value).collect())
                }
            }
        )*
    };
}

impl_primitive! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    String => String,
    uuid::Uuid => Uuid,
}

impl Primitive for u8 {
    fn ty() -> Type {
        Type::U8
    }

    fn load(value: Value) -> Result<Self> {
        value.try_into()
    }

    fn to_value(&self) -> Value {
        Value::U8(*self)
    }
}

impl Primitive for Vec<u8> {
    fn ty() -> Type {
        Type::Bytes
    }

    fn load(value: Value) -> Result<Self> {
        value.try_into()
    }

    fn to_value(&self) -> Value {
        Value::Bytes(self.clone())
    }
}

impl<T: Primitive> Primitive for Option<T> {
    const NULLABLE: bool = true;

    fn ty() -> Type {
        T::ty()
    }

    fn load(value: Value) -> Result<Self> {
        if value.is_null() {
            Ok(None)
        } else {
            Ok(Some(T::load(value)?))
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Some(value) => value.to_value(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_is_nullable() {
        assert!(<Option<i32>>::NULLABLE);
        assert!(!<i32>::NULLABLE);
        assert_eq!(<Option<i32>>::ty(), Type::I32);
    }

    #[test]
    fn bytes_are_not_lists() {
        assert_eq!(<Vec<u8>>::ty(), Type::Bytes);
        assert_eq!(<Vec<i32>>::ty(), Type::list(Type::I32));
        assert_eq!(vec![1u8, 2].to_value(), Value::Bytes(vec![1, 2]));
    }

    #[test]
    fn list_load_converts_each_item() {
        let value = Value::List(vec![Value::I64(1), Value::I64(2)]);
        assert_eq!(<Vec<i32>>::load(value).unwrap(), vec![1, 2]);

        let err = <Vec<i32>>::load(Value::I64(1)).unwrap_err();
        assert_eq!(err.to_string(), "cannot convert I64 to Vec<i32>");
    }

    #[test]
    fn load_widens() {
        assert_eq!(i64::load(Value::I8(-2)).unwrap(), -2);
        assert_eq!(f64::load(Value::I32(2)).unwrap(), 2.0);
    }
}

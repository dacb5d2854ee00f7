use super::Type;

#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// Boolean value
    Bool(bool),

    /// An opaque byte blob. Never treated as a collection.
    Bytes(Vec<u8>),

    /// 32-bit floating point number
    F32(f32),

    /// 64-bit floating point number
    F64(f64),

    /// Signed 8-bit integer
    I8(i8),

    /// Signed 16-bit integer
    I16(i16),

    /// Signed 32-bit integer
    I32(i32),

    /// Signed 64-bit integer
    I64(i64),

    /// A list of values of the same type
    List(Vec<Value>),

    /// Null value
    #[default]
    Null,

    /// String value
    String(String),

    /// Unsigned 8-bit integer
    U8(u8),

    /// Unsigned 16-bit integer
    U16(u16),

    /// Unsigned 32-bit integer
    U32(u32),

    /// Unsigned 64-bit integer
    U64(u64),

    /// A UUID
    Uuid(uuid::Uuid),
}

impl Value {
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    pub fn list_from_vec(items: Vec<Self>) -> Self {
        Self::List(items)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(&**v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    #[track_caller]
    pub fn unwrap_list(self) -> Vec<Value> {
        match self {
            Self::List(items) => items,
            _ => panic!("expected Value::List; actual={self:#?}"),
        }
    }

    /// Infers the type of this value. `Null` and empty lists infer `Unknown`
    /// (element type) since nothing about them pins a type.
    pub fn infer_ty(&self) -> Type {
        match self {
            Self::Bool(_) => Type::Bool,
            Self::Bytes(_) => Type::Bytes,
            Self::F32(_) => Type::F32,
            Self::F64(_) => Type::F64,
            Self::I8(_) => Type::I8,
            Self::I16(_) => Type::I16,
            Self::I32(_) => Type::I32,
            Self::I64(_) => Type::I64,
            Self::List(items) => Type::list(
                items
                    .iter()
                    .find(|item| !item.is_null())
                    .map(Value::infer_ty)
                    .unwrap_or(Type::Unknown),
            ),
            Self::Null => Type::Unknown,
            Self::String(_) => Type::String,
            Self::U8(_) => Type::U8,
            Self::U16(_) => Type::U16,
            Self::U32(_) => Type::U32,
            Self::U64(_) => Type::U64,
            Self::Uuid(_) => Type::Uuid,
        }
    }

    /// Returns `true` if the value can be stored in a slot of type `ty`
    /// without conversion.
    pub fn is_a(&self, ty: &Type) -> bool {
        match (self, ty) {
            (Self::Null, _) | (_, Type::Unknown) => true,
            (Self::List(items), Type::List(item_ty)) => items.iter().all(|item| item.is_a(item_ty)),
            (value, ty) => value.infer_ty() == *ty,
        }
    }
}

impl From<bool> for Value {
    fn from(src: bool) -> Self {
        Self::Bool(src)
    }
}

impl From<f32> for Value {
    fn from(src: f32) -> Self {
        Self::F32(src)
    }
}

impl From<f64> for Value {
    fn from(src: f64) -> Self {
        Self::F64(src)
    }
}

impl From<String> for Value {
    fn from(src: String) -> Self {
        Self::String(src)
    }
}

impl From<&String> for Value {
    fn from(src: &String) -> Self {
        Self::String(src.clone())
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Self {
        Self::String(src.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(src: Vec<u8>) -> Self {
        Self::Bytes(src)
    }
}

impl From<&[u8]> for Value {
    fn from(src: &[u8]) -> Self {
        Self::Bytes(src.to_vec())
    }
}

impl From<uuid::Uuid> for Value {
    fn from(src: uuid::Uuid) -> Self {
        Self::Uuid(src)
    }
}

impl From<Vec<Value>> for Value {
    fn from(src: Vec<Value>) -> Self {
        Self::List(src)
    }
}

impl<T> From<Option<T>> for Value
where
    Value: From<T>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::from(value),
            None => Self::Null,
        }
    }
}

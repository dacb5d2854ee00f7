use super::{Family, ParamHandle};
use crate::{
    stmt::{Type, Value},
    Result,
};

use std::{fmt::Debug, sync::Arc};

/// Moves values of one domain type to and from a driver's storage
/// representation.
pub trait Converter: Debug + Send + Sync {
    /// Domain value to the value handed to the driver.
    fn to_storage_value(&self, value: Value) -> Result<Value>;

    /// Value read from the driver to the domain value.
    fn from_storage_value(&self, value: Value) -> Result<Value>;

    /// Prepares a parameter slot that will carry a value of this type.
    fn configure(&self, handle: &mut dyn ParamHandle, nullable: bool);
}

/// The conversion table: resolves a [`Converter`] for each domain type.
pub trait TypeConverter: Debug + Send + Sync {
    fn resolve(&self, ty: &Type) -> Arc<dyn Converter>;
}

/// The conversion table of drivers whose storage values are the domain
/// values themselves; conversion is a [`Type::cast`].
#[derive(Debug, Default, Clone, Copy)]
pub struct Standard;

impl Family for Standard {
    fn name(&self) -> &'static str {
        "standard"
    }

    fn type_converter(&self) -> Arc<dyn TypeConverter> {
        Arc::new(Standard)
    }
}

impl TypeConverter for Standard {
    fn resolve(&self, ty: &Type) -> Arc<dyn Converter> {
        Arc::new(Cast::new(ty.clone()))
    }
}

/// Converts by casting into a fixed type in both directions.
#[derive(Debug, Clone)]
pub struct Cast {
    ty: Type,
}

impl Cast {
    pub fn new(ty: Type) -> Cast {
        Cast { ty }
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }
}

impl Converter for Cast {
    fn to_storage_value(&self, value: Value) -> Result<Value> {
        self.ty.cast(value)
    }

    fn from_storage_value(&self, value: Value) -> Result<Value> {
        self.ty.cast(value)
    }

    fn configure(&self, handle: &mut dyn ParamHandle, nullable: bool) {
        handle.set_type(self.ty.clone());
        handle.set_nullable(nullable);
    }
}

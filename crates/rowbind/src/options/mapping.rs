use crate::Result;

use rowbind_core::{
    stmt::{Type, Value},
    RowSource,
};

use std::{any::Any, sync::Arc};

type ReadFn = dyn Fn(&dyn RowSource, usize) -> Result<Value> + Send + Sync;

/// A custom read conversion for one member.
///
/// The function receives the live cursor and the resolved column ordinal
/// and replaces the standard null test and type conversion entirely.
#[derive(Clone)]
pub struct Mapping {
    ty: Type,
    read: Arc<MappingFn>,
}

struct MappingFn(Box<ReadFn>);

impl Mapping {
    /// `ty` is the type of the values `read` produces; it must be assignable
    /// to the member's type.
    pub fn new<F>(ty: Type, read: F) -> Mapping
    where
        F: Fn(&dyn RowSource, usize) -> Result<Value> + Send + Sync + 'static,
    {
        Mapping {
            ty,
            read: Arc::new(MappingFn(Box::new(read))),
        }
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    pub fn read(&self, row: &dyn RowSource, ordinal: usize) -> Result<Value> {
        (self.read.0)(row, ordinal)
    }

    pub(crate) fn identity(&self) -> Arc<dyn Any + Send + Sync> {
        self.read.clone()
    }
}

impl core::fmt::Debug for Mapping {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Mapping").field("ty", &self.ty).finish()
    }
}

/// A custom source for one bound parameter, in place of a member getter.
pub struct Selector<T> {
    ty: Type,
    nullable: bool,
    select: Arc<SelectorFn<T>>,
}

struct SelectorFn<T>(Box<dyn Fn(&T) -> Value + Send + Sync>);

impl<T: 'static> Selector<T> {
    pub fn new<F>(ty: Type, select: F) -> Selector<T>
    where
        F: Fn(&T) -> Value + Send + Sync + 'static,
    {
        Selector {
            ty,
            nullable: false,
            select: Arc::new(SelectorFn(Box::new(select))),
        }
    }

    pub(crate) fn identity(&self) -> Arc<dyn Any + Send + Sync> {
        self.select.clone()
    }
}

impl<T> Selector<T> {
    /// Marks the selector as possibly producing null.
    pub fn nullable(mut self) -> Selector<T> {
        self.nullable = true;
        self
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn select(&self, source: &T) -> Value {
        (self.select.0)(source)
    }
}

impl<T> Clone for Selector<T> {
    fn clone(&self) -> Self {
        Selector {
            ty: self.ty.clone(),
            nullable: self.nullable,
            select: self.select.clone(),
        }
    }
}

impl<T> core::fmt::Debug for Selector<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Selector")
            .field("ty", &self.ty)
            .field("nullable", &self.nullable)
            .finish()
    }
}

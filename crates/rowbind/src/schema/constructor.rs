use super::{Args, Attrs};
use crate::Result;

use rowbind_core::stmt::Type;

/// A way of creating an instance of `T`.
///
/// A constructor without parameters is an instance factory: the instance it
/// creates is populated member by member.
pub struct Constructor<T> {
    /// Display name, e.g. `User` for the struct literal or `User::new`.
    pub name: &'static str,

    pub params: Vec<Param>,

    /// Builds the instance from one argument per parameter, in order.
    pub invoke: fn(Args) -> Result<T>,
}

/// A named constructor parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: &'static str,
    pub ty: Type,
    pub nullable: bool,
    pub attrs: Attrs,
}

impl<T> Constructor<T> {
    pub fn is_factory(&self) -> bool {
        self.params.is_empty()
    }
}

impl<T> core::fmt::Debug for Constructor<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Constructor")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish()
    }
}

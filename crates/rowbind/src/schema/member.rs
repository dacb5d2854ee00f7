use super::Attrs;
use crate::Result;

use rowbind_core::stmt::{Type, Value};

/// A field or property of a record type.
pub struct Member<T> {
    pub name: &'static str,

    /// Type of the value the member holds, without its nullability.
    pub ty: Type,

    /// True if the member may hold an absent value.
    pub nullable: bool,

    pub kind: MemberKind,

    /// Writes the member; `None` for read-only members.
    pub set: Option<fn(&mut T, Value) -> Result<()>>,

    /// Reads the member; `None` for write-only members.
    pub get: Option<fn(&T) -> Value>,

    pub attrs: Attrs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Field,

    /// A computed member. When it is backed by a field that is already a
    /// member, only the field is used.
    Property { backing_field: Option<&'static str> },
}

impl<T> Member<T> {
    pub fn is_field(&self) -> bool {
        matches!(self.kind, MemberKind::Field)
    }

    pub fn is_settable(&self) -> bool {
        self.set.is_some()
    }

    pub fn is_readable(&self) -> bool {
        self.get.is_some()
    }
}

impl<T> core::fmt::Debug for Member<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Member")
            .field("name", &self.name)
            .field("ty", &self.ty)
            .field("nullable", &self.nullable)
            .field("kind", &self.kind)
            .field("settable", &self.is_settable())
            .field("readable", &self.is_readable())
            .field("attrs", &self.attrs)
            .finish()
    }
}

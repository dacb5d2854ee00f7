use super::{Constructor, Member};

/// Everything the compiler needs to know about a record type.
pub struct Shape<T> {
    /// Name of the record type, used in diagnostics.
    pub name: &'static str,

    /// Constructors, in declaration order.
    pub constructors: Vec<Constructor<T>>,

    /// Members, in declaration order.
    pub members: Vec<Member<T>>,
}

impl<T> Shape<T> {
    pub fn member(&self, name: &str) -> Option<&Member<T>> {
        self.members.iter().find(|member| member.name == name)
    }

    /// The instance factory, if the type has one.
    pub fn factory(&self) -> Option<&Constructor<T>> {
        self.constructors.iter().find(|c| c.is_factory())
    }
}

impl<T> core::fmt::Debug for Shape<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Shape")
            .field("name", &self.name)
            .field("constructors", &self.constructors)
            .field("members", &self.members)
            .finish()
    }
}

use crate::options::{Mapping, Selector};

use rowbind_core::stmt::{Type, Value};

/// Where a read value goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// A constructor argument slot.
    Arg(usize),

    /// A member of the shape, set after the instance is created.
    Member(usize),
}

/// How one member or constructor parameter is read from a row.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    /// Member or parameter name.
    pub name: String,

    pub target: Target,

    pub ty: Type,

    pub nullable: bool,

    /// Never read; the target receives its default.
    pub ignore: bool,

    /// Test the column for an absent value on every row.
    pub test_null: bool,

    pub mapping: Option<Mapping>,

    /// Name of the source column.
    pub column: String,
}

impl FieldDescriptor {
    pub fn has_custom_mapping(&self) -> bool {
        self.mapping.is_some()
    }

    /// A missing column yields the default instead of an error.
    pub(crate) fn is_optional(&self) -> bool {
        self.nullable || self.test_null
    }
}

/// Where a bound value comes from.
pub enum Source<T> {
    Member(fn(&T) -> Value),
    Selector(Selector<T>),
}

impl<T> Source<T> {
    pub fn get(&self, source: &T) -> Value {
        match self {
            Source::Member(get) => get(source),
            Source::Selector(selector) => selector.select(source),
        }
    }
}

impl<T> Clone for Source<T> {
    fn clone(&self) -> Self {
        match self {
            Source::Member(get) => Source::Member(*get),
            Source::Selector(selector) => Source::Selector(selector.clone()),
        }
    }
}

impl<T> core::fmt::Debug for Source<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Source::Member(_) => f.write_str("Member"),
            Source::Selector(selector) => core::fmt::Debug::fmt(selector, f),
        }
    }
}

/// How one member is bound as a parameter.
pub struct ParamDescriptor<T> {
    /// Parameter name. Reduced collections bind `{name}1..{name}N`.
    pub name: String,

    /// Name of the member the value is taken from.
    pub member: &'static str,

    pub source: Source<T>,

    pub ty: Type,

    pub nullable: bool,

    pub ignore_when_null: bool,

    pub reduce: bool,

    pub position: Option<usize>,
}

impl<T> Clone for ParamDescriptor<T> {
    fn clone(&self) -> Self {
        ParamDescriptor {
            name: self.name.clone(),
            member: self.member,
            source: self.source.clone(),
            ty: self.ty.clone(),
            nullable: self.nullable,
            ignore_when_null: self.ignore_when_null,
            reduce: self.reduce,
            position: self.position,
        }
    }
}

impl<T> core::fmt::Debug for ParamDescriptor<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ParamDescriptor")
            .field("name", &self.name)
            .field("member", &self.member)
            .field("source", &self.source)
            .field("ty", &self.ty)
            .field("nullable", &self.nullable)
            .field("ignore_when_null", &self.ignore_when_null)
            .field("reduce", &self.reduce)
            .field("position", &self.position)
            .finish()
    }
}

//! The introspected shape of a record type.
//!
//! A [`Shape`] is what `#[derive(Record)]` generates: every constructor and
//! every member of the type, with accessors the compiled plans call instead
//! of reflecting at runtime.

mod args;
pub use args::Args;

mod attrs;
pub use attrs::Attrs;

mod constructor;
pub use constructor::{Constructor, Param};

mod member;
pub use member::{Member, MemberKind};

mod shape;
pub use shape::Shape;

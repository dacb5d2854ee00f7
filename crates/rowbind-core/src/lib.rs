mod diagnostic;
pub use diagnostic::Diagnostic;

pub mod driver;
pub use driver::{AsyncCursor, Cursor, ParamHandle, ParamSink, RowSource};

mod error;
pub use error::{Error, IntoError};

pub mod nullability;
pub use nullability::NullabilitySource;

pub mod stmt;

/// A Result type alias that uses Rowbind's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;

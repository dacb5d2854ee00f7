pub mod convert;
pub use convert::{Converter, TypeConverter};

mod cursor;
pub use cursor::{AsyncCursor, Cursor, RowSource};

pub mod mem;

mod sink;
pub use sink::{Direction, ParamHandle, ParamSink};

use std::{fmt::Debug, sync::Arc};

/// A family of drivers sharing one value representation.
///
/// Every driver of a family reads and binds values through the same
/// conversion table, so the scaffolding built from that table is shared
/// process-wide, keyed by [`Family::name`].
pub trait Family: Debug + Send + Sync + 'static {
    /// Unique name of the family.
    fn name(&self) -> &'static str;

    /// The conversion table used to move values between the domain and the
    /// driver's storage representation.
    fn type_converter(&self) -> Arc<dyn TypeConverter>;
}

//! What a read hands back.

mod column;
pub use column::ResultColumn;

mod materialized;
pub use materialized::Materialized;

mod rows;
pub use rows::{Rows, State};

mod scalar;
pub use scalar::Scalar;
pub(crate) use scalar::read_scalar;

mod primitive;
pub use primitive::Primitive;

pub use rowbind_core::stmt::{Type, Value};

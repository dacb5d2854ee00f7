//! Compiled plans and the descriptors they were compiled from.

mod bind;
pub use bind::BindPlan;

mod descriptor;
pub use descriptor::{FieldDescriptor, ParamDescriptor, Source, Target};

mod read;
pub use read::ReadPlan;
pub(crate) use read::{Build, Reader};

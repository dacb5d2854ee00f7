//! Compiles record types into reusable plans that read rows into instances
//! and bind instances as statement parameters.
//!
//! The analysis of a record (which constructor to call, which column feeds
//! which member, how absent values are handled) runs once per record and
//! option set. Running a plan only moves values.

mod cache;

mod engine;

pub mod mapper;
pub use mapper::{Builder, Mapper, Settings};

pub mod options;
pub use options::{BindOptions, Contract, Mapping, ReadOptions, SchemaCapture, Selector};

pub mod plan;
pub use plan::{BindPlan, ReadPlan};

mod record;
pub use record::Record;

pub mod result;
pub use result::{Materialized, ResultColumn, Rows, Scalar};

pub mod schema;

pub mod stmt;

pub mod toolbox;

pub use rowbind_core::{driver, nullability, Diagnostic, Error, Result};

pub use rowbind_macros::Record;

pub use tokio_util::sync::CancellationToken;

#[doc(hidden)]
pub mod codegen_support {
    pub use crate::{
        schema::{Args, Attrs, Constructor, Member, MemberKind, Param, Shape},
        stmt::{Primitive, Type, Value},
        Record, Result,
    };
    pub use std::{default::Default, option::Option};
}

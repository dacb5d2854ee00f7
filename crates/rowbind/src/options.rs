//! Per-plan configuration.
//!
//! Options refine what the shape declares: they rename, ignore or remap
//! members without touching the record type. Every option set has a
//! fingerprint so compiled plans can be cached per `(type, options)` pair.

mod bind;
pub use bind::{BindOptions, ParamOverride};

mod contract;
pub use contract::{Contract, ContractEntry};

mod key;
pub(crate) use key::OptionsKey;

mod mapping;
pub use mapping::{Mapping, Selector};

mod read;
pub(crate) use read::ConstructorFilter;
pub use read::{FieldOverride, NullHandling, ReadOptions, SchemaCapture};

use super::{Contract, Mapping, OptionsKey};
use crate::schema::Constructor;

use indexmap::IndexMap;
use serde::Deserialize;
use std::{any::Any, sync::Arc};

/// How a read plan treats an absent value for one member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NullHandling {
    /// Test every row; an absent value yields the member's default.
    Test,

    /// Never test; the value goes straight to conversion, which fails for
    /// members that cannot hold null.
    Assume,
}

/// Which column metadata a read captures alongside its rows.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaCapture {
    #[default]
    Off,

    /// One [`ResultColumn`](crate::result::ResultColumn) per physical column.
    Columns,

    /// Columns plus the driver's native type name for each, probed row by
    /// row until every column has reported one.
    ColumnsWithTypes,
}

impl SchemaCapture {
    pub fn is_enabled(self) -> bool {
        !matches!(self, SchemaCapture::Off)
    }
}

/// Overrides for a single member of a read.
#[derive(Debug, Default, Clone)]
pub struct FieldOverride {
    /// Source column name.
    pub column: Option<String>,

    pub ignore: Option<bool>,

    pub mapping: Option<Mapping>,

    pub null_handling: Option<NullHandling>,
}

pub(crate) struct ConstructorFilter<T>(Box<dyn Fn(&Constructor<T>) -> bool + Send + Sync>);

impl<T> ConstructorFilter<T> {
    pub(crate) fn allows(&self, constructor: &Constructor<T>) -> bool {
        (self.0)(constructor)
    }
}

/// Options for compiling a read plan for `T`.
///
/// Unset values fall back to the mapper's settings.
pub struct ReadOptions<T> {
    pub(crate) fields: IndexMap<String, FieldOverride>,
    pub(crate) always_test_null: Option<bool>,
    pub(crate) capture: Option<SchemaCapture>,
    pub(crate) capacity_hint: Option<usize>,
    pub(crate) constructor_filter: Option<Arc<ConstructorFilter<T>>>,
    pub(crate) contract: Option<Contract>,
}

impl<T> ReadOptions<T> {
    pub fn new() -> ReadOptions<T> {
        ReadOptions {
            fields: IndexMap::new(),
            always_test_null: None,
            capture: None,
            capacity_hint: None,
            constructor_filter: None,
            contract: None,
        }
    }

    /// Reads `member` from `column`.
    pub fn column(mut self, member: &str, column: impl Into<String>) -> Self {
        self.field_mut(member).column = Some(column.into());
        self
    }

    pub fn ignore(mut self, member: &str) -> Self {
        self.field_mut(member).ignore = Some(true);
        self
    }

    pub fn mapping(mut self, member: &str, mapping: Mapping) -> Self {
        self.field_mut(member).mapping = Some(mapping);
        self
    }

    pub fn null_handling(mut self, member: &str, null_handling: NullHandling) -> Self {
        self.field_mut(member).null_handling = Some(null_handling);
        self
    }

    /// Replaces every override of `member`.
    pub fn field(mut self, member: &str, field: FieldOverride) -> Self {
        self.fields.insert(member.to_string(), field);
        self
    }

    /// Tests every member for absent values, nullable or not.
    pub fn always_test_null(mut self, always_test_null: bool) -> Self {
        self.always_test_null = Some(always_test_null);
        self
    }

    pub fn capture(mut self, capture: SchemaCapture) -> Self {
        self.capture = Some(capture);
        self
    }

    /// Expected number of rows, used to size the row buffer.
    pub fn capacity_hint(mut self, capacity_hint: usize) -> Self {
        self.capacity_hint = Some(capacity_hint);
        self
    }

    /// Restricts the constructors the plan may use.
    pub fn constructor_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&Constructor<T>) -> bool + Send + Sync + 'static,
    {
        self.constructor_filter = Some(Arc::new(ConstructorFilter(Box::new(filter))));
        self
    }

    /// The columns the cursor is known to produce.
    pub fn contract(mut self, contract: Contract) -> Self {
        self.contract = Some(contract);
        self
    }

    fn field_mut(&mut self, member: &str) -> &mut FieldOverride {
        self.fields.entry(member.to_string()).or_default()
    }
}

impl<T: 'static> ReadOptions<T> {
    pub(crate) fn key(&self) -> OptionsKey {
        let mut key = OptionsKey::new("read");

        for (member, field) in &self.fields {
            key.push_str(member);
            key.push_opt_str(field.column.as_deref());
            key.push_opt_flag(field.ignore);
            key.push_opt_fn(field.mapping.as_ref().map(Mapping::identity));
            key.push_opt_tag(field.null_handling.map(|handling| handling as usize));
        }

        key.push_opt_flag(self.always_test_null);
        key.push_opt_tag(self.capture.map(|capture| capture as usize));
        key.push_opt_tag(self.capacity_hint);
        key.push_opt_fn(
            self.constructor_filter
                .clone()
                .map(|filter| filter as Arc<dyn Any + Send + Sync>),
        );
        key.push_contract(self.contract.as_ref());
        key
    }
}

impl<T> Default for ReadOptions<T> {
    fn default() -> Self {
        ReadOptions::new()
    }
}

impl<T> Clone for ReadOptions<T> {
    fn clone(&self) -> Self {
        ReadOptions {
            fields: self.fields.clone(),
            always_test_null: self.always_test_null,
            capture: self.capture,
            capacity_hint: self.capacity_hint,
            constructor_filter: self.constructor_filter.clone(),
            contract: self.contract.clone(),
        }
    }
}

impl<T> core::fmt::Debug for ReadOptions<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ReadOptions")
            .field("fields", &self.fields)
            .field("always_test_null", &self.always_test_null)
            .field("capture", &self.capture)
            .field("capacity_hint", &self.capacity_hint)
            .field("constructor_filter", &self.constructor_filter.is_some())
            .field("contract", &self.contract)
            .finish()
    }
}

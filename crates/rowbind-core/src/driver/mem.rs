//! In-memory driver pieces: a cursor over materialized rows and a
//! vector-backed parameter sink.

use super::{AsyncCursor, Cursor, Direction, ParamHandle, ParamSink, RowSource};
use crate::{
    async_trait,
    stmt::{Type, Value},
    Error, Result,
};

use std::{collections::VecDeque, ops};

/// A cursor over rows held in memory.
///
/// Native type names are derived from each value, so they vary per row the
/// way they do for dynamically typed stores.
#[derive(Debug, Default)]
pub struct MemCursor {
    columns: Vec<String>,
    pending: VecDeque<Result<Vec<Value>>>,
    current: Option<Vec<Value>>,
    advanced: usize,
}

impl MemCursor {
    pub fn new<I>(columns: I) -> MemCursor
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        MemCursor {
            columns: columns.into_iter().map(Into::into).collect(),
            ..MemCursor::default()
        }
    }

    /// Appends a row. The row must have one value per column.
    #[track_caller]
    pub fn row<I>(mut self, values: I) -> MemCursor
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let row: Vec<Value> = values.into_iter().map(Into::into).collect();
        assert_eq!(
            row.len(),
            self.columns.len(),
            "row has {} values; cursor has {} columns",
            row.len(),
            self.columns.len()
        );
        self.pending.push_back(Ok(row));
        self
    }

    /// Makes the advance past all previously added rows fail with `err`.
    pub fn error(mut self, err: Error) -> MemCursor {
        self.pending.push_back(Err(err));
        self
    }

    /// Number of successful advances so far.
    pub fn advanced(&self) -> usize {
        self.advanced
    }

    fn next_row(&mut self) -> Result<bool> {
        match self.pending.pop_front() {
            Some(Ok(row)) => {
                self.current = Some(row);
                self.advanced += 1;
                Ok(true)
            }
            Some(Err(err)) => {
                self.current = None;
                Err(err)
            }
            None => {
                self.current = None;
                Ok(false)
            }
        }
    }

    #[track_caller]
    fn value(&self, ordinal: usize) -> &Value {
        let Some(row) = &self.current else {
            panic!("cursor is not positioned on a row");
        };
        &row[ordinal]
    }
}

impl RowSource for MemCursor {
    fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn column_name(&self, ordinal: usize) -> &str {
        &self.columns[ordinal]
    }

    fn is_absent(&self, ordinal: usize) -> bool {
        self.value(ordinal).is_null()
    }

    fn raw_value(&self, ordinal: usize) -> Result<Value> {
        Ok(self.value(ordinal).clone())
    }

    fn native_type_name(&self, ordinal: usize) -> Option<String> {
        let value = self.value(ordinal);

        if value.is_null() {
            None
        } else {
            Some(format!("{:?}", value.infer_ty()))
        }
    }
}

impl Cursor for MemCursor {
    fn advance(&mut self) -> Result<bool> {
        self.next_row()
    }
}

#[async_trait]
impl AsyncCursor for MemCursor {
    async fn advance(&mut self) -> Result<bool> {
        self.next_row()
    }
}

/// A parameter slot held by [`ParamList`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub direction: Direction,
    pub value: Value,
    pub ty: Option<Type>,
    pub nullable: bool,
}

impl ParamHandle for Param {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: &str) {
        if self.name != name {
            self.name.clear();
            self.name.push_str(name);
        }
    }

    fn direction(&self) -> Direction {
        self.direction
    }

    fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    fn value(&self) -> &Value {
        &self.value
    }

    fn set_value(&mut self, value: Value) {
        self.value = value;
    }

    fn set_type(&mut self, ty: Type) {
        self.ty = Some(ty);
    }

    fn set_nullable(&mut self, nullable: bool) {
        self.nullable = nullable;
    }
}

/// A vector-backed [`ParamSink`].
#[derive(Debug, Default, Clone)]
pub struct ParamList {
    params: Vec<Param>,
    created: usize,
}

impl ParamList {
    pub fn new() -> ParamList {
        ParamList::default()
    }

    /// Total number of slots ever created through [`ParamSink::create_slot`].
    pub fn created(&self) -> usize {
        self.created
    }

    pub fn get(&self, name: &str) -> Option<&Param> {
        self.params.iter().find(|param| param.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.params.iter().map(|param| &param.name[..]).collect()
    }

    pub fn values(&self) -> Vec<&Value> {
        self.params.iter().map(|param| &param.value).collect()
    }
}

impl ops::Deref for ParamList {
    type Target = [Param];

    fn deref(&self) -> &Self::Target {
        &self.params[..]
    }
}

impl ParamSink for ParamList {
    fn count(&self) -> usize {
        self.params.len()
    }

    fn create_slot(&mut self) -> &mut dyn ParamHandle {
        self.created += 1;
        self.params.push(Param::default());
        let index = self.params.len() - 1;
        &mut self.params[index]
    }

    fn slot_at(&mut self, index: usize) -> &mut dyn ParamHandle {
        &mut self.params[index]
    }

    fn remove_at(&mut self, index: usize) {
        self.params.remove(index);
    }

    fn clear(&mut self) {
        self.params.clear();
    }
}

use super::ResultColumn;
use crate::{
    plan::{ReadPlan, Reader},
    Result,
};

use rowbind_core::Cursor;

/// Where a row stream is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Columns are not resolved yet.
    NotStarted,

    /// Positioned on a row.
    Reading,

    /// Every row was read, or the read failed.
    Done,

    /// The cursor had no rows at all.
    Empty,
}

/// Rows read one at a time from a cursor.
///
/// Column ordinals are resolved on the first call to `next`; a failure,
/// whether resolving, advancing or building a row, ends the stream.
pub struct Rows<'p, T, C> {
    plan: &'p ReadPlan<T>,
    cursor: C,
    state: State,
    reader: Option<Reader<'p, T>>,
}

impl<'p, T, C: Cursor> Rows<'p, T, C> {
    pub(crate) fn new(plan: &'p ReadPlan<T>, cursor: C) -> Rows<'p, T, C> {
        Rows {
            plan,
            cursor,
            state: State::NotStarted,
            reader: None,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Columns captured so far; empty before the first row or when capture
    /// is off.
    pub fn columns(&self) -> &[ResultColumn] {
        match &self.reader {
            Some(reader) => reader.columns(),
            None => &[],
        }
    }

    pub fn into_columns(self) -> Vec<ResultColumn> {
        self.reader
            .map(Reader::into_columns)
            .unwrap_or_default()
    }

    pub fn into_cursor(self) -> C {
        self.cursor
    }
}

impl<T, C: Cursor> Iterator for Rows<'_, T, C> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Result<T>> {
        match self.state {
            State::NotStarted => match Reader::new(self.plan, &self.cursor) {
                Ok(reader) => self.reader = Some(reader),
                Err(err) => {
                    self.state = State::Done;
                    return Some(Err(err));
                }
            },
            State::Reading => {}
            State::Done | State::Empty => return None,
        }

        match self.cursor.advance() {
            Ok(true) => {}
            Ok(false) => {
                self.state = match self.state {
                    State::NotStarted => State::Empty,
                    _ => State::Done,
                };
                return None;
            }
            Err(err) => {
                self.state = State::Done;
                return Some(Err(err));
            }
        }

        self.state = State::Reading;

        let reader = self.reader.as_mut()?;
        let row = reader.read_row(&self.cursor);

        if row.is_err() {
            self.state = State::Done;
        }

        Some(row)
    }
}

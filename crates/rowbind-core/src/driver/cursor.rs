use crate::{async_trait, stmt::Value, Result};

/// Column access for the row a cursor is positioned on.
///
/// Ordinals are zero-based. Accessors are only meaningful after a successful
/// advance.
pub trait RowSource {
    /// Number of physical columns in the result.
    fn column_count(&self) -> usize;

    /// Name of the column at `ordinal`.
    fn column_name(&self, ordinal: usize) -> &str;

    /// Looks a column up by name, ignoring ASCII case.
    fn ordinal_of(&self, name: &str) -> Option<usize> {
        (0..self.column_count()).find(|&ordinal| self.column_name(ordinal).eq_ignore_ascii_case(name))
    }

    /// Returns `true` if the current row holds no value at `ordinal`.
    fn is_absent(&self, ordinal: usize) -> bool;

    /// The driver-native value at `ordinal` for the current row.
    fn raw_value(&self, ordinal: usize) -> Result<Value>;

    /// The driver's type name for the value at `ordinal` in the current row.
    ///
    /// Some drivers type values rather than columns, so the answer may change
    /// from row to row and is usually `None` for absent values.
    fn native_type_name(&self, ordinal: usize) -> Option<String>;
}

/// A forward-only, stateful result cursor.
pub trait Cursor: RowSource {
    /// Moves to the next row. Returns `false` once the rows are exhausted.
    fn advance(&mut self) -> Result<bool>;
}

/// A forward-only cursor whose advance step may suspend.
#[async_trait]
pub trait AsyncCursor: RowSource + Send {
    /// Moves to the next row. Returns `false` once the rows are exhausted.
    async fn advance(&mut self) -> Result<bool>;
}

impl<T: RowSource + ?Sized> RowSource for &mut T {
    fn column_count(&self) -> usize {
        (**self).column_count()
    }

    fn column_name(&self, ordinal: usize) -> &str {
        (**self).column_name(ordinal)
    }

    fn ordinal_of(&self, name: &str) -> Option<usize> {
        (**self).ordinal_of(name)
    }

    fn is_absent(&self, ordinal: usize) -> bool {
        (**self).is_absent(ordinal)
    }

    fn raw_value(&self, ordinal: usize) -> Result<Value> {
        (**self).raw_value(ordinal)
    }

    fn native_type_name(&self, ordinal: usize) -> Option<String> {
        (**self).native_type_name(ordinal)
    }
}

impl<T: Cursor + ?Sized> Cursor for &mut T {
    fn advance(&mut self) -> Result<bool> {
        (**self).advance()
    }
}

#[async_trait]
impl<T: AsyncCursor + ?Sized> AsyncCursor for &mut T {
    async fn advance(&mut self) -> Result<bool> {
        (**self).advance().await
    }
}

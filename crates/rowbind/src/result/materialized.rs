use super::ResultColumn;

/// Every row of a read, with the captured column schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Materialized<T> {
    /// Empty unless schema capture was enabled.
    pub columns: Vec<ResultColumn>,

    pub rows: Vec<T>,
}

impl<T> Materialized<T> {
    pub(crate) fn new(columns: Vec<ResultColumn>, rows: Vec<T>) -> Materialized<T> {
        Materialized { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.rows.iter()
    }

    pub fn into_rows(self) -> Vec<T> {
        self.rows
    }

    pub fn consumed_columns(&self) -> impl Iterator<Item = &ResultColumn> + '_ {
        self.columns.iter().filter(|column| column.is_consumed)
    }
}

impl<T> IntoIterator for Materialized<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Materialized<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

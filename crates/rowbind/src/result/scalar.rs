use super::ResultColumn;
use crate::{stmt::Primitive, toolbox::Toolbox, Result};

use rowbind_core::Cursor;

/// The first column of the first row of a read.
#[derive(Debug, Clone, PartialEq)]
pub struct Scalar<V> {
    /// `None` when there was no row or the value was absent.
    pub value: Option<V>,

    /// The column the value was read from, if the cursor had one.
    pub column: Option<ResultColumn>,
}

impl<V> Scalar<V> {
    pub fn into_value(self) -> Option<V> {
        self.value
    }
}

pub(crate) fn read_scalar<V: Primitive, C: Cursor>(
    toolbox: &Toolbox,
    mut cursor: C,
) -> Result<Scalar<V>> {
    if cursor.column_count() == 0 {
        return Ok(Scalar {
            value: None,
            column: None,
        });
    }

    let mut column = ResultColumn {
        ordinal: 0,
        name: cursor.column_name(0).to_string(),
        is_consumed: true,
        type_name: None,
    };

    if !cursor.advance()? {
        return Ok(Scalar {
            value: None,
            column: Some(column),
        });
    }

    column.type_name = cursor.native_type_name(0);

    let value = if cursor.is_absent(0) {
        None
    } else {
        let converter = toolbox.converter(&V::ty());
        Some(V::load(converter.from_storage_value(cursor.raw_value(0)?)?)?)
    };

    Ok(Scalar {
        value,
        column: Some(column),
    })
}

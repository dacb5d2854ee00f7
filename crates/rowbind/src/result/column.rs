use serde::Serialize;

/// One physical column of an executed read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultColumn {
    pub ordinal: usize,

    pub name: String,

    /// True if some member was read from this column.
    pub is_consumed: bool,

    /// The driver's type name, when captured.
    pub type_name: Option<String>,
}

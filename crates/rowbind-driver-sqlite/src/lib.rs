//! SQLite driver family for rowbind, on top of `rusqlite`.
//!
//! [`SqliteCursor`] reads the rows of a statement and [`SqliteParams`]
//! collects bound parameters and applies them to a statement. Plans compiled
//! by a mapper built with the [`Sqlite`] family convert values to and from
//! SQLite's storage classes.

mod convert;
pub use convert::Sqlite;

mod cursor;
pub use cursor::SqliteCursor;

mod params;
pub use params::SqliteParams;

mod value;

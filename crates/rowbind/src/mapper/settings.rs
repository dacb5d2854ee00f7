use crate::options::SchemaCapture;

use serde::Deserialize;

/// Defaults applied to every plan a [`Mapper`](super::Mapper) compiles.
///
/// Per-plan options take precedence. Deserializes from any serde format;
/// missing keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Test every member for absent values, nullable or not.
    pub always_test_null: bool,

    pub capture: SchemaCapture,

    /// Expected number of rows per read.
    pub capacity_hint: Option<usize>,

    /// Keep compiled plans for reuse.
    pub cache_plans: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            always_test_null: false,
            capture: SchemaCapture::Off,
            capacity_hint: None,
            cache_plans: true,
        }
    }
}

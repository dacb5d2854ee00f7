use crate::{stmt::Primitive, Result};

use rowbind_core::stmt::Value;

/// Constructor arguments collected for one row.
///
/// A slot left empty (the member was ignored, or its column held no value)
/// yields the parameter type's default.
#[derive(Debug, Default)]
pub struct Args {
    slots: Vec<Option<Value>>,
}

impl Args {
    pub fn new(len: usize) -> Args {
        Args {
            slots: vec![None; len],
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// # Panics
    ///
    /// Panics if `slot` is out of bounds.
    #[track_caller]
    pub fn set(&mut self, slot: usize, value: Value) {
        self.slots[slot] = Some(value);
    }

    pub fn take<V: Primitive>(&mut self, slot: usize) -> Result<V> {
        match self.slots.get_mut(slot).and_then(Option::take) {
            Some(value) => V::load(value),
            None => Ok(V::default()),
        }
    }
}

impl FromIterator<Option<Value>> for Args {
    fn from_iter<I: IntoIterator<Item = Option<Value>>>(iter: I) -> Self {
        Args {
            slots: iter.into_iter().collect(),
        }
    }
}

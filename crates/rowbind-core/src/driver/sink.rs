use crate::stmt::{Type, Value};

/// Direction of a statement parameter.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    Input,
    Output,
    InputOutput,
    ReturnValue,
}

/// One parameter slot of a [`ParamSink`].
pub trait ParamHandle {
    fn name(&self) -> &str;

    fn set_name(&mut self, name: &str);

    fn direction(&self) -> Direction;

    fn set_direction(&mut self, direction: Direction);

    fn value(&self) -> &Value;

    fn set_value(&mut self, value: Value);

    /// Tags the slot with the type of the value it carries. A null value
    /// still carries the type of the member it was read from.
    fn set_type(&mut self, ty: Type);

    fn set_nullable(&mut self, nullable: bool);
}

/// An ordered, reusable collection of parameter slots.
///
/// Slots left over from a previous bind may be reused in place; a bind pass
/// ends by removing every slot past the last one it wrote.
pub trait ParamSink {
    fn count(&self) -> usize;

    /// Appends a fresh slot and returns it.
    fn create_slot(&mut self) -> &mut dyn ParamHandle;

    /// # Panics
    ///
    /// Panics if `index >= self.count()`.
    fn slot_at(&mut self, index: usize) -> &mut dyn ParamHandle;

    /// # Panics
    ///
    /// Panics if `index >= self.count()`.
    fn remove_at(&mut self, index: usize);

    fn clear(&mut self);
}

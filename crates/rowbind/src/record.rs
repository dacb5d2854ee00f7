use crate::schema::Shape;

/// A type rows can be read into and parameters bound from.
///
/// Usually derived with `#[derive(Record)]`; a hand-written impl describes
/// constructors and members the derive cannot see, such as computed
/// properties.
pub trait Record: Sized + 'static {
    fn shape() -> Shape<Self>;
}

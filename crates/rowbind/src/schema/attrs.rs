/// Declarative configuration attached to a member or constructor parameter.
///
/// Per-plan options override these.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Attrs {
    /// Source column or parameter name, when different from the member name.
    pub column: Option<&'static str>,

    /// Never read or bound.
    pub ignore: bool,

    /// Skip the parameter when the bound value is null.
    pub ignore_if_null: bool,

    /// Fixed parameter position.
    pub position: Option<usize>,

    /// Bind a collection as one parameter per element.
    pub reduce: bool,
}

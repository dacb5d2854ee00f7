use crate::stmt::Type;

/// A single problem found while compiling a record into a plan.
///
/// Diagnostics are accumulated and reported together through
/// [`Error::invalid_record`](crate::Error::invalid_record).
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// Neither a constructor with named parameters nor a member-init path
    /// (instance factory plus settable members) is available.
    NoUsableShape,

    /// Two or more descriptors resolve to the same (case-insensitive) name.
    DuplicateName { name: String, members: Vec<String> },

    /// An override targets a member the shape does not have.
    UnknownMember { name: String },

    /// A custom mapping produces a type the member cannot hold.
    MappingNotAssignable {
        member: String,
        member_ty: Type,
        mapping_ty: Type,
    },

    /// `ignore_when_null` was requested on a member that can never be null.
    IgnoreWhenNullNotNullable { member: String },

    /// A reducible collection cannot have a fixed position; its arity is
    /// only known at bind time.
    PositionOnReducible { member: String },

    /// A member that may be skipped when null cannot hold a fixed position.
    PositionOnIgnoreWhenNull { member: String },

    /// Explicit positions must form the sequence `0, 1, 2, ...`.
    PositionGap {
        member: String,
        expected: usize,
        found: usize,
    },

    /// Two members claim the same position.
    PositionConflict { position: usize, members: Vec<String> },

    /// A descriptor has no counterpart in the supplied contract.
    MissingFromContract { name: String },

    /// A contract entry is not covered by any descriptor.
    NotCovered { name: String },

    /// A descriptor's type does not match its contract entry.
    ContractTypeMismatch {
        name: String,
        expected: Type,
        actual: Type,
    },

    /// Null could flow from a nullable side into a non-nullable one.
    ContractNullability { name: String },
}

impl Diagnostic {
    /// The member or parameter name this diagnostic is about, if any.
    pub fn name(&self) -> Option<&str> {
        use Diagnostic::*;

        match self {
            NoUsableShape | PositionConflict { .. } => None,
            DuplicateName { name, .. }
            | UnknownMember { name }
            | MissingFromContract { name }
            | NotCovered { name }
            | ContractTypeMismatch { name, .. }
            | ContractNullability { name } => Some(name),
            MappingNotAssignable { member, .. }
            | IgnoreWhenNullNotNullable { member }
            | PositionOnReducible { member }
            | PositionOnIgnoreWhenNull { member }
            | PositionGap { member, .. } => Some(member),
        }
    }
}

impl core::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use Diagnostic::*;

        match self {
            NoUsableShape => f.write_str("no usable constructor or settable members"),
            DuplicateName { name, members } => {
                write!(f, "duplicate name `{name}` (declared by ")?;
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "`{member}`")?;
                }
                f.write_str(")")
            }
            UnknownMember { name } => write!(f, "override targets unknown member `{name}`"),
            MappingNotAssignable {
                member,
                member_ty,
                mapping_ty,
            } => write!(
                f,
                "custom mapping for `{member}` produces {mapping_ty:?}, which is not assignable to {member_ty:?}"
            ),
            IgnoreWhenNullNotNullable { member } => {
                write!(f, "`{member}` is ignored when null but is not nullable")
            }
            PositionOnReducible { member } => {
                write!(f, "reducible collection `{member}` cannot have a fixed position")
            }
            PositionOnIgnoreWhenNull { member } => write!(
                f,
                "`{member}` is ignored when null and cannot have a fixed position"
            ),
            PositionGap {
                member,
                expected,
                found,
            } => write!(
                f,
                "`{member}` has position {found}, expected position {expected}"
            ),
            PositionConflict { position, members } => {
                write!(f, "position {position} is claimed by {}", members.join(", "))
            }
            MissingFromContract { name } => write!(f, "`{name}` is not part of the contract"),
            NotCovered { name } => write!(f, "contract entry `{name}` is not covered"),
            ContractTypeMismatch {
                name,
                expected,
                actual,
            } => write!(
                f,
                "`{name}` has type {actual:?}, contract expects {expected:?}"
            ),
            ContractNullability { name } => write!(
                f,
                "`{name}` may be null but the receiving side is not nullable"
            ),
        }
    }
}
